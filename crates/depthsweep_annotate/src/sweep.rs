//! The resumable annotation sweep.

use crate::{PartitionReport, SweepConfig, SweepReport, annotate};
use depthsweep_core::{AnnotationKey, AnnotationRecord, ModelId, Persona, StoryRecord};
use depthsweep_error::DepthsweepResult;
use depthsweep_interface::{LanguageModel, LoadOptions, ModelLoader};
use depthsweep_storage::{AnnotationStore, CompletionLedger, Partition, PartitionLayout};
use derive_getters::Getters;
use std::time::Instant;
use tracing::{error, info, instrument};

/// Drives models over every temperature, persona and story.
///
/// Models are processed one at a time: each is loaded, swept across every
/// temperature, then unloaded before the next is loaded. Within a
/// partition the store is rewritten after every attempted story, so at most
/// the story in flight is lost when the process stops.
#[derive(Debug, Getters)]
pub struct SweepDriver<L> {
    loader: L,
    models: Vec<ModelId>,
    temperatures: Vec<f32>,
    personas: Vec<Persona>,
    load_options: LoadOptions,
    layout: PartitionLayout,
}

impl<L: ModelLoader> SweepDriver<L> {
    /// Create a driver for the sweep described by `config`.
    pub fn new(loader: L, config: &SweepConfig) -> Self {
        Self {
            loader,
            models: config.models.clone(),
            temperatures: config.temperatures.clone(),
            personas: config.personas(),
            load_options: config.load.clone(),
            layout: config.output.layout(),
        }
    }

    /// Run the whole sweep over `stories`.
    ///
    /// A model that fails to load, or a store that cannot be read or written,
    /// aborts the sweep. Generation failures are logged and skipped.
    #[instrument(skip(self, stories), fields(models = self.models.len(), stories = stories.len()))]
    pub async fn run(&self, stories: &[StoryRecord]) -> DepthsweepResult<SweepReport> {
        let mut report = SweepReport::default();

        for model_id in &self.models {
            let model = self.loader.load(model_id, &self.load_options).await?;

            let swept = self.sweep_model(model_id, &model, stories, &mut report).await;
            let unloaded = model.unload().await;
            swept?;
            unloaded?;
        }

        info!(
            annotated = report.annotated(),
            skipped = report.skipped(),
            failed = report.failed(),
            "Sweep complete"
        );
        Ok(report)
    }

    async fn sweep_model(
        &self,
        model_id: &ModelId,
        model: &L::Model,
        stories: &[StoryRecord],
        report: &mut SweepReport,
    ) -> DepthsweepResult<()> {
        for &temperature in &self.temperatures {
            let partition = Partition::new(model_id.clone(), temperature);
            let outcome = self.sweep_partition(model, partition, stories).await?;
            report.partitions.push(outcome);
        }
        Ok(())
    }

    #[instrument(skip(self, model, partition, stories), fields(partition = %partition))]
    async fn sweep_partition(
        &self,
        model: &L::Model,
        partition: Partition,
        stories: &[StoryRecord],
    ) -> DepthsweepResult<PartitionReport> {
        let path = self.layout.path_for(&partition);
        let store = AnnotationStore::new(path.clone());
        let ledger = CompletionLedger::load(&store).await?;
        let temperature = *partition.temperature();

        let mut outcome = PartitionReport::new(partition, path);
        let mut results: Vec<AnnotationRecord> = Vec::new();

        for persona in &self.personas {
            for story in stories {
                let key = AnnotationKey::for_story(*persona.participant_id(), story);
                if ledger.already_done(&key) {
                    info!("Skipping already annotated row: {}", key);
                    outcome.skipped += 1;
                    continue;
                }

                let started = Instant::now();
                match annotate(model, persona, story, temperature).await {
                    Ok(ratings) => {
                        let time_taken = started.elapsed().as_secs_f64();
                        info!(?ratings, time_taken, "Results for {}", key);
                        results.push(AnnotationRecord::new(ratings, persona, time_taken, story.clone()));
                        outcome.annotated += 1;
                    }
                    Err(e) => {
                        error!(error = %e, story = %story.text, "Error on: {}", key);
                        outcome.failed += 1;
                    }
                }

                store.persist(ledger.existing(), &results).await?;
            }
        }

        info!(
            annotated = outcome.annotated,
            skipped = outcome.skipped,
            failed = outcome.failed,
            "Partition complete"
        );
        Ok(outcome)
    }
}
