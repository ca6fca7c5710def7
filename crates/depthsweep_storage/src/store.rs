//! Per-partition annotation store.

use crate::row::{AnnotationRow, COLUMNS};
use depthsweep_core::{AnnotationKey, AnnotationRecord};
use depthsweep_error::{DepthsweepResult, StorageError, StorageErrorKind};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Keep one record per key, the last one seen.
///
/// Surviving records keep the relative order of their last occurrences.
///
/// # Examples
///
/// ```
/// # use depthsweep_core::{AnnotationRecord, Persona, Rating, Ratings, StoryRecord};
/// use depthsweep_storage::dedupe;
///
/// # fn record(participant_id: usize, time_taken: f64) -> AnnotationRecord {
/// #     let story = StoryRecord {
/// #         story_id: 1, premise_id: 10, premise: String::new(), text: String::new(),
/// #         author_type: String::new(), author_short: String::new(),
/// #         author_full: String::new(), net_upvotes: None,
/// #     };
/// #     let ratings = Ratings::from_fn(|_| Rating::try_from(3).unwrap());
/// #     AnnotationRecord::new(ratings, &Persona::new(participant_id, ""), time_taken, story)
/// # }
/// let kept = dedupe(vec![record(0, 1.0), record(1, 2.0), record(0, 3.0)]);
/// assert_eq!(kept.len(), 2);
/// assert_eq!(kept[1].time_taken, 3.0);
/// ```
pub fn dedupe(records: impl IntoIterator<Item = AnnotationRecord>) -> Vec<AnnotationRecord> {
    let records: Vec<AnnotationRecord> = records.into_iter().collect();
    let mut seen: HashSet<AnnotationKey> = HashSet::with_capacity(records.len());

    let mut kept: Vec<AnnotationRecord> = records
        .into_iter()
        .rev()
        .filter(|record| seen.insert(record.key()))
        .collect();
    kept.reverse();
    kept
}

/// CSV file holding the annotations of one partition.
///
/// The store is only ever rewritten whole: the new content goes to a
/// temporary sibling which is then renamed over the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationStore {
    path: PathBuf,
}

impl AnnotationStore {
    /// Create a store backed by `path`. Nothing is read or written yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored annotation.
    ///
    /// A missing or empty file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file exists but cannot be read or parsed.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> DepthsweepResult<Vec<AnnotationRecord>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No existing store, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
                .into());
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            debug!("Store file is empty");
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let records = reader
            .deserialize::<AnnotationRow>()
            .map(|row| row.map(AnnotationRecord::from))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                StorageError::new(StorageErrorKind::MalformedRow {
                    path: self.path.display().to_string(),
                    reason: e.to_string(),
                })
            })?;

        debug!(count = records.len(), "Loaded stored annotations");
        Ok(records)
    }

    /// Combine stored and newly produced records, dedupe, and overwrite the file.
    ///
    /// Returns the number of rows written.
    #[instrument(skip(self, existing, new), fields(path = %self.path.display(), existing = existing.len(), new = new.len()))]
    pub async fn persist(
        &self,
        existing: &[AnnotationRecord],
        new: &[AnnotationRecord],
    ) -> DepthsweepResult<usize> {
        let combined = dedupe(existing.iter().chain(new.iter()).cloned());
        self.write(&combined).await?;
        Ok(combined.len())
    }

    /// Overwrite the file with exactly `records`.
    #[instrument(skip(self, records), fields(path = %self.path.display(), count = records.len()))]
    pub async fn write(&self, records: &[AnnotationRecord]) -> DepthsweepResult<()> {
        let data = encode(records).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &self.path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            )))
        })?;

        debug!("Wrote annotation store");
        Ok(())
    }
}

fn encode(records: &[AnnotationRecord]) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(COLUMNS)?;
    for record in records {
        writer.serialize(AnnotationRow::from(record))?;
    }

    writer.into_inner().map_err(|e| e.error().to_string().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use depthsweep_core::{Persona, Rating, Ratings, StoryRecord};

    fn record(participant_id: usize, story_id: i64) -> AnnotationRecord {
        let story = StoryRecord {
            story_id,
            premise_id: 10,
            premise: "p".into(),
            text: "t".into(),
            author_type: "human".into(),
            author_short: "h".into(),
            author_full: "Human".into(),
            net_upvotes: Some(5),
        };
        let ratings = Ratings::from_fn(|_| Rating::try_from(2).unwrap());
        AnnotationRecord::new(ratings, &Persona::new(participant_id, "critic"), 0.5, story)
    }

    #[test]
    fn test_header_matches_serialized_field_order() {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(AnnotationRow::from(&record(0, 1))).unwrap();
        let bytes = writer.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().next().unwrap(), COLUMNS.join(","));
    }

    #[test]
    fn test_encode_empty_writes_header_only() {
        let bytes = encode(&[]).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap().trim_end(), COLUMNS.join(","));
    }

    #[test]
    fn test_dedupe_keeps_distinct_keys() {
        let kept = dedupe(vec![record(0, 1), record(0, 2), record(1, 1)]);
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn test_dedupe_keeps_last_occurrence_position() {
        let mut late = record(0, 1);
        late.time_taken = 9.0;
        let kept = dedupe(vec![record(0, 1), record(0, 2), late]);
        assert_eq!(
            kept.iter().map(|r| r.story.story_id).collect::<Vec<_>>(),
            vec![2, 1]
        );
        assert_eq!(kept[1].time_taken, 9.0);
    }
}
