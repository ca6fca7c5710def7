//! Depthsweep CLI binary.

use clap::Parser;
use depthsweep::cli::{Cli, run_sweep};
use depthsweep::{LoggingConfig, init_logging};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(&LoggingConfig::from_cli(&cli))?;

    let report = run_sweep(cli.config.as_deref()).await?;
    for partition in &report.partitions {
        tracing::info!(
            partition = %partition.partition,
            path = %partition.path.display(),
            annotated = partition.annotated,
            skipped = partition.skipped,
            failed = partition.failed,
            "Partition summary"
        );
    }
    tracing::info!(
        annotated = report.annotated(),
        skipped = report.skipped(),
        failed = report.failed(),
        "Done"
    );

    Ok(())
}
