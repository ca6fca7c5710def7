use clap::Parser;
use std::path::PathBuf;

/// Depthsweep - annotate stories for psychological depth with local models
#[derive(Parser, Debug)]
#[command(name = "depthsweep")]
#[command(about = "Annotate stories for psychological depth with local language models", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file layered over the defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}
