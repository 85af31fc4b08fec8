use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "tenderwatch")]
#[command(about = "Collect energy and battery tenders from UK and Welsh procurement APIs")]
#[command(version)]
pub struct Cli {
    /// Output file path (overrides TENDERS_OUTPUT_PATH)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Dry run - fetch and summarize, but don't write the report
    #[arg(long)]
    pub dry_run: bool,
}
