use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Project root to search for PIT reports (defaults to the current directory)
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Aggregation strategy: "all" (union of every report) or "latest" (newest report only).
    /// Replaces config `strategy` if provided.
    #[arg(long)]
    pub strategy: Option<String>,

    /// Root-relative glob locating reports; repeat for several layouts.
    /// Replaces config `patterns` if provided.
    #[arg(long = "pattern", value_name = "GLOB")]
    pub patterns: Vec<String>,

    /// Output format: "plain" (score only) or "json" (one-line summary)
    #[arg(long)]
    pub format: Option<String>,

    /// Logging level (overrides config). One of: trace, debug, info, warn, error, off
    #[arg(long = "log.level")]
    pub log_level: Option<String>,

    /// Logging color control: "on" to force colors, "off" to disable; omit for auto
    #[arg(long = "log.color")]
    pub log_color: Option<String>,
}
