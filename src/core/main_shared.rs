use std::env;
use std::path::PathBuf;

use clap::Parser;
use log::debug;

use crate::core::cli::Args;
use crate::core::cmds;
use crate::core::logging::init_logging;
use crate::types::AppResult;
use crate::types::config::{CliOverrides, config, init_with_overrides};

pub fn run_main() -> AppResult<()> {
    let args = Args::parse();

    // Build CLI overrides for config precedence
    let cli_overrides = CliOverrides {
        strategy: args.strategy.clone(),
        patterns: args.patterns.clone(),
        format: args.format.clone(),
        log_level: args.log_level.clone(),
        log_color: args.log_color.clone(),
    };

    // Initialize configuration (file, then CLI overrides)
    init_with_overrides(&cli_overrides)?;

    // Initialize logging after config so level/color are applied
    init_logging();

    let root = match args.root {
        Some(root) => root,
        None => env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    debug!("Scanning {} for mutation reports", root.display());

    let line = cmds::execute_score(
        &root,
        config().strategy(),
        &config().patterns(),
        config().format(),
    )?;
    println!("{line}");

    Ok(())
}
