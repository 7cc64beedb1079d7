pub mod core;

// Re-export key items for easy importing in this crate
pub use core::types;

// Re-export key items for easy importing in other crates
pub use core::aggregator::{
    AggregationStrategy, AllReports, MostRecent, compute, score_tree, strategy_for,
};
pub use core::locator::{DEFAULT_PATTERNS, FsListing, ReportListing, ReportLocator};
pub use core::main_shared::run_main;
pub use core::parser::{parse_report, parse_report_str};
