pub mod config;
mod error;
mod report;
mod stats;

pub use error::*;
pub use report::*;
pub use stats::*;
