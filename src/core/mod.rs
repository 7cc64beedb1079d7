pub mod aggregator;
pub mod cli;
pub mod cmds;
pub mod locator;
pub mod logging;
pub mod main_shared;
pub mod parser;
pub mod types;
