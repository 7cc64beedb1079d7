use std::io;

use console::Style;
use log::{Level, LevelFilter};

use crate::types::config::{colors_enabled, config};

fn level_style(level: Level) -> Style {
    let style = Style::new().force_styling(true);
    match level {
        Level::Error => style.red().bold(),
        Level::Warn => style.yellow(),
        Level::Info => style.green(),
        Level::Debug => style.blue(),
        Level::Trace => style.dim(),
    }
}

/// Route all log output to stderr; stdout is reserved for the score
pub fn init_logging() {
    let level = config()
        .log()
        .level()
        .parse::<LevelFilter>()
        .unwrap_or(LevelFilter::Warn);
    let colors = colors_enabled();

    let _ = fern::Dispatch::new()
        .format(move |out, message, record| {
            let label = format!("{:<5}", record.level());
            let label = if colors {
                level_style(record.level()).apply_to(label).to_string()
            } else {
                label
            };
            out.finish(format_args!("{label} {message}"))
        })
        .level(level)
        .chain(io::stderr())
        .apply();
}
