use std::path::Path;

use log::debug;

use crate::core::aggregator::{score_tree, strategy_for};
use crate::core::locator::ReportLocator;
use crate::types::config::{OutputFormat, Strategy};
use crate::types::{AppResult, Summary};

/// Score the reports under `root` and render the one line printed on stdout
pub fn execute_score(
    root: &Path,
    strategy: Strategy,
    patterns: &[String],
    format: OutputFormat,
) -> AppResult<String> {
    let locator = ReportLocator::new(patterns)?;
    for pattern in locator.patterns() {
        debug!("Report pattern: {}", pattern.as_str());
    }
    let summary = score_tree(strategy_for(strategy).as_ref(), &locator, root)?;
    render(&summary, format)
}

pub fn render(summary: &Summary, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(summary)?),
        OutputFormat::Plain => Ok(summary.score.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Counters;

    #[test]
    fn invalid_pattern_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = execute_score(
            dir.path(),
            Strategy::All,
            &["**/[pit-reports/mutations.xml".to_string()],
            OutputFormat::Plain,
        )
        .unwrap_err();
        assert!(err.to_string().contains("[pit-reports"));
    }

    #[test]
    fn plain_output_is_the_bare_score() {
        let summary = Summary::empty(Strategy::All);
        assert_eq!(render(&summary, OutputFormat::Plain).unwrap(), "0.0000");
    }

    #[test]
    fn json_output_is_a_single_line() {
        let counters = Counters {
            total: 8,
            killed: 7,
        };
        let summary = Summary {
            strategy: Strategy::Latest,
            reports: 1,
            parsed: 1,
            counters,
            score: counters.score(),
        };
        let json = render(&summary, OutputFormat::Json).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"score\":87.5"));
    }
}
