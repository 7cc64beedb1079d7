use std::path::Path;

use log::debug;

use crate::core::locator::ReportLocator;
use crate::core::parser::parse_report;
use crate::types::config::Strategy;
use crate::types::{
    Counters, LocateError, MutationData, ParseError, ReportFile, Score, Summary,
};

/// A way of choosing report files and reducing them to one score
pub trait AggregationStrategy {
    fn kind(&self) -> Strategy;

    /// Pick the reports this strategy scores
    fn collect(&self, locator: &ReportLocator, root: &Path)
    -> Result<Vec<ReportFile>, LocateError>;

    /// Reduce the collected reports to a summary. Never fails.
    fn aggregate(&self, reports: &[ReportFile]) -> Summary;
}

/// Scores the union of every located report
#[derive(Debug, Clone, Copy, Default)]
pub struct AllReports;

/// Scores only the most recently modified report
#[derive(Debug, Clone, Copy, Default)]
pub struct MostRecent;

impl AggregationStrategy for AllReports {
    fn kind(&self) -> Strategy {
        Strategy::All
    }

    fn collect(
        &self,
        locator: &ReportLocator,
        root: &Path,
    ) -> Result<Vec<ReportFile>, LocateError> {
        Ok(locator
            .locate(root)?
            .into_iter()
            .map(ReportFile::new)
            .collect())
    }

    fn aggregate(&self, reports: &[ReportFile]) -> Summary {
        if reports.is_empty() {
            return Summary::empty(self.kind());
        }

        let (counters, parsed) = fold_reports(reports.iter().map(parse_logged));
        Summary {
            strategy: self.kind(),
            reports: reports.len(),
            parsed,
            counters,
            score: counters.score(),
        }
    }
}

impl AggregationStrategy for MostRecent {
    fn kind(&self) -> Strategy {
        Strategy::Latest
    }

    fn collect(
        &self,
        locator: &ReportLocator,
        root: &Path,
    ) -> Result<Vec<ReportFile>, LocateError> {
        let latest = locator.latest(root)?;
        if let Some(report) = &latest
            && let Some(modified) = report.modified
        {
            debug!(
                "Selected latest report {} (modified {})",
                report.display(),
                modified.to_rfc3339()
            );
        }
        Ok(latest.into_iter().collect())
    }

    /// Scores the first report; `collect` hands over at most one
    fn aggregate(&self, reports: &[ReportFile]) -> Summary {
        let Some(report) = reports.first() else {
            return Summary::empty(self.kind());
        };

        match parse_logged(report) {
            Ok(data) => {
                let mut counters = Counters::default();
                counters.absorb(&data);
                Summary {
                    strategy: self.kind(),
                    reports: 1,
                    parsed: 1,
                    counters,
                    score: counters.score(),
                }
            }
            // with a single report there is nothing left to fall back on
            Err(_) => Summary {
                reports: 1,
                ..Summary::empty(self.kind())
            },
        }
    }
}

/// Fold per-report parse results; failures contribute nothing.
/// Returns the counters and the number of reports that parsed.
pub fn fold_reports<I>(results: I) -> (Counters, usize)
where
    I: IntoIterator<Item = Result<MutationData, ParseError>>,
{
    results
        .into_iter()
        .fold((Counters::default(), 0), |(mut counters, parsed), result| {
            match result {
                Ok(data) => {
                    counters.absorb(&data);
                    (counters, parsed + 1)
                }
                Err(_) => (counters, parsed),
            }
        })
}

fn parse_logged(report: &ReportFile) -> Result<MutationData, ParseError> {
    let result = parse_report(&report.path);
    match &result {
        Ok(data) => debug!(
            "Parsed {}: {} mutation(s), {} killed",
            report.display(),
            data.total(),
            data.killed()
        ),
        Err(e) => debug!("Skipping report: {e}"),
    }
    result
}

/// Score the union of the given reports
pub fn compute(reports: &[ReportFile]) -> Score {
    AllReports.aggregate(reports).score
}

pub fn strategy_for(kind: Strategy) -> Box<dyn AggregationStrategy> {
    match kind {
        Strategy::All => Box::new(AllReports),
        Strategy::Latest => Box::new(MostRecent),
    }
}

/// Locate reports under `root` and reduce them with `strategy`
pub fn score_tree(
    strategy: &dyn AggregationStrategy,
    locator: &ReportLocator,
    root: &Path,
) -> Result<Summary, LocateError> {
    let reports = strategy.collect(locator, root)?;
    let summary = strategy.aggregate(&reports);
    debug!(
        "Strategy {}: {} of {} report(s) parsed, {} killed of {} mutation(s)",
        summary.strategy,
        summary.parsed,
        summary.reports,
        summary.counters.killed,
        summary.counters.total
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MutationRecord;
    use std::io;
    use std::path::PathBuf;

    fn data(statuses: &[Option<&str>]) -> Result<MutationData, ParseError> {
        Ok(MutationData {
            records: statuses
                .iter()
                .map(|s| MutationRecord {
                    status: s.map(str::to_string),
                })
                .collect(),
        })
    }

    fn broken() -> Result<MutationData, ParseError> {
        Err(ParseError::Read {
            path: PathBuf::from("broken.xml"),
            source: io::Error::new(io::ErrorKind::InvalidData, "truncated"),
        })
    }

    #[test]
    fn fold_skips_failed_reports() {
        let (counters, parsed) = fold_reports([
            broken(),
            data(&[Some("KILLED"), Some("killed"), Some("SURVIVED")]),
        ]);
        assert_eq!(parsed, 1);
        assert_eq!(counters, Counters { total: 3, killed: 2 });
        assert_eq!(counters.score().to_string(), "66.6667");
    }

    #[test]
    fn fold_of_only_failures_is_vacuously_perfect() {
        let (counters, parsed) = fold_reports([broken(), broken()]);
        assert_eq!(parsed, 0);
        assert_eq!(counters.score(), Score::PERFECT);
    }

    #[test]
    fn missing_status_counts_towards_total_only() {
        let (counters, _) = fold_reports([data(&[None, Some(""), Some("Killed")])]);
        assert_eq!(counters, Counters { total: 3, killed: 1 });
    }

    #[test]
    fn no_reports_fails_closed() {
        assert_eq!(compute(&[]), Score::ZERO);
        assert_eq!(MostRecent.aggregate(&[]).score, Score::ZERO);
    }

    #[test]
    fn unreadable_reports_score_differently_per_strategy() {
        let missing = [ReportFile::new(PathBuf::from(
            "/definitely/not/here/target/pit-reports/mutations.xml",
        ))];

        let all = AllReports.aggregate(&missing);
        assert_eq!(all.reports, 1);
        assert_eq!(all.parsed, 0);
        assert_eq!(all.score, Score::PERFECT);

        let latest = MostRecent.aggregate(&missing);
        assert_eq!(latest.reports, 1);
        assert_eq!(latest.parsed, 0);
        assert_eq!(latest.score, Score::ZERO);
    }

    #[test]
    fn strategy_for_maps_kinds() {
        assert_eq!(strategy_for(Strategy::All).kind(), Strategy::All);
        assert_eq!(strategy_for(Strategy::Latest).kind(), Strategy::Latest);
    }
}
