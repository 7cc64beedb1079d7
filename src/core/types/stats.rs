use std::fmt;

use serde::Serialize;

use super::config::Strategy;
use super::report::MutationData;

/// Running totals across every successfully parsed report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Counters {
    pub total: usize,
    pub killed: usize,
}

impl Counters {
    pub fn absorb(&mut self, data: &MutationData) {
        self.total += data.total();
        self.killed += data.killed();
    }

    /// Kill ratio as a percentage; no mutants at all counts as a perfect score
    pub fn score(&self) -> Score {
        if self.total == 0 {
            return Score::PERFECT;
        }
        Score(100.0 * self.killed as f64 / self.total as f64)
    }
}

/// Mutation kill score in `[0, 100]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    pub const ZERO: Score = Score(0.0);
    pub const PERFECT: Score = Score(100.0);

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// Outcome of one scoring run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub strategy: Strategy,
    /// Report files handed to the aggregator
    pub reports: usize,
    /// Report files that parsed successfully
    pub parsed: usize,
    #[serde(flatten)]
    pub counters: Counters,
    pub score: Score,
}

impl Summary {
    /// Nothing to aggregate; fails closed
    pub fn empty(strategy: Strategy) -> Self {
        Self {
            strategy,
            reports: 0,
            parsed: 0,
            counters: Counters::default(),
            score: Score::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MutationRecord;

    fn data(statuses: &[&str]) -> MutationData {
        MutationData {
            records: statuses
                .iter()
                .map(|s| MutationRecord::with_status(s))
                .collect(),
        }
    }

    #[test]
    fn zero_total_scores_perfect() {
        assert_eq!(Counters::default().score(), Score::PERFECT);
    }

    #[test]
    fn score_is_unrounded_ratio() {
        let mut counters = Counters::default();
        counters.absorb(&data(&["KILLED", "KILLED", "SURVIVED"]));
        assert_eq!(counters.total, 3);
        assert_eq!(counters.killed, 2);
        assert_eq!(counters.score().value(), 100.0 * 2.0 / 3.0);
        assert_eq!(counters.score().to_string(), "66.6667");
    }

    #[test]
    fn display_uses_four_decimals() {
        assert_eq!(Score::ZERO.to_string(), "0.0000");
        assert_eq!(Score::PERFECT.to_string(), "100.0000");
        assert_eq!(Score(87.5).to_string(), "87.5000");
    }

    #[test]
    fn summary_serializes_flat() {
        let summary = Summary {
            strategy: Strategy::All,
            reports: 2,
            parsed: 2,
            counters: Counters {
                total: 10,
                killed: 5,
            },
            score: Score(50.0),
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(
            json,
            r#"{"strategy":"all","reports":2,"parsed":2,"total":10,"killed":5,"score":50.0}"#
        );
    }
}
