//! Folding per-comment outcomes into a tally plus skip diagnostics.

use super::entities::{Classification, SentimentLabel, SentimentTally, VideoId};

/// What happened to one fetched comment.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    /// Empty, whitespace-only, or non-text record. Never sent to the classifier.
    Blank,
    Classified(Classification),
    /// Classifier call failed; carries the error message.
    Failed(String),
}

/// Why a comment did not contribute to the tally.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    Blank,
    Unclassified(String),
    /// Classified, but with a label outside positive/negative.
    OtherLabel(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedComment {
    /// Position in the fetched sequence.
    pub index: usize,
    pub reason: SkipReason,
}

/// Full result of one aggregation request. The HTTP layer only exposes `tally`.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationReport {
    pub video_id: VideoId,
    pub fetched: usize,
    pub tally: SentimentTally,
    pub skipped: Vec<SkippedComment>,
}

impl AggregationReport {
    /// Skips caused by classifier failures (excludes blanks and other labels).
    pub fn failures(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| matches!(s.reason, SkipReason::Unclassified(_)))
            .count()
    }
}

/// Fold outcomes in sequence order. Every outcome either bumps exactly one
/// counter or produces exactly one skip entry.
pub fn fold_outcomes<I>(outcomes: I) -> (SentimentTally, Vec<SkippedComment>)
where
    I: IntoIterator<Item = ItemOutcome>,
{
    outcomes.into_iter().enumerate().fold(
        (SentimentTally::default(), Vec::new()),
        |(mut tally, mut skipped), (index, outcome)| {
            let reason = match outcome {
                ItemOutcome::Blank => Some(SkipReason::Blank),
                ItemOutcome::Failed(error) => Some(SkipReason::Unclassified(error)),
                ItemOutcome::Classified(c) => match c.sentiment() {
                    SentimentLabel::Other => Some(SkipReason::OtherLabel(c.label)),
                    label => {
                        tally.record(label);
                        None
                    }
                },
            };
            if let Some(reason) = reason {
                skipped.push(SkippedComment { index, reason });
            }
            (tally, skipped)
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classified(label: &str) -> ItemOutcome {
        ItemOutcome::Classified(Classification::new(label, 0.9))
    }

    #[test]
    fn test_fold_empty() {
        let (tally, skipped) = fold_outcomes(Vec::new());
        assert_eq!(tally, SentimentTally::default());
        assert!(skipped.is_empty());
    }

    #[test]
    fn test_fold_mixed_outcomes() {
        let (tally, skipped) = fold_outcomes(vec![
            classified("POSITIVE"),
            ItemOutcome::Blank,
            classified("NEGATIVE"),
            ItemOutcome::Failed("timeout".into()),
            classified("NEUTRAL"),
            classified("positive"),
        ]);

        assert_eq!(tally, SentimentTally { positive: 2, negative: 1 });
        assert_eq!(
            skipped,
            vec![
                SkippedComment { index: 1, reason: SkipReason::Blank },
                SkippedComment {
                    index: 3,
                    reason: SkipReason::Unclassified("timeout".into())
                },
                SkippedComment {
                    index: 4,
                    reason: SkipReason::OtherLabel("NEUTRAL".into())
                },
            ]
        );
    }

    #[test]
    fn test_every_outcome_is_accounted_once() {
        let outcomes = vec![
            classified("POSITIVE"),
            ItemOutcome::Failed("boom".into()),
            classified("mixed"),
            ItemOutcome::Blank,
        ];
        let n = outcomes.len() as u64;
        let (tally, skipped) = fold_outcomes(outcomes);
        assert_eq!(tally.total() + skipped.len() as u64, n);
    }

    #[test]
    fn test_all_failed_yields_zero_tally() {
        let (tally, skipped) = fold_outcomes(vec![
            ItemOutcome::Failed("a".into()),
            ItemOutcome::Failed("b".into()),
        ]);
        assert_eq!(tally, SentimentTally::default());
        assert_eq!(skipped.len(), 2);
    }
}
