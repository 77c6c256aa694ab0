//! Metrics module - agreement between selected and gold dimensions
//!
//! Scoring pools true/false positive/negative counts across every
//! (topic, dimension) indicator pair before dividing (micro-averaging),
//! rather than averaging per-topic scores.

use crate::dimension::Dimension;
use crate::topic::{Topic, TopicId};
use std::collections::{BTreeMap, BTreeSet};

/// Micro-averaged agreement scores. Derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsSnapshot {
    /// TP / (TP + FP); 0.0 when nothing was predicted
    pub precision: f64,
    /// TP / (TP + FN); 0.0 when nothing was relevant
    pub recall: f64,
    /// Harmonic mean of precision and recall; 0.0 when both are 0
    pub f1: f64,
}

impl MetricsSnapshot {
    /// The all-zero snapshot returned for empty or unmatched input.
    pub fn zero() -> Self {
        Self {
            precision: 0.0,
            recall: 0.0,
            f1: 0.0,
        }
    }
}

/// Derive the gold dimension set per topic from its hypotheses.
///
/// A topic's gold set is the union of the dimensions its hypotheses take a
/// stance on. Topics with no hypotheses get an empty set.
pub fn gold_dimensions(topics: &[Topic]) -> BTreeMap<TopicId, BTreeSet<Dimension>> {
    topics
        .iter()
        .map(|topic| {
            let dims = topic.hypotheses.iter().map(|h| h.dimension).collect();
            (topic.id.clone(), dims)
        })
        .collect()
}

/// Score predicted dimension selections against the gold sets.
///
/// For each topic present in `predicted` that also has a gold entry, gold
/// and predicted sets become 20-length binary indicator vectors over the
/// fixed vocabulary, and TP/FP/FN counts pool across all of them. Topics
/// predicted but absent from the gold map are skipped entirely rather than
/// counted as false positives. Division by zero yields 0.0 components, so
/// empty input produces the zero snapshot, never an error.
pub fn score(
    gold: &BTreeMap<TopicId, BTreeSet<Dimension>>,
    predicted: &BTreeMap<TopicId, BTreeSet<Dimension>>,
) -> MetricsSnapshot {
    let mut true_positives = 0usize;
    let mut false_positives = 0usize;
    let mut false_negatives = 0usize;

    for (topic_id, selected) in predicted {
        let Some(relevant) = gold.get(topic_id) else {
            continue;
        };
        for dimension in Dimension::ALL {
            match (relevant.contains(&dimension), selected.contains(&dimension)) {
                (true, true) => true_positives += 1,
                (false, true) => false_positives += 1,
                (true, false) => false_negatives += 1,
                (false, false) => {}
            }
        }
    }

    let precision = ratio(true_positives, true_positives + false_positives);
    let recall = ratio(true_positives, true_positives + false_negatives);
    let f1 = if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    };

    MetricsSnapshot {
        precision,
        recall,
        f1,
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
