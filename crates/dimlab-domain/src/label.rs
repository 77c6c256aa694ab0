//! Label module - draft judgments and the committed label store
//!
//! Two labeling workflows share one pattern: accumulate partial input, then
//! promote it into the [`LabelStore`]. The quality workflow promotes only
//! when both criteria have a verdict; the topic-dimension workflow promotes
//! unconditionally on every forward navigation, empty selection included.
//! The store therefore never holds a half-specified quality label, by
//! construction.

use crate::dimension::Dimension;
use crate::topic::TopicId;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A yes/no judgment on one quality criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The criterion is met
    Yes,
    /// The criterion is not met
    No,
}

impl Verdict {
    /// Get the verdict as it appears in export files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Yes => "yes",
            Verdict::No => "no",
        }
    }

    /// Parse a verdict from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "y" => Some(Verdict::Yes),
            "no" | "n" => Some(Verdict::No),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// In-progress judgments for one hypothesis.
///
/// Fields start unset and may be set and overwritten freely; there is no
/// transition back to unset. A draft is never stored - it promotes into a
/// [`QualityLabel`] once complete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QualityDraft {
    /// Is the hypothesis clearly and coherently stated?
    pub clarity: Option<Verdict>,
    /// Does the hypothesis address the topic and connect it to a relevant
    /// dimension?
    pub relevance: Option<Verdict>,
}

impl QualityDraft {
    /// Empty draft with both criteria unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a draft from a previously committed label, for revisits.
    pub fn from_committed(label: &QualityLabel) -> Self {
        Self {
            clarity: Some(label.clarity),
            relevance: Some(label.relevance),
        }
    }

    /// Set or overwrite the clarity verdict.
    pub fn set_clarity(&mut self, verdict: Verdict) {
        self.clarity = Some(verdict);
    }

    /// Set or overwrite the relevance verdict.
    pub fn set_relevance(&mut self, verdict: Verdict) {
        self.relevance = Some(verdict);
    }

    /// A draft is complete iff neither criterion is unset.
    pub fn is_complete(&self) -> bool {
        self.clarity.is_some() && self.relevance.is_some()
    }

    /// Promote the draft into its committed form, if complete.
    pub fn as_complete(&self) -> Option<QualityLabel> {
        match (self.clarity, self.relevance) {
            (Some(clarity), Some(relevance)) => Some(QualityLabel { clarity, relevance }),
            _ => None,
        }
    }
}

/// A committed quality judgment for one hypothesis.
///
/// Partial judgments are unrepresentable here; only [`QualityDraft`] can
/// hold an unset criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityLabel {
    /// Clarity verdict
    pub clarity: Verdict,
    /// Relevance verdict
    pub relevance: Verdict,
}

/// Composite key identifying one hypothesis under review.
///
/// Replaces string-concatenated `"<id>_<index>"` keys: the topic id and the
/// hypothesis position are separate typed fields, so ids containing
/// separator characters cannot corrupt unit identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HypothesisKey {
    /// Owning topic
    pub topic: TopicId,
    /// Position of the hypothesis within the owning topic
    pub index: usize,
}

impl HypothesisKey {
    /// Create a key from a topic id and a hypothesis position.
    pub fn new(topic: TopicId, index: usize) -> Self {
        Self { topic, index }
    }
}

impl fmt::Display for HypothesisKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.topic, self.index + 1)
    }
}

/// Committed labels for the current session.
///
/// Created empty at session start and growing monotonically: entries are
/// only ever added or overwritten, never removed. Quality entries exist only
/// for fully specified drafts; dimension selections are committed as-is,
/// empty sets included.
#[derive(Debug, Clone, Default)]
pub struct LabelStore {
    quality: BTreeMap<HypothesisKey, QualityLabel>,
    dimensions: BTreeMap<TopicId, BTreeSet<Dimension>>,
}

impl LabelStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a quality draft under `key` iff it is complete, overwriting
    /// any prior committed value. Returns whether a commit happened.
    pub fn commit_if_complete(&mut self, key: HypothesisKey, draft: &QualityDraft) -> bool {
        match draft.as_complete() {
            Some(label) => {
                self.quality.insert(key, label);
                true
            }
            None => false,
        }
    }

    /// Committed quality label for a unit, if any.
    pub fn quality_label(&self, key: &HypothesisKey) -> Option<&QualityLabel> {
        self.quality.get(key)
    }

    /// All committed quality labels, ordered by key.
    pub fn quality_labels(&self) -> impl Iterator<Item = (&HypothesisKey, &QualityLabel)> {
        self.quality.iter()
    }

    /// Number of committed quality labels.
    pub fn quality_count(&self) -> usize {
        self.quality.len()
    }

    /// Commit a dimension selection for a topic unconditionally, empty set
    /// included - "no relevant dimensions" is a valid committed answer.
    pub fn commit_dimensions(&mut self, topic: TopicId, selection: BTreeSet<Dimension>) {
        self.dimensions.insert(topic, selection);
    }

    /// Committed dimension selection for a topic, if any.
    pub fn dimensions_for(&self, topic: &TopicId) -> Option<&BTreeSet<Dimension>> {
        self.dimensions.get(topic)
    }

    /// All committed dimension selections, ordered by topic id.
    pub fn dimension_selections(&self) -> &BTreeMap<TopicId, BTreeSet<Dimension>> {
        &self.dimensions
    }

    /// Number of topics with a committed dimension selection.
    pub fn dimension_count(&self) -> usize {
        self.dimensions.len()
    }

    /// True when nothing has been committed in either workflow.
    pub fn is_empty(&self) -> bool {
        self.quality.is_empty() && self.dimensions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(id: &str, index: usize) -> HypothesisKey {
        HypothesisKey::new(TopicId::new(id), index)
    }

    #[test]
    fn test_partial_draft_never_commits() {
        let mut store = LabelStore::new();
        let mut draft = QualityDraft::new();

        draft.set_clarity(Verdict::Yes);
        assert!(!store.commit_if_complete(key("t1", 0), &draft));
        assert_eq!(store.quality_count(), 0);
    }

    #[test]
    fn test_complete_draft_commits_exact_pair() {
        let mut store = LabelStore::new();
        let mut draft = QualityDraft::new();

        draft.set_clarity(Verdict::Yes);
        draft.set_relevance(Verdict::No);
        assert!(store.commit_if_complete(key("t1", 0), &draft));

        let label = store.quality_label(&key("t1", 0)).unwrap();
        assert_eq!(label.clarity, Verdict::Yes);
        assert_eq!(label.relevance, Verdict::No);
    }

    #[test]
    fn test_recommit_overwrites() {
        let mut store = LabelStore::new();
        let mut draft = QualityDraft::new();
        draft.set_clarity(Verdict::Yes);
        draft.set_relevance(Verdict::Yes);
        store.commit_if_complete(key("t1", 2), &draft);

        draft.set_relevance(Verdict::No);
        store.commit_if_complete(key("t1", 2), &draft);

        assert_eq!(store.quality_count(), 1);
        assert_eq!(
            store.quality_label(&key("t1", 2)).unwrap().relevance,
            Verdict::No
        );
    }

    #[test]
    fn test_verdicts_are_overwritable() {
        let mut draft = QualityDraft::new();
        draft.set_clarity(Verdict::No);
        draft.set_clarity(Verdict::Yes);
        assert_eq!(draft.clarity, Some(Verdict::Yes));
        assert!(!draft.is_complete());
    }

    #[test]
    fn test_draft_reseeds_from_committed() {
        let label = QualityLabel {
            clarity: Verdict::No,
            relevance: Verdict::Yes,
        };
        let draft = QualityDraft::from_committed(&label);
        assert!(draft.is_complete());
        assert_eq!(draft.as_complete(), Some(label));
    }

    #[test]
    fn test_empty_dimension_selection_commits() {
        let mut store = LabelStore::new();
        store.commit_dimensions(TopicId::new("t1"), BTreeSet::new());

        let committed = store.dimensions_for(&TopicId::new("t1"));
        assert!(committed.is_some());
        assert!(committed.unwrap().is_empty());
    }

    #[test]
    fn test_dimension_selection_overwrites() {
        let mut store = LabelStore::new();
        let mut first = BTreeSet::new();
        first.insert(Dimension::Lrgen);
        store.commit_dimensions(TopicId::new("t1"), first);

        store.commit_dimensions(TopicId::new("t1"), BTreeSet::new());
        assert!(store.dimensions_for(&TopicId::new("t1")).unwrap().is_empty());
        assert_eq!(store.dimension_count(), 1);
    }

    #[test]
    fn test_keys_with_separator_heavy_ids_stay_distinct() {
        // "a_1" #0 and "a" #10 would collide under "{id}_{index}" string keys
        let mut store = LabelStore::new();
        let mut draft = QualityDraft::new();
        draft.set_clarity(Verdict::Yes);
        draft.set_relevance(Verdict::Yes);

        store.commit_if_complete(key("a_1", 0), &draft);
        draft.set_relevance(Verdict::No);
        store.commit_if_complete(key("a", 10), &draft);

        assert_eq!(store.quality_count(), 2);
        assert_eq!(
            store.quality_label(&key("a_1", 0)).unwrap().relevance,
            Verdict::Yes
        );
        assert_eq!(
            store.quality_label(&key("a", 10)).unwrap().relevance,
            Verdict::No
        );
    }

    #[test]
    fn test_verdict_parsing() {
        assert_eq!(Verdict::parse("yes"), Some(Verdict::Yes));
        assert_eq!(Verdict::parse("Y"), Some(Verdict::Yes));
        assert_eq!(Verdict::parse("No"), Some(Verdict::No));
        assert_eq!(Verdict::parse("maybe"), None);
    }
}
