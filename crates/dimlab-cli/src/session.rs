//! Session state for the interactive labeling loops.
//!
//! All mutable review state lives in an explicit session object that the
//! command loop owns and passes around - there are no globals. A session
//! wraps the domain state machines: navigation comes from
//! [`Cursor`]/[`TopicWalker`], commit rules from [`LabelStore`], and the
//! session only wires them to the review sequence.

use dimlab_domain::{
    flatten, score, Cursor, Dimension, FlatRow, Hypothesis, HypothesisKey, LabelStore,
    MetricsSnapshot, QualityDraft, Topic, TopicId, TopicWalker, Verdict,
};
use std::collections::{BTreeMap, BTreeSet};

/// What the screen shows for the hypothesis currently under review.
#[derive(Debug)]
pub struct UnitView<'a> {
    /// Unit key for the hypothesis
    pub key: HypothesisKey,
    /// Owning topic text
    pub title: &'a str,
    /// Owning topic's general concept, when known
    pub top_term: Option<&'a str>,
    /// The hypothesis under review
    pub hypothesis: &'a Hypothesis,
    /// 1-based position in review order
    pub ordinal: usize,
    /// Total number of units in the session
    pub total: usize,
}

/// How the hypothesis sequence is walked.
enum Plan {
    /// A flat sample of individual hypotheses
    Flat { rows: Vec<FlatRow>, cursor: Cursor },
    /// Whole topics, hypothesis by hypothesis
    ByTopic {
        topics: Vec<Topic>,
        walker: TopicWalker,
    },
}

/// Interactive quality-labeling session over sampled hypotheses.
///
/// Draft verdicts accumulate per unit and promote into the store the
/// moment both criteria are set; navigation never commits anything.
pub struct HypothesisSession {
    plan: Plan,
    drafts: BTreeMap<HypothesisKey, QualityDraft>,
    store: LabelStore,
}

impl HypothesisSession {
    /// Session over a flat sample of hypothesis rows.
    pub fn over_rows(rows: Vec<FlatRow>) -> Self {
        let cursor = Cursor::new(rows.len());
        Self {
            plan: Plan::Flat { rows, cursor },
            drafts: BTreeMap::new(),
            store: LabelStore::new(),
        }
    }

    /// Session walking whole topics hypothesis by hypothesis. Topics
    /// without hypotheses are dropped, as in flattening.
    pub fn over_topics(topics: Vec<Topic>) -> Self {
        let topics: Vec<Topic> = topics
            .into_iter()
            .filter(|t| !t.hypotheses.is_empty())
            .collect();
        let walker = TopicWalker::new(topics.iter().map(|t| t.hypotheses.len()).collect());
        Self {
            plan: Plan::ByTopic { topics, walker },
            drafts: BTreeMap::new(),
            store: LabelStore::new(),
        }
    }

    /// Total number of hypotheses in the session.
    pub fn total_units(&self) -> usize {
        match &self.plan {
            Plan::Flat { rows, .. } => rows.len(),
            Plan::ByTopic { walker, .. } => walker.unit_count(),
        }
    }

    /// Number of committed labels so far.
    pub fn labeled_count(&self) -> usize {
        self.store.quality_count()
    }

    /// True once every unit has been advanced past.
    pub fn is_exhausted(&self) -> bool {
        match &self.plan {
            Plan::Flat { cursor, .. } => cursor.is_exhausted(),
            Plan::ByTopic { walker, .. } => walker.is_exhausted(),
        }
    }

    fn current_key(&self) -> Option<HypothesisKey> {
        match &self.plan {
            Plan::Flat { rows, cursor } => cursor
                .index()
                .map(|i| HypothesisKey::new(rows[i].topic_id.clone(), rows[i].index)),
            Plan::ByTopic { topics, walker } => walker
                .indices()
                .map(|(t, h)| HypothesisKey::new(topics[t].id.clone(), h)),
        }
    }

    /// The unit currently under review, unless the session is exhausted.
    pub fn current(&self) -> Option<UnitView<'_>> {
        let total = self.total_units();
        match &self.plan {
            Plan::Flat { rows, cursor } => cursor.index().map(|i| {
                let row = &rows[i];
                UnitView {
                    key: HypothesisKey::new(row.topic_id.clone(), row.index),
                    title: &row.title,
                    top_term: row.top_term.as_deref(),
                    hypothesis: &row.hypothesis,
                    ordinal: i + 1,
                    total,
                }
            }),
            Plan::ByTopic { topics, walker } => walker.indices().map(|(t, h)| {
                let topic = &topics[t];
                let before: usize = topics[..t].iter().map(|x| x.hypotheses.len()).sum();
                UnitView {
                    key: HypothesisKey::new(topic.id.clone(), h),
                    title: &topic.title,
                    top_term: topic.top_term.as_deref(),
                    hypothesis: &topic.hypotheses[h],
                    ordinal: before + h + 1,
                    total,
                }
            }),
        }
    }

    /// Draft state for the current unit, seeded from any committed label.
    pub fn draft(&self) -> QualityDraft {
        let Some(key) = self.current_key() else {
            return QualityDraft::new();
        };
        if let Some(draft) = self.drafts.get(&key) {
            return *draft;
        }
        self.store
            .quality_label(&key)
            .map(QualityDraft::from_committed)
            .unwrap_or_default()
    }

    /// Set the clarity verdict on the current unit. Returns whether the
    /// unit's label was committed, or `None` when the session is exhausted.
    pub fn set_clarity(&mut self, verdict: Verdict) -> Option<bool> {
        self.update_draft(|draft| draft.set_clarity(verdict))
    }

    /// Set the relevance verdict on the current unit. Returns whether the
    /// unit's label was committed, or `None` when the session is exhausted.
    pub fn set_relevance(&mut self, verdict: Verdict) -> Option<bool> {
        self.update_draft(|draft| draft.set_relevance(verdict))
    }

    fn update_draft(&mut self, apply: impl FnOnce(&mut QualityDraft)) -> Option<bool> {
        let key = self.current_key()?;
        let seed = self
            .store
            .quality_label(&key)
            .map(QualityDraft::from_committed)
            .unwrap_or_default();
        let draft = self.drafts.entry(key.clone()).or_insert(seed);
        apply(draft);
        let snapshot = *draft;
        Some(self.store.commit_if_complete(key, &snapshot))
    }

    /// Step forward one unit.
    pub fn next(&mut self) {
        match &mut self.plan {
            Plan::Flat { cursor, .. } => {
                cursor.next();
            }
            Plan::ByTopic { walker, .. } => {
                walker.next();
            }
        }
    }

    /// Step back one unit.
    pub fn previous(&mut self) {
        match &mut self.plan {
            Plan::Flat { cursor, .. } => {
                cursor.previous();
            }
            Plan::ByTopic { walker, .. } => {
                walker.previous();
            }
        }
    }

    /// Committed labels.
    pub fn store(&self) -> &LabelStore {
        &self.store
    }

    /// The session's rows in review order, for joining with committed
    /// labels at export time.
    pub fn export_rows(&self) -> Vec<FlatRow> {
        match &self.plan {
            Plan::Flat { rows, .. } => rows.clone(),
            Plan::ByTopic { topics, .. } => flatten(topics),
        }
    }
}

/// Interactive dimension-selection session over topics.
///
/// The working selection commits unconditionally on every forward step -
/// an empty selection is a valid committed answer - and re-seeds from the
/// store when a topic is revisited. Backward steps never commit.
pub struct TopicSession {
    topics: Vec<Topic>,
    cursor: Cursor,
    selection: BTreeSet<Dimension>,
    visited: BTreeSet<TopicId>,
    store: LabelStore,
}

impl TopicSession {
    /// Session over the given topics, starting at the first.
    pub fn new(topics: Vec<Topic>) -> Self {
        let cursor = Cursor::new(topics.len());
        Self {
            topics,
            cursor,
            selection: BTreeSet::new(),
            visited: BTreeSet::new(),
            store: LabelStore::new(),
        }
    }

    /// The topic currently under review, unless the session is exhausted.
    pub fn current(&self) -> Option<&Topic> {
        self.cursor.index().map(|i| &self.topics[i])
    }

    /// 1-based position and total, for the prompt.
    pub fn position(&self) -> (Option<usize>, usize) {
        (self.cursor.index().map(|i| i + 1), self.topics.len())
    }

    /// The working selection for the current topic.
    pub fn selection(&self) -> &BTreeSet<Dimension> {
        &self.selection
    }

    /// Toggle a dimension in the working selection. Returns whether the
    /// dimension is now selected, or `None` when the session is exhausted.
    pub fn toggle(&mut self, dimension: Dimension) -> Option<bool> {
        self.current()?;
        if self.selection.remove(&dimension) {
            Some(false)
        } else {
            self.selection.insert(dimension);
            Some(true)
        }
    }

    /// Clear the working selection.
    pub fn clear(&mut self) {
        self.selection.clear();
    }

    /// Commit the working selection for the current topic (empty set
    /// included), mark it visited, and step forward.
    pub fn next(&mut self) {
        if let Some(i) = self.cursor.index() {
            let id = self.topics[i].id.clone();
            self.store.commit_dimensions(id.clone(), self.selection.clone());
            self.visited.insert(id);
        }
        self.cursor.next();
        self.reseed();
    }

    /// Step back without committing; the working selection re-seeds from
    /// whatever was previously committed for the topic stepped onto.
    pub fn previous(&mut self) {
        self.cursor.previous();
        self.reseed();
    }

    fn reseed(&mut self) {
        self.selection = self
            .current()
            .and_then(|topic| self.store.dimensions_for(&topic.id))
            .cloned()
            .unwrap_or_default();
    }

    /// Number of topics visited (forward steps only) and the total.
    pub fn progress(&self) -> (usize, usize) {
        (self.visited.len(), self.topics.len())
    }

    /// True once every topic has been advanced past.
    pub fn is_exhausted(&self) -> bool {
        self.cursor.is_exhausted()
    }

    /// The topics under review, for deriving the gold sets.
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Committed labels.
    pub fn store(&self) -> &LabelStore {
        &self.store
    }

    /// Score the committed selections against the given gold sets.
    pub fn metrics(
        &self,
        gold: &BTreeMap<TopicId, BTreeSet<Dimension>>,
    ) -> MetricsSnapshot {
        score(gold, self.store.dimension_selections())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dimlab_domain::gold_dimensions;

    fn topic(id: &str, dims: &[Dimension]) -> Topic {
        Topic {
            id: TopicId::new(id),
            title: format!("topic {}", id),
            top_term: None,
            category: None,
            hypotheses: dims
                .iter()
                .map(|&dimension| Hypothesis {
                    text: format!("{} hypothesis", dimension),
                    dimension,
                    explanation: String::new(),
                    ideological_side: None,
                })
                .collect(),
        }
    }

    fn rows() -> Vec<FlatRow> {
        flatten(&[
            topic("a", &[Dimension::Lrgen, Dimension::Galtan]),
            topic("b", &[Dimension::Cosmo]),
        ])
    }

    #[test]
    fn test_partial_draft_produces_no_entry() {
        let mut session = HypothesisSession::over_rows(rows());
        assert_eq!(session.set_clarity(Verdict::Yes), Some(false));
        assert_eq!(session.labeled_count(), 0);
    }

    #[test]
    fn test_completing_draft_commits() {
        let mut session = HypothesisSession::over_rows(rows());
        session.set_clarity(Verdict::Yes);
        assert_eq!(session.set_relevance(Verdict::No), Some(true));
        assert_eq!(session.labeled_count(), 1);

        let key = session.current().unwrap().key;
        let label = session.store().quality_label(&key).unwrap();
        assert_eq!(label.clarity, Verdict::Yes);
        assert_eq!(label.relevance, Verdict::No);
    }

    #[test]
    fn test_draft_survives_navigation_and_reseeds() {
        let mut session = HypothesisSession::over_rows(rows());
        session.set_clarity(Verdict::Yes);
        session.set_relevance(Verdict::Yes);
        session.next();
        session.previous();

        let draft = session.draft();
        assert_eq!(draft.clarity, Some(Verdict::Yes));
        assert_eq!(draft.relevance, Some(Verdict::Yes));
    }

    #[test]
    fn test_exhausted_session_refuses_verdicts() {
        let mut session = HypothesisSession::over_rows(rows());
        for _ in 0..3 {
            session.next();
        }
        assert!(session.is_exhausted());
        assert_eq!(session.set_clarity(Verdict::Yes), None);
    }

    #[test]
    fn test_by_topic_plan_walks_every_hypothesis() {
        let topics = vec![
            topic("a", &[Dimension::Lrgen, Dimension::Galtan]),
            topic("empty", &[]),
            topic("b", &[Dimension::Cosmo]),
        ];
        let mut session = HypothesisSession::over_topics(topics);
        assert_eq!(session.total_units(), 3);

        let first = session.current().unwrap();
        assert_eq!(first.key, HypothesisKey::new(TopicId::new("a"), 0));
        assert_eq!(first.ordinal, 1);

        session.next();
        session.next();
        let third = session.current().unwrap();
        assert_eq!(third.key, HypothesisKey::new(TopicId::new("b"), 0));
        assert_eq!(third.ordinal, 3);
    }

    #[test]
    fn test_export_rows_match_view_order() {
        let topics = vec![topic("a", &[Dimension::Lrgen]), topic("b", &[Dimension::Cosmo])];
        let session = HypothesisSession::over_topics(topics);
        let rows = session.export_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].topic_id, TopicId::new("a"));
        assert_eq!(rows[1].topic_id, TopicId::new("b"));
    }

    #[test]
    fn test_topic_session_commits_empty_selection_on_advance() {
        let mut session = TopicSession::new(vec![topic("a", &[Dimension::Lrgen])]);
        session.next();

        let committed = session.store().dimensions_for(&TopicId::new("a"));
        assert!(committed.is_some());
        assert!(committed.unwrap().is_empty());
        assert_eq!(session.progress(), (1, 1));
    }

    #[test]
    fn test_topic_session_reseeds_on_revisit() {
        let mut session = TopicSession::new(vec![
            topic("a", &[Dimension::Lrgen]),
            topic("b", &[Dimension::Cosmo]),
        ]);
        session.toggle(Dimension::Lrgen);
        session.next();
        assert!(session.selection().is_empty());

        session.previous();
        assert!(session.selection().contains(&Dimension::Lrgen));
    }

    #[test]
    fn test_backward_steps_do_not_commit() {
        let mut session = TopicSession::new(vec![
            topic("a", &[Dimension::Lrgen]),
            topic("b", &[Dimension::Cosmo]),
        ]);
        session.next();
        session.toggle(Dimension::Cosmo);
        session.previous();

        // Topic b was never advanced past, so nothing committed for it
        assert!(session.store().dimensions_for(&TopicId::new("b")).is_none());
        assert_eq!(session.progress(), (1, 2));
    }

    #[test]
    fn test_visited_survives_backward_revisit() {
        let mut session = TopicSession::new(vec![
            topic("a", &[Dimension::Lrgen]),
            topic("b", &[Dimension::Cosmo]),
        ]);
        session.next();
        session.previous();
        assert_eq!(session.progress(), (1, 2));
    }

    #[test]
    fn test_topic_session_metrics_against_gold() {
        let topics = vec![topic("a", &[Dimension::Lrgen, Dimension::EuIntegration])];
        let gold = gold_dimensions(&topics);

        let mut session = TopicSession::new(topics);
        session.toggle(Dimension::Lrgen);
        session.next();
        assert!(session.is_exhausted());

        let snapshot = session.metrics(&gold);
        assert_eq!(snapshot.precision, 1.0);
        assert_eq!(snapshot.recall, 0.5);
    }

    #[test]
    fn test_toggle_refused_when_exhausted() {
        let mut session = TopicSession::new(vec![topic("a", &[Dimension::Lrgen])]);
        session.next();
        assert!(session.is_exhausted());
        assert_eq!(session.toggle(Dimension::Cosmo), None);
    }
}
