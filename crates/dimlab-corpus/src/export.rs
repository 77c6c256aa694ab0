//! Export writers and readers for session results.
//!
//! Three flat formats leave a session: labeled hypotheses (JSONL, one
//! object per committed unit), topic dimension selections (a single JSON
//! object keyed by topic id), and a metrics snapshot (a single JSON
//! object). Sessions never import their own exports; the readers exist for
//! offline re-scoring and round-trip verification.

use crate::error::CorpusError;
use dimlab_domain::{
    Dimension, FlatRow, HypothesisKey, LabelStore, MetricsSnapshot, TopicId, Verdict,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::info;

/// One labeled hypothesis as it appears in the quality export.
///
/// Carries the hypothesis position alongside the topic id so the committed
/// label map can be reconstructed without parsing anything out of the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityRecord {
    /// Owning topic id
    pub topic_id: String,
    /// Owning topic text
    pub topic: String,
    /// Owning topic's general concept, when known
    pub top_term: Option<String>,
    /// Position of the hypothesis within the owning topic
    pub hypothesis_index: usize,
    /// Hypothesis statement
    pub hypothesis: String,
    /// Dimension the hypothesis takes a stance on
    pub dimension: String,
    /// Committed verdicts
    pub labels: QualityVerdicts,
}

/// The committed verdict pair in export form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityVerdicts {
    /// Clarity verdict (`yes`/`no`)
    pub clarity: String,
    /// Relevance verdict (`yes`/`no`)
    pub relevance: String,
}

/// Join committed quality labels with their sampled rows into export
/// records, ordered by unit key.
///
/// # Panics
/// Panics if the store holds a label for a unit that is not among `rows`;
/// labels are only ever committed for sampled units, so that is a
/// programming error.
pub fn quality_records(rows: &[FlatRow], store: &LabelStore) -> Vec<QualityRecord> {
    let by_key: BTreeMap<HypothesisKey, &FlatRow> = rows
        .iter()
        .map(|row| (HypothesisKey::new(row.topic_id.clone(), row.index), row))
        .collect();

    store
        .quality_labels()
        .map(|(key, label)| {
            let row = by_key
                .get(key)
                .unwrap_or_else(|| panic!("committed label for unsampled unit {}", key));
            QualityRecord {
                topic_id: row.topic_id.as_str().to_string(),
                topic: row.title.clone(),
                top_term: row.top_term.clone(),
                hypothesis_index: row.index,
                hypothesis: row.hypothesis.text.clone(),
                dimension: row.hypothesis.dimension.as_str().to_string(),
                labels: QualityVerdicts {
                    clarity: label.clarity.as_str().to_string(),
                    relevance: label.relevance.as_str().to_string(),
                },
            }
        })
        .collect()
}

/// Write quality records as newline-delimited JSON.
pub fn write_quality_export(path: impl AsRef<Path>, records: &[QualityRecord]) -> crate::Result<()> {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(record)?);
        out.push('\n');
    }
    fs::write(path.as_ref(), out)?;
    info!(records = records.len(), path = %path.as_ref().display(), "quality labels exported");
    Ok(())
}

/// Read a quality export back into records.
pub fn read_quality_export(path: impl AsRef<Path>) -> crate::Result<Vec<QualityRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CorpusError::NotFound(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path)?;
    contents
        .lines()
        .enumerate()
        .map(|(number, line)| {
            serde_json::from_str(line).map_err(|e| CorpusError::MalformedRecord {
                line: number + 1,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Rebuild the committed quality label map from export records.
pub fn rebuild_label_store(records: &[QualityRecord]) -> crate::Result<LabelStore> {
    let mut store = LabelStore::new();
    for (number, record) in records.iter().enumerate() {
        let mut draft = dimlab_domain::QualityDraft::new();
        draft.set_clarity(parse_verdict(&record.labels.clarity, number + 1)?);
        draft.set_relevance(parse_verdict(&record.labels.relevance, number + 1)?);
        let key = HypothesisKey::new(TopicId::new(record.topic_id.clone()), record.hypothesis_index);
        store.commit_if_complete(key, &draft);
    }
    Ok(store)
}

fn parse_verdict(raw: &str, line: usize) -> crate::Result<Verdict> {
    Verdict::parse(raw).ok_or_else(|| CorpusError::MalformedRecord {
        line,
        reason: format!("unknown verdict `{}`", raw),
    })
}

/// Write topic dimension selections as a single JSON object mapping topic
/// id to an array of dimension names.
pub fn write_dimension_selections(
    path: impl AsRef<Path>,
    selections: &BTreeMap<TopicId, BTreeSet<Dimension>>,
) -> crate::Result<()> {
    let object: BTreeMap<&str, Vec<&str>> = selections
        .iter()
        .map(|(id, dims)| (id.as_str(), dims.iter().map(|d| d.as_str()).collect()))
        .collect();
    fs::write(path.as_ref(), serde_json::to_string_pretty(&object)?)?;
    info!(topics = selections.len(), path = %path.as_ref().display(), "dimension selections exported");
    Ok(())
}

/// Read a topic dimension selection export back into a selection map.
pub fn read_dimension_selections(
    path: impl AsRef<Path>,
) -> crate::Result<BTreeMap<TopicId, BTreeSet<Dimension>>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CorpusError::NotFound(path.to_path_buf()));
    }
    let object: BTreeMap<String, Vec<String>> = serde_json::from_str(&fs::read_to_string(path)?)?;

    let mut selections = BTreeMap::new();
    for (id, names) in object {
        let mut dims = BTreeSet::new();
        for name in names {
            let dim = Dimension::parse(&name).ok_or_else(|| CorpusError::MalformedRecord {
                line: 1,
                reason: format!("unknown dimension `{}` for topic `{}`", name, id),
            })?;
            dims.insert(dim);
        }
        selections.insert(TopicId::new(id), dims);
    }
    Ok(selections)
}

/// Write a metrics snapshot as a single JSON object.
pub fn write_metrics(path: impl AsRef<Path>, metrics: &MetricsSnapshot) -> crate::Result<()> {
    let object = serde_json::json!({
        "precision": metrics.precision,
        "recall": metrics.recall,
        "f1": metrics.f1,
    });
    fs::write(path.as_ref(), serde_json::to_string_pretty(&object)?)?;
    info!(path = %path.as_ref().display(), "metrics exported");
    Ok(())
}

/// One flattened (topic, hypothesis) row in sampled-subset export form.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SampledRow {
    id: String,
    topic: String,
    top_term: Option<String>,
    category: Option<String>,
    hypothesis_index: usize,
    hypothesis: String,
    dimension: String,
    explanation: String,
    ideological_side: Option<String>,
}

/// Write sampled flat rows as newline-delimited JSON, for feeding a later
/// topic-labeling session.
pub fn write_sampled_rows(path: impl AsRef<Path>, rows: &[FlatRow]) -> crate::Result<()> {
    let mut out = String::new();
    for row in rows {
        let record = SampledRow {
            id: row.topic_id.as_str().to_string(),
            topic: row.title.clone(),
            top_term: row.top_term.clone(),
            category: row.category.map(|c| c.as_str().to_string()),
            hypothesis_index: row.index,
            hypothesis: row.hypothesis.text.clone(),
            dimension: row.hypothesis.dimension.as_str().to_string(),
            explanation: row.hypothesis.explanation.clone(),
            ideological_side: row.hypothesis.ideological_side.clone(),
        };
        out.push_str(&serde_json::to_string(&record)?);
        out.push('\n');
    }
    fs::write(path.as_ref(), out)?;
    info!(rows = rows.len(), path = %path.as_ref().display(), "sampled rows exported");
    Ok(())
}

/// Read the distinct topic ids out of a sampled-subset file, preserving
/// first-appearance order.
pub fn read_sampled_topic_ids(path: impl AsRef<Path>) -> crate::Result<Vec<TopicId>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CorpusError::NotFound(path.to_path_buf()));
    }

    #[derive(Deserialize)]
    struct IdOnly {
        id: serde_json::Value,
    }

    let contents = fs::read_to_string(path)?;
    let mut seen = BTreeSet::new();
    let mut ids = Vec::new();
    for (number, line) in contents.lines().enumerate() {
        let record: IdOnly =
            serde_json::from_str(line).map_err(|e| CorpusError::MalformedRecord {
                line: number + 1,
                reason: e.to_string(),
            })?;
        let id = match record.id {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            other => {
                return Err(CorpusError::MalformedRecord {
                    line: number + 1,
                    reason: format!("id must be a string or number, got {}", other),
                })
            }
        };
        if seen.insert(id.clone()) {
            ids.push(TopicId::new(id));
        }
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dimlab_domain::QualityDraft;

    fn row(id: &str, index: usize) -> FlatRow {
        FlatRow {
            topic_id: TopicId::new(id),
            title: format!("topic {}", id),
            top_term: None,
            category: None,
            index,
            hypothesis: dimlab_domain::Hypothesis {
                text: format!("hypothesis {}", index),
                dimension: Dimension::Lrgen,
                explanation: "e".to_string(),
                ideological_side: None,
            },
        }
    }

    #[test]
    fn test_quality_records_join_rows_and_labels() {
        let rows = vec![row("a", 0), row("a", 1), row("b", 0)];
        let mut store = LabelStore::new();
        let mut draft = QualityDraft::new();
        draft.set_clarity(Verdict::Yes);
        draft.set_relevance(Verdict::No);
        store.commit_if_complete(HypothesisKey::new(TopicId::new("a"), 1), &draft);

        let records = quality_records(&rows, &store);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].topic_id, "a");
        assert_eq!(records[0].hypothesis_index, 1);
        assert_eq!(records[0].hypothesis, "hypothesis 1");
        assert_eq!(records[0].labels.clarity, "yes");
        assert_eq!(records[0].labels.relevance, "no");
    }

    #[test]
    fn test_rebuild_roundtrip() {
        let rows = vec![row("a", 0), row("b", 2)];
        let mut store = LabelStore::new();
        let mut draft = QualityDraft::new();
        draft.set_clarity(Verdict::Yes);
        draft.set_relevance(Verdict::Yes);
        store.commit_if_complete(HypothesisKey::new(TopicId::new("a"), 0), &draft);
        draft.set_clarity(Verdict::No);
        store.commit_if_complete(HypothesisKey::new(TopicId::new("b"), 2), &draft);

        let records = quality_records(&rows, &store);
        let rebuilt = rebuild_label_store(&records).unwrap();

        assert_eq!(rebuilt.quality_count(), store.quality_count());
        for (key, label) in store.quality_labels() {
            assert_eq!(rebuilt.quality_label(key), Some(label));
        }
    }

    #[test]
    fn test_rebuild_rejects_unknown_verdict() {
        let records = vec![QualityRecord {
            topic_id: "a".to_string(),
            topic: "t".to_string(),
            top_term: None,
            hypothesis_index: 0,
            hypothesis: "h".to_string(),
            dimension: "LRGEN".to_string(),
            labels: QualityVerdicts {
                clarity: "maybe".to_string(),
                relevance: "yes".to_string(),
            },
        }];
        assert!(rebuild_label_store(&records).is_err());
    }
}
