//! Integration tests for dimlab-corpus
//!
//! These tests exercise the full load -> flatten -> sample -> export cycle
//! against real files on disk.

use dimlab_corpus::{
    load_corpus, quality_records, read_dimension_selections, read_quality_export,
    read_sampled_topic_ids, rebuild_label_store, sample, write_dimension_selections,
    write_metrics, write_quality_export, write_sampled_rows, CorpusError,
};
use dimlab_domain::{
    flatten, gold_dimensions, score, Dimension, HypothesisKey, LabelStore, QualityDraft, TopicId,
    Verdict,
};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

fn write_corpus(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}

const TOPIC_A: &str = r#"{"id": "A", "topic": "wealth tax", "top_term": "taxation", "category": "easy", "hypotheses": [{"hypothesis": "Supporters of a wealth tax favor redistribution.", "dimension": "REDISTRIBUTION", "explanation": "Direct transfer of wealth.", "ideological_side": "left"}, {"hypothesis": "Opponents frame it as anti-growth.", "dimension": "LRECON", "explanation": "Economic left/right framing."}]}"#;
const TOPIC_B: &str = r#"{"id": "B", "topic": "border fence", "category": "technical", "hypotheses": [{"hypothesis": "Proponents favor restrictive immigration policy.", "dimension": "IMMIGRATE_POLICY", "explanation": "Restriction stance."}]}"#;
const TOPIC_EMPTY: &str = r#"{"id": "C", "topic": "noise", "hypotheses": []}"#;

#[test]
fn test_load_missing_file_is_not_found() {
    let err = load_corpus("/nonexistent/hypotheses.jsonl").unwrap_err();
    assert!(matches!(err, CorpusError::NotFound(_)));
}

#[test]
fn test_load_parses_full_corpus() {
    let file = write_corpus(&[TOPIC_A, TOPIC_B, TOPIC_EMPTY]);
    let topics = load_corpus(file.path()).unwrap();

    assert_eq!(topics.len(), 3);
    assert_eq!(topics[0].id, TopicId::new("A"));
    assert_eq!(topics[0].hypotheses.len(), 2);
    assert_eq!(topics[1].hypotheses[0].dimension, Dimension::ImmigratePolicy);
    assert!(topics[2].hypotheses.is_empty());
}

#[test]
fn test_load_is_idempotent() {
    let file = write_corpus(&[TOPIC_A, TOPIC_B]);
    let first = load_corpus(file.path()).unwrap();
    let second = load_corpus(file.path()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_malformed_line_aborts_whole_load() {
    let file = write_corpus(&[TOPIC_A, "not json", TOPIC_B]);
    let err = load_corpus(file.path()).unwrap_err();
    match err {
        CorpusError::MalformedRecord { line, .. } => assert_eq!(line, 2),
        other => panic!("expected MalformedRecord, got {:?}", other),
    }
}

#[test]
fn test_unknown_dimension_aborts_whole_load() {
    let bad = r#"{"id": "X", "topic": "t", "hypotheses": [{"hypothesis": "h", "dimension": "ASTROLOGY", "explanation": "e"}]}"#;
    let file = write_corpus(&[TOPIC_A, bad]);
    let err = load_corpus(file.path()).unwrap_err();
    match err {
        CorpusError::MalformedRecord { line, reason } => {
            assert_eq!(line, 2);
            assert!(reason.contains("ASTROLOGY"));
        }
        other => panic!("expected MalformedRecord, got {:?}", other),
    }
}

#[test]
fn test_missing_required_key_aborts_whole_load() {
    let file = write_corpus(&[r#"{"id": "X", "hypotheses": []}"#]);
    assert!(matches!(
        load_corpus(file.path()),
        Err(CorpusError::MalformedRecord { line: 1, .. })
    ));
}

#[test]
fn test_load_flatten_sample_pipeline() {
    let file = write_corpus(&[TOPIC_A, TOPIC_B, TOPIC_EMPTY]);
    let topics = load_corpus(file.path()).unwrap();
    let rows = flatten(&topics);

    // Empty topic C contributes nothing
    assert_eq!(rows.len(), 3);

    let drawn = sample(&rows, 2, 42);
    assert_eq!(drawn.len(), 2);
    assert_eq!(drawn, sample(&rows, 2, 42));
}

#[test]
fn test_quality_export_roundtrip_reconstructs_label_map() {
    let file = write_corpus(&[TOPIC_A, TOPIC_B]);
    let topics = load_corpus(file.path()).unwrap();
    let rows = flatten(&topics);

    let mut store = LabelStore::new();
    let mut draft = QualityDraft::new();
    draft.set_clarity(Verdict::Yes);
    draft.set_relevance(Verdict::No);
    for row in &rows {
        store.commit_if_complete(HypothesisKey::new(row.topic_id.clone(), row.index), &draft);
    }

    let out = tempfile::NamedTempFile::new().unwrap();
    let records = quality_records(&rows, &store);
    write_quality_export(out.path(), &records).unwrap();

    let read_back = read_quality_export(out.path()).unwrap();
    assert_eq!(read_back, records);

    let rebuilt = rebuild_label_store(&read_back).unwrap();
    assert_eq!(rebuilt.quality_count(), store.quality_count());
    for (key, label) in store.quality_labels() {
        assert_eq!(rebuilt.quality_label(key), Some(label));
    }
}

#[test]
fn test_dimension_selection_export_roundtrip() {
    let mut selections: BTreeMap<TopicId, BTreeSet<Dimension>> = BTreeMap::new();
    selections.insert(
        TopicId::new("A"),
        [Dimension::Redistribution, Dimension::Lrecon].into_iter().collect(),
    );
    // Empty selection is a valid committed answer and must survive export
    selections.insert(TopicId::new("B"), BTreeSet::new());

    let out = tempfile::NamedTempFile::new().unwrap();
    write_dimension_selections(out.path(), &selections).unwrap();
    let read_back = read_dimension_selections(out.path()).unwrap();

    assert_eq!(read_back, selections);
}

#[test]
fn test_selections_score_against_derived_gold() {
    let file = write_corpus(&[TOPIC_A, TOPIC_B]);
    let topics = load_corpus(file.path()).unwrap();
    let gold = gold_dimensions(&topics);

    let mut predicted: BTreeMap<TopicId, BTreeSet<Dimension>> = BTreeMap::new();
    predicted.insert(
        TopicId::new("A"),
        [Dimension::Redistribution].into_iter().collect(),
    );

    // Gold for A is {REDISTRIBUTION, LRECON}: one TP, one FN
    let snapshot = score(&gold, &predicted);
    assert_eq!(snapshot.precision, 1.0);
    assert_eq!(snapshot.recall, 0.5);

    let out = tempfile::NamedTempFile::new().unwrap();
    write_metrics(out.path(), &snapshot).unwrap();
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.path()).unwrap()).unwrap();
    assert_eq!(raw["precision"], 1.0);
    assert_eq!(raw["recall"], 0.5);
}

#[test]
fn test_sampled_rows_feed_topic_id_restriction() {
    let file = write_corpus(&[TOPIC_A, TOPIC_B]);
    let topics = load_corpus(file.path()).unwrap();
    let rows = flatten(&topics);

    let out = tempfile::NamedTempFile::new().unwrap();
    write_sampled_rows(out.path(), &rows).unwrap();

    let ids = read_sampled_topic_ids(out.path()).unwrap();
    assert_eq!(ids, vec![TopicId::new("A"), TopicId::new("B")]);
}
