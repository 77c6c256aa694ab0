//! Corpus loading - newline-delimited JSON into domain topics.
//!
//! Raw serde structs live here and convert into `dimlab-domain` types, so
//! the domain crate stays free of serialization concerns.

use crate::error::CorpusError;
use dimlab_domain::{Category, Dimension, Hypothesis, Topic, TopicId};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Load an ordered corpus of topics from a newline-delimited JSON file.
///
/// Each line must be a single JSON object with `id`, `topic`, and
/// `hypotheses`; `top_term` and `category` are optional. The first
/// malformed line fails the whole load with
/// [`CorpusError::MalformedRecord`], and a missing file fails with
/// [`CorpusError::NotFound`]. Pure function of the file contents.
pub fn load_corpus(path: impl AsRef<Path>) -> crate::Result<Vec<Topic>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CorpusError::NotFound(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path)?;
    let mut topics = Vec::new();

    for (number, line) in contents.lines().enumerate() {
        let line_no = number + 1;
        let raw: RawTopic =
            serde_json::from_str(line).map_err(|e| CorpusError::MalformedRecord {
                line: line_no,
                reason: e.to_string(),
            })?;
        topics.push(raw.into_topic(line_no)?);
    }

    info!(
        topics = topics.len(),
        hypotheses = topics.iter().map(|t| t.hypotheses.len()).sum::<usize>(),
        path = %path.display(),
        "corpus loaded"
    );
    Ok(topics)
}

/// One corpus line as it appears on disk.
#[derive(Debug, Deserialize)]
struct RawTopic {
    id: RawId,
    topic: String,
    #[serde(default)]
    top_term: Option<String>,
    #[serde(default)]
    category: Option<String>,
    hypotheses: Vec<RawHypothesis>,
}

#[derive(Debug, Deserialize)]
struct RawHypothesis {
    hypothesis: String,
    dimension: String,
    explanation: String,
    #[serde(default)]
    ideological_side: Option<String>,
}

/// Topic ids appear both as strings and as bare integers in the wild;
/// both normalize to the string form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

impl RawTopic {
    fn into_topic(self, line: usize) -> crate::Result<Topic> {
        let category = match self.category {
            Some(raw) => Some(Category::parse(&raw).ok_or_else(|| {
                CorpusError::MalformedRecord {
                    line,
                    reason: format!("unknown category `{}`", raw),
                }
            })?),
            None => None,
        };

        let hypotheses = self
            .hypotheses
            .into_iter()
            .map(|raw| raw.into_hypothesis(line))
            .collect::<crate::Result<Vec<_>>>()?;

        let topic = Topic {
            id: TopicId::new(self.id.into_string()),
            title: self.topic,
            top_term: self.top_term,
            category,
            hypotheses,
        };
        debug!(id = %topic.id, hypotheses = topic.hypotheses.len(), "record parsed");
        Ok(topic)
    }
}

impl RawHypothesis {
    fn into_hypothesis(self, line: usize) -> crate::Result<Hypothesis> {
        let dimension =
            Dimension::parse(&self.dimension).ok_or_else(|| CorpusError::MalformedRecord {
                line,
                reason: format!("unknown dimension `{}`", self.dimension),
            })?;

        Ok(Hypothesis {
            text: self.hypothesis,
            dimension,
            explanation: self.explanation,
            ideological_side: self.ideological_side,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_topic_parsing() {
        let json = r#"
        {
            "id": "T1",
            "topic": "carbon tax",
            "top_term": "climate policy",
            "category": "intermediate",
            "hypotheses": [
                {
                    "hypothesis": "Supporters of a carbon tax favor state intervention.",
                    "dimension": "ECON_INTERVEN",
                    "explanation": "Carbon pricing is a market intervention.",
                    "ideological_side": "left"
                }
            ]
        }
        "#;

        let raw: RawTopic = serde_json::from_str(json).unwrap();
        let topic = raw.into_topic(1).unwrap();

        assert_eq!(topic.id, TopicId::new("T1"));
        assert_eq!(topic.title, "carbon tax");
        assert_eq!(topic.category, Some(Category::Intermediate));
        assert_eq!(topic.hypotheses.len(), 1);
        assert_eq!(topic.hypotheses[0].dimension, Dimension::EconInterven);
        assert_eq!(topic.hypotheses[0].ideological_side.as_deref(), Some("left"));
    }

    #[test]
    fn test_numeric_id_normalizes_to_string() {
        let json = r#"{"id": 17, "topic": "t", "hypotheses": []}"#;
        let raw: RawTopic = serde_json::from_str(json).unwrap();
        let topic = raw.into_topic(1).unwrap();
        assert_eq!(topic.id, TopicId::new("17"));
    }

    #[test]
    fn test_unknown_dimension_is_malformed() {
        let json = r#"
        {
            "id": "T1",
            "topic": "t",
            "hypotheses": [
                {"hypothesis": "h", "dimension": "FOREIGN_AID", "explanation": "e"}
            ]
        }
        "#;
        let raw: RawTopic = serde_json::from_str(json).unwrap();
        let err = raw.into_topic(3).unwrap_err();
        match err {
            CorpusError::MalformedRecord { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("FOREIGN_AID"));
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_category_is_malformed() {
        let json = r#"{"id": "T1", "topic": "t", "category": "expert", "hypotheses": []}"#;
        let raw: RawTopic = serde_json::from_str(json).unwrap();
        assert!(raw.into_topic(1).is_err());
    }

    #[test]
    fn test_missing_required_field_fails_deserialization() {
        // No `topic` key
        let json = r#"{"id": "T1", "hypotheses": []}"#;
        assert!(serde_json::from_str::<RawTopic>(json).is_err());
    }
}
