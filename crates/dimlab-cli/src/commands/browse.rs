//! Browse command implementation.

use crate::cli::{BrowseArgs, CategoryFilter};
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use dimlab_corpus::load_corpus;
use dimlab_domain::Topic;

/// Execute the browse command: explore the corpus without labeling.
pub fn execute_browse(args: BrowseArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    if args.dims {
        println!("{}", formatter.dimension_reference());
        return Ok(());
    }

    let corpus_path = args.corpus.unwrap_or_else(|| config.paths.corpus.clone());
    let topics = load_corpus(&corpus_path)?;
    let hypothesis_count: usize = topics.iter().map(|t| t.hypotheses.len()).sum();

    println!(
        "{}",
        formatter.dataset_stats((topics.len(), hypothesis_count), None)
    );
    if args.stats {
        return Ok(());
    }

    let needle = args.topic.map(|t| t.to_lowercase());
    let filtered: Vec<&Topic> = topics
        .iter()
        .filter(|topic| matches_category(topic, args.category))
        .filter(|topic| match &needle {
            Some(needle) => topic.title.to_lowercase().contains(needle),
            None => true,
        })
        .collect();

    if filtered.is_empty() {
        println!("{}", formatter.warning("No topics match the given filters."));
        return Ok(());
    }

    match formatter.format() {
        OutputFormat::Json => print_json(&filtered)?,
        OutputFormat::Quiet => {
            for topic in filtered {
                println!("{}", topic.id);
            }
        }
        OutputFormat::Table => {
            for topic in filtered {
                println!();
                println!("{}", formatter.topic_header(topic));
                for hypothesis in &topic.hypotheses {
                    println!("{}", formatter.hypothesis_card(hypothesis));
                    println!();
                }
                println!("---");
            }
        }
    }

    Ok(())
}

fn matches_category(topic: &Topic, filter: Option<CategoryFilter>) -> bool {
    match filter {
        None => true,
        Some(CategoryFilter::Technical) => {
            topic.category.is_some_and(|c| c.is_technical())
        }
        Some(CategoryFilter::NonTechnical) => {
            topic.category.is_some_and(|c| !c.is_technical())
        }
    }
}

fn print_json(topics: &[&Topic]) -> Result<()> {
    let values: Vec<serde_json::Value> = topics
        .iter()
        .map(|topic| {
            serde_json::json!({
                "id": topic.id.as_str(),
                "topic": topic.title,
                "top_term": topic.top_term,
                "category": topic.category.map(|c| c.as_str()),
                "hypotheses": topic.hypotheses.iter().map(|h| {
                    serde_json::json!({
                        "hypothesis": h.text,
                        "dimension": h.dimension.as_str(),
                        "explanation": h.explanation,
                        "ideological_side": h.ideological_side,
                    })
                }).collect::<Vec<_>>(),
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&values)?);
    Ok(())
}
