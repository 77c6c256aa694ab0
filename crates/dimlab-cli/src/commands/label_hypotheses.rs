//! Label-hypotheses command: the interactive quality-labeling session.

use crate::cli::LabelHypothesesArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::HypothesisSession;
use dimlab_corpus::{checked_sample_size, load_corpus, quality_records, sample, write_quality_export};
use dimlab_domain::{flatten, Topic, Verdict};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::debug;

/// Execute the label-hypotheses command.
pub fn execute_label_hypotheses(
    args: LabelHypothesesArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let corpus_path = args.corpus.unwrap_or_else(|| config.paths.corpus.clone());
    let output = args
        .output
        .unwrap_or_else(|| config.paths.quality_labels.clone());
    let size = checked_sample_size(args.size.unwrap_or(config.review.sample_size))?;
    let seed = args.seed.unwrap_or(config.review.seed);

    let topics = load_corpus(&corpus_path)?;
    let corpus_stats = (
        topics.len(),
        topics.iter().map(|t| t.hypotheses.len()).sum::<usize>(),
    );

    let session = if args.by_topic {
        let nonempty: Vec<Topic> = topics
            .into_iter()
            .filter(|t| !t.hypotheses.is_empty())
            .collect();
        HypothesisSession::over_topics(sample(&nonempty, size, seed))
    } else {
        let rows = flatten(&topics);
        HypothesisSession::over_rows(sample(&rows, size, seed))
    };
    debug!(units = session.total_units(), seed, by_topic = args.by_topic, "labeling session started");

    let sampled_rows = session.export_rows();
    let sampled_topics: BTreeSet<_> = sampled_rows.iter().map(|r| r.topic_id.clone()).collect();

    println!(
        "{}",
        formatter.info("Hypothesis labeler - type 'help' for commands, 'exit' to quit")
    );
    println!(
        "{}",
        formatter.dataset_stats(corpus_stats, Some((sampled_topics.len(), sampled_rows.len())))
    );

    run_loop(session, formatter, &output)
}

fn run_loop(
    mut session: HypothesisSession,
    formatter: &Formatter,
    default_output: &PathBuf,
) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    let history_path = super::history_path()?;
    let _ = editor.load_history(&history_path);

    show_current(&session, formatter);

    loop {
        let prompt = match session.current() {
            Some(view) => format!("label [{}/{}]> ", view.ordinal, view.total),
            None => "label [done]> ".to_string(),
        };

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line).ok();

                match parse_command(line) {
                    Ok(SessionCommand::Exit) => {
                        if session.labeled_count() > 0 {
                            println!(
                                "{}",
                                formatter.warning(
                                    "Labels not exported are lost; 'save' writes them to disk."
                                )
                            );
                        }
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(command) => {
                        if let Err(e) = apply_command(command, &mut session, formatter, default_output)
                        {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();
    Ok(())
}

/// Session command type.
enum SessionCommand {
    Clarity(Verdict),
    Relevance(Verdict),
    Next,
    Previous,
    Show,
    Dims,
    Status,
    Save(Option<PathBuf>),
    Help,
    Exit,
}

/// Parse a session command line.
fn parse_command(line: &str) -> Result<SessionCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    match parts[0] {
        "clarity" | "c" => parse_verdict_command(&parts[1..], SessionCommand::Clarity),
        "relevance" | "r" => parse_verdict_command(&parts[1..], SessionCommand::Relevance),
        "next" | "n" => Ok(SessionCommand::Next),
        "previous" | "prev" | "p" => Ok(SessionCommand::Previous),
        "show" | "s" => Ok(SessionCommand::Show),
        "dims" => Ok(SessionCommand::Dims),
        "status" => Ok(SessionCommand::Status),
        "save" => Ok(SessionCommand::Save(parts.get(1).map(PathBuf::from))),
        "help" | "?" => Ok(SessionCommand::Help),
        "exit" | "quit" | "q" => Ok(SessionCommand::Exit),
        other => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            other
        ))),
    }
}

fn parse_verdict_command(
    args: &[&str],
    build: impl FnOnce(Verdict) -> SessionCommand,
) -> Result<SessionCommand> {
    let raw = args
        .first()
        .ok_or_else(|| CliError::InvalidInput("Usage: clarity|relevance yes|no".to_string()))?;
    let verdict = Verdict::parse(raw)
        .ok_or_else(|| CliError::InvalidInput(format!("Expected yes or no, got '{}'", raw)))?;
    Ok(build(verdict))
}

/// Execute a session command.
fn apply_command(
    command: SessionCommand,
    session: &mut HypothesisSession,
    formatter: &Formatter,
    default_output: &PathBuf,
) -> Result<()> {
    match command {
        SessionCommand::Clarity(verdict) => {
            apply_verdict(session.set_clarity(verdict), session, formatter);
        }
        SessionCommand::Relevance(verdict) => {
            apply_verdict(session.set_relevance(verdict), session, formatter);
        }
        SessionCommand::Next => {
            session.next();
            show_current(session, formatter);
        }
        SessionCommand::Previous => {
            session.previous();
            show_current(session, formatter);
        }
        SessionCommand::Show => {
            show_current(session, formatter);
        }
        SessionCommand::Dims => {
            println!("{}", formatter.dimension_reference());
        }
        SessionCommand::Status => {
            println!(
                "{}",
                formatter.info(&format!(
                    "Hypotheses labeled: {}/{}",
                    session.labeled_count(),
                    session.total_units()
                ))
            );
        }
        SessionCommand::Save(path) => {
            let records = quality_records(&session.export_rows(), session.store());
            if records.is_empty() {
                println!("{}", formatter.warning("No labels committed yet."));
            } else {
                let path = path.unwrap_or_else(|| default_output.clone());
                write_quality_export(&path, &records)?;
                println!(
                    "{}",
                    formatter.success(&format!(
                        "Saved {} label(s) to {}",
                        records.len(),
                        path.display()
                    ))
                );
            }
        }
        SessionCommand::Help => {
            print_help(formatter);
        }
        SessionCommand::Exit => unreachable!(),
    }

    Ok(())
}

fn apply_verdict(outcome: Option<bool>, session: &HypothesisSession, formatter: &Formatter) {
    match outcome {
        None => {
            println!(
                "{}",
                formatter.warning("Every hypothesis has been reviewed; nothing to label.")
            );
        }
        Some(committed) => {
            println!("{}", formatter.draft_status(&session.draft()));
            if committed {
                let key = session.current().expect("unit exists after verdict").key;
                println!("{}", formatter.success(&format!("Label committed for {}", key)));
            }
        }
    }
}

fn show_current(session: &HypothesisSession, formatter: &Formatter) {
    match session.current() {
        Some(view) => {
            println!();
            println!("{}", formatter.review_header(view.title, view.top_term));
            println!("{}", formatter.hypothesis_card(view.hypothesis));
            println!("{}", formatter.draft_status(&session.draft()));
        }
        None => {
            println!(
                "{}",
                formatter.success(
                    "All hypotheses have been reviewed! Save your progress with 'save'."
                )
            );
        }
    }
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  clarity yes|no   (c y/n)  - Judge whether the hypothesis is clearly stated");
    println!("  relevance yes|no (r y/n)  - Judge whether it addresses the topic and dimension");
    println!("  next, n                   - Advance to the next hypothesis");
    println!("  previous, p               - Go back one hypothesis");
    println!("  show, s                   - Redisplay the current hypothesis");
    println!("  dims                      - Show the ideological dimension reference");
    println!("  status                    - Show labeling progress");
    println!("  save [path]               - Export committed labels as JSONL");
    println!("  help, ?                   - Show this help");
    println!("  exit, quit, q             - Exit the session");
    println!();
    println!("  A label is committed once both criteria have a verdict.");
    println!();
}
