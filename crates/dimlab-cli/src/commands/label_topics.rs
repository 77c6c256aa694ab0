//! Label-topics command: the interactive dimension-selection session.

use crate::cli::LabelTopicsArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::TopicSession;
use dimlab_corpus::{
    load_corpus, read_sampled_topic_ids, write_dimension_selections, write_metrics,
};
use dimlab_domain::{gold_dimensions, Dimension, TopicId};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use tracing::debug;

/// Execute the label-topics command.
pub fn execute_label_topics(
    args: LabelTopicsArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let corpus_path = args.corpus.unwrap_or_else(|| config.paths.corpus.clone());
    let output = args
        .output
        .unwrap_or_else(|| config.paths.dimension_labels.clone());
    let metrics_output = args
        .metrics_output
        .unwrap_or_else(|| config.paths.metrics.clone());

    let mut topics = load_corpus(&corpus_path)?;
    if let Some(sampled) = args.sampled {
        let keep: BTreeSet<TopicId> = read_sampled_topic_ids(&sampled)?.into_iter().collect();
        topics.retain(|t| keep.contains(&t.id));
    }
    let gold = gold_dimensions(&topics);
    let session = TopicSession::new(topics);
    debug!(topics = session.topics().len(), "topic labeling session started");

    println!(
        "{}",
        formatter.info("Topics labeler - type 'help' for commands, 'exit' to quit")
    );
    println!(
        "{}",
        formatter.info("Toggle a dimension by typing its name, e.g. LRGEN")
    );

    run_loop(session, gold, formatter, &output, &metrics_output)
}

fn run_loop(
    mut session: TopicSession,
    gold: BTreeMap<TopicId, BTreeSet<Dimension>>,
    formatter: &Formatter,
    default_output: &PathBuf,
    default_metrics_output: &PathBuf,
) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    let history_path = super::history_path()?;
    let _ = editor.load_history(&history_path);

    show_current(&session, formatter);

    loop {
        let prompt = match session.position() {
            (Some(ordinal), total) => format!("topics [{}/{}]> ", ordinal, total),
            (None, _) => "topics [done]> ".to_string(),
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
                        if session.store().dimension_count() > 0 {
                            println!(
                                "{}",
                                formatter.warning(
                                    "Selections not exported are lost; 'save' writes them to disk."
                                )
                            );
                        }
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(command) => {
                        if let Err(e) = apply_command(
                            command,
                            &mut session,
                            &gold,
                            formatter,
                            default_output,
                            default_metrics_output,
                        ) {
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
    Toggle(Dimension),
    Clear,
    Next,
    Previous,
    Show,
    Dims,
    Status,
    Metrics(Option<PathBuf>),
    Save(Option<PathBuf>),
    Help,
    Exit,
}

/// Parse a session command line. A bare dimension name toggles it.
fn parse_command(line: &str) -> Result<SessionCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    match parts[0] {
        "toggle" | "t" => {
            let raw = parts.get(1).ok_or_else(|| {
                CliError::InvalidInput("Usage: toggle <DIMENSION>".to_string())
            })?;
            Ok(SessionCommand::Toggle(parse_dimension(raw)?))
        }
        "clear" => Ok(SessionCommand::Clear),
        "next" | "n" => Ok(SessionCommand::Next),
        "previous" | "prev" | "p" => Ok(SessionCommand::Previous),
        "show" | "s" => Ok(SessionCommand::Show),
        "dims" => Ok(SessionCommand::Dims),
        "status" => Ok(SessionCommand::Status),
        "metrics" => Ok(SessionCommand::Metrics(parts.get(1).map(PathBuf::from))),
        "save" => Ok(SessionCommand::Save(parts.get(1).map(PathBuf::from))),
        "help" | "?" => Ok(SessionCommand::Help),
        "exit" | "quit" | "q" => Ok(SessionCommand::Exit),
        other => match Dimension::parse(other) {
            Some(dimension) => Ok(SessionCommand::Toggle(dimension)),
            None => Err(CliError::InvalidInput(format!(
                "Unknown command or dimension: {}. Type 'help' for commands, 'dims' for dimensions.",
                other
            ))),
        },
    }
}

fn parse_dimension(raw: &str) -> Result<Dimension> {
    Dimension::parse(raw)
        .ok_or_else(|| CliError::InvalidInput(format!("Unknown dimension: {}", raw)))
}

/// Execute a session command.
fn apply_command(
    command: SessionCommand,
    session: &mut TopicSession,
    gold: &BTreeMap<TopicId, BTreeSet<Dimension>>,
    formatter: &Formatter,
    default_output: &PathBuf,
    default_metrics_output: &PathBuf,
) -> Result<()> {
    match command {
        SessionCommand::Toggle(dimension) => match session.toggle(dimension) {
            None => {
                println!(
                    "{}",
                    formatter.warning("Every topic has been reviewed; nothing to select.")
                );
            }
            Some(selected) => {
                let action = if selected { "Selected" } else { "Deselected" };
                println!("{}", formatter.info(&format!("{} {}", action, dimension)));
                println!("{}", formatter.selection_line(session.selection()));
            }
        },
        SessionCommand::Clear => {
            session.clear();
            println!("{}", formatter.selection_line(session.selection()));
        }
        SessionCommand::Next => {
            session.next();
            if session.is_exhausted() {
                show_exhausted(session, gold, formatter);
            } else {
                show_current(session, formatter);
            }
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
            let (visited, total) = session.progress();
            println!(
                "{}",
                formatter.info(&format!("Topics labeled: {}/{}", visited, total))
            );
        }
        SessionCommand::Metrics(path) => {
            let snapshot = session.metrics(gold);
            println!("{}", formatter.metrics_table(&snapshot));
            if let Some(path) = path {
                write_metrics(&path, &snapshot)?;
                println!(
                    "{}",
                    formatter.success(&format!("Saved metrics to {}", path.display()))
                );
            } else if session.is_exhausted() {
                println!(
                    "{}",
                    formatter.info(&format!(
                        "Use 'metrics {}' to save them.",
                        default_metrics_output.display()
                    ))
                );
            }
        }
        SessionCommand::Save(path) => {
            if session.store().dimension_count() == 0 {
                println!("{}", formatter.warning("No selections committed yet."));
            } else {
                let path = path.unwrap_or_else(|| default_output.clone());
                write_dimension_selections(&path, session.store().dimension_selections())?;
                println!(
                    "{}",
                    formatter.success(&format!(
                        "Saved selections for {} topic(s) to {}",
                        session.store().dimension_count(),
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

fn show_current(session: &TopicSession, formatter: &Formatter) {
    match session.current() {
        Some(topic) => {
            println!();
            println!("{}", formatter.topic_header(topic));
            println!(
                "{}",
                formatter.info("What ideological dimensions are relevant to this topic?")
            );
            println!("{}", formatter.selection_line(session.selection()));
        }
        None => {
            println!(
                "{}",
                formatter.success("All topics have been reviewed! See 'metrics' and 'save'.")
            );
        }
    }
}

fn show_exhausted(
    session: &TopicSession,
    gold: &BTreeMap<TopicId, BTreeSet<Dimension>>,
    formatter: &Formatter,
) {
    println!("{}", formatter.success("All topics have been reviewed!"));
    println!("{}", formatter.metrics_table(&session.metrics(gold)));
    println!(
        "{}",
        formatter.info("'save' exports the selections, 'metrics <path>' the scores.")
    );
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  <DIMENSION>               - Toggle a dimension, e.g. LRGEN");
    println!("  toggle <DIMENSION>        - Same, spelled out");
    println!("  clear                     - Clear the working selection");
    println!("  next, n                   - Commit the selection and advance");
    println!("  previous, p               - Go back one topic (no commit)");
    println!("  show, s                   - Redisplay the current topic");
    println!("  dims                      - Show the ideological dimension reference");
    println!("  status                    - Show labeling progress");
    println!("  metrics [path]            - Score selections against the gold set");
    println!("  save [path]               - Export selections as JSON");
    println!("  help, ?                   - Show this help");
    println!("  exit, quit, q             - Exit the session");
    println!();
    println!("  Advancing commits the selection as shown, even when empty.");
    println!();
}
