//! dimlab - label generated political hypotheses and topics from the terminal.

use clap::Parser;
use dimlab_cli::commands;
use dimlab_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> dimlab_cli::Result<()> {
    // Diagnostics go to stderr so they never interleave with the session screens
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    // Load or create config
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|_| {
            let cfg = Config::default();
            cfg.save().ok();
            cfg
        }),
    };

    // Determine output format and color setting
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Browse(args) => commands::execute_browse(args, &config, &formatter)?,
        Command::Sample(args) => commands::execute_sample(args, &config, &formatter)?,
        Command::LabelHypotheses(args) => {
            commands::execute_label_hypotheses(args, &config, &formatter)?
        }
        Command::LabelTopics(args) => commands::execute_label_topics(args, &config, &formatter)?,
        Command::Score(args) => commands::execute_score(args, &config, &formatter)?,
    }

    Ok(())
}
