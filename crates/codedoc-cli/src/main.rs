//! `codedoc` - command line front end for the CodeDoc workspace.

mod cli;
mod commands;

use clap::Parser;
use tracing::Level;

use cli::{Cli, Command};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let root = match cli.project {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    let config = codedoc_editor::EditorConfig::load(&root);
    match cli.command {
        Command::Outline {
            file,
            lines,
            inline_comments,
            header_comments,
            code,
            json,
        } => commands::outline(
            &config,
            &file,
            lines,
            inline_comments || config.extract.inline_comments,
            header_comments || config.extract.header_comments,
            code,
            json,
        ),
        Command::Comments { file } => commands::comments(&config, &file),
        Command::Strip { file } => commands::strip(&config, &file),
        Command::Folds { file } => commands::folds(&config, &file),
        Command::Show {
            file,
            name,
            inline_comments,
        } => commands::show(
            &config,
            &file,
            &name,
            inline_comments || config.extract.inline_comments,
        ),
        Command::Open { path, original } => commands::open(&config, &path, original).await,
        Command::Checkin { path, source } => commands::checkin(&config, &path, &source).await,
        Command::Completions { shell } => commands::completions(shell),
    }
}
