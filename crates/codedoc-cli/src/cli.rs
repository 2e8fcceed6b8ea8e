//! CLI definitions for codedoc.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "codedoc",
    version,
    about = "Outline, document and version JavaScript sources",
    infer_subcommands = true,
    after_help = "Examples:\n  codedoc outline src/app.js\n  codedoc outline src/app.js --lines 10:40 --header-comments\n  codedoc open lib/app.js --project ./site\n  codedoc checkin lib/app.js ./app.js"
)]
pub struct Cli {
    /// Show debug logging.
    #[arg(long, short, global = true)]
    pub verbose: bool,
    /// Project root holding codedoc.toml (defaults to the current directory).
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the top-level function declarations of a file.
    Outline {
        /// JavaScript file to read.
        file: PathBuf,
        /// Only parse lines START:END (1-based, inclusive).
        #[arg(long, value_parser = parse_lines)]
        lines: Option<(u32, u32)>,
        /// Keep comments inside the printed code.
        #[arg(long)]
        inline_comments: bool,
        /// Attach preceding comments to declarations of a line range.
        #[arg(long)]
        header_comments: bool,
        /// Print each declaration's code.
        #[arg(long)]
        code: bool,
        /// Emit JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print every comment of a file.
    Comments {
        /// JavaScript or template file to read.
        file: PathBuf,
    },
    /// Print a file with its comments removed.
    Strip {
        /// JavaScript or template file to read.
        file: PathBuf,
    },
    /// List the foldable regions of a file.
    Folds {
        /// JavaScript file to read.
        file: PathBuf,
    },
    /// Print the code of one top-level declaration.
    Show {
        /// JavaScript file to read.
        file: PathBuf,
        /// Declaration name; `exports.` may be left out.
        name: String,
        /// Keep comments inside the printed code.
        #[arg(long)]
        inline_comments: bool,
    },
    /// Load a stored file and print it.
    Open {
        /// Storage-relative path.
        path: String,
        /// Read the original instead of the latest working version.
        #[arg(long)]
        original: bool,
    },
    /// Save a local file as the next working version of a stored file.
    Checkin {
        /// Storage-relative path.
        path: String,
        /// Local file with the new content.
        source: PathBuf,
    },
    /// Generate shell completions.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_lines(value: &str) -> Result<(u32, u32), String> {
    let (start, end) = value
        .split_once(':')
        .ok_or_else(|| format!("expected START:END, got `{value}`"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<u32>()
            .map_err(|err| format!("invalid line `{part}`: {err}"))
    };
    let (start, end) = (parse(start)?, parse(end)?);
    if start == 0 || end < start {
        return Err(format!("invalid line range `{value}`"));
    }
    Ok((start, end))
}
