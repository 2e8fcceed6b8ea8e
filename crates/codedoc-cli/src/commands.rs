//! Subcommand implementations.

use std::path::Path;

use anyhow::{bail, Context};
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use serde_json::json;
use tracing::debug;

use codedoc_editor::{
    DirStorage, EditorConfig, EditorSession, Position, Selection, SourceFile, TracingNotifier,
};

use crate::cli::Cli;

type Session = EditorSession<DirStorage, TracingNotifier>;

/// A session holding the local `file` as a new, unsaved file.
fn local_session(config: &EditorConfig, file: &Path) -> anyhow::Result<Session> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut session = EditorSession::new(config.dir_storage(), TracingNotifier);
    session.set_new_file(SourceFile::new(name, content))?;
    Ok(session)
}

pub fn outline(
    config: &EditorConfig,
    file: &Path,
    lines: Option<(u32, u32)>,
    inline_comments: bool,
    header_comments: bool,
    code: bool,
    json: bool,
) -> anyhow::Result<()> {
    let mut session = local_session(config, file)?;
    if let Some((start, end)) = lines {
        debug!(start, end, "parsing a line range");
        session.set_selection(Some(Selection::new(
            Position::new(start - 1, 0),
            Position::new(end, 0),
        )));
    }
    let declarations =
        session.extract_top_level_declarations(lines.is_some(), inline_comments, header_comments);

    if json {
        let items: Vec<_> = declarations
            .iter()
            .map(|declaration| {
                let lines = declaration.buffer_lines();
                json!({
                    "name": declaration.name.as_str(),
                    "kind": format!("{:?}", declaration.kind),
                    "start": lines.start,
                    "end": lines.end,
                    "lineOffset": declaration.line_offset,
                    "header": declaration.header.is_some(),
                    "code": declaration.code,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    for declaration in &declarations {
        let lines = declaration.buffer_lines();
        println!(
            "{:<16} {} ({}-{})",
            format!("{:?}", declaration.kind),
            declaration.name,
            lines.start,
            lines.end
        );
        if code {
            println!("{}\n", declaration.code);
        }
    }
    Ok(())
}

pub fn comments(config: &EditorConfig, file: &Path) -> anyhow::Result<()> {
    let session = local_session(config, file)?;
    let Some(comments) = session.all_comments() else {
        bail!("no comments in {}", file.display());
    };
    print!("{comments}");
    if !comments.ends_with('\n') {
        println!();
    }
    Ok(())
}

pub fn strip(config: &EditorConfig, file: &Path) -> anyhow::Result<()> {
    let session = local_session(config, file)?;
    let Some(stripped) = session.strip_all_comments() else {
        bail!("cannot strip {}", file.display());
    };
    print!("{stripped}");
    Ok(())
}

pub fn folds(config: &EditorConfig, file: &Path) -> anyhow::Result<()> {
    let mut session = local_session(config, file)?;
    session.toggle_folding();
    for range in session.collapsed_regions() {
        println!(
            "{:?} {}-{}",
            range.kind,
            range.start_line + 1,
            range.end_line + 1
        );
    }
    Ok(())
}

pub fn show(
    config: &EditorConfig,
    file: &Path,
    name: &str,
    inline_comments: bool,
) -> anyhow::Result<()> {
    let session = local_session(config, file)?;
    let Some(code) = session.top_level_function_code(name, inline_comments) else {
        bail!("no top-level function `{name}` in {}", file.display());
    };
    println!("{code}");
    Ok(())
}

pub async fn open(config: &EditorConfig, path: &str, original: bool) -> anyhow::Result<()> {
    let mut session = EditorSession::new(config.dir_storage(), TracingNotifier);
    let editable = config.editor.editable && !original;
    session
        .load_file(path, editable, config.editor.announce_versions)
        .await?;
    print!("{}", session.text());
    Ok(())
}

pub async fn checkin(config: &EditorConfig, path: &str, source: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(source)
        .with_context(|| format!("failed to read {}", source.display()))?;
    let mut session = EditorSession::new(config.dir_storage(), TracingNotifier);
    session.load_file(path, true, false).await?;
    session.set_text(content)?;
    session.save_current().await?;
    if let Some(saved) = session.current() {
        println!("{} {}", saved.name, saved.version);
    }
    Ok(())
}

pub fn completions(shell: Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "codedoc", &mut std::io::stdout());
    Ok(())
}
