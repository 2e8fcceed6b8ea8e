//! The single-file editor session.
//!
//! States: `Empty` (no file) and `Loaded`, with `locked` orthogonal to both.
//! Every mutating entry point checks the lock first and the dirty state
//! second, and a refused call changes nothing.

use tracing::{debug, info, warn};

use codedoc_ide::{
    all_comments, code_range, extract_declarations, find_declaration_code, folding_ranges,
    function_code, strip_all_comments, Declaration, Dialect, ExtractError, ExtractOptions,
    FoldingRange, ParseScope,
};

use crate::{FileStorage, Notifier, SessionError, SourceFile, StorageError};

/// A 0-based row and column (in characters) in the displayed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    /// 0-based row.
    pub row: u32,
    /// 0-based column, counted in characters.
    pub column: u32,
}

impl Position {
    /// Creates a position.
    #[must_use]
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

/// A selected range of the displayed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    /// Anchor of the selection.
    pub start: Position,
    /// Cursor end of the selection.
    pub end: Position,
}

impl Selection {
    /// Creates a selection. The endpoints may be given in either order.
    #[must_use]
    pub fn new(start: Position, end: Position) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// A zero-length selection means nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// The alternate view kept behind the displayed text.
#[derive(Debug, Clone, PartialEq)]
pub enum HiddenContent {
    /// Plain text, shown as is.
    Text(String),
    /// A structured capture, shown as its JSON text.
    Structured(serde_json::Value),
}

impl Default for HiddenContent {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl HiddenContent {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Structured(value) => value.to_string(),
        }
    }
}

/// Owns the displayed file and guards it against silent data loss.
#[derive(Debug)]
pub struct EditorSession<S, N> {
    storage: S,
    notifier: N,
    current: Option<SourceFile>,
    display: String,
    hidden: HiddenContent,
    selection: Option<Selection>,
    locked: bool,
    folded: bool,
    collapsed: Vec<FoldingRange>,
    generation: u64,
}

impl<S: FileStorage, N: Notifier> EditorSession<S, N> {
    /// An empty, unlocked session.
    pub fn new(storage: S, notifier: N) -> Self {
        Self {
            storage,
            notifier,
            current: None,
            display: String::new(),
            hidden: HiddenContent::default(),
            selection: None,
            locked: false,
            folded: false,
            collapsed: Vec::new(),
            generation: 0,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The loaded file, as last persisted.
    #[must_use]
    pub fn current(&self) -> Option<&SourceFile> {
        self.current.as_ref()
    }

    /// The displayed text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.display
    }

    /// Name of the loaded file.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.current.as_ref().map(|file| file.name.as_str())
    }

    /// Version of the loaded file.
    #[must_use]
    pub fn file_version(&self) -> Option<u64> {
        self.current.as_ref().map(|file| file.version)
    }

    /// Number of displayed lines. Empty text has one line.
    #[must_use]
    pub fn line_count(&self) -> u32 {
        u32::try_from(self.display.split('\n').count()).unwrap_or(u32::MAX)
    }

    /// Returns `true` if the displayed text differs from the loaded version.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|file| file.content != self.display)
    }

    /// Returns `true` while mutations are forbidden.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Returns `true` while every region is collapsed.
    #[must_use]
    pub fn is_folded(&self) -> bool {
        self.folded
    }

    /// Regions collapsed by the last fold.
    #[must_use]
    pub fn collapsed_regions(&self) -> &[FoldingRange] {
        &self.collapsed
    }

    /// The content behind the displayed text.
    #[must_use]
    pub fn hidden_content(&self) -> &HiddenContent {
        &self.hidden
    }

    /// Counter bumped every time a different file version is adopted. A
    /// view built for an older generation is stale.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The storage the session loads from and saves to.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The loaded file with the displayed text as content: what a save
    /// sends.
    #[must_use]
    pub fn current_snapshot(&self) -> Option<SourceFile> {
        self.current.as_ref().map(|file| SourceFile {
            content: self.display.clone(),
            ..file.clone()
        })
    }

    // =========================================================================
    // Loading and saving
    // =========================================================================

    /// Loads `path` into the editor.
    ///
    /// With `editable`, the working copy is requested first and the
    /// original is used when no working copy exists. Refused while locked
    /// or while the displayed text has unsaved changes. Loading the file
    /// that is already loaded, unchanged, simply fetches it again.
    pub async fn load_file(
        &mut self,
        path: &str,
        editable: bool,
        announce_version: bool,
    ) -> Result<(), SessionError> {
        self.ensure_unlocked()?;
        self.ensure_clean()?;

        let fetched = match self.storage.fetch_content(path, editable).await {
            Err(StorageError::NotFound { .. }) if editable => {
                debug!(path, "no working copy, loading the original");
                self.storage.fetch_content(path, false).await
            }
            other => other,
        };
        let file = match fetched {
            Ok(file) => file,
            Err(err) => return Err(self.reject(err.into())),
        };

        self.release();
        self.adopt(file, announce_version);
        Ok(())
    }

    /// Resets the displayed text to the loaded version.
    pub fn discard_changes(&mut self) -> Result<(), SessionError> {
        self.ensure_unlocked()?;
        let Some(file) = &self.current else {
            return Err(self.reject(SessionError::NoFileLoaded));
        };
        self.display.clone_from(&file.content);
        Ok(())
    }

    /// Adopts the file storage returned for a save of the displayed text.
    ///
    /// Storage does not echo the saved bytes, so the displayed text becomes
    /// the new version's content.
    pub fn apply_saved(&mut self, saved: SourceFile) -> Result<(), SessionError> {
        if self.current.is_none() {
            return Err(self.reject(SessionError::NoFileLoaded));
        }
        let file = SourceFile {
            content: self.display.clone(),
            ..saved
        };
        self.notifier.notify(&format!(
            "Version [{}] of file [{}] is saved",
            file.version, file.name
        ));
        info!(name = %file.name, version = file.version, "saved");
        self.current = Some(file);
        self.generation += 1;
        Ok(())
    }

    /// Saves the displayed text through storage as a new version.
    pub async fn save_current(&mut self) -> Result<(), SessionError> {
        let Some(snapshot) = self.current_snapshot() else {
            return Err(self.reject(SessionError::NoFileLoaded));
        };
        match self.storage.save(&snapshot).await {
            Ok(saved) => self.apply_saved(saved),
            Err(err) => Err(self.reject(err.into())),
        }
    }

    /// Starts editing a file that does not exist in storage yet.
    pub fn set_new_file(&mut self, candidate: SourceFile) -> Result<(), SessionError> {
        self.ensure_unlocked()?;
        self.ensure_clean()?;
        if !SourceFile::is_valid_name(&candidate.name) {
            return Err(self.reject(SessionError::Validation {
                name: candidate.name,
            }));
        }

        debug!(name = %candidate.name, "new file");
        self.release();
        self.hidden = HiddenContent::default();
        self.adopt(candidate.with_version(0), false);
        Ok(())
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Replaces the displayed text.
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_unlocked()?;
        self.display = text.into();
        Ok(())
    }

    /// Appends `text` as whole lines after the last displayed line.
    pub fn append_text(&mut self, text: &str) -> Result<(), SessionError> {
        self.ensure_unlocked()?;
        if !self.display.is_empty() {
            self.display.push('\n');
        }
        self.display.push_str(text);
        Ok(())
    }

    /// Sets or clears the selection.
    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
    }

    /// The selected text, if a non-empty selection exists.
    #[must_use]
    pub fn selected_text(&self) -> Option<&str> {
        let selection = self.selection.filter(|selection| !selection.is_empty())?;
        let start = self.offset(selection.start);
        let end = self.offset(selection.end);
        self.display.get(start..end)
    }

    /// Flips the lock.
    pub fn toggle_locked(&mut self) -> bool {
        self.locked = !self.locked;
        debug!(locked = self.locked, "lock toggled");
        self.locked
    }

    /// Collapses every foldable region, or expands them all if folded.
    pub fn toggle_folding(&mut self) -> bool {
        if self.folded {
            self.collapsed.clear();
            self.folded = false;
        } else {
            self.collapsed = folding_ranges(&self.display);
            self.folded = true;
            debug!(regions = self.collapsed.len(), lines = self.line_count(), "folded all");
        }
        self.folded
    }

    /// Stores the content shown by the next [`toggle_hidden_content`].
    ///
    /// [`toggle_hidden_content`]: Self::toggle_hidden_content
    pub fn set_hidden_content(&mut self, content: HiddenContent) {
        self.hidden = content;
    }

    /// Swaps the displayed text with the hidden content. Structured content
    /// is shown as JSON; the text it replaces becomes the hidden content.
    pub fn toggle_hidden_content(&mut self) -> Result<(), SessionError> {
        self.ensure_unlocked()?;
        let restored = std::mem::take(&mut self.hidden).into_text();
        let shown = std::mem::replace(&mut self.display, restored);
        self.hidden = HiddenContent::Text(shown);
        Ok(())
    }

    // =========================================================================
    // Analysis
    // =========================================================================

    /// Top-level function declarations of the displayed text, or of the
    /// selection when `use_selection` is set and something is selected.
    ///
    /// Failures are reported through the notifier and give an empty list.
    pub fn extract_top_level_declarations(
        &self,
        use_selection: bool,
        inline_comments: bool,
        header_comments: bool,
    ) -> Vec<Declaration> {
        if !self.loaded_script() {
            return Vec::new();
        }

        let selected = self
            .selection
            .filter(|selection| use_selection && !selection.is_empty())
            .and_then(|selection| Some((self.selected_text()?, selection.start.row)));
        let (text, scope) = match selected {
            Some((text, start_line)) => (text, ParseScope::Selection { start_line }),
            None => {
                if use_selection {
                    debug!("nothing selected, using the whole buffer");
                }
                (self.display.as_str(), ParseScope::WholeFile)
            }
        };

        let options = ExtractOptions {
            scope,
            inline_comments,
            header_comments,
        };
        match extract_declarations(text, &options) {
            Ok(declarations) => declarations,
            Err(err) => {
                self.report(&err);
                Vec::new()
            }
        }
    }

    /// Code of the whole-file declaration named `name` or `exports.name`.
    #[must_use]
    pub fn top_level_function_code(&self, name: &str, inline_comments: bool) -> Option<String> {
        if !self.loaded_script() {
            return None;
        }
        find_declaration_code(&self.display, name, inline_comments)
    }

    /// Every comment of the loaded file, concatenated.
    #[must_use]
    pub fn all_comments(&self) -> Option<String> {
        let dialect = self.loaded_dialect()?;
        all_comments(&self.display, dialect)
            .map_err(|err| self.report(&err))
            .ok()
    }

    /// The displayed text with every comment removed. The display itself is
    /// left alone.
    #[must_use]
    pub fn strip_all_comments(&self) -> Option<String> {
        let dialect = self.loaded_dialect()?;
        Some(strip_all_comments(&self.display, dialect))
    }

    /// Displayed lines `first..=last`, 1-based.
    #[must_use]
    pub fn code_range(&self, first: u32, last: u32) -> Vec<&str> {
        code_range(&self.display, first, last)
    }

    /// Displayed lines of `declaration`, offset-corrected.
    #[must_use]
    pub fn function_code(&self, declaration: &Declaration) -> String {
        function_code(&self.display, declaration)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// `Loaded -> Empty`.
    fn release(&mut self) {
        if let Some(file) = self.current.take() {
            debug!(name = %file.name, "released");
        }
        self.folded = false;
        self.collapsed.clear();
        self.selection = None;
    }

    /// `Empty -> Loaded`.
    fn adopt(&mut self, file: SourceFile, announce_version: bool) {
        if announce_version {
            self.notifier.notify(&format!(
                "Version [{}] of file [{}] is in the editor",
                file.version, file.name
            ));
        }
        info!(name = %file.name, version = file.version, "loaded");
        self.display.clone_from(&file.content);
        self.current = Some(file);
        self.generation += 1;
    }

    fn ensure_unlocked(&self) -> Result<(), SessionError> {
        if self.locked {
            let name = self.file_name().unwrap_or_default().to_string();
            return Err(self.reject(SessionError::Locked { name }));
        }
        Ok(())
    }

    fn ensure_clean(&self) -> Result<(), SessionError> {
        if self.is_dirty() {
            return Err(self.reject(SessionError::Conflict));
        }
        Ok(())
    }

    fn reject(&self, err: SessionError) -> SessionError {
        warn!(error = %err, status = err.status_code(), "operation refused");
        self.notifier.notify(&err.to_string());
        err
    }

    fn report(&self, err: &ExtractError) {
        debug!(error = %err, "analysis gave no result");
        self.notifier.notify(&err.to_string());
    }

    fn loaded_dialect(&self) -> Option<Dialect> {
        let Some(file) = &self.current else {
            self.notifier.notify(&SessionError::NoFileLoaded.to_string());
            return None;
        };
        Dialect::for_file(&file.name)
            .map_err(|err| self.report(&err))
            .ok()
    }

    /// Returns `true` if a file the parser understands is loaded, reporting
    /// why not otherwise.
    fn loaded_script(&self) -> bool {
        match self.loaded_dialect() {
            Some(dialect) if dialect.is_parsed() => true,
            Some(_) => {
                self.report(&ExtractError::UnsupportedDialect {
                    name: self.file_name().unwrap_or_default().to_string(),
                });
                false
            }
            None => false,
        }
    }

    /// Byte offset of `position` in the displayed text, clamped to the line
    /// and to the text.
    fn offset(&self, position: Position) -> usize {
        let mut line_start = 0;
        for _ in 0..position.row {
            match self.display[line_start..].find('\n') {
                Some(newline) => line_start += newline + 1,
                None => return self.display.len(),
            }
        }
        let line = &self.display[line_start..];
        let line = &line[..line.find('\n').unwrap_or(line.len())];
        let column = line
            .char_indices()
            .nth(position.column as usize)
            .map_or(line.len(), |(offset, _)| offset);
        line_start + column
    }
}
