//! `codedoc-editor` - Versioned editor session for the CodeDoc workspace.
//!
//! An [`EditorSession`] holds at most one file. It tracks the version the
//! storage service assigned, whether the displayed text has diverged from
//! that version, and whether the editor is locked. Every entry point that
//! could lose unsaved text refuses to run instead, leaving the session
//! untouched and reporting the reason through a [`Notifier`].
//!
//! Storage is reached through the [`FileStorage`] trait. [`DirStorage`]
//! implements it over two local directories: read-only originals and
//! versioned working copies.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
mod error;
pub mod notifier;
pub mod session;
pub mod source_file;
pub mod storage;

pub use config::{EditorConfig, EditorSettings, ExtractSettings, StorageSettings};
pub use error::{SessionError, StorageError};
pub use notifier::{Notifier, RecordingNotifier, TracingNotifier};
pub use session::{EditorSession, HiddenContent, Position, Selection};
pub use source_file::SourceFile;
pub use storage::{DirStorage, FileStorage};
