//! Project configuration loaded from `codedoc.toml`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::DirStorage;

pub(crate) const CONFIG_FILES: &[&str] = &["codedoc.toml", ".codedoc.toml"];

/// Resolved project configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Config file the values came from, if one was found.
    pub config_path: Option<PathBuf>,
    /// Storage directories.
    pub storage: StorageSettings,
    /// Session behaviour.
    pub editor: EditorSettings,
    /// Extraction defaults.
    pub extract: ExtractSettings,
}

/// `[storage]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageSettings {
    /// Canonical originals, never written.
    pub originals: PathBuf,
    /// Versioned working copies.
    pub working: PathBuf,
}

/// `[editor]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorSettings {
    /// Announce the loaded version after every load.
    pub announce_versions: bool,
    /// Request working copies when loading.
    pub editable: bool,
}

/// `[extract]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractSettings {
    /// Keep comments inside extracted code.
    pub inline_comments: bool,
    /// Merge preceding comments into declarations of a selection.
    pub header_comments: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    storage: StorageSection,
    editor: EditorSection,
    extract: ExtractSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StorageSection {
    originals: Option<String>,
    working: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EditorSection {
    announce_versions: Option<bool>,
    editable: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExtractSection {
    inline_comments: Option<bool>,
    header_comments: Option<bool>,
}

impl EditorConfig {
    /// Loads the configuration of the project at `root`. Missing or broken
    /// config files fall back to defaults.
    pub fn load(root: &Path) -> Self {
        let config_path = find_config_file(root);
        let Some(path) = config_path.clone() else {
            return Self::base(root, None);
        };
        let Ok(contents) = std::fs::read_to_string(&path) else {
            warn!("Failed to read codedoc config at {}", path.display());
            return Self::base(root, config_path);
        };
        Self::from_contents(root, config_path, &contents)
    }

    /// Builds the configuration from TOML text.
    pub fn from_contents(root: &Path, config_path: Option<PathBuf>, contents: &str) -> Self {
        let mut config = Self::base(root, config_path);
        let parsed: ConfigFile = match toml::from_str(contents) {
            Ok(parsed) => parsed,
            Err(err) => {
                if let Some(path) = &config.config_path {
                    warn!("Failed to parse codedoc config at {}: {err}", path.display());
                } else {
                    warn!("Failed to parse codedoc config: {err}");
                }
                return config;
            }
        };

        if let Some(originals) = parsed.storage.originals {
            config.storage.originals = resolve_path(root, &originals);
        }
        if let Some(working) = parsed.storage.working {
            config.storage.working = resolve_path(root, &working);
        }
        config.editor.announce_versions = parsed
            .editor
            .announce_versions
            .unwrap_or(config.editor.announce_versions);
        config.editor.editable = parsed.editor.editable.unwrap_or(config.editor.editable);
        config.extract.inline_comments = parsed.extract.inline_comments.unwrap_or_default();
        config.extract.header_comments = parsed.extract.header_comments.unwrap_or_default();
        config
    }

    fn base(root: &Path, config_path: Option<PathBuf>) -> Self {
        Self {
            config_path,
            storage: StorageSettings {
                originals: root.join("oldcode"),
                working: root.join("newcode"),
            },
            editor: EditorSettings {
                announce_versions: true,
                editable: true,
            },
            extract: ExtractSettings::default(),
        }
    }

    /// Directory storage over the configured directories.
    #[must_use]
    pub fn dir_storage(&self) -> DirStorage {
        DirStorage::new(&self.storage.originals, &self.storage.working)
    }
}

pub(crate) fn find_config_file(root: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

fn resolve_path(root: &Path, entry: &str) -> PathBuf {
    let path = Path::new(entry);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn temp_dir(prefix: &str) -> PathBuf {
        static NEXT: AtomicUsize = AtomicUsize::new(0);
        let unique = NEXT.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!("{prefix}-{}-{unique}", std::process::id()));
        fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn defaults_without_config_file() {
        let root = temp_dir("codedoc-config-default");
        let config = EditorConfig::load(&root);
        assert_eq!(config.config_path, None);
        assert_eq!(config.storage.originals, root.join("oldcode"));
        assert_eq!(config.storage.working, root.join("newcode"));
        assert!(config.editor.announce_versions);
        assert!(config.editor.editable);
        assert!(!config.extract.inline_comments);
        fs::remove_dir_all(root).ok();
    }

    #[test]
    fn loads_all_sections() {
        let root = temp_dir("codedoc-config-full");
        fs::write(
            root.join("codedoc.toml"),
            r#"
[storage]
originals = "src"
working = "/var/codedoc/work"

[editor]
announce_versions = false

[extract]
inline_comments = true
header_comments = true
"#,
        )
        .unwrap();

        let config = EditorConfig::load(&root);
        assert_eq!(config.config_path, Some(root.join("codedoc.toml")));
        assert_eq!(config.storage.originals, root.join("src"));
        assert_eq!(config.storage.working, PathBuf::from("/var/codedoc/work"));
        assert!(!config.editor.announce_versions);
        assert!(config.editor.editable);
        assert!(config.extract.inline_comments && config.extract.header_comments);
        fs::remove_dir_all(root).ok();
    }

    #[test]
    fn hidden_config_name_is_found() {
        let root = temp_dir("codedoc-config-hidden");
        fs::write(root.join(".codedoc.toml"), "[editor]\neditable = false\n").unwrap();
        assert!(!EditorConfig::load(&root).editor.editable);
        fs::remove_dir_all(root).ok();
    }

    #[test]
    fn broken_config_falls_back_to_defaults() {
        let root = Path::new("/project");
        let config = EditorConfig::from_contents(root, None, "[storage\noriginals = ");
        assert_eq!(config, EditorConfig::base(root, None));
    }
}
