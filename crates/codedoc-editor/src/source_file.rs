//! The persisted file model exchanged with storage.

use serde::{Deserialize, Deserializer, Serialize};

/// One persisted version of a file.
///
/// Editing the displayed text never touches this value; a new version only
/// arrives through a save round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Path of the file, relative to the storage root.
    pub name: String,
    /// Version assigned by storage. New, never-saved files are version 0.
    pub version: u64,
    /// Full text. Save responses carry none.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    /// Provenance of the version, as reported by storage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    /// Difference against the upstream copy, as reported by storage.
    #[serde(
        default,
        rename = "commitDiff",
        skip_serializing_if = "Option::is_none"
    )]
    pub commit_diff: Option<String>,
}

impl SourceFile {
    /// A version 0 file with no provenance.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: 0,
            content: content.into(),
            commit: None,
            commit_diff: None,
        }
    }

    /// Sets the version.
    #[must_use]
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    /// Returns `true` if `name` can name a new file: non-empty and free of
    /// whitespace.
    #[must_use]
    pub fn is_valid_name(name: &str) -> bool {
        !name.is_empty() && !name.chars().any(char::is_whitespace)
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names() {
        let mut file = SourceFile::new("a.js", "x").with_version(3);
        file.commit_diff = Some("-a\n+b".to_string());
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "a.js",
                "version": 3,
                "content": "x",
                "commitDiff": "-a\n+b",
            })
        );
    }

    #[test]
    fn save_response_without_content() {
        for json in [
            r#"{"name": "a.2.js", "version": 2, "content": null, "commit": "abc"}"#,
            r#"{"name": "a.2.js", "version": 2, "commit": "abc"}"#,
        ] {
            let file: SourceFile = serde_json::from_str(json).unwrap();
            assert_eq!(file.name, "a.2.js");
            assert_eq!(file.content, "");
            assert_eq!(file.commit.as_deref(), Some("abc"));
        }
    }

    #[test]
    fn name_validation() {
        assert!(SourceFile::is_valid_name("dir/new.js"));
        assert!(!SourceFile::is_valid_name(""));
        assert!(!SourceFile::is_valid_name("bad name.js"));
        assert!(!SourceFile::is_valid_name("tab\tname"));
    }
}
