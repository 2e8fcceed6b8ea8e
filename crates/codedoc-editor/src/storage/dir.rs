//! Directory-backed storage with versioned working copies.
//!
//! Originals live under one directory and are never written. Every save
//! writes a new working copy under a second directory, named after the file
//! with a version component: `app.js` becomes `app.1.js`, then `app.2.js`;
//! names without an extension take the version last (`Makefile.1`).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::{FileStorage, SourceFile, StorageError};

/// [`FileStorage`] over two local directories.
#[derive(Debug, Clone)]
pub struct DirStorage {
    originals: PathBuf,
    working: PathBuf,
}

impl DirStorage {
    /// Storage reading originals from `originals` and keeping versioned
    /// working copies under `working`.
    pub fn new(originals: impl Into<PathBuf>, working: impl Into<PathBuf>) -> Self {
        Self {
            originals: originals.into(),
            working: working.into(),
        }
    }

    /// Directory of the canonical originals.
    #[must_use]
    pub fn originals(&self) -> &Path {
        &self.originals
    }

    /// Directory of the versioned working copies.
    #[must_use]
    pub fn working(&self) -> &Path {
        &self.working
    }

    async fn read(&self, root: &Path, name: &str) -> Result<SourceFile, StorageError> {
        let content = tokio::fs::read_to_string(root.join(name))
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => StorageError::NotFound {
                    path: name.to_string(),
                },
                _ => StorageError::transport(500, format!("read failed: {err}")),
            })?;
        Ok(SourceFile::new(name, content).with_version(version_of(file_name(name))))
    }

    /// The highest working version of `name`, as a storage-relative name.
    async fn latest_version(&self, name: &str) -> Option<String> {
        let wanted = file_name(name);
        let dir = match name.rsplit_once('/') {
            Some((dir, _)) => self.working.join(dir),
            None => self.working.clone(),
        };
        let mut entries = tokio::fs::read_dir(&dir).await.ok()?;

        let mut latest: Option<(u64, String)> = None;
        while let Ok(Some(entry)) = entries.next_entry().await {
            let candidate = entry.file_name().to_string_lossy().into_owned();
            let version = version_of(&candidate);
            if version == 0 || strip_version(&candidate) != wanted {
                continue;
            }
            if latest.as_ref().is_none_or(|(best, _)| version > *best) {
                latest = Some((version, candidate));
            }
        }

        let (_, candidate) = latest?;
        Some(with_file_name(name, &candidate))
    }
}

impl FileStorage for DirStorage {
    async fn fetch_content(&self, path: &str, editable: bool) -> Result<SourceFile, StorageError> {
        let path = checked_path(path)?;
        if !editable {
            return self.read(&self.originals, path).await;
        }

        if is_file(&self.working.join(path)).await {
            return self.read(&self.working, path).await;
        }
        match self.latest_version(path).await {
            Some(latest) => {
                debug!(path, latest = %latest, "resolved working copy");
                self.read(&self.working, &latest).await
            }
            None => Err(StorageError::NotFound {
                path: path.to_string(),
            }),
        }
    }

    async fn save(&self, file: &SourceFile) -> Result<SourceFile, StorageError> {
        let name = checked_path(&file.name)?;
        let plan = plan_save(name);
        if plan.from_working && !is_file(&self.working.join(name)).await {
            return Err(StorageError::transport(
                409,
                format!(
                    "Versioned File [{name}] with version [{}] does not exist.",
                    plan.version - 1
                ),
            ));
        }

        let target = self.working.join(&plan.name);
        let exists = || {
            StorageError::transport(
                409,
                format!(
                    "File [{name}] with new version [{}] already exists.",
                    plan.version
                ),
            )
        };
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| StorageError::transport(500, format!("create dir failed: {err}")))?;
        }
        let mut out = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::AlreadyExists => exists(),
                _ => StorageError::transport(500, format!("write failed: {err}")),
            })?;
        out.write_all(file.content.as_bytes())
            .await
            .map_err(|err| StorageError::transport(500, format!("write failed: {err}")))?;
        out.flush()
            .await
            .map_err(|err| StorageError::transport(500, format!("write failed: {err}")))?;

        info!(name = %plan.name, version = plan.version, "saved working copy");
        Ok(SourceFile::new(plan.name, String::new()).with_version(plan.version))
    }
}

/// Where a save of some name lands.
#[derive(Debug, PartialEq, Eq)]
struct SavePlan {
    /// Storage-relative name of the new version.
    name: String,
    version: u64,
    /// The saved name is itself a working version, which must exist.
    from_working: bool,
}

fn plan_save(name: &str) -> SavePlan {
    let file = file_name(name);
    let parts: Vec<&str> = file.split('.').collect();
    let (new_file, version, from_working) = match parts.as_slice() {
        [_] => (format!("{file}.1"), 1, false),
        [base @ .., last] if is_version(last) => {
            let next = parse_version(last) + 1;
            (format!("{}.{next}", base.join(".")), next, true)
        }
        [base @ .., middle, last] if is_version(middle) => {
            let next = parse_version(middle) + 1;
            (format!("{}.{next}.{last}", base.join(".")), next, true)
        }
        [base @ .., last] => (format!("{}.1.{last}", base.join(".")), 1, false),
        [] => (format!("{file}.1"), 1, false),
    };
    SavePlan {
        name: with_file_name(name, &new_file),
        version,
        from_working,
    }
}

/// Version encoded in a file name: the last or second-to-last dotted
/// component when it is numeric, otherwise 0.
pub(crate) fn version_of(file: &str) -> u64 {
    let parts: Vec<&str> = file.split('.').collect();
    match parts.as_slice() {
        [_] | [] => 0,
        [.., last] if is_version(last) => parse_version(last),
        [.., middle, _] if is_version(middle) => parse_version(middle),
        _ => 0,
    }
}

/// `file` with its version component removed.
fn strip_version(file: &str) -> String {
    let mut parts: Vec<&str> = file.split('.').collect();
    let len = parts.len();
    if len >= 2 && is_version(parts[len - 1]) {
        parts.pop();
    } else if len >= 3 && is_version(parts[len - 2]) {
        parts.remove(len - 2);
    }
    parts.join(".")
}

fn is_version(part: &str) -> bool {
    !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())
}

fn parse_version(part: &str) -> u64 {
    part.parse().unwrap_or(0)
}

fn file_name(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, file)| file)
}

fn with_file_name(path: &str, file: &str) -> String {
    match path.rsplit_once('/') {
        Some((dir, _)) => format!("{dir}/{file}"),
        None => file.to_string(),
    }
}

fn checked_path(path: &str) -> Result<&str, StorageError> {
    let trimmed = path.trim().trim_start_matches("./");
    if trimmed.is_empty() {
        return Err(StorageError::transport(400, "file path is required"));
    }
    if trimmed.contains("..") || trimmed.starts_with('/') || trimmed.contains('\\') {
        return Err(StorageError::transport(403, "Forbidden access"));
    }
    Ok(trimmed)
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|metadata| metadata.is_file())
}
