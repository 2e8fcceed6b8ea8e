//! The file storage contract.

mod dir;

use std::future::Future;

pub use dir::DirStorage;

use crate::{SourceFile, StorageError};

/// Where files are fetched from and saved to.
///
/// Storage keeps two copies of a file: the canonical original and editable
/// working versions derived from it.
pub trait FileStorage {
    /// Fetches `path`. With `editable`, the working copy is requested;
    /// otherwise the canonical original.
    fn fetch_content(
        &self,
        path: &str,
        editable: bool,
    ) -> impl Future<Output = Result<SourceFile, StorageError>> + Send;

    /// Persists `file` as a new version. The returned file carries the new
    /// name, version and provenance but no content.
    fn save(
        &self,
        file: &SourceFile,
    ) -> impl Future<Output = Result<SourceFile, StorageError>> + Send;
}
