use std::path::Path;

use crate::domain::{AppError, FileKind};

/// Port that brings a file's definitions into the caller's scope.
pub trait FileLoader {
    /// Load one file. Called at most once per path per process.
    fn load(&mut self, path: &Path, kind: FileKind) -> Result<(), AppError>;
}
