use std::path::PathBuf;

use serde::Serialize;
use walkdir::WalkDir;

use crate::domain::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileCount {
    pub dir: PathBuf,
    pub files: usize,
}

/// Count regular files in each directory, recursing when asked.
pub fn execute(dirs: &[PathBuf], recursive: bool) -> Result<Vec<FileCount>, AppError> {
    let max_depth = if recursive { usize::MAX } else { 1 };
    dirs.iter()
        .map(|dir| {
            if !dir.is_dir() {
                return Err(AppError::config_error(format!("Not a directory: {}", dir.display())));
            }
            let files = WalkDir::new(dir)
                .min_depth(1)
                .max_depth(max_depth)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|entry| entry.file_type().is_file())
                .count();
            Ok(FileCount { dir: dir.clone(), files })
        })
        .collect()
}
