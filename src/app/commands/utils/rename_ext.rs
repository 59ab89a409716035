use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::domain::AppError;

#[derive(Debug, Clone)]
pub struct RenameOptions {
    pub dir: PathBuf,
    pub from: String,
    pub to: String,
    pub recursive: bool,
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rename {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Rename every regular file in `dir` ending in `.from` to end in `.to`.
///
/// All targets are checked before anything is renamed; an existing target aborts the
/// whole operation.
pub fn execute(options: &RenameOptions) -> Result<Vec<Rename>, AppError> {
    let from = normalize_ext(&options.from)?;
    let to = normalize_ext(&options.to)?;
    if !options.dir.is_dir() {
        return Err(AppError::config_error(format!(
            "Not a directory: {}",
            options.dir.display()
        )));
    }

    let max_depth = if options.recursive { usize::MAX } else { 1 };
    let mut plan = Vec::new();
    for entry in WalkDir::new(&options.dir).min_depth(1).max_depth(max_depth) {
        let entry = entry.map_err(|e| AppError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(target) = renamed(entry.path(), &from, &to) {
            plan.push(Rename { from: entry.into_path(), to: target });
        }
    }
    plan.sort_by(|a, b| a.from.cmp(&b.from));

    for rename in &plan {
        if rename.to.exists() {
            return Err(AppError::RenameConflict {
                from: rename.from.clone(),
                to: rename.to.clone(),
            });
        }
    }

    if options.dry_run {
        debug!(count = plan.len(), "dry run, nothing renamed");
        return Ok(plan);
    }
    for rename in &plan {
        fs::rename(&rename.from, &rename.to)?;
    }
    info!(count = plan.len(), from = %from, to = %to, "renamed files");
    Ok(plan)
}

fn normalize_ext(raw: &str) -> Result<String, AppError> {
    let ext = raw.trim().trim_start_matches('.');
    if ext.is_empty() || ext.contains('/') {
        return Err(AppError::config_error(format!("Invalid extension '{}'", raw)));
    }
    Ok(ext.to_string())
}

fn renamed(path: &Path, from: &str, to: &str) -> Option<PathBuf> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(from)?.strip_suffix('.')?;
    if stem.is_empty() {
        return None;
    }
    Some(path.with_file_name(format!("{}.{}", stem, to)))
}
