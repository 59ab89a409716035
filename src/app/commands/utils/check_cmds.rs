use std::ffi::OsString;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::domain::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCommand {
    pub name: String,
    pub path: PathBuf,
}

/// Resolve every command against `search_path` (a `PATH`-style value).
///
/// Names containing `/` are checked directly. Fails listing every missing name.
pub fn execute(
    names: &[String],
    search_path: Option<OsString>,
) -> Result<Vec<ResolvedCommand>, AppError> {
    let dirs: Vec<PathBuf> =
        search_path.map(|p| std::env::split_paths(&p).collect()).unwrap_or_default();

    let mut found = Vec::new();
    let mut missing = Vec::new();
    for name in names {
        match resolve(name, &dirs) {
            Some(path) => {
                debug!(command = %name, path = %path.display(), "command found");
                found.push(ResolvedCommand { name: name.clone(), path });
            }
            None => missing.push(name.clone()),
        }
    }

    if missing.is_empty() { Ok(found) } else { Err(AppError::MissingCommands(missing)) }
}

fn resolve(name: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }
    if name.contains('/') {
        let path = PathBuf::from(name);
        return is_executable(&path).then_some(path);
    }
    dirs.iter().map(|dir| dir.join(name)).find(|candidate| is_executable(candidate))
}

fn is_executable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
