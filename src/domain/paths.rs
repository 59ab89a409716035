use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::AppError;

/// Default entry file name when no entry path is supplied.
pub const DEFAULT_ENTRY_NAME: &str = "init.sh";

/// Default module directory name, relative to the entry directory.
pub const DEFAULT_MODULE_DIR: &str = "init.d";

/// Local configuration loaded before discovery, relative to the entry directory.
pub const LOCAL_CONFIG_NAME: &str = "local.env";

/// Absolute locations established once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPaths {
    pub entry_script: PathBuf,
    pub entry_dir: PathBuf,
    pub project_root: PathBuf,
    pub module_dir: PathBuf,
}

impl ResolvedPaths {
    /// Resolve the entry script relative to `cwd`.
    ///
    /// Only the containing directory is canonicalized (the `cd -P "$(dirname ..)"` idiom),
    /// so a symlinked entry file keeps its own name. Overrides are taken verbatim.
    pub fn resolve(
        entry: Option<&Path>,
        cwd: &Path,
        project_root_override: Option<&str>,
        module_dir_override: Option<&str>,
    ) -> Result<Self, AppError> {
        let raw =
            entry.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(DEFAULT_ENTRY_NAME));
        let joined = if raw.is_absolute() { raw.clone() } else { cwd.join(&raw) };

        let file_name = joined.file_name().map(|n| n.to_os_string()).ok_or_else(|| {
            AppError::config_error(format!("Entry path '{}' has no file name", raw.display()))
        })?;
        let parent = match joined.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => cwd.to_path_buf(),
        };

        let entry_dir = parent
            .canonicalize()
            .map_err(|source| AppError::PathResolution { path: parent.clone(), source })?;
        let entry_script = entry_dir.join(file_name);
        let project_root = entry_dir.clone();
        let module_dir = entry_dir.join(DEFAULT_MODULE_DIR);

        Ok(Self { entry_script, entry_dir, project_root, module_dir }
            .with_overrides(project_root_override, module_dir_override))
    }

    /// Replace the project root and module directory where an override is set.
    ///
    /// Empty overrides count as unset, so defaults are kept.
    pub fn with_overrides(
        mut self,
        project_root_override: Option<&str>,
        module_dir_override: Option<&str>,
    ) -> Self {
        if let Some(root) = non_empty(project_root_override) {
            self.project_root = PathBuf::from(root);
        }
        if let Some(dir) = non_empty(module_dir_override) {
            self.module_dir = PathBuf::from(dir);
        }
        self
    }

    /// Copy with relative overrides joined onto `cwd`, for searching and registering.
    pub fn anchored(&self, cwd: &Path) -> Self {
        let anchor = |path: &Path| {
            if path.is_absolute() { path.to_path_buf() } else { cwd.join(path) }
        };
        Self {
            project_root: anchor(&self.project_root),
            module_dir: anchor(&self.module_dir),
            ..self.clone()
        }
    }

    pub fn local_config(&self) -> PathBuf {
        self.entry_dir.join(LOCAL_CONFIG_NAME)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
