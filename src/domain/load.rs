use std::path::PathBuf;

use serde::Serialize;

use crate::domain::{ResolvedPaths, ShellContext};

/// The two classes of loaded file. Configuration always loads before modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Config,
    Module,
}

impl FileKind {
    pub fn label(&self) -> &'static str {
        match self {
            FileKind::Config => "config",
            FileKind::Module => "module",
        }
    }

    /// Configuration files get their permissions normalized after loading.
    pub fn normalizes_permissions(&self) -> bool {
        matches!(self, FileKind::Config)
    }
}

/// How the sequential loader reacts to a failing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadMode {
    /// The first failure aborts the pass and is returned to the caller.
    Strict,
    /// Failures are recorded in the report and the pass continues.
    #[default]
    BestEffort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    EmptyPath,
    Example,
    AlreadySourced,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Result of one loader pass over a file list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassReport {
    pub kind: FileKind,
    pub discovered: Vec<PathBuf>,
    pub loaded: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
    pub failures: Vec<LoadFailure>,
}

impl PassReport {
    pub fn new(kind: FileKind) -> Self {
        Self {
            kind,
            discovered: Vec::new(),
            loaded: Vec::new(),
            skipped: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn skip(&mut self, path: PathBuf, reason: SkipReason) {
        self.skipped.push(SkippedFile { path, reason });
    }
}

/// Everything one initialization run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadOutcome {
    pub shell: ShellContext,
    pub paths: ResolvedPaths,
    pub module_dir_created: bool,
    /// Failure while normalizing the module directory, recorded in best-effort mode.
    pub module_dir_failure: Option<LoadFailure>,
    pub config: PassReport,
    pub modules: PassReport,
}

impl LoadOutcome {
    pub fn failures(&self) -> impl Iterator<Item = &LoadFailure> {
        self.module_dir_failure
            .iter()
            .chain(self.config.failures.iter())
            .chain(self.modules.failures.iter())
    }

    pub fn loaded(&self) -> impl Iterator<Item = &PathBuf> {
        self.config.loaded.iter().chain(self.modules.loaded.iter())
    }
}
