use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::domain::NamePattern;

/// Substring that marks a path component as sample material, never to be loaded.
pub const EXAMPLE_MARKER: &str = "example";

/// Parameters of a single discovery scan.
#[derive(Debug, Clone)]
pub struct DiscoveryQuery {
    pub base: PathBuf,
    pub min_depth: usize,
    pub max_depth: usize,
    pub name: NamePattern,
    /// Directories whose name matches any of these are not descended into.
    pub exclude_dirs: Vec<NamePattern>,
}

impl DiscoveryQuery {
    pub fn new(base: impl Into<PathBuf>, name: NamePattern) -> Self {
        Self { base: base.into(), min_depth: 1, max_depth: 1, name, exclude_dirs: Vec::new() }
    }

    pub fn depth(mut self, min_depth: usize, max_depth: usize) -> Self {
        self.min_depth = min_depth;
        self.max_depth = max_depth;
        self
    }

    pub fn exclude_dir(mut self, pattern: NamePattern) -> Self {
        self.exclude_dirs.push(pattern);
        self
    }

    /// Whether a directory name below the base should be pruned.
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.exclude_dirs.iter().any(|p| p.matches(name))
    }
}

/// A file found by discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    /// Path relative to the discovery base.
    pub relative: PathBuf,
}

impl DiscoveredFile {
    pub fn new(base: &Path, path: PathBuf) -> Self {
        let relative =
            path.strip_prefix(base).map(Path::to_path_buf).unwrap_or_else(|_| path.clone());
        Self { path, relative }
    }

    /// True when any component below the discovery base contains the example marker.
    pub fn is_example(&self) -> bool {
        is_example_path(&self.relative)
    }
}

/// Any-component check. Callers pass paths relative to their discovery base so that
/// a checkout living under e.g. `~/examples/` is not excluded wholesale.
pub fn is_example_path(path: &Path) -> bool {
    path.components().any(|component| match component {
        Component::Normal(name) => name.to_string_lossy().contains(EXAMPLE_MARKER),
        _ => false,
    })
}

/// Files matched by one discovery scan, sorted ascending by path bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiscoveredFileSet {
    pub base: PathBuf,
    pub files: Vec<DiscoveredFile>,
}

impl DiscoveredFileSet {
    pub fn empty(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into(), files: Vec::new() }
    }

    /// Build a set from unordered paths, applying the canonical ordering.
    pub fn from_paths(base: impl Into<PathBuf>, paths: impl IntoIterator<Item = PathBuf>) -> Self {
        let base = base.into();
        let mut files: Vec<DiscoveredFile> =
            paths.into_iter().map(|p| DiscoveredFile::new(&base, p)).collect();
        files.sort_by(|a, b| a.path.as_os_str().cmp(b.path.as_os_str()));
        files.dedup_by(|a, b| a.path == b.path);
        Self { base, files }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|f| f.path.as_path())
    }

    /// Files eligible for loading, in load order.
    pub fn eligible(&self) -> impl Iterator<Item = &DiscoveredFile> {
        self.files.iter().filter(|f| !f.is_example())
    }
}
