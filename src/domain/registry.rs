//! Registry of files already sourced in the current shell process.
//!
//! The registry travels between shinit invocations in the `SOURCED` variable as a
//! `:`-separated list. Membership is exact per element, so `/a/b.sh` never matches
//! `/a/b.sh.bak` or `/x/a/b.sh`. Clearing `SOURCED` forces a full reload.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Environment variable holding the serialized registry.
pub const SOURCED_VAR: &str = "SOURCED";

const SEPARATOR: char = ':';

/// Ordered set of absolute paths already loaded. Entries are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourcedRegistry {
    order: Vec<PathBuf>,
    members: HashSet<PathBuf>,
}

impl SourcedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the registry from an inherited `SOURCED` value.
    pub fn parse(raw: &str) -> Self {
        let mut registry = Self::new();
        for entry in raw.split(SEPARATOR).filter(|s| !s.is_empty()) {
            registry.mark_loaded(Path::new(entry));
        }
        registry
    }

    /// Render the value to export as `SOURCED`.
    pub fn render(&self) -> String {
        self.order
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(&SEPARATOR.to_string())
    }

    pub fn has_loaded(&self, path: &Path) -> bool {
        self.members.contains(path)
    }

    /// Record `path`; returns false when it was already present.
    pub fn mark_loaded(&mut self, path: &Path) -> bool {
        if self.members.contains(path) {
            return false;
        }
        self.members.insert(path.to_path_buf());
        self.order.push(path.to_path_buf());
        true
    }

    /// Returns true if `path` was already loaded; otherwise records it and returns false.
    pub fn mark_and_check(&mut self, path: &Path) -> bool {
        !self.mark_loaded(path)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.order.iter().map(PathBuf::as_path)
    }
}
