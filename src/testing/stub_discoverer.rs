use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::domain::{DiscoveredFileSet, DiscoveryQuery};
use crate::ports::FileDiscoverer;

/// Discoverer double returning canned sets keyed by base directory.
#[derive(Debug, Default)]
pub struct StubDiscoverer {
    pub sets: HashMap<PathBuf, Vec<PathBuf>>,
    pub queries: RefCell<Vec<PathBuf>>,
}

impl StubDiscoverer {
    pub fn with_files(mut self, base: impl Into<PathBuf>, files: &[&str]) -> Self {
        let base = base.into();
        let paths = files.iter().map(|f| base.join(f)).collect();
        self.sets.insert(base, paths);
        self
    }
}

impl FileDiscoverer for StubDiscoverer {
    fn discover(&self, query: &DiscoveryQuery) -> DiscoveredFileSet {
        self.queries.borrow_mut().push(query.base.clone());
        match self.sets.get(&query.base) {
            Some(paths) => DiscoveredFileSet::from_paths(&query.base, paths.clone()),
            None => DiscoveredFileSet::empty(&query.base),
        }
    }
}
