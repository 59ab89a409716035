use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::{EventLog, TestEvent};
use crate::domain::{AppError, FileKind};
use crate::ports::FileLoader;

/// Loader double that records each load and can be told to fail on given paths.
#[derive(Debug, Default)]
pub struct RecordingLoader {
    pub log: EventLog,
    pub fail_on: HashSet<PathBuf>,
}

impl RecordingLoader {
    pub fn with_log(log: EventLog) -> Self {
        Self { log, fail_on: HashSet::new() }
    }

    pub fn failing_on(mut self, path: impl Into<PathBuf>) -> Self {
        self.fail_on.insert(path.into());
        self
    }

    /// Paths loaded so far, in order.
    pub fn loaded(&self) -> Vec<PathBuf> {
        self.log
            .borrow()
            .iter()
            .filter_map(|event| match event {
                TestEvent::Loaded(path, _) => Some(path.clone()),
                TestEvent::Normalized(..) => None,
            })
            .collect()
    }
}

impl FileLoader for RecordingLoader {
    fn load(&mut self, path: &Path, kind: FileKind) -> Result<(), AppError> {
        if self.fail_on.contains(path) {
            return Err(AppError::LoadFailed {
                path: path.to_path_buf(),
                details: "injected failure".to_string(),
            });
        }
        self.log.borrow_mut().push(TestEvent::Loaded(path.to_path_buf(), kind));
        Ok(())
    }
}
