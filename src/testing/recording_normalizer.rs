use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use super::{EventLog, TestEvent};
use crate::domain::{AppError, PermissionPolicy};
use crate::ports::PermissionNormalizer;

/// Normalizer double that records each call and can simulate a privilege failure.
#[derive(Debug, Default)]
pub struct RecordingNormalizer {
    pub log: EventLog,
    pub fail_on: HashSet<PathBuf>,
}

impl RecordingNormalizer {
    pub fn with_log(log: EventLog) -> Self {
        Self { log, fail_on: HashSet::new() }
    }

    pub fn failing_on(mut self, path: impl Into<PathBuf>) -> Self {
        self.fail_on.insert(path.into());
        self
    }
}

impl PermissionNormalizer for RecordingNormalizer {
    fn normalize(&self, path: &Path, policy: &PermissionPolicy) -> Result<(), AppError> {
        if self.fail_on.contains(path) {
            return Err(AppError::Permission {
                operation: "chown",
                path: path.to_path_buf(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            });
        }
        self.log.borrow_mut().push(TestEvent::Normalized(path.to_path_buf(), *policy));
        Ok(())
    }
}
