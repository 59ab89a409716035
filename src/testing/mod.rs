mod recording_loader;
mod recording_normalizer;
mod stub_discoverer;

pub use recording_loader::RecordingLoader;
pub use recording_normalizer::RecordingNormalizer;
pub use stub_discoverer::StubDiscoverer;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use crate::domain::{FileKind, PermissionPolicy};

/// Something a test double observed, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestEvent {
    Loaded(PathBuf, FileKind),
    Normalized(PathBuf, PermissionPolicy),
}

/// Event log shared between the recording doubles of one test.
pub type EventLog = Rc<RefCell<Vec<TestEvent>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}
