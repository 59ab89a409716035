pub mod discovery;
pub mod error;
pub mod load;
pub mod paths;
pub mod pattern;
pub mod permission;
pub mod registry;
pub mod shell;

pub use discovery::{
    DiscoveredFile, DiscoveredFileSet, DiscoveryQuery, EXAMPLE_MARKER, is_example_path,
};
pub use error::AppError;
pub use load::{FileKind, LoadFailure, LoadMode, LoadOutcome, PassReport, SkipReason, SkippedFile};
pub use paths::{DEFAULT_ENTRY_NAME, DEFAULT_MODULE_DIR, LOCAL_CONFIG_NAME, ResolvedPaths};
pub use pattern::NamePattern;
pub use permission::{DEFAULT_MODE, FileMode, OwnerSpec, PermissionPolicy};
pub use registry::{SOURCED_VAR, SourcedRegistry};
pub use shell::{MIN_BASH_MAJOR, ShellContext, ShellKind, ShellMarkers};
