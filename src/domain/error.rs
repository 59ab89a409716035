use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error type for shinit operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Neither a bash nor a zsh marker was present.
    #[error("Unsupported shell: shinit must be loaded from bash (>= 4) or zsh")]
    UnsupportedShell,

    /// Bash was detected but its major version is below the supported minimum.
    #[error("Unsupported bash version '{version}': bash {minimum} or newer is required")]
    ShellTooOld { version: String, minimum: u32 },

    /// Output would go straight to a terminal instead of being evaluated by a shell.
    #[error(
        "shinit load must be evaluated by the calling shell, not run standalone. \
         Use: eval \"$(shinit hook bash)\""
    )]
    NotEvaluated,

    /// The entry script or one of its directories could not be resolved.
    #[error("Failed to resolve path '{path}': {source}")]
    PathResolution {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `CHOWN_AS` is not a `uid:gid` pair.
    #[error("Invalid owner spec '{0}': expected numeric 'uid:gid'")]
    InvalidOwnerSpec(String),

    /// `CHMOD_MODE` is not an octal permission value.
    #[error("Invalid mode spec '{0}': expected octal permissions such as 600")]
    InvalidModeSpec(String),

    /// chown or chmod against a target failed.
    #[error("{operation} failed on '{path}': {source}")]
    Permission {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A file could not be prepared for loading.
    #[error("Failed to load '{path}': {details}")]
    LoadFailed { path: PathBuf, details: String },

    /// One or more commands are not resolvable on PATH.
    #[error("Missing commands: {}", .0.join(", "))]
    MissingCommands(Vec<String>),

    /// A rename target already exists.
    #[error("Refusing to rename '{from}': '{to}' already exists")]
    RenameConflict { from: PathBuf, to: PathBuf },
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Process exit status reported for this error.
    ///
    /// Usage errors (wrong shell, standalone invocation) use 2 so a calling hook can tell
    /// them apart from ordinary load or permission failures.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::UnsupportedShell | AppError::ShellTooOld { .. } | AppError::NotEvaluated => {
                2
            }
            AppError::Io(_)
            | AppError::Configuration(_)
            | AppError::PathResolution { .. }
            | AppError::InvalidOwnerSpec(_)
            | AppError::InvalidModeSpec(_)
            | AppError::Permission { .. }
            | AppError::LoadFailed { .. }
            | AppError::MissingCommands(_)
            | AppError::RenameConflict { .. } => 1,
        }
    }

    /// Provide an `io::ErrorKind`-like view for callers matching on I/O semantics.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::PathResolution { source, .. } | AppError::Permission { source, .. } => {
                source.kind()
            }
            AppError::Configuration(_)
            | AppError::InvalidOwnerSpec(_)
            | AppError::InvalidModeSpec(_)
            | AppError::UnsupportedShell
            | AppError::ShellTooOld { .. }
            | AppError::NotEvaluated => io::ErrorKind::InvalidInput,
            AppError::MissingCommands(_) => io::ErrorKind::NotFound,
            AppError::RenameConflict { .. } => io::ErrorKind::AlreadyExists,
            AppError::LoadFailed { .. } => io::ErrorKind::Other,
        }
    }
}
