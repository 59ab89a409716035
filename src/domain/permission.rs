use std::fmt;

use serde::Serialize;

use crate::domain::AppError;

/// Default permission bits applied to configuration files and the module directory.
pub const DEFAULT_MODE: u32 = 0o600;

/// Numeric owner and group to stamp onto normalized targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OwnerSpec {
    pub uid: u32,
    pub gid: u32,
}

impl OwnerSpec {
    /// Parse a `uid:gid` pair.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let invalid = || AppError::InvalidOwnerSpec(raw.to_string());
        let (uid, gid) = raw.trim().split_once(':').ok_or_else(invalid)?;
        let uid = uid.parse().map_err(|_| invalid())?;
        let gid = gid.parse().map_err(|_| invalid())?;
        Ok(Self { uid, gid })
    }

    /// Real uid and gid of the current process.
    pub fn invoking_user() -> Self {
        // SAFETY: getuid and getgid have no preconditions and cannot fail.
        let (uid, gid) = unsafe { (libc::getuid(), libc::getgid()) };
        Self { uid, gid }
    }
}

impl fmt::Display for OwnerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.uid, self.gid)
    }
}

/// Octal permission bits (no file type bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FileMode(u32);

impl FileMode {
    pub fn new(bits: u32) -> Result<Self, AppError> {
        if bits > 0o7777 {
            return Err(AppError::InvalidModeSpec(format!("{:o}", bits)));
        }
        Ok(Self(bits))
    }

    /// Parse an octal string such as `600` or `0640`.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::InvalidModeSpec(raw.to_string()));
        }
        let bits = u32::from_str_radix(trimmed, 8)
            .map_err(|_| AppError::InvalidModeSpec(raw.to_string()))?;
        Self::new(bits).map_err(|_| AppError::InvalidModeSpec(raw.to_string()))
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    /// Mode to apply to a target given its state before the change.
    ///
    /// Execute is added for every class that can read, but only when the target is a
    /// directory or was already executable. A plain file never gains execute here.
    pub fn effective_for(&self, is_dir: bool, previous_bits: u32) -> FileMode {
        let was_executable = previous_bits & 0o111 != 0;
        if !(is_dir || was_executable) {
            return *self;
        }
        let read_bits = self.0 & 0o444;
        FileMode(self.0 | (read_bits >> 2))
    }
}

impl Default for FileMode {
    fn default() -> Self {
        FileMode(DEFAULT_MODE)
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:o}", self.0)
    }
}

/// What the permission normalizer should do to a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PermissionPolicy {
    pub owner: OwnerSpec,
    pub mode: FileMode,
    pub chown_enabled: bool,
    pub chmod_enabled: bool,
}

impl PermissionPolicy {
    pub fn is_noop(&self) -> bool {
        !self.chown_enabled && !self.chmod_enabled
    }
}
