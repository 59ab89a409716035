use std::fmt;

use serde::Serialize;

use crate::domain::AppError;

/// Lowest bash major version able to run the sourced modules.
pub const MIN_BASH_MAJOR: u32 = 4;

/// The shell families shinit can initialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellKind {
    Bash,
    Zsh,
}

impl ShellKind {
    pub const ALL: [ShellKind; 2] = [ShellKind::Bash, ShellKind::Zsh];

    pub fn name(&self) -> &'static str {
        match self {
            ShellKind::Bash => "bash",
            ShellKind::Zsh => "zsh",
        }
    }

    /// Expression that expands to the path of the file currently being sourced.
    pub fn source_path_expr(&self) -> &'static str {
        match self {
            ShellKind::Bash => "${BASH_SOURCE[0]}",
            ShellKind::Zsh => "${(%):-%x}",
        }
    }
}

impl fmt::Display for ShellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Version markers as reported by the invoking shell.
///
/// Empty strings count as absent; a hook passes `"${BASH_VERSION:-}"` unconditionally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellMarkers {
    pub bash_version: Option<String>,
    pub zsh_version: Option<String>,
}

impl ShellMarkers {
    pub fn new(bash_version: Option<String>, zsh_version: Option<String>) -> Self {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Self { bash_version: non_empty(bash_version), zsh_version: non_empty(zsh_version) }
    }

    pub fn bash(version: &str) -> Self {
        Self::new(Some(version.to_string()), None)
    }

    pub fn zsh(version: &str) -> Self {
        Self::new(None, Some(version.to_string()))
    }
}

/// The detected shell. Exactly one is selected per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellContext {
    pub kind: ShellKind,
    pub version: String,
    pub major: u32,
}

impl ShellContext {
    /// Select the shell from its markers, rejecting unknown shells and old bash.
    ///
    /// Bash wins when both markers are present, matching a bash process that inherited
    /// an exported `ZSH_VERSION`.
    pub fn detect(markers: &ShellMarkers) -> Result<ShellContext, AppError> {
        let (kind, version) = match (&markers.bash_version, &markers.zsh_version) {
            (Some(v), _) => (ShellKind::Bash, v.trim()),
            (None, Some(v)) => (ShellKind::Zsh, v.trim()),
            (None, None) => return Err(AppError::UnsupportedShell),
        };

        let major = parse_major(version).ok_or_else(|| {
            AppError::config_error(format!("Unparseable {} version '{}'", kind, version))
        })?;

        if kind == ShellKind::Bash && major < MIN_BASH_MAJOR {
            return Err(AppError::ShellTooOld {
                version: version.to_string(),
                minimum: MIN_BASH_MAJOR,
            });
        }

        Ok(ShellContext { kind, version: version.to_string(), major })
    }
}

fn parse_major(version: &str) -> Option<u32> {
    let digits: String = version.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}
