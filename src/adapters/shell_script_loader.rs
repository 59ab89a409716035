//! Loader that emits a POSIX shell script for the calling shell to `eval`.
//!
//! Each load appends the file to the shell's `SOURCED` registry and dot-sources it,
//! so variables and functions land in the caller's own scope. Configuration files are
//! followed by a normalize command that only runs once the file sourced successfully.

use std::fs::File;
use std::path::Path;

use tracing::debug;

use crate::domain::{AppError, FileKind, LoadMode, SOURCED_VAR};
use crate::ports::FileLoader;

/// Quote `value` as a single shell word.
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

#[derive(Debug, Clone, Default)]
pub struct ShellScriptLoader {
    mode: LoadMode,
    normalize_command: Option<String>,
    script: String,
}

impl ShellScriptLoader {
    pub fn new(mode: LoadMode) -> Self {
        Self { mode, normalize_command: None, script: String::new() }
    }

    /// Run `command <path>` after each configuration file sources successfully.
    pub fn with_normalize_command(mut self, command: impl Into<String>) -> Self {
        self.normalize_command = Some(command.into());
        self
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn into_script(self) -> String {
        self.script
    }
}

impl FileLoader for ShellScriptLoader {
    fn load(&mut self, path: &Path, kind: FileKind) -> Result<(), AppError> {
        File::open(path).map_err(|e| AppError::LoadFailed {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        let quoted = shell_quote(&path.to_string_lossy());
        self.script.push_str(&format!(
            "{var}=\"${{{var}:+${{{var}}}:}}\"{quoted}; export {var}\n",
            var = SOURCED_VAR,
            quoted = quoted
        ));
        let normalize = match &self.normalize_command {
            Some(command) if kind.normalizes_permissions() => {
                Some(format!("{} {}", command, quoted))
            }
            _ => None,
        };
        let report_load_failure = format!(
            "printf 'shinit: failed to load %s (status %s)\\n' {} \"$?\" >&2",
            quoted
        );
        match (self.mode, normalize) {
            (LoadMode::Strict, normalize) => {
                self.script.push_str(&format!(". {} || return $?\n", quoted));
                if let Some(normalize) = normalize {
                    self.script.push_str(&format!("{} || return $?\n", normalize));
                }
            }
            (LoadMode::BestEffort, None) => {
                self.script.push_str(&format!(". {} || {}\n", quoted, report_load_failure));
            }
            (LoadMode::BestEffort, Some(normalize)) => {
                self.script.push_str(&format!(
                    "if . {}; then\n  {} || :\nelse\n  {}\nfi\n",
                    quoted, normalize, report_load_failure
                ));
            }
        }
        debug!(path = %path.display(), kind = kind.label(), "queued for sourcing");
        Ok(())
    }
}
