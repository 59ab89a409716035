//! Shared testing utilities for shinit CLI tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Variables shinit reads; cleared so the developer's shell cannot leak into a test.
pub const SHINIT_VARS: [&str; 11] = [
    "SOURCED",
    "DEBUG",
    "DISABLE_INIT_CHOWN",
    "DISABLE_INIT_CHMOD",
    "PROJECT_ROOT",
    "INIT_D",
    "CREATE_INIT_D",
    "CHOWN_AS",
    "CHMOD_MODE",
    "BASH_VERSION",
    "ZSH_VERSION",
];

pub const BASH_5: &str = "5.2.15(1)-release";

/// Testing harness providing an isolated project directory for CLI exercises.
pub struct TestContext {
    root: TempDir,
    project: PathBuf,
}

impl TestContext {
    /// Create a new isolated project with an `init.sh` entry script.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let project = root.path().join("project");
        fs::create_dir_all(&project).expect("Failed to create project directory");
        let project = project.canonicalize().expect("Failed to canonicalize project directory");
        fs::write(project.join("init.sh"), "# entry\n").expect("Failed to write init.sh");

        Self { root, project }
    }

    /// Canonical project directory containing `init.sh`.
    pub fn project(&self) -> &Path {
        &self.project
    }

    /// Path to the entry script.
    pub fn entry(&self) -> PathBuf {
        self.project.join("init.sh")
    }

    /// Path to the default module directory.
    pub fn module_dir(&self) -> PathBuf {
        self.project.join("init.d")
    }

    /// Directory outside the project, for override targets.
    pub fn scratch(&self, name: &str) -> PathBuf {
        let dir = self.root.path().join(name);
        fs::create_dir_all(&dir).expect("Failed to create scratch directory");
        dir.canonicalize().expect("Failed to canonicalize scratch directory")
    }

    /// Write `content` to `rel` under the project, creating parents, and return the path.
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.project.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Permission bits of `path`.
    pub fn mode(&self, path: &Path) -> u32 {
        fs::metadata(path).expect("Failed to stat").permissions().mode() & 0o7777
    }

    pub fn set_mode(&self, path: &Path, mode: u32) {
        fs::set_permissions(path, fs::Permissions::from_mode(mode))
            .expect("Failed to set permissions");
    }

    /// Build a command for invoking the compiled `shinit` binary inside the project.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("shinit").expect("Failed to locate shinit binary");
        cmd.current_dir(&self.project);
        for var in SHINIT_VARS {
            cmd.env_remove(var);
        }
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// `shinit load` as a bash 5 shell would run it.
    pub fn load(&self) -> Command {
        let mut cmd = self.cli();
        cmd.arg("load").arg("--entry").arg(self.entry()).args(["--bash-version", BASH_5]);
        cmd
    }

    /// Line that dot-sources `path` in an emitted script.
    pub fn source_line(path: &Path) -> String {
        format!(". '{}'", path.display())
    }
}

/// Positions of each path's source line in `script`, panicking when one is missing.
pub fn source_positions(script: &str, paths: &[PathBuf]) -> Vec<usize> {
    paths
        .iter()
        .map(|p| {
            let line = TestContext::source_line(p);
            script.find(&line).unwrap_or_else(|| panic!("{} not sourced in:\n{}", line, script))
        })
        .collect()
}
