//! shinit: deterministic discovery and sourcing of shell environment and init.d modules.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use adapters::{FilesystemPermissionNormalizer, ProcessEnv, ShellScriptLoader, WalkdirDiscoverer};
use app::{
    InitContext,
    commands::{discover, hook, load, normalize, utils},
};

pub use app::commands::discover::{DiscoverOptions, DiscoveryReport, Eligibility};
pub use app::commands::load::LoadOptions;
pub use app::commands::utils::check_cmds::ResolvedCommand;
pub use app::commands::utils::count_files::FileCount;
pub use app::commands::utils::rename_ext::{Rename, RenameOptions};
pub use domain::{AppError, LoadMode, LoadOutcome, ShellKind, ShellMarkers};

// =============================================================================
// Initialization API
// =============================================================================

/// Run a full initialization against the process environment.
///
/// Returns the script the calling shell must `eval`, together with what was loaded.
/// Nothing in the script runs until the shell evaluates it; configuration files are
/// normalized from within the script through `options.program`.
pub fn load(options: &LoadOptions) -> Result<(String, LoadOutcome), AppError> {
    let loader = ShellScriptLoader::new(options.mode)
        .with_normalize_command(normalize::invocation(&options.program));
    let mut ctx =
        InitContext::new(ProcessEnv, WalkdirDiscoverer, loader, FilesystemPermissionNormalizer);
    let outcome = load::execute(&mut ctx, options)?;
    Ok((ctx.into_loader().into_script(), outcome))
}

/// Apply the permission policy of the current environment to one file.
///
/// Returns `false` when both normalization switches are off.
pub fn normalize(path: &Path) -> Result<bool, AppError> {
    normalize::execute(&ProcessEnv, &FilesystemPermissionNormalizer, path)
}

/// Report what an initialization would load, without loading or changing permissions.
pub fn discover(options: &DiscoverOptions) -> Result<DiscoveryReport, AppError> {
    let mut ctx = InitContext::new(
        ProcessEnv,
        WalkdirDiscoverer,
        ShellScriptLoader::default(),
        FilesystemPermissionNormalizer,
    );
    discover::execute(&mut ctx, options)
}

/// Shell snippet an `init.sh` evaluates to hand off to `program load`.
///
/// # Arguments
/// * `shell` - Shell family the snippet is written for
/// * `program` - Path or name used to invoke shinit from the snippet
/// * `strict` - Abort on the first failing file instead of continuing
pub fn hook(shell: ShellKind, program: &str, strict: bool) -> String {
    hook::render(shell, program, strict)
}

// =============================================================================
// File Utility API
// =============================================================================

/// Rename files from one extension to another.
pub fn rename_ext(options: &RenameOptions) -> Result<Vec<Rename>, AppError> {
    utils::rename_ext::execute(options)
}

/// Count regular files in each directory.
pub fn count_files(dirs: &[PathBuf], recursive: bool) -> Result<Vec<FileCount>, AppError> {
    utils::count_files::execute(dirs, recursive)
}

/// Check that every named command resolves on `PATH`.
pub fn check_cmds(names: &[String]) -> Result<Vec<ResolvedCommand>, AppError> {
    let search_path: Option<OsString> = std::env::var_os("PATH");
    utils::check_cmds::execute(names, search_path)
}
