//! The initialization flow and its sequential loader.
//!
//! Order of work: detect shell, resolve paths, load the local config, prepare and
//! normalize the module directory, discover configuration and module files, then load
//! every eligible configuration file before the first module file.
//!
//! Configuration files are normalized by the loader's output once the shell has
//! sourced them, not here.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::app::InitContext;
use crate::app::commands::normalize;
use crate::app::config::{self, InitSettings};
use crate::domain::{
    AppError, DiscoveredFile, FileKind, LoadFailure, LoadMode, LoadOutcome, PassReport,
    ShellMarkers, SkipReason,
};
use crate::ports::{EnvSource, FileDiscoverer, FileLoader, PermissionNormalizer};

/// Inputs to one initialization.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub entry: Option<PathBuf>,
    pub cwd: PathBuf,
    pub markers: ShellMarkers,
    pub mode: LoadMode,
    /// Executable the emitted script calls back into for follow-up steps.
    pub program: String,
}

/// Execute the full initialization against `ctx`.
pub fn execute<E, D, L, N>(
    ctx: &mut InitContext<E, D, L, N>,
    options: &LoadOptions,
) -> Result<LoadOutcome, AppError>
where
    E: EnvSource,
    D: FileDiscoverer,
    L: FileLoader,
    N: PermissionNormalizer,
{
    let shell = ctx.detect_shell(&options.markers)?.clone();
    let paths = ctx.resolve_paths(options.entry.as_deref(), &options.cwd)?;
    let search = paths.anchored(&options.cwd);
    let mode = options.mode;

    let mut config_report = PassReport::new(FileKind::Config);
    let local = paths.local_config();
    if local.is_file() {
        debug!(path = %local.display(), "loading local config");
        let local_file = DiscoveredFile::new(&paths.entry_dir, local);
        let local_files = std::slice::from_ref(&local_file);
        load_all(ctx, local_files, FileKind::Config, mode, &mut config_report)?;
    }

    let settings = InitSettings::from_env(ctx.env());
    let mut module_dir_created = false;
    let module_dir = &search.module_dir;
    if settings.create_init_d && !module_dir.exists() {
        fs::create_dir_all(module_dir)?;
        module_dir_created = true;
        info!(path = %module_dir.display(), "created module directory");
    }

    let mut module_dir_failure = None;
    if module_dir.is_dir() {
        if let Err(err) = normalize::execute(ctx.env(), ctx.normalizer(), module_dir) {
            match mode {
                LoadMode::Strict => return Err(err),
                LoadMode::BestEffort => {
                    warn!(
                        path = %module_dir.display(),
                        error = %err,
                        "module directory not normalized"
                    );
                    module_dir_failure =
                        Some(LoadFailure { path: module_dir.clone(), error: err.to_string() });
                }
            }
        }
    } else {
        debug!(path = %module_dir.display(), "module directory absent");
    }

    let config_set = ctx.discoverer().discover(&config::config_query(&search.project_root));
    let module_set = ctx.discoverer().discover(&config::module_query(module_dir));

    config_report.discovered = config_set.paths().map(Path::to_path_buf).collect();
    load_all(ctx, &config_set.files, FileKind::Config, mode, &mut config_report)?;

    let mut module_report = PassReport::new(FileKind::Module);
    module_report.discovered = module_set.paths().map(Path::to_path_buf).collect();
    load_all(ctx, &module_set.files, FileKind::Module, mode, &mut module_report)?;

    info!(
        config = config_report.loaded.len(),
        modules = module_report.loaded.len(),
        failures = config_report.failures.len() + module_report.failures.len(),
        "initialization complete"
    );

    Ok(LoadOutcome {
        shell,
        paths,
        module_dir_created,
        module_dir_failure,
        config: config_report,
        modules: module_report,
    })
}

/// Load `files` in order, recording the pass in `report`.
///
/// Empty paths, example-marked files and files already in the registry are skipped.
/// Each remaining file is registered, then handed to the loader. In strict mode the
/// first failure is returned; in best-effort mode it is recorded and the pass continues.
pub fn load_all<E, D, L, N>(
    ctx: &mut InitContext<E, D, L, N>,
    files: &[DiscoveredFile],
    kind: FileKind,
    mode: LoadMode,
    report: &mut PassReport,
) -> Result<(), AppError>
where
    E: EnvSource,
    D: FileDiscoverer,
    L: FileLoader,
    N: PermissionNormalizer,
{
    for file in files {
        let path = &file.path;
        if path.as_os_str().is_empty() {
            report.skip(path.clone(), SkipReason::EmptyPath);
            continue;
        }
        if file.is_example() {
            debug!(path = %path.display(), "skipping example file");
            report.skip(path.clone(), SkipReason::Example);
            continue;
        }
        if ctx.mark_and_check(path) {
            debug!(path = %path.display(), "already sourced");
            report.skip(path.clone(), SkipReason::AlreadySourced);
            continue;
        }

        if let Err(err) = ctx.loader_mut().load(path, kind) {
            record_or_abort(mode, report, path, err)?;
            continue;
        }
        report.loaded.push(path.clone());
    }
    Ok(())
}

fn record_or_abort(
    mode: LoadMode,
    report: &mut PassReport,
    path: &Path,
    err: AppError,
) -> Result<(), AppError> {
    match mode {
        LoadMode::Strict => Err(err),
        LoadMode::BestEffort => {
            warn!(path = %path.display(), error = %err, "continuing after failure");
            report.failures.push(LoadFailure { path: path.to_path_buf(), error: err.to_string() });
            Ok(())
        }
    }
}
