use std::cell::OnceCell;
use std::path::Path;

use tracing::debug;

use crate::adapters::{LayeredEnv, StaticEnv};
use crate::app::config::{self, InitSettings};
use crate::domain::{
    AppError, ResolvedPaths, SOURCED_VAR, ShellContext, ShellMarkers, SourcedRegistry,
};
use crate::ports::{EnvSource, FileDiscoverer, FileLoader, PermissionNormalizer};

/// State and dependencies of one initialization.
///
/// Owns the sourced-file registry and the detect-once shell context, so independent
/// contexts never observe each other's loads.
pub struct InitContext<E, D, L, N>
where
    E: EnvSource,
    D: FileDiscoverer,
    L: FileLoader,
    N: PermissionNormalizer,
{
    env: LayeredEnv<E>,
    discoverer: D,
    loader: L,
    normalizer: N,
    registry: SourcedRegistry,
    shell: OnceCell<ShellContext>,
}

impl<E, D, L, N> InitContext<E, D, L, N>
where
    E: EnvSource,
    D: FileDiscoverer,
    L: FileLoader,
    N: PermissionNormalizer,
{
    /// Create a context, inheriting the registry from `SOURCED` when set.
    pub fn new(env: E, discoverer: D, loader: L, normalizer: N) -> Self {
        let registry =
            env.var(SOURCED_VAR).map(|raw| SourcedRegistry::parse(&raw)).unwrap_or_default();
        debug!(inherited = registry.len(), "sourced registry initialized");
        Self {
            env: LayeredEnv::new(env),
            discoverer,
            loader,
            normalizer,
            registry,
            shell: OnceCell::new(),
        }
    }

    pub fn env(&self) -> &LayeredEnv<E> {
        &self.env
    }

    pub fn discoverer(&self) -> &D {
        &self.discoverer
    }

    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }

    pub fn into_loader(self) -> L {
        self.loader
    }

    pub fn normalizer(&self) -> &N {
        &self.normalizer
    }

    pub fn registry(&self) -> &SourcedRegistry {
        &self.registry
    }

    pub fn has_loaded(&self, path: &Path) -> bool {
        self.registry.has_loaded(path)
    }

    pub fn mark_loaded(&mut self, path: &Path) -> bool {
        self.registry.mark_loaded(path)
    }

    /// True when `path` was already loaded; otherwise records it.
    pub fn mark_and_check(&mut self, path: &Path) -> bool {
        self.registry.mark_and_check(path)
    }

    /// Detect the shell once. Later calls return the first result regardless of markers.
    pub fn detect_shell(&self, markers: &ShellMarkers) -> Result<&ShellContext, AppError> {
        if let Some(existing) = self.shell.get() {
            return Ok(existing);
        }
        let detected = ShellContext::detect(markers)?;
        debug!(shell = %detected.kind, version = %detected.version, "shell detected");
        Ok(self.shell.get_or_init(|| detected))
    }

    pub fn shell(&self) -> Option<&ShellContext> {
        self.shell.get()
    }

    /// Resolve paths, folding a local config's assignments in as environment defaults.
    pub fn resolve_paths(
        &mut self,
        entry: Option<&Path>,
        cwd: &Path,
    ) -> Result<ResolvedPaths, AppError> {
        let base = ResolvedPaths::resolve(entry, cwd, None, None)?;
        let local = base.local_config();
        if local.is_file() {
            self.env.set_defaults(config::read_local_defaults(&local));
        } else {
            self.env.set_defaults(StaticEnv::new());
        }

        let settings = InitSettings::from_env(&self.env);
        let paths =
            base.with_overrides(settings.project_root.as_deref(), settings.init_d.as_deref());
        debug!(
            entry = %paths.entry_script.display(),
            project_root = %paths.project_root.display(),
            module_dir = %paths.module_dir.display(),
            "paths resolved"
        );
        Ok(paths)
    }
}
