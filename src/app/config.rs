//! Environment-driven settings.
//!
//! Nothing here is cached: every caller re-reads the environment it is handed, so a
//! local config loaded mid-run is visible to everything that runs after it.

use std::path::Path;

use tracing::{debug, warn};

use crate::adapters::StaticEnv;
use crate::domain::{AppError, DiscoveryQuery, FileMode, NamePattern, OwnerSpec, PermissionPolicy};
use crate::ports::EnvSource;

pub const DEBUG_VAR: &str = "DEBUG";
pub const DISABLE_CHOWN_VAR: &str = "DISABLE_INIT_CHOWN";
pub const DISABLE_CHMOD_VAR: &str = "DISABLE_INIT_CHMOD";
pub const PROJECT_ROOT_VAR: &str = "PROJECT_ROOT";
pub const INIT_D_VAR: &str = "INIT_D";
pub const CREATE_INIT_D_VAR: &str = "CREATE_INIT_D";
pub const CHOWN_AS_VAR: &str = "CHOWN_AS";
pub const CHMOD_MODE_VAR: &str = "CHMOD_MODE";

/// Keys a local config file may provide as defaults.
pub const LOCAL_OVERRIDABLE: [&str; 8] = [
    DEBUG_VAR,
    DISABLE_CHOWN_VAR,
    DISABLE_CHMOD_VAR,
    PROJECT_ROOT_VAR,
    INIT_D_VAR,
    CREATE_INIT_D_VAR,
    CHOWN_AS_VAR,
    CHMOD_MODE_VAR,
];

/// Variables the permission policy is built from.
pub const POLICY_VARS: [&str; 4] =
    [CHOWN_AS_VAR, CHMOD_MODE_VAR, DISABLE_CHOWN_VAR, DISABLE_CHMOD_VAR];

pub const CONFIG_PATTERN: &str = "*.env";
pub const MODULE_PATTERN: &str = "*.sh";
pub const CONFIG_MAX_DEPTH: usize = 2;
/// Directory names never searched for configuration files.
pub const CONFIG_EXCLUDED_DIRS: [&str; 2] = ["*.env", "*.d"];

/// Toggle semantics: set, non-empty and not an explicit negative.
pub fn is_truthy(value: Option<&str>) -> bool {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        None => false,
        Some(v) => !matches!(v.as_str(), "" | "0" | "false" | "no" | "off"),
    }
}

/// Settings that shape path resolution and module directory handling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitSettings {
    pub debug: bool,
    pub project_root: Option<String>,
    pub init_d: Option<String>,
    pub create_init_d: bool,
}

impl InitSettings {
    pub fn from_env(env: &impl EnvSource) -> Self {
        Self {
            debug: is_truthy(env.var(DEBUG_VAR).as_deref()),
            project_root: env.non_empty(PROJECT_ROOT_VAR),
            init_d: env.non_empty(INIT_D_VAR),
            create_init_d: env.var(CREATE_INIT_D_VAR).as_deref() == Some("1"),
        }
    }
}

/// Current permission policy. Read fresh on every call.
///
/// An owner or mode is only parsed when its switch is on, so a disabled step never
/// fails on a malformed value.
pub fn permission_policy(env: &impl EnvSource) -> Result<PermissionPolicy, AppError> {
    let chown_enabled = !is_truthy(env.var(DISABLE_CHOWN_VAR).as_deref());
    let chmod_enabled = !is_truthy(env.var(DISABLE_CHMOD_VAR).as_deref());
    let owner = match env.non_empty(CHOWN_AS_VAR).filter(|_| chown_enabled) {
        Some(raw) => OwnerSpec::parse(&raw)?,
        None => OwnerSpec::invoking_user(),
    };
    let mode = match env.non_empty(CHMOD_MODE_VAR).filter(|_| chmod_enabled) {
        Some(raw) => FileMode::parse(&raw)?,
        None => FileMode::default(),
    };
    Ok(PermissionPolicy { owner, mode, chown_enabled, chmod_enabled })
}

/// Configuration discovery: `*.env` within two levels of the project root.
pub fn config_query(project_root: &Path) -> DiscoveryQuery {
    CONFIG_EXCLUDED_DIRS.iter().fold(
        DiscoveryQuery::new(project_root, NamePattern::new(CONFIG_PATTERN))
            .depth(1, CONFIG_MAX_DEPTH),
        |query, dir| query.exclude_dir(NamePattern::new(dir)),
    )
}

/// Module discovery: `*.sh` directly inside the module directory.
pub fn module_query(module_dir: &Path) -> DiscoveryQuery {
    DiscoveryQuery::new(module_dir, NamePattern::new(MODULE_PATTERN)).depth(1, 1)
}

/// Read overridable assignments from a local config file.
///
/// The file is shell code; lines dotenv cannot parse make the whole file contribute
/// nothing here, though the shell still sources it. Errors never echo file contents.
pub fn read_local_defaults(path: &Path) -> StaticEnv {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(err) => {
            warn!(path = %path.display(), kind = ?io_kind(&err), "cannot read local config");
            return StaticEnv::new();
        }
    };

    let mut defaults = StaticEnv::new();
    for item in iter {
        match item {
            Ok((key, value)) => {
                if LOCAL_OVERRIDABLE.contains(&key.as_str()) {
                    defaults.set(&key, &value);
                }
            }
            Err(dotenvy::Error::LineParse(_, index)) => {
                warn!(path = %path.display(), index, "local config is not dotenv-compatible");
                return StaticEnv::new();
            }
            Err(err) => {
                warn!(path = %path.display(), kind = ?io_kind(&err), "cannot parse local config");
                return StaticEnv::new();
            }
        }
    }
    debug!(path = %path.display(), keys = defaults.len(), "local config defaults");
    defaults
}

fn io_kind(err: &dotenvy::Error) -> Option<std::io::ErrorKind> {
    match err {
        dotenvy::Error::Io(io_err) => Some(io_err.kind()),
        _ => None,
    }
}
