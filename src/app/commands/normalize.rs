//! Permission normalization of a single file, run by the emitted script after the
//! file has been sourced successfully.
//!
//! The policy is read from the environment of this invocation, so settings made by
//! files sourced earlier in the same script apply.

use std::path::Path;

use tracing::debug;

use crate::adapters::shell_quote;
use crate::app::config::{self, POLICY_VARS};
use crate::domain::AppError;
use crate::ports::{EnvSource, PermissionNormalizer};

/// Apply the current permission policy to `path`.
///
/// Returns whether anything was attempted; a policy with both switches off is a no-op.
pub fn execute<E, N>(env: &E, normalizer: &N, path: &Path) -> Result<bool, AppError>
where
    E: EnvSource,
    N: PermissionNormalizer,
{
    let policy = config::permission_policy(env)?;
    if policy.is_noop() {
        debug!(path = %path.display(), "normalization disabled");
        return Ok(false);
    }
    normalizer.normalize(path, &policy)?;
    Ok(true)
}

/// Shell command prefix that runs `program normalize` with the caller's current
/// policy settings, exported or not, passed through.
pub fn invocation(program: &str) -> String {
    let assignments: Vec<String> =
        POLICY_VARS.iter().map(|var| format!("{var}=\"${{{var}-}}\"")).collect();
    format!("{} {} normalize", assignments.join(" "), shell_quote(program))
}
