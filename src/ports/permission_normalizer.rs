use std::path::Path;

use crate::domain::{AppError, PermissionPolicy};

/// Port for re-stamping ownership and permissions on a target.
pub trait PermissionNormalizer {
    /// Apply `policy` to `path`. Failures of the underlying change are returned, not swallowed.
    fn normalize(&self, path: &Path, policy: &PermissionPolicy) -> Result<(), AppError>;
}
