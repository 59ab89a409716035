use std::fs::{self, Permissions};
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use tracing::debug;

use crate::domain::{AppError, PermissionPolicy};
use crate::ports::PermissionNormalizer;

/// Applies ownership and permission changes directly through the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilesystemPermissionNormalizer;

impl PermissionNormalizer for FilesystemPermissionNormalizer {
    fn normalize(&self, path: &Path, policy: &PermissionPolicy) -> Result<(), AppError> {
        if policy.chown_enabled {
            std::os::unix::fs::chown(path, Some(policy.owner.uid), Some(policy.owner.gid))
                .map_err(|source| AppError::Permission {
                    operation: "chown",
                    path: path.to_path_buf(),
                    source,
                })?;
            debug!(path = %path.display(), owner = %policy.owner, "chown applied");
        }

        if policy.chmod_enabled {
            let chmod_error = |source| AppError::Permission {
                operation: "chmod",
                path: path.to_path_buf(),
                source,
            };
            let metadata = fs::metadata(path).map_err(chmod_error)?;
            let previous = metadata.permissions().mode() & 0o7777;
            let mode = policy.mode.effective_for(metadata.is_dir(), previous);
            fs::set_permissions(path, Permissions::from_mode(mode.bits())).map_err(chmod_error)?;
            debug!(
                path = %path.display(),
                from = %format!("{:o}", previous),
                to = %mode,
                "chmod applied"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FileMode, OwnerSpec};
    use std::os::unix::fs::MetadataExt;
    use tempfile::TempDir;

    fn policy(mode: &str, chown: bool, chmod: bool) -> PermissionPolicy {
        PermissionPolicy {
            owner: OwnerSpec::invoking_user(),
            mode: FileMode::parse(mode).unwrap(),
            chown_enabled: chown,
            chmod_enabled: chmod,
        }
    }

    fn mode_of(path: &Path) -> u32 {
        fs::metadata(path).unwrap().permissions().mode() & 0o7777
    }

    #[test]
    fn restricts_plain_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("a.env");
        fs::write(&file, "A=1\n").unwrap();
        fs::set_permissions(&file, Permissions::from_mode(0o644)).unwrap();

        FilesystemPermissionNormalizer.normalize(&file, &policy("600", true, true)).unwrap();

        assert_eq!(mode_of(&file), 0o600);
        let meta = fs::metadata(&file).unwrap();
        let owner = OwnerSpec::invoking_user();
        assert_eq!((meta.uid(), meta.gid()), (owner.uid, owner.gid));
    }

    #[test]
    fn preserves_execute_on_executable_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("run.env");
        fs::write(&file, "").unwrap();
        fs::set_permissions(&file, Permissions::from_mode(0o755)).unwrap();

        FilesystemPermissionNormalizer.normalize(&file, &policy("600", false, true)).unwrap();
        assert_eq!(mode_of(&file), 0o700);
    }

    #[test]
    fn directory_keeps_traversal() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("init.d");
        fs::create_dir(&dir).unwrap();

        FilesystemPermissionNormalizer.normalize(&dir, &policy("600", false, true)).unwrap();
        assert_eq!(mode_of(&dir), 0o700);
    }

    #[test]
    fn disabled_chmod_leaves_mode_alone() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("a.env");
        fs::write(&file, "").unwrap();
        fs::set_permissions(&file, Permissions::from_mode(0o644)).unwrap();

        FilesystemPermissionNormalizer.normalize(&file, &policy("600", false, false)).unwrap();
        assert_eq!(mode_of(&file), 0o644);
    }

    #[test]
    fn missing_target_propagates_failure() {
        let tmp = TempDir::new().unwrap();
        let err = FilesystemPermissionNormalizer
            .normalize(&tmp.path().join("gone.env"), &policy("600", false, true))
            .unwrap_err();
        assert!(matches!(err, AppError::Permission { operation: "chmod", .. }));
    }
}
