use tracing::debug;
use walkdir::WalkDir;

use crate::domain::{DiscoveredFileSet, DiscoveryQuery};
use crate::ports::FileDiscoverer;

/// Filesystem discovery backed by `walkdir`.
///
/// Matches regular files and symlinks to regular files. Symlinked directories are not
/// descended into. Walk errors are logged and skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkdirDiscoverer;

impl FileDiscoverer for WalkdirDiscoverer {
    fn discover(&self, query: &DiscoveryQuery) -> DiscoveredFileSet {
        if !query.base.is_dir() {
            debug!(base = %query.base.display(), "discovery base is not a directory");
            return DiscoveredFileSet::empty(&query.base);
        }

        let walker = WalkDir::new(&query.base)
            .min_depth(query.min_depth)
            .max_depth(query.max_depth)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !query.is_excluded_dir(&entry.file_name().to_string_lossy())
            });

        let paths = walker
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    debug!(error = %err, "skipping unreadable entry during discovery");
                    None
                }
            })
            .filter(|entry| entry.path().is_file())
            .filter(|entry| query.name.matches(&entry.file_name().to_string_lossy()))
            .map(|entry| entry.into_path());

        let set = DiscoveredFileSet::from_paths(&query.base, paths);
        debug!(
            base = %query.base.display(),
            pattern = %query.name,
            found = set.len(),
            "discovery complete"
        );
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NamePattern;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    fn touch(temp: &TempDir, rel: &str) {
        temp.child(rel).write_str("").unwrap();
    }

    fn relative(set: &DiscoveredFileSet) -> Vec<String> {
        set.files.iter().map(|f| f.relative.display().to_string()).collect()
    }

    #[test]
    fn honors_depth_bounds_and_pattern() {
        let temp = TempDir::new().unwrap();
        touch(&temp, "a.env");
        touch(&temp, "conf/b.env");
        touch(&temp, "conf/deep/c.env");
        touch(&temp, "conf/notes.txt");

        let query = DiscoveryQuery::new(temp.path(), NamePattern::new("*.env")).depth(1, 2);
        let set = WalkdirDiscoverer.discover(&query);
        assert_eq!(relative(&set), vec!["a.env", "conf/b.env"]);
    }

    #[test]
    fn min_depth_skips_shallow_files() {
        let temp = TempDir::new().unwrap();
        touch(&temp, "a.env");
        touch(&temp, "conf/b.env");

        let query = DiscoveryQuery::new(temp.path(), NamePattern::new("*.env")).depth(2, 2);
        assert_eq!(relative(&WalkdirDiscoverer.discover(&query)), vec!["conf/b.env"]);
    }

    #[test]
    fn excluded_directories_are_not_entered() {
        let temp = TempDir::new().unwrap();
        touch(&temp, "vault.env/inner.env");
        touch(&temp, "init.d/module.env");
        touch(&temp, "conf/keep.env");

        let query = DiscoveryQuery::new(temp.path(), NamePattern::new("*.env"))
            .depth(1, 2)
            .exclude_dir(NamePattern::new("*.env"))
            .exclude_dir(NamePattern::new("*.d"));
        assert_eq!(relative(&WalkdirDiscoverer.discover(&query)), vec!["conf/keep.env"]);
    }

    #[test]
    fn directories_matching_the_name_are_not_files() {
        let temp = TempDir::new().unwrap();
        temp.child("odd.sh").create_dir_all().unwrap();
        touch(&temp, "real.sh");

        let query = DiscoveryQuery::new(temp.path(), NamePattern::new("*.sh"));
        assert_eq!(relative(&WalkdirDiscoverer.discover(&query)), vec!["real.sh"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_files_match_but_symlinked_dirs_are_not_walked() {
        let temp = TempDir::new().unwrap();
        touch(&temp, "target/real.env");
        let target = temp.child("target");
        std::os::unix::fs::symlink(target.child("real.env").path(), temp.child("link.env").path())
            .unwrap();
        std::os::unix::fs::symlink(target.path(), temp.child("linked").path()).unwrap();

        let query = DiscoveryQuery::new(temp.path(), NamePattern::new("*.env")).depth(1, 2);
        assert_eq!(
            relative(&WalkdirDiscoverer.discover(&query)),
            vec!["link.env", "target/real.env"]
        );
    }

    #[test]
    fn missing_base_yields_empty_set() {
        let temp = TempDir::new().unwrap();
        let absent = temp.child("absent");
        let query = DiscoveryQuery::new(absent.path(), NamePattern::new("*.sh"));
        let set = WalkdirDiscoverer.discover(&query);
        assert!(set.is_empty());
        assert_eq!(set.base, absent.path());
    }

    #[test]
    fn results_are_sorted_lexically() {
        let temp = TempDir::new().unwrap();
        for name in ["10_b.sh", "00_a.sh", "05_example.sh"] {
            touch(&temp, name);
        }
        let query = DiscoveryQuery::new(temp.path(), NamePattern::new("*.sh"));
        assert_eq!(
            relative(&WalkdirDiscoverer.discover(&query)),
            vec!["00_a.sh", "05_example.sh", "10_b.sh"]
        );
    }
}
