use crate::domain::{DiscoveredFileSet, DiscoveryQuery};

/// Port for the read-only scan that locates candidate files.
pub trait FileDiscoverer {
    /// Regular files under `query.base` matching the query, in load order.
    ///
    /// Never fails: an unreadable or missing base yields an empty set.
    fn discover(&self, query: &DiscoveryQuery) -> DiscoveredFileSet;
}
