mod env_source;
mod file_discoverer;
mod file_loader;
mod permission_normalizer;

pub use env_source::EnvSource;
pub use file_discoverer::FileDiscoverer;
pub use file_loader::FileLoader;
pub use permission_normalizer::PermissionNormalizer;
