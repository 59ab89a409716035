pub mod environment;
pub mod permission_filesystem;
pub mod shell_script_loader;
pub mod walkdir_discoverer;

pub use environment::{LayeredEnv, ProcessEnv, StaticEnv};
pub use permission_filesystem::FilesystemPermissionNormalizer;
pub use shell_script_loader::{ShellScriptLoader, shell_quote};
pub use walkdir_discoverer::WalkdirDiscoverer;
