//! Read-only view of what an initialization would load.

use std::fmt::Write as _;
use std::path::PathBuf;

use serde::Serialize;

use crate::app::InitContext;
use crate::app::config;
use crate::domain::{AppError, DiscoveredFileSet, ResolvedPaths};
use crate::ports::{EnvSource, FileDiscoverer, FileLoader, PermissionNormalizer};

#[derive(Debug, Clone)]
pub struct DiscoverOptions {
    pub entry: Option<PathBuf>,
    pub cwd: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Eligibility {
    Load,
    Example,
    AlreadySourced,
}

impl Eligibility {
    fn label(&self) -> &'static str {
        match self {
            Eligibility::Load => "load",
            Eligibility::Example => "example",
            Eligibility::AlreadySourced => "sourced",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredEntry {
    pub path: PathBuf,
    pub relative: PathBuf,
    pub eligibility: Eligibility,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoverySection {
    pub base: PathBuf,
    pub files: Vec<DiscoveredEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveryReport {
    pub paths: ResolvedPaths,
    pub config: DiscoverySection,
    pub modules: DiscoverySection,
}

impl DiscoveryReport {
    /// Human-readable listing, one file per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (title, section) in [("config", &self.config), ("modules", &self.modules)] {
            let _ = writeln!(out, "{} ({}):", title, section.base.display());
            if section.files.is_empty() {
                let _ = writeln!(out, "  (none)");
            }
            for entry in &section.files {
                let _ = writeln!(
                    out,
                    "  [{:<7}] {}",
                    entry.eligibility.label(),
                    entry.relative.display()
                );
            }
        }
        out
    }
}

/// Discover both file sets without loading anything or touching permissions.
pub fn execute<E, D, L, N>(
    ctx: &mut InitContext<E, D, L, N>,
    options: &DiscoverOptions,
) -> Result<DiscoveryReport, AppError>
where
    E: EnvSource,
    D: FileDiscoverer,
    L: FileLoader,
    N: PermissionNormalizer,
{
    let paths = ctx.resolve_paths(options.entry.as_deref(), &options.cwd)?;
    let search = paths.anchored(&options.cwd);
    let config_set = ctx.discoverer().discover(&config::config_query(&search.project_root));
    let module_set = ctx.discoverer().discover(&config::module_query(&search.module_dir));

    Ok(DiscoveryReport {
        config: section(ctx, &config_set),
        modules: section(ctx, &module_set),
        paths,
    })
}

fn section<E, D, L, N>(ctx: &InitContext<E, D, L, N>, set: &DiscoveredFileSet) -> DiscoverySection
where
    E: EnvSource,
    D: FileDiscoverer,
    L: FileLoader,
    N: PermissionNormalizer,
{
    let files = set
        .files
        .iter()
        .map(|file| {
            let eligibility = if file.is_example() {
                Eligibility::Example
            } else if ctx.has_loaded(&file.path) {
                Eligibility::AlreadySourced
            } else {
                Eligibility::Load
            };
            DiscoveredEntry {
                path: file.path.clone(),
                relative: file.relative.clone(),
                eligibility,
            }
        })
        .collect();
    DiscoverySection { base: set.base.clone(), files }
}
