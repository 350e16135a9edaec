//! Plugin path resolution and requirement file selection

use crate::errors::InstallError;
use std::fs;
use std::path::{Path, PathBuf};

/// Sentinel plugin name that selects every plugin under the extensions root
pub const ALL_PLUGINS: &str = "all";

/// The two fixed requirements files a plugin may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementKind {
    Render,
    Export,
}

impl RequirementKind {
    pub const ALL: [RequirementKind; 2] = [RequirementKind::Render, RequirementKind::Export];

    /// File name of this requirements file inside a plugin directory
    pub fn file_name(self) -> &'static str {
        match self {
            RequirementKind::Render => "render-requirements.txt",
            RequirementKind::Export => "export-requirements.txt",
        }
    }
}

/// Which requirement kinds an install run covers
///
/// Derived from the `-r`/`-e` flags; the CLI rejects the two flags together,
/// so there is no "both exclusive" state to reconcile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementSelection {
    All,
    RenderOnly,
    ExportOnly,
}

impl RequirementSelection {
    pub fn from_flags(render: bool, export: bool) -> Self {
        match (render, export) {
            (true, false) => RequirementSelection::RenderOnly,
            (false, true) => RequirementSelection::ExportOnly,
            _ => RequirementSelection::All,
        }
    }

    pub fn includes(self, kind: RequirementKind) -> bool {
        match self {
            RequirementSelection::All => true,
            RequirementSelection::RenderOnly => kind == RequirementKind::Render,
            RequirementSelection::ExportOnly => kind == RequirementKind::Export,
        }
    }
}

/// Resolve the requested plugin names to candidate directories
///
/// The `all` sentinel expands to every immediate subdirectory of the
/// extensions root, sorted by name so runs are deterministic across
/// platforms. Explicit names map to `root/name` unconditionally, preserving
/// order and duplicates; existence is checked later, per plugin.
pub fn resolve_plugin_paths(
    ext_path: &Path,
    plugins: &[String],
) -> Result<Vec<PathBuf>, InstallError> {
    if plugins.len() == 1 && plugins[0] == ALL_PLUGINS {
        if !ext_path.is_dir() {
            return Err(InstallError::ExtensionsRootNotFound(ext_path.to_path_buf()));
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(ext_path)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        paths.sort();
        Ok(paths)
    } else {
        Ok(plugins.iter().map(|name| ext_path.join(name)).collect())
    }
}
