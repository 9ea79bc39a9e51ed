//! Toolchain configuration files.
//!
//! Two locations are read:
//! - Global: `~/.toolvars/toolchain.toml` - user-wide defaults
//! - Project: `.toolvars/toolchain.toml` - project-specific overrides
//!
//! Project values take precedence over global ones.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::options::OptionSet;
use crate::core::variables::Value;
use crate::toolchain::variant::{BlasPrerequisites, Prerequisites};

/// A `toolchain.toml` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ToolchainFile {
    /// Which component to resolve
    pub component: ComponentSection,

    /// Toolchain options; unknown keys are rejected
    pub options: Option<OptionSet>,

    /// Generic compiler variables (CC, CXX, F77, F90, FC, LDFLAGS)
    pub compiler: BTreeMap<String, Value>,

    /// Layout of the BLAS provider
    pub blas: Option<BlasPrerequisites>,
}

/// The `[component]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ComponentSection {
    /// Provider name (e.g. `openmpi`, `intel-fftw`)
    pub provider: Option<String>,

    /// Detected provider version
    pub version: Option<String>,

    /// Installation root (defaults to the provider's `EBROOT*` variable)
    pub root: Option<PathBuf>,
}

impl ToolchainFile {
    /// Load a toolchain file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read toolchain config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse toolchain config: {}", path.display()))
    }

    /// Merge another file into this one (other takes precedence).
    ///
    /// Component fields and compiler variables merge one by one; the
    /// `[options]` and `[blas]` sections are replaced as a whole.
    pub fn merge(&mut self, other: ToolchainFile) {
        if other.component.provider.is_some() {
            self.component.provider = other.component.provider;
        }
        if other.component.version.is_some() {
            self.component.version = other.component.version;
        }
        if other.component.root.is_some() {
            self.component.root = other.component.root;
        }
        if other.options.is_some() {
            self.options = other.options;
        }
        self.compiler.extend(other.compiler);
        if other.blas.is_some() {
            self.blas = other.blas;
        }
    }

    /// The prerequisites described by this file.
    pub fn prerequisites(&self) -> Prerequisites {
        Prerequisites {
            compiler: self.compiler.clone(),
            blas: self.blas.clone(),
        }
    }
}

/// Load the merged toolchain file from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.toolvars/toolchain.toml)
/// 2. Global config (~/.toolvars/toolchain.toml)
/// 3. Defaults
///
/// Missing files are skipped. A file that exists but does not parse is an
/// error. When both paths name the same file it is read once.
pub fn load_toolchain_file(
    global_path: Option<&Path>,
    project_path: &Path,
) -> Result<ToolchainFile> {
    let mut file = ToolchainFile::default();

    if let Some(global_path) = global_path.filter(|p| p.exists()) {
        tracing::debug!("Loading global toolchain config {}", global_path.display());
        file.merge(ToolchainFile::load(global_path)?);

        if same_file(global_path, project_path) {
            return Ok(file);
        }
    }

    if project_path.exists() {
        tracing::debug!("Loading project toolchain config {}", project_path.display());
        file.merge(ToolchainFile::load(project_path)?);
    }

    Ok(file)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Get the global toolvars config directory (~/.toolvars).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".toolvars"))
}

/// Get the global toolchain file path (~/.toolvars/toolchain.toml).
pub fn global_toolchain_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("toolchain.toml"))
}

/// Get the project toolchain file path (.toolvars/toolchain.toml).
pub fn project_toolchain_path(project_root: &Path) -> PathBuf {
    project_root.join(".toolvars").join("toolchain.toml")
}
