//! Manifest and workspace configuration parsing.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const MANIFEST_FILE: &str = "package.json";
pub const WORKSPACE_CONFIG_FILE: &str = "monopub.toml";
pub const DEFAULT_CLIENT: &str = "npm";
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// Local dependencies declared by a manifest, as a list of names or as a
/// name-keyed map whose values (version ranges) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalDependencies {
    List(Vec<String>),
    Map(IndexMap<String, serde_json::Value>),
}

impl Default for LocalDependencies {
    fn default() -> Self {
        LocalDependencies::List(Vec::new())
    }
}

impl LocalDependencies {
    /// Declared names in declaration order.
    pub fn names(&self) -> Vec<String> {
        match self {
            LocalDependencies::List(names) => names.clone(),
            LocalDependencies::Map(map) => map.keys().cloned().collect(),
        }
    }
}

/// The `monopub` section of a package manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalConfig {
    /// Base directory relative to the package root.
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub dependencies: LocalDependencies,
}

/// The subset of `package.json` read by monopub.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub monopub: LocalConfig,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(content).map_err(|error| Error::Json {
            error,
            path: path.to_path_buf(),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceSection {
    /// Directory names skipped during package discovery.
    #[serde(default)]
    pub ignore: Vec<String>,
    /// Registry client executable.
    pub client: Option<String>,
    /// Registry URL passed to the client.
    pub registry: Option<String>,
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublishSection {
    pub check_existing: Option<bool>,
    pub recursive: Option<bool>,
}

/// Repository-level configuration as defined in `monopub.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    #[serde(default)]
    pub workspace: WorkspaceSection,
    #[serde(default)]
    pub publish: PublishSection,
    /// Path of the file this was loaded from.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl WorkspaceConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: WorkspaceConfig = toml::from_str(&content).map_err(|error| Error::Toml {
            error,
            context: path.display().to_string(),
        })?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Finds the repository root above `start` and its configuration.
    ///
    /// Walks up until a directory holds `monopub.toml` or `.git`. Without
    /// either, `start` is the root and the default configuration applies.
    pub fn discover(start: &Path) -> Result<(PathBuf, Self)> {
        let mut current_dir = start;

        loop {
            let config_file = current_dir.join(WORKSPACE_CONFIG_FILE);
            if config_file.is_file() {
                return Ok((current_dir.to_path_buf(), Self::load(&config_file)?));
            }

            if current_dir.join(".git").exists() {
                return Ok((current_dir.to_path_buf(), Self::default()));
            }

            match current_dir.parent() {
                Some(parent) if parent != current_dir => current_dir = parent,
                _ => break,
            }
        }

        Ok((start.to_path_buf(), Self::default()))
    }

    #[inline]
    pub fn client(&self) -> &str {
        self.workspace.client.as_deref().unwrap_or(DEFAULT_CLIENT)
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.workspace.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }

    pub fn is_ignored(&self, dir_name: &str) -> bool {
        self.workspace.ignore.iter().any(|i| i == dir_name)
    }
}
