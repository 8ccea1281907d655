//! Package registry access.

use std::path::Path;
use std::process::Command;

use semver::Version;
use tracing::debug;

use crate::config::{WorkspaceConfig, DEFAULT_CLIENT};
use crate::error::{Error, Result};

/// Operations monopub needs from a package registry.
///
/// Implementations must be usable from several threads at once; registry
/// lookups for a publish plan run in parallel.
pub trait PackageRegistry: Send + Sync {
    /// Executable used in generated publish scripts.
    fn client(&self) -> &str;

    /// Registry metadata for `name` at `version`, or `None` if that version
    /// has not been published.
    ///
    /// An error means the registry has no record of the package at all or
    /// could not be queried.
    fn view(&self, name: &str, version: &Version) -> Result<Option<serde_json::Value>>;

    fn publish(&self, path: &Path) -> Result<()>;
}

/// Registry accessed through the npm command line client.
#[derive(Debug, Clone)]
pub struct NpmRegistry {
    client: String,
    registry: Option<String>,
}

impl NpmRegistry {
    pub fn new(client: impl Into<String>, registry: Option<String>) -> Self {
        Self {
            client: client.into(),
            registry,
        }
    }

    pub fn from_config(config: &WorkspaceConfig) -> Self {
        Self::new(config.client(), config.workspace.registry.clone())
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.client);
        if let Some(registry) = &self.registry {
            command.arg("--registry").arg(registry);
        }
        command
    }
}

impl Default for NpmRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_CLIENT, None)
    }
}

impl PackageRegistry for NpmRegistry {
    fn client(&self) -> &str {
        &self.client
    }

    fn view(&self, name: &str, version: &Version) -> Result<Option<serde_json::Value>> {
        let spec = format!("{}@{}", name, version);
        debug!(package = %spec, "querying registry");

        let output = self
            .command()
            .args(["view", spec.as_str(), "--json"])
            .output()
            .map_err(|e| Error::Registry {
                package: name.to_string(),
                message: format!("Failed to run {}: {}", self.client, e),
            })?;

        if !output.status.success() {
            return Err(Error::Registry {
                package: name.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if stdout.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&stdout)
            .map(Some)
            .map_err(|e| Error::Registry {
                package: name.to_string(),
                message: format!("Invalid registry response: {}", e),
            })
    }

    fn publish(&self, path: &Path) -> Result<()> {
        let output = self
            .command()
            .arg("publish")
            .arg(path)
            .output()
            .map_err(|e| Error::Registry {
                package: path.display().to_string(),
                message: format!("Failed to run {}: {}", self.client, e),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(Error::Registry {
                package: path.display().to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}
