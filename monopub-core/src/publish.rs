//! Publish planning and execution.

use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::collection::Collection;
use crate::error::{Error, Result};
use crate::graph::resolve_inclusive;
use crate::package::Package;
use crate::publish_reporter::PublishReporter;
use crate::registry::PackageRegistry;
use crate::workspace::Workspace;

/// Registry state of a package version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStatus {
    /// The registry was not consulted.
    Unknown,
    /// The package exists but this version does not.
    Unpublished,
    /// This exact version is already in the registry.
    AlreadyPublished,
    /// The registry has no record of the package.
    NeverPublished,
}

impl PublishStatus {
    pub fn details(&self) -> &'static str {
        match self {
            PublishStatus::Unknown => "Unknown published status",
            PublishStatus::Unpublished => "OK",
            PublishStatus::AlreadyPublished => {
                "This version is already published to the registry"
            }
            PublishStatus::NeverPublished => "OK (first publish)",
        }
    }

    #[inline]
    pub fn is_blocking(&self) -> bool {
        matches!(self, PublishStatus::AlreadyPublished)
    }
}

/// Packages to publish, in dependency order, with their registry status.
#[derive(Debug, Clone)]
pub struct PublishPlan {
    packages: Collection<Package>,
    statuses: Vec<PublishStatus>,
}

impl PublishPlan {
    /// Plans a publish of every package in the workspace's working set.
    ///
    /// With `recursive`, the local dependencies of those packages are
    /// published too. Private packages are never part of a plan.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::CyclicDependency`] from dependency resolution.
    pub fn build(workspace: &Workspace, recursive: bool) -> Result<Self> {
        let roots = workspace.packages();
        let ordered = resolve_inclusive(&roots)?;

        let packages: Collection<Package> = ordered
            .into_iter()
            .filter(|package| recursive || roots.contains(package))
            .filter(|package| {
                if package.private {
                    warn!(package = %package.name, "skipping private package");
                }
                !package.private
            })
            .collect();

        debug!(count = packages.len(), recursive, "planned publish");
        Ok(Self::from_packages(packages))
    }

    pub fn from_packages(packages: Collection<Package>) -> Self {
        let statuses = vec![PublishStatus::Unknown; packages.len()];
        Self { packages, statuses }
    }

    #[inline]
    pub fn packages(&self) -> &Collection<Package> {
        &self.packages
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn status(&self, name: &str) -> Option<PublishStatus> {
        self.packages
            .index_of_name(name)
            .map(|index| self.statuses[index])
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Arc<Package>, PublishStatus)> + '_ {
        self.packages.iter().zip(self.statuses.iter().copied())
    }

    /// Looks every planned version up in the registry, in parallel.
    ///
    /// A failed lookup is recorded as [`PublishStatus::NeverPublished`]
    /// rather than returned.
    pub fn check_existing(&mut self, registry: &dyn PackageRegistry) {
        let packages = self.packages.to_vec();
        self.statuses = packages
            .par_iter()
            .map(|package| match registry.view(&package.name, &package.version) {
                Ok(Some(_)) => PublishStatus::AlreadyPublished,
                Ok(None) => PublishStatus::Unpublished,
                Err(e) => {
                    debug!(package = %package.name, error = %e, "registry lookup failed");
                    PublishStatus::NeverPublished
                }
            })
            .collect();
    }

    /// Publishes every package in order.
    ///
    /// Nothing is published if any package is already published at its
    /// planned version; every such package is reported first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyPublished`] for the first blocking package, or
    /// the first registry failure, which stops the run.
    pub fn publish(
        &self,
        registry: &dyn PackageRegistry,
        reporter: &dyn PublishReporter,
    ) -> Result<()> {
        let mut blocked = None;
        for (package, status) in self.entries() {
            if status.is_blocking() {
                reporter.report_already_published(&package.name, &package.version);
                blocked.get_or_insert_with(|| Error::AlreadyPublished {
                    name: package.name.clone(),
                    version: package.version.to_string(),
                });
            }
        }
        if let Some(error) = blocked {
            return Err(error);
        }

        for package in &self.packages {
            info!(package = %package.name, version = %package.version, "publishing");
            registry.publish(&package.path)?;
            reporter.report_published(&package.name, &package.version);
        }

        Ok(())
    }

    /// Publish commands for every package, one per line.
    pub fn script(&self, client: &str) -> String {
        self.packages
            .iter()
            .map(|package| format!("{} publish {}", client, package.path.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn write_script(&self, path: &Path, client: &str) -> Result<()> {
        std::fs::write(path, self.script(client))?;
        info!(path = %path.display(), "wrote publish script");
        Ok(())
    }
}
