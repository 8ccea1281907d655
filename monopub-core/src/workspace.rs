//! Repository discovery and package linking.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::closure_cache::ClosureCache;
use crate::collection::Collection;
use crate::config::{WorkspaceConfig, MANIFEST_FILE};
use crate::error::{Error, Result};
use crate::package::Package;

/// All packages of one repository, linked to their local dependencies.
///
/// This is the shared lookup table handed to every collaborator that needs
/// to turn a package name into a package.
pub struct Workspace {
    root: PathBuf,
    opened_at: PathBuf,
    config: WorkspaceConfig,
    all_packages: Collection<Package>,
    closures: ClosureCache<Package>,
}

impl Workspace {
    /// Opens the repository containing `path`.
    ///
    /// Every `package.json` below the repository root is loaded, except the
    /// one at the root itself. Packages located under `path` form the
    /// working set returned by [`Workspace::packages`].
    ///
    /// # Errors
    ///
    /// Fails on unreadable or invalid manifests, duplicate package names,
    /// and local dependencies that name no package in the repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let opened_at = std::fs::canonicalize(path.as_ref())?;
        let (root, config) = WorkspaceConfig::discover(&opened_at)?;
        debug!(root = %root.display(), "opening workspace");

        let packages = Self::load_packages(&root, &config)?;
        let mut workspace = Self::from_packages(root, config, packages)?;
        workspace.opened_at = opened_at;
        Ok(workspace)
    }

    /// Builds a workspace from already loaded packages and links them.
    pub fn from_packages(
        root: impl Into<PathBuf>,
        config: WorkspaceConfig,
        packages: Vec<Package>,
    ) -> Result<Self> {
        let root = root.into();
        let mut all_packages: Collection<Package> = Collection::with_capacity(packages.len());

        for package in packages {
            if let Some(existing) = all_packages.get(package.name.as_str()) {
                return Err(Error::DuplicatePackage {
                    name: package.name.clone(),
                    first: existing.path.clone(),
                    second: package.path.clone(),
                });
            }
            all_packages.add(Arc::new(package));
        }

        Self::link(&all_packages)?;

        Ok(Self {
            opened_at: root.clone(),
            root,
            config,
            all_packages,
            closures: ClosureCache::new(),
        })
    }

    fn load_packages(root: &Path, config: &WorkspaceConfig) -> Result<Vec<Package>> {
        let manifests: Vec<PathBuf> = WalkDir::new(root)
            .max_depth(config.max_depth())
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !Self::is_skipped(e, config))
            .filter_map(|e| e.ok())
            .filter(|e| e.depth() > 1 && e.file_name() == MANIFEST_FILE)
            .map(|e| e.path().to_path_buf())
            .collect();

        let mut packages = manifests
            .into_par_iter()
            .map(|manifest| Package::load(&manifest))
            .collect::<Result<Vec<Package>>>()?;

        packages.sort_by(|a, b| a.name.cmp(&b.name));
        debug!(count = packages.len(), "discovered packages");
        Ok(packages)
    }

    fn is_skipped(entry: &DirEntry, config: &WorkspaceConfig) -> bool {
        if !entry.file_type().is_dir() {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        name == "node_modules" || name.starts_with('.') || config.is_ignored(&name)
    }

    fn link(all_packages: &Collection<Package>) -> Result<()> {
        for package in all_packages {
            let mut dependencies = Collection::with_capacity(package.deps.len());
            for dep_name in &package.deps {
                let dependency = all_packages.get(dep_name).ok_or_else(|| {
                    Error::MissingDependency {
                        name: dep_name.clone(),
                        from: package.name.clone(),
                    }
                })?;
                dependencies.add(Arc::clone(dependency));
            }
            package.link(dependencies);
        }
        Ok(())
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    /// Every package in the repository.
    #[inline]
    pub fn all_packages(&self) -> &Collection<Package> {
        &self.all_packages
    }

    /// Packages located under the path the workspace was opened at.
    pub fn packages(&self) -> Collection<Package> {
        self.all_packages
            .iter()
            .filter(|p| p.path.starts_with(&self.opened_at))
            .cloned()
            .collect()
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Arc<Package>> {
        self.all_packages.get(name)
    }

    /// Looks a package up by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PackageNotFound`] listing the known packages.
    pub fn require(&self, name: &str) -> Result<&Arc<Package>> {
        self.get(name).ok_or_else(|| Error::PackageNotFound {
            name: name.to_string(),
            available: self.all_packages.names().collect::<Vec<_>>().join(", "),
        })
    }

    /// Every local dependency of `package`, in dependency order.
    pub fn dependencies_of(&self, package: &Arc<Package>) -> Result<Arc<Collection<Package>>> {
        self.closures.closure(package)
    }

    /// Whether `package` depends on all of the named packages.
    ///
    /// Unknown names count as not depended on.
    pub fn is_dependent(&self, package: &Arc<Package>, names: &[&str]) -> Result<bool> {
        let targets: Option<Vec<&Package>> = names
            .iter()
            .map(|name| self.get(name).map(Arc::as_ref))
            .collect();
        match targets {
            Some(targets) => self.closures.is_dependent(package, &targets),
            None => Ok(false),
        }
    }

    /// Whether `package` depends on at least one of the named packages.
    pub fn is_any_dependent(&self, package: &Arc<Package>, names: &[&str]) -> Result<bool> {
        let targets: Vec<&Package> = names
            .iter()
            .filter_map(|name| self.get(name).map(Arc::as_ref))
            .collect();
        self.closures.is_any_dependent(package, &targets)
    }
}
