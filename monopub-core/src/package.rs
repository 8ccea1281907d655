//! Package data model.

use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use semver::Version;
use smallvec::SmallVec;
use walkdir::WalkDir;

use crate::collection::{Collection, Named};
use crate::config::{Manifest, MANIFEST_FILE};
use crate::error::{Error, Result};
use crate::graph::{Children, Node};

/// Represents a package in the monorepo.
///
/// Declared local dependencies are kept by name until the workspace links
/// them to the packages they refer to.
#[derive(Debug)]
pub struct Package {
    pub name: String,
    pub version: Version,
    /// Directory containing the manifest.
    pub path: PathBuf,
    /// Base directory, `path` unless the manifest overrides it.
    pub base: PathBuf,
    pub private: bool,
    pub deps: SmallVec<[String; 4]>,
    dependencies: OnceCell<Collection<Package>>,
    hash: OnceCell<String>,
}

impl Package {
    pub fn new(name: String, version: Version, path: PathBuf, deps: Vec<String>) -> Self {
        Self {
            name,
            version,
            base: path.clone(),
            path,
            private: false,
            deps: SmallVec::from_vec(deps),
            dependencies: OnceCell::new(),
            hash: OnceCell::new(),
        }
    }

    /// Loads a package from its manifest file or from the directory holding it.
    ///
    /// # Errors
    ///
    /// Fails if the manifest cannot be read or parsed, has no name, or has a
    /// missing or malformed version.
    pub fn load(manifest_or_dir: &Path) -> Result<Self> {
        let manifest_path = if manifest_or_dir.is_file() {
            manifest_or_dir.to_path_buf()
        } else {
            manifest_or_dir.join(MANIFEST_FILE)
        };
        let manifest = Manifest::load(&manifest_path)?;
        let path = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self::from_manifest(manifest, path, &manifest_path)
    }

    pub fn from_manifest(manifest: Manifest, path: PathBuf, manifest_path: &Path) -> Result<Self> {
        let name = manifest
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| Error::InvalidPackageName(manifest_path.to_path_buf()))?;

        let raw_version = manifest
            .version
            .ok_or_else(|| Error::MissingVersion(name.clone()))?;
        let version = Version::parse(&raw_version).map_err(|error| Error::InvalidVersion {
            package: name.clone(),
            version: raw_version.clone(),
            error,
        })?;

        let base = match manifest.monopub.base.as_deref() {
            Some(base) => path.join(base),
            None => path.clone(),
        };
        let deps = manifest.monopub.dependencies.names();

        Ok(Self {
            name,
            version,
            base,
            path,
            private: manifest.private,
            deps: SmallVec::from_vec(deps),
            dependencies: OnceCell::new(),
            hash: OnceCell::new(),
        })
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.path.join(MANIFEST_FILE)
    }

    /// Attaches the resolved local dependencies.
    ///
    /// Returns `false` if the package was already linked; links are fixed
    /// for the lifetime of the package.
    pub fn link(&self, dependencies: Collection<Package>) -> bool {
        self.dependencies.set(dependencies).is_ok()
    }

    #[inline]
    pub fn is_linked(&self) -> bool {
        self.dependencies.get().is_some()
    }

    /// Direct local dependencies, once linked.
    #[inline]
    pub fn local_dependencies(&self) -> Option<&Collection<Package>> {
        self.dependencies.get()
    }

    /// Content hash of every file under the package directory.
    ///
    /// `node_modules` is skipped. Computed once and cached on the package.
    pub fn hash(&self) -> Result<&str> {
        self.hash
            .get_or_try_init(|| hash_directory(&self.path))
            .map(String::as_str)
    }
}

impl Named for Package {
    #[inline]
    fn name(&self) -> &str {
        &self.name
    }
}

impl Node for Package {
    fn children(&self) -> Children<'_, Self> {
        match self.dependencies.get() {
            Some(dependencies) => Children::Collection(dependencies),
            None => Children::Empty,
        }
    }
}

fn hash_directory(root: &Path) -> Result<String> {
    let mut hasher = blake3::Hasher::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.file_name() != "node_modules");

    for entry in walker {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        hasher.update(relative.to_string_lossy().as_bytes());
        hasher.update(&std::fs::read(entry.path())?);
    }

    Ok(hasher.finalize().to_hex().to_string())
}
