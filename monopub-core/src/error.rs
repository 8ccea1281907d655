//! Error types and result aliases.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error in {}: {error}", .path.display())]
    Json {
        error: serde_json::Error,
        path: PathBuf,
    },

    #[error("TOML parse error in {context}: {error}")]
    Toml {
        error: toml::de::Error,
        context: String,
    },

    #[error("Cyclic dependency detected: {}", .path.join(" -> "))]
    CyclicDependency { path: Vec<String> },

    #[error("Index {index} is out of range {len}")]
    OutOfRange { index: usize, len: usize },

    #[error("Package {name} was not found from package {from}")]
    MissingDependency { name: String, from: String },

    #[error("Package '{0}' requires a version")]
    MissingVersion(String),

    #[error("Invalid version '{version}' for package '{package}': {error}")]
    InvalidVersion {
        package: String,
        version: String,
        error: semver::Error,
    },

    #[error("Invalid package name in {}: name must be a non-empty string", .0.display())]
    InvalidPackageName(PathBuf),

    #[error("Package not found: {name}. Available packages: {available}")]
    PackageNotFound { name: String, available: String },

    #[error("Package {name} is declared twice: {} and {}", .first.display(), .second.display())]
    DuplicatePackage {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Registry error for {package}: {message}")]
    Registry { package: String, message: String },

    #[error("Publish aborted, {name} is already published at version {version}")]
    AlreadyPublished { name: String, version: String },
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Error::Toml {
            error,
            context: "monopub.toml".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
