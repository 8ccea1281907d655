//! Core library for dependency-ordered monorepo publishing.

pub mod closure_cache;
pub mod collection;
pub mod config;
pub mod error;
pub mod graph;
pub mod package;
pub mod publish;
pub mod publish_reporter;
pub mod registry;
pub mod workspace;

pub use closure_cache::ClosureCache;
pub use collection::{Collection, Key, Named};
pub use config::{LocalDependencies, Manifest, WorkspaceConfig};
pub use error::{Error, Result};
pub use graph::{resolve, resolve_all, resolve_inclusive, Children, Node, VisitStatus};
pub use package::Package;
pub use publish::{PublishPlan, PublishStatus};
pub use publish_reporter::PublishReporter;
pub use registry::{NpmRegistry, PackageRegistry};
pub use workspace::Workspace;
