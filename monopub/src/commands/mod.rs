//! Command implementations for the CLI.

mod discovery;
mod publish;
mod publish_reporter;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use monopub_core::{Package, Workspace};

pub use discovery::{cmd_deps, cmd_list, cmd_order};
pub use publish::{cmd_publish, PublishOptions};

fn open_workspace(path: &Path) -> Result<Workspace> {
    Workspace::open(path)
        .with_context(|| format!("Failed to open workspace at {}", path.display()))
}

fn package_json(package: &Arc<Package>) -> serde_json::Value {
    serde_json::json!({
        "name": package.name,
        "version": package.version.to_string(),
        "path": package.path,
        "private": package.private,
    })
}
