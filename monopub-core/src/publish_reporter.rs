//! Trait for reporting publish operations.

use semver::Version;

/// Trait for reporting publish progress.
///
/// This trait allows the core library to report publish operations without
/// directly writing to stdout/stderr.
pub trait PublishReporter: Send + Sync {
    /// Reports a package that blocks the run because its version already exists.
    fn report_already_published(&self, package: &str, version: &Version);

    /// Reports a package that was handed to the registry.
    fn report_published(&self, package: &str, version: &Version);
}
