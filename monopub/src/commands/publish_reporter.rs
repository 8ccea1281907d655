//! Publish reporter implementation for CLI.

use monopub_core::PublishReporter;
use semver::Version;

use crate::formatting::{print_error, print_success};

/// CLI implementation of PublishReporter.
pub struct CliPublishReporter;

impl PublishReporter for CliPublishReporter {
    fn report_already_published(&self, package: &str, version: &Version) {
        print_error(&format!(
            "{} is already published at version {}",
            package, version
        ));
    }

    fn report_published(&self, package: &str, version: &Version) {
        print_success(&format!("Published {}@{}", package, version));
    }
}
