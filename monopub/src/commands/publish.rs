//! Publish command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use monopub_core::{NpmRegistry, PackageRegistry, PublishPlan, PublishStatus};

use crate::formatting::{
    create_spinner, print_publish_table, print_section_header, print_success,
    print_summary_box, print_warning, SectionStyle,
};

use super::open_workspace;
use super::publish_reporter::CliPublishReporter;

pub struct PublishOptions {
    pub dry: bool,
    pub write: Option<PathBuf>,
    /// `None` falls back to `[publish]` in the config, then the default.
    pub check_existing: Option<bool>,
    pub recursive: Option<bool>,
}

pub fn cmd_publish(path: PathBuf, options: PublishOptions) -> Result<()> {
    let workspace = open_workspace(&path)?;
    let config = workspace.config();
    let recursive = options
        .recursive
        .or(config.publish.recursive)
        .unwrap_or(false);
    let check_existing = options
        .check_existing
        .or(config.publish.check_existing)
        .unwrap_or(true);

    let mut plan = PublishPlan::build(&workspace, recursive)?;
    let registry = NpmRegistry::from_config(config);

    if plan.is_empty() {
        print_warning("Nothing to publish");
        println!();
        return Ok(());
    }

    if check_existing {
        let spinner = create_spinner("Checking registry for existing versions");
        plan.check_existing(&registry);
        spinner.finish_and_clear();
    }

    let title = if options.dry {
        "Publish Plan (Dry Run)"
    } else {
        "Publish Plan"
    };
    print_section_header(title, SectionStyle::Primary);
    print_publish_table(&plan);
    println!();

    let blocked = plan
        .entries()
        .filter(|(_, status)| *status == PublishStatus::AlreadyPublished)
        .count();
    print_summary_box(
        "Summary",
        &[
            ("Packages", &plan.len().to_string()),
            ("Blocked", &blocked.to_string()),
            ("Recursive", if recursive { "yes" } else { "no" }),
        ],
    );
    println!();

    if options.dry {
        return Ok(());
    }

    if let Some(script) = options.write {
        let script = if script.is_absolute() {
            script
        } else {
            std::env::current_dir()?.join(script)
        };
        plan.write_script(&script, registry.client())
            .with_context(|| format!("Failed to write {}", script.display()))?;
        print_success(&format!("Wrote publish script to {}", script.display()));
        println!();
        return Ok(());
    }

    if blocked > 0 {
        print_section_header("Publish Aborted", SectionStyle::Warning);
    }
    plan.publish(&registry, &CliPublishReporter)?;
    println!();

    Ok(())
}
