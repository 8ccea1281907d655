//! Discovery and inspection commands.

use std::path::PathBuf;

use anyhow::Result;
use monopub_core::graph::resolve_all;
use monopub_core::{Collection, Package};

use crate::formatting::{
    print_key_value, print_package_list, print_package_table, print_section_header,
    print_warning, SectionStyle,
};

use super::{open_workspace, package_json};

fn list_rows(packages: &Collection<Package>) -> Vec<(String, String)> {
    packages
        .iter()
        .map(|p| (p.name.clone(), p.version.to_string()))
        .collect()
}

pub fn cmd_list(path: PathBuf, json: bool, hash: bool) -> Result<()> {
    let workspace = open_workspace(&path)?;
    let packages = workspace.packages();

    if json {
        let mut entries = Vec::with_capacity(packages.len());
        for package in &packages {
            let mut entry = package_json(package);
            if hash {
                entry["hash"] = serde_json::Value::from(package.hash()?);
            }
            entries.push(entry);
        }
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    print_section_header("Packages", SectionStyle::Primary);
    if packages.is_empty() {
        print_warning("No packages found");
        println!();
        return Ok(());
    }

    let mut rows = Vec::with_capacity(packages.len());
    for package in &packages {
        let location = package
            .path
            .strip_prefix(workspace.root())
            .unwrap_or(&package.path)
            .display()
            .to_string();
        let digest = if hash {
            Some(package.hash()?.to_string())
        } else {
            None
        };
        rows.push((
            package.name.clone(),
            package.version.to_string(),
            location,
            digest,
        ));
    }
    print_package_table(&rows);
    println!();

    Ok(())
}

pub fn cmd_order(path: PathBuf, package: String, json: bool) -> Result<()> {
    let workspace = open_workspace(&path)?;
    let root = workspace.require(&package)?;
    let closure = workspace.dependencies_of(root)?;

    if json {
        let order: Vec<_> = closure.iter().map(package_json).collect();
        println!("{}", serde_json::to_string_pretty(&order)?);
        return Ok(());
    }

    print_section_header("Dependency Order", SectionStyle::Primary);
    print_key_value("Package", &format!("{}@{}", root.name, root.version));
    print_key_value("Local dependencies", &closure.len().to_string());
    println!();
    print_package_list(&list_rows(&closure));
    println!();

    Ok(())
}

pub fn cmd_deps(path: PathBuf, packages: Vec<String>, json: bool) -> Result<()> {
    let workspace = open_workspace(&path)?;
    let roots = packages
        .iter()
        .map(|name| workspace.require(name).cloned())
        .collect::<monopub_core::Result<Vec<_>>>()?;
    let union = resolve_all(&roots)?;

    if json {
        let names: Vec<&str> = union.names().collect();
        println!("{}", serde_json::to_string_pretty(&names)?);
        return Ok(());
    }

    print_section_header(
        &format!("Local dependencies of {}", packages.join(", ")),
        SectionStyle::Primary,
    );
    print_package_list(&list_rows(&union));
    println!();

    Ok(())
}
