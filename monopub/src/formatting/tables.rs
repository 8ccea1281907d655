//! Table formatting utilities using comfy-table.

use comfy_table::{Attribute, Cell, CellAlignment, Color, Table};
use monopub_core::{PublishPlan, PublishStatus};

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(*h).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        )
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(comfy_table::ContentArrangement::Dynamic);
    table
}

/// Prints packages as name, version and location rows.
///
/// Rows carry a fourth column when a content hash is supplied.
pub fn print_package_table(rows: &[(String, String, String, Option<String>)]) {
    let with_hash = rows.iter().any(|(_, _, _, hash)| hash.is_some());
    let mut table = if with_hash {
        new_table(&["Package", "Version", "Path", "Hash"])
    } else {
        new_table(&["Package", "Version", "Path"])
    };

    for (name, version, path, hash) in rows {
        let mut cells = vec![
            Cell::new(name).fg(Color::White),
            Cell::new(version),
            Cell::new(path).fg(Color::DarkGrey),
        ];
        if let Some(hash) = hash {
            cells.push(Cell::new(&hash[..hash.len().min(12)]).fg(Color::DarkGrey));
        }
        table.add_row(cells);
    }

    println!("{}", table);
}

/// Prints a publish plan, marking blocked packages in red.
pub fn print_publish_table(plan: &PublishPlan) {
    let mut table = new_table(&["", "Package", "Version", "Details"]);

    for (package, status) in plan.entries() {
        let color = match status {
            PublishStatus::AlreadyPublished => Color::Red,
            PublishStatus::Unknown => Color::Yellow,
            PublishStatus::Unpublished | PublishStatus::NeverPublished => Color::Green,
        };
        let marker = match status {
            PublishStatus::AlreadyPublished => "E",
            PublishStatus::Unknown => "W",
            _ => "",
        };
        table.add_row(vec![
            Cell::new(marker)
                .fg(color)
                .set_alignment(CellAlignment::Center),
            Cell::new(&package.name).fg(Color::White),
            Cell::new(package.version.to_string()),
            Cell::new(status.details()).fg(color),
        ]);
    }

    println!("{}", table);
}
