//! General output formatting utilities.

use owo_colors::OwoColorize;

/// Prints a summary box with statistics.
pub fn print_summary_box(title: &str, items: &[(&str, &str)]) {
    let title_colored = title.cyan().bold().to_string();
    let separator = "─".repeat(50);
    println!("┌─ {} {}", title_colored, separator.bright_black());
    for (key, value) in items {
        println!("│ {} {}", key.bright_black().bold(), value.bold().white());
    }
    println!("└{}", "─".repeat(60).bright_black());
}

/// Prints a key-value pair with consistent formatting.
pub fn print_key_value(key: &str, value: &str) {
    println!("  {} {}", key.bright_black().bold(), value.bold().white());
}

/// Prints a numbered list of packages, one per line.
pub fn print_package_list(packages: &[(String, String)]) {
    if packages.is_empty() {
        println!("  {} {}", "→".cyan(), "(none)".bright_black());
        return;
    }

    for (idx, (name, version)) in packages.iter().enumerate() {
        println!(
            "  {} {} {}",
            format!("{:2}", idx + 1).bright_black(),
            name.bold().white(),
            version.bright_black()
        );
    }
}
