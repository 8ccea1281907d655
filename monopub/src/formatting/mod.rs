//! CLI formatting utilities.
//!
//! Section headers, status lines and tables share one color scheme so
//! every command reads the same way.

mod headers;
mod output;
mod progress;
mod status;
mod tables;

pub use headers::{print_section_header, SectionStyle};
pub use output::{print_key_value, print_package_list, print_summary_box};
pub use progress::create_spinner;
pub use status::{print_error, print_success, print_warning};
pub use tables::{print_package_table, print_publish_table};
