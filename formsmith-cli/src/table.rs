//! Table helpers

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

/// A table with the CLI's standard preset and dynamic column widths.
pub fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}
