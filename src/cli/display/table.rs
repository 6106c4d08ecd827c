//! Table builder wrapper around comfy-table for consistent list display.

use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};
use console::style;

/// Create a standard list table with the given headers.
///
/// Uses the NOTHING preset (no borders) for a clean CLI aesthetic.
pub fn list_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h.to_uppercase()).set_alignment(CellAlignment::Left)),
        );
    table
}

/// Render the table to string with a count header.
pub fn render_list(singular: &str, plural: &str, table: &Table, total: usize) -> String {
    if total == 0 {
        return format!("No {plural} found.");
    }
    let count_line = format!(
        "{} {}:",
        style(total).bold(),
        if total == 1 { singular } else { plural }
    );
    format!("{count_line}\n{table}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_list() {
        let table = list_table(&["key", "value"]);
        assert_eq!(render_list("entry", "entries", &table, 0), "No entries found.");
    }

    #[test]
    fn test_render_list_includes_rows() {
        let mut table = list_table(&["key", "value"]);
        table.add_row(vec!["site_url", "https://filesender.example.org"]);
        let rendered = render_list("partner", "partners", &table, 1);
        assert!(rendered.contains("KEY"));
        assert!(rendered.contains("https://filesender.example.org"));
        assert!(rendered.contains("partner:"));
    }
}
