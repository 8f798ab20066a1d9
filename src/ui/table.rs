//! Box-drawn tables for list output.

use console::{measure_text_width, truncate_str};

/// Cells wider than this are truncated with an ellipsis.
const MAX_CELL_WIDTH: usize = 48;

/// A simple table for formatted output.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Vec<usize>,
}

impl Table {
    /// Create a new table with the given headers.
    pub fn new(headers: Vec<&str>) -> Self {
        let headers: Vec<String> = headers.iter().map(|s| s.to_uppercase()).collect();
        let column_widths = headers.iter().map(|h| measure_text_width(h)).collect();

        Self {
            headers,
            rows: Vec::new(),
            column_widths,
        }
    }

    /// Add a row. Missing cells render blank, extra cells are dropped.
    pub fn add_row<S: AsRef<str>>(&mut self, row: &[S]) {
        let row: Vec<String> = row
            .iter()
            .take(self.headers.len())
            .map(|cell| clip(cell.as_ref()))
            .collect();

        for (width, cell) in self.column_widths.iter_mut().zip(&row) {
            *width = (*width).max(measure_text_width(cell));
        }

        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table as a string.
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 4);
        lines.push(self.render_border('┌', '┬', '┐'));
        lines.push(self.render_row(&self.headers));
        lines.push(self.render_border('├', '┼', '┤'));
        lines.extend(self.rows.iter().map(|row| self.render_row(row)));
        lines.push(self.render_border('└', '┴', '┘'));
        lines.join("\n")
    }

    fn render_border(&self, left: char, mid: char, right: char) -> String {
        let segments: Vec<String> = self
            .column_widths
            .iter()
            .map(|width| "─".repeat(width + 2))
            .collect();
        format!("{left}{}{right}", segments.join(&mid.to_string()))
    }

    fn render_row(&self, row: &[String]) -> String {
        let mut s = String::from("│");
        for (i, width) in self.column_widths.iter().enumerate() {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            let pad = width.saturating_sub(measure_text_width(cell));
            s.push(' ');
            s.push_str(cell);
            s.push_str(&" ".repeat(pad));
            s.push_str(" │");
        }
        s
    }
}

fn clip(cell: &str) -> String {
    let single_line = cell.replace(['\n', '\r'], " ");
    truncate_str(&single_line, MAX_CELL_WIDTH, "…").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_still_renders_headers() {
        let table = Table::new(vec!["id", "name"]);
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);

        let output = table.render();
        assert!(output.contains("ID"));
        assert!(output.contains("NAME"));
    }

    #[test]
    fn rows_render_in_order() {
        let mut table = Table::new(vec!["id", "title"]);
        table.add_row(&["1", "Onboarding interviews"]);
        table.add_row(&["2", "Pricing research"]);

        let output = table.render();
        let first = output.find("Onboarding").unwrap();
        let second = output.find("Pricing").unwrap();
        assert!(first < second);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn layout_has_borders_and_one_line_per_row() {
        let mut table = Table::new(vec!["id", "status", "title"]);
        table.add_row(&["1", "todo", "Write copy"]);
        table.add_row(&["2", "done", "Ship it"]);

        let output = table.render();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with('┌'));
        assert!(lines[2].contains('┼'));
        assert!(lines[5].ends_with('┘'));
    }

    #[test]
    fn rows_share_a_width() {
        let mut table = Table::new(vec!["name"]);
        table.add_row(&["é"]);
        table.add_row(&["a much longer value"]);

        let output = table.render();
        let widths: Vec<_> = output.lines().map(measure_text_width).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn missing_cells_render_blank() {
        let mut table = Table::new(vec!["a", "b", "c"]);
        table.add_row(&["only"]);
        assert!(table.render().contains("only"));
    }

    #[test]
    fn long_and_multiline_cells_are_clipped() {
        let mut table = Table::new(vec!["body"]);
        table.add_row(&[format!("first line\n{}", "x".repeat(100))]);

        let output = table.render();
        assert!(output.contains("first line x"));
        assert!(output.contains('…'));
        assert_eq!(output.lines().count(), 5);
    }
}
