//! Box-drawn tables for `--list` and `--verify-only` output.

/// A simple table for formatted output.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    widths: Vec<usize>,
}

fn width(cell: &str) -> usize {
    cell.chars().count()
}

impl Table {
    /// Create a new table with the given headers.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let widths = headers.iter().map(|h| width(h)).collect();
        Self {
            headers,
            rows: Vec::new(),
            widths,
        }
    }

    /// Add a row. Cells beyond the header count are dropped.
    pub fn add_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = row.into_iter().map(Into::into).collect();
        row.truncate(self.headers.len());
        for (i, cell) in row.iter().enumerate() {
            self.widths[i] = self.widths[i].max(width(cell));
        }
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table as lines.
    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.rows.len() + 4);
        lines.push(self.border('┌', '┬', '┐'));
        lines.push(self.row(&self.headers));
        lines.push(self.border('├', '┼', '┤'));
        lines.extend(self.rows.iter().map(|r| self.row(r)));
        lines.push(self.border('└', '┴', '┘'));
        lines
    }

    fn border(&self, left: char, mid: char, right: char) -> String {
        let inner: Vec<String> = self.widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, inner.join(&mid.to_string()), right)
    }

    fn row(&self, row: &[String]) -> String {
        let mut line = String::from("│");
        for (i, w) in self.widths.iter().enumerate() {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            let pad = w - width(cell);
            line.push_str(&format!(" {}{} │", cell, " ".repeat(pad)));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_renders_headers() {
        let table = Table::new(["Name", "Status"]);
        assert!(table.is_empty());
        let lines = table.render();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "│ Name │ Status │");
    }

    #[test]
    fn columns_grow_to_fit() {
        let mut table = Table::new(["Name", "Status"]);
        table.add_row(["postgresql", "missing"]);
        table.add_row(["git", "installed"]);

        let lines = table.render();
        assert_eq!(table.len(), 2);
        assert_eq!(lines[0], "┌────────────┬───────────┐");
        assert_eq!(lines[3], "│ postgresql │ missing   │");
        assert_eq!(lines[4], "│ git        │ installed │");
    }

    #[test]
    fn short_rows_are_padded() {
        let mut table = Table::new(["A", "B"]);
        table.add_row(["x"]);
        assert_eq!(table.render()[3], "│ x │   │");
    }
}
