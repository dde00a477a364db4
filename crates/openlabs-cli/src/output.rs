//! Table rendering for list output.

use std::io::{self, Write};

/// Minimal column-fitted table: headers, rows, widths sized to content.
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// Print to stdout.
    pub fn print(&self) {
        // Writing a table to stdout only fails on a closed pipe; nothing
        // useful to report then.
        let _ = self.render(&mut io::stdout().lock());
    }

    pub fn render<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let widths = self.column_widths();

        self.write_row(writer, &self.headers, &widths)?;
        let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        writeln!(writer, "{}", "─".repeat(total))?;

        for row in &self.rows {
            self.write_row(writer, row, &widths)?;
        }
        Ok(())
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }
        widths
    }

    fn write_row<W: Write>(&self, writer: &mut W, cells: &[String], widths: &[usize]) -> io::Result<()> {
        let mut line = String::new();
        for (i, &width) in widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            if i + 1 == widths.len() {
                // Last column stays unpadded to avoid trailing spaces.
                line.push_str(cell);
            } else {
                line.push_str(&format!("{cell:<width$}"));
                line.push_str("  ");
            }
        }
        writeln!(writer, "{}", line.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(table: &Table) -> String {
        let mut buf = Vec::new();
        table.render(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn columns_fit_widest_cell() {
        let mut table = Table::new(["ID", "Name"]);
        table.row(["1", "short"]);
        table.row(["23", "a-much-longer-name"]);

        let out = rendered(&table);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "ID  Name");
        assert!(lines[1].starts_with("──"));
        assert_eq!(lines[2], "1   short");
        assert_eq!(lines[3], "23  a-much-longer-name");
    }

    #[test]
    fn header_wider_than_cells() {
        let mut table = Table::new(["Description", "X"]);
        table.row(["abc", "1"]);

        let out = rendered(&table);
        assert!(out.starts_with("Description  X\n"));
        assert!(out.contains("abc          1"));
    }

    #[test]
    fn missing_trailing_cells_render_empty() {
        let mut table = Table::new(["A", "B", "C"]);
        table.row(["1", "2"]);

        let out = rendered(&table);
        assert!(out.lines().nth(2).unwrap().starts_with("1  2"));
    }
}
