/// Plain-text table renderer for terminal output
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

impl Table {
    pub fn new(headers: Vec<&str>) -> Self {
        let col_widths = headers.iter().map(|h| h.len()).collect();
        Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            col_widths,
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        for (i, col) in row.iter().enumerate() {
            if i < self.col_widths.len() {
                self.col_widths[i] = self.col_widths[i].max(col.len());
            }
        }
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut output = String::new();
        output.push_str(&self.render_row(&self.headers));
        output.push('\n');
        output.push_str(&self.render_separator());
        output.push('\n');
        for row in &self.rows {
            output.push_str(&self.render_row(row));
            output.push('\n');
        }
        output
    }

    fn render_row(&self, row: &[String]) -> String {
        let mut line = String::new();
        for (i, col) in row.iter().enumerate() {
            if i < self.col_widths.len() {
                let width = self.col_widths[i];
                line.push_str(&format!("{:<width$}", col, width = width));
                if i < row.len() - 1 {
                    line.push_str(" | ");
                }
            }
        }
        // Padding on the last column is noise
        line.trim_end().to_string()
    }

    fn render_separator(&self) -> String {
        let mut line = String::new();
        for (i, &width) in self.col_widths.iter().enumerate() {
            line.push_str(&"-".repeat(width));
            if i < self.col_widths.len() - 1 {
                line.push_str("-+-");
            }
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_table() {
        let mut table = Table::new(vec!["Code", "Service", "Tariff"]);
        table.add_row(vec!["PLN".to_string(), "Listrik".to_string(), "10.000".to_string()]);
        table.add_row(vec!["PDAM".to_string(), "PDAM Berlangganan".to_string(), "40.000".to_string()]);

        let rendered = table.render();
        assert!(rendered.contains("Code"));
        assert!(rendered.contains("Listrik"));
        assert!(rendered.contains("PDAM Berlangganan"));
    }

    #[test]
    fn test_columns_align_to_widest_cell() {
        let mut table = Table::new(vec!["A", "B"]);
        table.add_row(vec!["wide-cell".to_string(), "x".to_string()]);
        let rendered = table.render();
        let header_line = rendered.lines().next().unwrap();
        assert!(header_line.starts_with("A         | B"));
    }
}
