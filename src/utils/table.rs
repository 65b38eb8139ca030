//! Table rendering utilities for CLI outputs.

use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub width: usize,
}

impl Column {
    pub fn new(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        for col in &self.columns {
            push_padded(&mut out, &col.header, col.width);
        }
        out.push('\n');

        for col in &self.columns {
            push_padded(&mut out, &"-".repeat(col.header.len()), col.width);
        }
        out.push('\n');

        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                push_padded(&mut out, &row[i], col.width);
            }
            out.push('\n');
        }

        out
    }
}

// Pad by display width so emoji/wide glyphs do not misalign columns.
fn push_padded(out: &mut String, cell: &str, width: usize) {
    out.push_str(cell);
    let w = UnicodeWidthStr::width(cell);
    for _ in w..width {
        out.push(' ');
    }
    out.push(' ');
}
