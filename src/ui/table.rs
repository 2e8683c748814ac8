use crate::record::RecordSummary;
use tabled::{Table, Tabled, settings::Style};

#[derive(Tabled)]
struct RecordRow<'a> {
    #[tabled(rename = "ID")]
    id: &'a str,
    #[tabled(rename = "Content")]
    content: &'a str,
}

/// Render `(id, content)` pairs as a rounded table; empty input gives `""`.
pub fn record_table(records: &[RecordSummary]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let rows = records.iter().map(|r| RecordRow {
        id: &r.id,
        content: &r.content,
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Default)]
pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}
