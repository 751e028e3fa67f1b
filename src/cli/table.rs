//! Table formatting utilities for CLI list commands
//!
//! A unified table output system that eliminates duplicated formatting
//! code across entity list commands. TSV output is fixed-width and styled
//! for terminals; CSV stays single-line for pipability; Md renders through
//! tabled's markdown style.

use console::style;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{escape_csv, truncate_str};
use crate::cli::OutputFormat;

/// Definition of one output column
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub key: &'static str,
    pub header: &'static str,
    pub width: usize,
}

impl ColumnDef {
    pub const fn new(key: &'static str, header: &'static str, width: usize) -> Self {
        Self { key, header, width }
    }
}

/// One row of cell values, keyed by column
#[derive(Debug, Default)]
pub struct TableRow {
    cells: Vec<(&'static str, String)>,
}

impl TableRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.cells.push((key, value.into()));
        self
    }

    fn get(&self, key: &str) -> &str {
        self.cells
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }
}

/// Formatter for a fixed set of columns
pub struct TableFormatter<'a> {
    columns: &'a [ColumnDef],
    name_plural: &'a str,
}

impl<'a> TableFormatter<'a> {
    pub fn new(columns: &'a [ColumnDef], name_plural: &'a str) -> Self {
        Self {
            columns,
            name_plural,
        }
    }

    /// Print rows in the requested format. `selected` narrows and orders
    /// the columns; an empty selection uses every defined column.
    pub fn output(&self, rows: Vec<TableRow>, format: OutputFormat, selected: &[&str]) {
        let columns: Vec<&ColumnDef> = if selected.is_empty() {
            self.columns.iter().collect()
        } else {
            selected
                .iter()
                .filter_map(|key| self.columns.iter().find(|c| c.key == *key))
                .collect()
        };

        match format {
            OutputFormat::Csv => {
                println!(
                    "{}",
                    columns
                        .iter()
                        .map(|c| c.key.to_string())
                        .collect::<Vec<_>>()
                        .join(",")
                );
                for row in &rows {
                    let line = columns
                        .iter()
                        .map(|c| escape_csv(row.get(c.key)))
                        .collect::<Vec<_>>()
                        .join(",");
                    println!("{}", line);
                }
            }
            OutputFormat::Md => {
                let mut builder = Builder::default();
                builder.push_record(columns.iter().map(|c| c.header.to_string()));
                for row in &rows {
                    builder.push_record(columns.iter().map(|c| row.get(c.key).to_string()));
                }
                println!("{}", builder.build().with(Style::markdown()));
            }
            _ => {
                // Header
                let header = columns
                    .iter()
                    .map(|c| format!("{:<width$}", c.header, width = c.width))
                    .collect::<Vec<_>>()
                    .join(" ");
                println!("{}", style(header).bold());

                let total_width: usize =
                    columns.iter().map(|c| c.width + 1).sum::<usize>().max(1) - 1;
                println!("{}", "-".repeat(total_width));

                for row in &rows {
                    let line = columns
                        .iter()
                        .map(|c| {
                            format!(
                                "{:<width$}",
                                truncate_str(row.get(c.key), c.width),
                                width = c.width
                            )
                        })
                        .collect::<Vec<_>>()
                        .join(" ");
                    println!("{}", line);
                }

                println!();
                println!(
                    "{}",
                    style(format!("{} {}", rows.len(), self.name_plural)).dim()
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_get_missing_key_is_empty() {
        let row = TableRow::new().set("name", "Medusa");
        assert_eq!(row.get("name"), "Medusa");
        assert_eq!(row.get("slug"), "");
    }

    #[test]
    fn test_row_set_chains() {
        let row = TableRow::new().set("a", "1").set("b", "2");
        assert_eq!(row.get("a"), "1");
        assert_eq!(row.get("b"), "2");
    }
}
