//! Markdown table rendering for exported rows.

use std::fmt;

use crate::catalog::ExportRows;

/// Escapes characters that would break a markdown table cell.
fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

impl fmt::Display for ExportRows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}", self.table)?;
        writeln!(f)?;

        if self.rows.is_empty() {
            return writeln!(f, "No rows.");
        }

        let headers = self.headers();
        writeln!(f, "| {} |", headers.join(" | "))?;
        writeln!(f, "|{}|", vec!["---"; headers.len()].join("|"))?;
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(String::as_str).map(cell).collect();
            writeln!(f, "| {} |", cells.join(" | "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::{ExportRows, ExportTable};

    #[test]
    fn test_markdown_table() {
        let rows = ExportRows {
            table: ExportTable::Tasks,
            rows: vec![vec![
                "PL1".to_string(),
                "T1".to_string(),
                "Check | tighten".to_string(),
                "0:30:00".to_string(),
            ]],
        };
        let output = rows.to_string();
        assert!(output.starts_with("## tasks\n"));
        assert!(output.contains("| MaintenancePlanKey | TaskKey | Description | Duration |"));
        assert!(output.contains("|---|---|---|---|"));
        assert!(output.contains("| PL1 | T1 | Check \\| tighten | 0:30:00 |"));
    }

    #[test]
    fn test_empty_table() {
        let rows = ExportRows {
            table: ExportTable::Preventives,
            rows: Vec::new(),
        };
        assert!(rows.to_string().contains("No rows."));
    }
}
