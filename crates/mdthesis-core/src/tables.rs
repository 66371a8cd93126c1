//! CSV table collection and markdown conversion
//!
//! Result tables live as `*.csv` next to the analysis plots. Conversion to
//! markdown pipe tables is deliberately naive (comma split, no quoting
//! grammar); ragged rows are padded to the header width.

use std::path::{Path, PathBuf};

use glob::glob;
use log::warn;

use mdthesis_model::TableData;

use crate::error::Result;

/// Collect every `*.csv` under the results directory, sorted by name
///
/// A missing results directory yields an empty collection.
pub fn collect_tables(results_dir: &Path) -> Result<Vec<TableData>> {
    let pattern = results_dir.join("*.csv");
    let mut paths: Vec<PathBuf> = glob(&pattern.to_string_lossy())?
        .filter_map(|entry| entry.ok())
        .collect();
    paths.sort();

    let mut tables = Vec::new();
    for path in paths {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        match std::fs::read_to_string(&path) {
            Ok(csv) => tables.push(TableData::new(name, csv.trim().to_string())),
            Err(e) => warn!("failed to read {}: {}", path.display(), e),
        }
    }
    Ok(tables)
}

/// Convert CSV content to a markdown pipe table
///
/// First row becomes the header. Short rows are padded with empty cells;
/// pipes inside cells are escaped. Empty input yields an empty string.
pub fn csv_to_markdown(csv: &str) -> String {
    let rows: Vec<Vec<String>> = csv
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            line.split(',')
                .map(|cell| cell.trim().replace('|', "\\|"))
                .collect()
        })
        .collect();

    let Some(header) = rows.first() else {
        return String::new();
    };
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format_row(header, width));
    out.push_str(&format_row(&vec!["---".to_string(); width], width));
    for row in &rows[1..] {
        out.push_str(&format_row(row, width));
    }
    out
}

/// Emit one padded pipe row
fn format_row(cells: &[String], width: usize) -> String {
    let mut row = String::from("|");
    for i in 0..width {
        row.push(' ');
        row.push_str(cells.get(i).map(String::as_str).unwrap_or(""));
        row.push_str(" |");
    }
    row.push('\n');
    row
}

/// Render collected tables as a final appendix chapter
pub fn tables_appendix(tables: &[TableData], heading: &str) -> String {
    let mut out = format!("# {}\n\n", heading);
    for table in tables {
        out.push_str(&format!("## {}\n\n", table.caption()));
        out.push_str(&csv_to_markdown(&table.csv));
        out.push('\n');
    }
    out.trim_end().to_string()
}
