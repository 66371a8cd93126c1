//! Table data collected from the results directory

use serde::{Deserialize, Serialize};

/// A CSV table collected from the results directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    /// Table name (the CSV file stem)
    pub name: String,
    /// Raw CSV content
    pub csv: String,
}

impl TableData {
    /// Create a table payload
    pub fn new(name: impl Into<String>, csv: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            csv: csv.into(),
        }
    }

    /// Human-readable caption derived from the file stem
    ///
    /// Underscores become spaces and the first letter is capitalized:
    /// `model_rmse_scores` -> `Model rmse scores`.
    pub fn caption(&self) -> String {
        let spaced = self.name.replace('_', " ");
        let mut chars = spaced.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}
