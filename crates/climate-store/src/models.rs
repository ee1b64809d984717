//! Metadata models describing the dataset.

use serde::{Deserialize, Serialize};

/// A table of the dataset with its columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    /// Table name.
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<ColumnInfo>,
}

/// A single column of a dataset table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Column name.
    pub name: String,
    /// Declared SQL type (may be empty for untyped columns).
    #[serde(rename = "type")]
    pub declared_type: String,
}

impl TableInfo {
    /// Render as `name(col TYPE, ...)` for log output.
    pub fn summary(&self) -> String {
        let columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("{} {}", c.name, c.declared_type).trim_end().to_string())
            .collect();
        format!("{}({})", self.name, columns.join(", "))
    }
}
