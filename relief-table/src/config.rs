//! Table configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// Width used for columns that do not declare one.
pub const DEFAULT_COLUMN_WIDTH: f64 = 120.0;

/// Narrowest width a user resize can produce.
pub const MIN_COLUMN_WIDTH: f64 = 80.0;

/// Shared settings for every table rendered by one front end.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// let config = relief_table::TableConfig::from_json_str(r#"{ "placeholder": "n/a" }"#).unwrap();
/// assert_eq!(config.placeholder, "n/a");
/// assert_eq!(config.min_column_width, 80.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Width for columns without a declared `column_width`.
    pub default_column_width: f64,

    /// Lower bound applied to user-driven column resizes.
    pub min_column_width: f64,

    /// Shown when there is no data at all.
    pub empty_message: String,

    /// Shown when the data is empty because of active filters.
    pub filtered_empty_message: String,

    /// Shown while the caller is fetching data.
    pub pending_message: String,

    /// Rendered in place of a missing value.
    pub placeholder: String,

    /// `chrono` format string for date cells.
    pub date_format: String,

    /// Layout units per terminal cell when painting.
    pub units_per_cell: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_column_width: DEFAULT_COLUMN_WIDTH,
            min_column_width: MIN_COLUMN_WIDTH,
            empty_message: "Data not available".into(),
            filtered_empty_message: "No data matches the applied filters".into(),
            pending_message: "Fetching data...".into(),
            placeholder: "-".into(),
            date_format: "%Y-%m-%d".into(),
            units_per_cell: 1.0,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Apply a partial JSON object on top of `self`.
    ///
    /// Keys missing from the document keep their current value rather than
    /// the [`Default`] one, so callers can layer a file over their own base.
    pub fn overlay_json_str(self, json: &str) -> Result<Self, TableError> {
        let overlay: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut merged = serde_json::to_value(self)?;
        if let Some(base) = merged.as_object_mut() {
            base.extend(overlay);
        }
        Ok(serde_json::from_value(merged)?)
    }

    /// Read a JSON config file and apply it on top of `self`.
    pub fn overlay_path(self, path: impl AsRef<Path>) -> Result<Self, TableError> {
        let contents = std::fs::read_to_string(path)?;
        self.overlay_json_str(&contents)
    }

    /// Set the default column width.
    pub fn default_column_width(mut self, width: f64) -> Self {
        self.default_column_width = width;
        self
    }

    /// Set the minimum resize width.
    pub fn min_column_width(mut self, width: f64) -> Self {
        self.min_column_width = width;
        self
    }

    /// Set the no-data message.
    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Set the filtered-empty message.
    pub fn filtered_empty_message(mut self, message: impl Into<String>) -> Self {
        self.filtered_empty_message = message.into();
        self
    }

    /// Set the pending message.
    pub fn pending_message(mut self, message: impl Into<String>) -> Self {
        self.pending_message = message.into();
        self
    }

    /// Set the missing-value placeholder.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the layout units per terminal cell.
    pub fn units_per_cell(mut self, units: f64) -> Self {
        self.units_per_cell = units;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = TableConfig::from_json_str(r#"{ "units_per_cell": 8.0 }"#).unwrap();
        assert_eq!(config.units_per_cell, 8.0);
        assert_eq!(config.default_column_width, DEFAULT_COLUMN_WIDTH);
        assert_eq!(config.empty_message, "Data not available");
    }

    #[test]
    fn test_overlay_keeps_base_values() {
        let base = TableConfig::default().units_per_cell(8.0).placeholder("?");
        let config = base.overlay_json_str(r#"{ "placeholder": "n/a" }"#).unwrap();
        assert_eq!(config.units_per_cell, 8.0);
        assert_eq!(config.placeholder, "n/a");
        assert_eq!(config.min_column_width, MIN_COLUMN_WIDTH);
    }

    #[test]
    fn test_overlay_rejects_non_object() {
        let err = TableConfig::default().overlay_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, TableError::Config(_)));
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = TableConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, TableError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TableConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TableError::Io(_)));
    }
}
