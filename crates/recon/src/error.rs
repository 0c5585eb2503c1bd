use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),
    /// Config validation error (empty layout, duplicate row, blank column name).
    #[error("config validation error: {0}")]
    ConfigValidation(String),
    /// Missing required column in an input dataset.
    #[error("{dataset} file: column '{column}' not found")]
    MissingColumn { dataset: String, column: String },
    /// Dataset rows do not line up with its header.
    #[error("{dataset} file: row {row} has {found} field(s), header has {expected}")]
    RaggedRow {
        dataset: String,
        row: usize,
        expected: usize,
        found: usize,
    },
    /// An assembled table came out with no data rows.
    #[error("{table} is empty, nothing to report")]
    EmptyReport { table: String },
}
