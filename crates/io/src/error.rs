use std::path::PathBuf;

use rollcall_recon::ReconError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("cannot read {}: {message}", path.display())]
    Read { path: PathBuf, message: String },
    #[error("cannot write {}: {message}", path.display())]
    Write { path: PathBuf, message: String },
    #[error("cannot infer format from extension {0:?}")]
    UnknownFormat(String),
    #[error("{} has no header row", path.display())]
    NoHeader { path: PathBuf },
    #[error("sheet '{sheet}' not found in {}", path.display())]
    MissingSheet { path: PathBuf, sheet: String },
    #[error(transparent)]
    Dataset(#[from] ReconError),
}

impl IoError {
    pub(crate) fn read(path: &std::path::Path, err: impl ToString) -> Self {
        Self::Read { path: path.to_path_buf(), message: err.to_string() }
    }

    pub(crate) fn write(path: &std::path::Path, err: impl ToString) -> Self {
        Self::Write { path: path.to_path_buf(), message: err.to_string() }
    }
}
