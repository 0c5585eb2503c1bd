// File I/O operations

pub mod csv;
pub mod error;
pub mod xlsx;

use std::path::Path;

use rollcall_recon::{CellValue, Dataset};
use tracing::debug;

pub use error::IoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Tsv,
    Xlsx,
}

/// Infer the input format from a file extension.
pub fn infer_format(path: &Path) -> Result<Format, IoError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("csv") | Some("txt") => Ok(Format::Csv),
        Some("tsv") => Ok(Format::Tsv),
        Some("xlsx") | Some("xlsm") | Some("xls") | Some("xlsb") | Some("ods") => Ok(Format::Xlsx),
        _ => Err(IoError::UnknownFormat(ext.unwrap_or_else(|| "(none)".into()))),
    }
}

/// Load a whole file into a named dataset. `sheet` applies to Excel files only.
pub fn load_dataset(
    path: &Path,
    name: &str,
    format: Option<Format>,
    sheet: Option<&str>,
) -> Result<Dataset, IoError> {
    let format = match format {
        Some(f) => f,
        None => infer_format(path)?,
    };

    let dataset = match format {
        Format::Csv => crate::csv::import(path, name)?,
        Format::Tsv => crate::csv::import_tsv(path, name)?,
        Format::Xlsx => crate::xlsx::import(path, name, sheet)?,
    };

    debug!(
        dataset = name,
        path = %path.display(),
        rows = dataset.len(),
        columns = dataset.headers().len(),
        "dataset loaded"
    );
    Ok(dataset)
}

/// Pad a row to the header width; trailing blanks past it are dropped.
/// Anything wider is left for `Dataset::new` to reject.
pub(crate) fn fit_row(mut cells: Vec<CellValue>, width: usize) -> Vec<CellValue> {
    while cells.len() > width && cells.last().is_some_and(CellValue::is_empty) {
        cells.pop();
    }
    cells.resize(width.max(cells.len()), CellValue::Empty);
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn formats_from_extension() {
        assert_eq!(infer_format(&PathBuf::from("roster.CSV")).unwrap(), Format::Csv);
        assert_eq!(infer_format(&PathBuf::from("weekly.tsv")).unwrap(), Format::Tsv);
        assert_eq!(infer_format(&PathBuf::from("roster.xlsx")).unwrap(), Format::Xlsx);
        assert_eq!(infer_format(&PathBuf::from("roster.ods")).unwrap(), Format::Xlsx);
        assert!(matches!(
            infer_format(&PathBuf::from("roster.pdf")),
            Err(IoError::UnknownFormat(ref e)) if e == "pdf"
        ));
        assert!(infer_format(&PathBuf::from("roster")).is_err());
    }

    #[test]
    fn fit_row_pads_and_trims() {
        assert_eq!(fit_row(vec![CellValue::Int(1)], 3).len(), 3);
        assert_eq!(fit_row(vec![CellValue::Int(1), CellValue::Empty, CellValue::Empty], 1), vec![CellValue::Int(1)]);
        assert_eq!(fit_row(vec![CellValue::Int(1), CellValue::Int(2)], 1).len(), 2);
    }

    #[test]
    fn load_dataset_with_forced_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weekly.dat");
        fs::write(&path, "mid\n101\n").unwrap();

        assert!(load_dataset(&path, "weekly", None, None).is_err());
        let ds = load_dataset(&path, "weekly", Some(Format::Csv), None).unwrap();
        assert_eq!(ds.rows()[0][0], CellValue::Int(101));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = load_dataset(Path::new("/nonexistent/fixed.csv"), "fixed", None, None).unwrap_err();
        assert!(matches!(err, IoError::Read { .. }));
        assert!(err.to_string().starts_with("cannot read /nonexistent/fixed.csv"));
    }
}
