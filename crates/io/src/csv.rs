// CSV/TSV import and table export

use std::io::Read;
use std::path::Path;

use rollcall_recon::{CellValue, Dataset, ResultTable};

use crate::error::IoError;
use crate::fit_row;

pub fn import(path: &Path, name: &str) -> Result<Dataset, IoError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    import_from_string(&content, delimiter, name, path)
}

pub fn import_tsv(path: &Path, name: &str) -> Result<Dataset, IoError> {
    let content = read_file_as_utf8(path)?;
    import_from_string(&content, b'\t', name, path)
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // Score: (lines with same field count as line 1) * field_count
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, IoError> {
    let mut file = std::fs::File::open(path).map_err(|e| IoError::read(path, e))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| IoError::read(path, e))?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s.trim_start_matches('\u{feff}').to_string()),
        Err(e) => {
            let bytes = e.into_bytes();
            // Fall back to Windows-1252 (common for Excel-exported CSVs)
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

fn import_from_string(
    content: &str,
    delimiter: u8,
    name: &str,
    source: &Path,
) -> Result<Dataset, IoError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(header) => header
            .map_err(|e| IoError::read(source, e))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect(),
        None => return Err(IoError::NoHeader { path: source.to_path_buf() }),
    };

    let mut raw: Vec<Vec<String>> = Vec::new();
    for result in records {
        let record = result.map_err(|e| IoError::read(source, e))?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        raw.push(record.iter().map(str::to_string).collect());
    }

    let columns = infer_columns(&raw, headers.len());
    let rows = (0..raw.len())
        .map(|r| fit_row(columns.iter().map(|col| col[r].clone()).collect(), headers.len()))
        .collect();

    Ok(Dataset::new(name, headers, rows)?)
}

/// Type each column as a whole: a column whose non-blank cells all read as
/// numbers becomes numeric, anything else stays text. Blank cells are `Empty`.
///
/// Fields beyond the header width form extra columns so the dataset can
/// reject ragged rows with their real width.
fn infer_columns(raw: &[Vec<String>], width: usize) -> Vec<Vec<CellValue>> {
    let max_width = raw.iter().map(Vec::len).max().unwrap_or(0).max(width);

    (0..max_width)
        .map(|c| {
            let cells: Vec<Option<&str>> = raw
                .iter()
                .map(|row| row.get(c).map(String::as_str).filter(|v| !v.trim().is_empty()))
                .collect();
            let numeric = cells.iter().flatten().all(|v| parse_number(v).is_some());

            cells
                .into_iter()
                .map(|cell| match cell {
                    None => CellValue::Empty,
                    Some(v) if numeric => parse_number(v).unwrap_or(CellValue::Empty),
                    Some(v) => CellValue::Text(v.to_string()),
                })
                .collect()
        })
        .collect()
}

fn parse_number(value: &str) -> Option<CellValue> {
    let v = value.trim();
    // f64 parsing accepts "inf"/"NaN"; those are not numbers here
    if !v.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    if let Ok(n) = v.parse::<i64>() {
        return Some(CellValue::Int(n));
    }
    // Integers past i64 keep every digit; an f64 would round them
    let unsigned = v.strip_prefix(['+', '-']).unwrap_or(v);
    if unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return Some(CellValue::Text(v.to_string()));
    }
    v.parse::<f64>().ok().filter(|f| f.is_finite()).map(CellValue::Float)
}

/// Write one result table (header + rows) as CSV.
pub fn export_table(table: &ResultTable, path: &Path) -> Result<(), IoError> {
    let mut writer = csv::WriterBuilder::new()
        .from_path(path)
        .map_err(|e| IoError::write(path, e))?;

    writer.write_record(&table.headers).map_err(|e| IoError::write(path, e))?;
    for row in &table.rows {
        writer.write_record(row).map_err(|e| IoError::write(path, e))?;
    }

    writer.flush().map_err(|e| IoError::write(path, e))?;
    Ok(())
}
