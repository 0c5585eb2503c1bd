use crate::model::CellValue;

/// Minimum digit width of a canonical identifier.
pub const ID_WIDTH: usize = 8;

/// Canonicalize a weekly identifier cell to `#` + at least 8 digits.
///
/// Floats are truncated to an integer before stringifying so spreadsheet
/// numbers like `12345.0` do not pick up a trailing zero digit. Returns
/// `None` when the cell is blank or holds no digits at all.
pub fn normalize_identifier(value: &CellValue) -> Option<String> {
    let raw = match value {
        CellValue::Empty => return None,
        CellValue::Float(f) if !f.is_finite() => return None,
        // Formatted rather than cast so values past i64::MAX do not saturate
        CellValue::Float(f) => format!("{:.0}", f.trunc()),
        CellValue::Int(n) => n.to_string(),
        CellValue::Text(s) => s.trim().to_string(),
        CellValue::Bool(_) => return None,
    };
    normalize_str(&raw)
}

/// String half of [`normalize_identifier`].
pub fn normalize_str(raw: &str) -> Option<String> {
    let body = raw.strip_prefix('#').unwrap_or(raw);
    let digits: String = body.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    Some(format!("#{digits:0>width$}", width = ID_WIDTH))
}
