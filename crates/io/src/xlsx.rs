// Excel import (xlsx, xls, xlsb, ods) and report workbook export

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use rollcall_recon::{CellValue, Dataset, Report, ResultTable};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};

use crate::error::IoError;
use crate::fit_row;

/// Import one worksheet. The first non-empty row of the used range is the header.
/// Without `sheet`, the first worksheet in the workbook is read.
pub fn import(path: &Path, name: &str, sheet: Option<&str>) -> Result<Dataset, IoError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| IoError::read(path, format!("Failed to open Excel file: {e}")))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let sheet_name = match sheet {
        Some(wanted) => sheet_names
            .iter()
            .find(|s| s.as_str() == wanted)
            .cloned()
            .ok_or_else(|| IoError::MissingSheet {
                path: path.to_path_buf(),
                sheet: wanted.to_string(),
            })?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| IoError::read(path, "Excel file contains no sheets"))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| IoError::read(path, format!("Failed to read sheet '{sheet_name}': {e}")))?;

    let mut rows = range
        .rows()
        .filter(|row| row.iter().any(|c| !matches!(cell_value(c), CellValue::Empty)));

    let headers: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(|c| cell_value(c).to_text().trim().to_string()).collect(),
        None => return Err(IoError::NoHeader { path: path.to_path_buf() }),
    };

    let data: Vec<Vec<CellValue>> = rows
        .map(|row| fit_row(row.iter().map(cell_value).collect(), headers.len()))
        .collect();

    Ok(Dataset::new(name, headers, data)?)
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.trim().is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(n) => CellValue::Float(*n),
        Data::Int(n) => CellValue::Int(*n),
        Data::Bool(b) => CellValue::Bool(*b),
        // Serial number; dates never carry identifiers
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Empty,
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

pub const COMMITTEES_SHEET: &str = "Committees";
pub const ROLES_SHEET: &str = "Roles";

struct Styles {
    banner: Format,
    heading: Format,
    header: Format,
    cell: Format,
    number: Format,
    label: Format,
}

impl Styles {
    fn new() -> Self {
        let grid = Format::new().set_border(FormatBorder::Thin);
        Self {
            banner: Format::new().set_bold().set_font_size(16),
            heading: Format::new().set_bold().set_font_size(13),
            header: grid
                .clone()
                .set_bold()
                .set_background_color(Color::RGB(0xD3D3D3))
                .set_align(FormatAlign::VerticalCenter),
            cell: grid.clone().set_align(FormatAlign::VerticalCenter),
            number: grid.set_align(FormatAlign::VerticalCenter).set_align(FormatAlign::Right),
            label: Format::new().set_bold(),
        }
    }
}

/// Write the report as a two-sheet workbook: Table 1 with the banner and
/// summary on the first sheet, Table 2 on the second.
pub fn export_report(report: &Report, path: &Path, with_summary: bool) -> Result<(), IoError> {
    let styles = Styles::new();
    let mut workbook = Workbook::new();

    let sheets = [COMMITTEES_SHEET, ROLES_SHEET];
    for (idx, table) in report.tables.iter().enumerate() {
        if table.is_empty() {
            return Err(IoError::write(path, format!("{} is empty", table.title)));
        }
        let name = sheets.get(idx).copied().unwrap_or("Table");
        let worksheet = workbook
            .add_worksheet()
            .set_name(name)
            .map_err(|e| IoError::write(path, format!("Failed to create sheet '{name}': {e}")))?;

        let mut row = 0u32;
        if idx == 0 {
            worksheet
                .write_string_with_format(row, 0, &report.meta.title, &styles.banner)
                .map_err(|e| IoError::write(path, e))?;
            row += 2;
            if with_summary {
                row = write_summary(worksheet, report, row, &styles).map_err(|e| IoError::write(path, e))?;
                row += 1;
            }
        }

        write_table(worksheet, table, row, &styles).map_err(|e| IoError::write(path, e))?;
    }

    workbook
        .save(path)
        .map_err(|e| IoError::write(path, format!("Failed to save XLSX file: {e}")))?;
    Ok(())
}

fn write_summary(
    worksheet: &mut Worksheet,
    report: &Report,
    start_row: u32,
    styles: &Styles,
) -> Result<u32, XlsxError> {
    let s = &report.summary;
    let lines: [(&str, String); 4] = [
        ("Total cadre", s.total_strength.to_string()),
        ("Registered with MID mapped", s.registered.to_string()),
        ("Registered %", s.registered_percent.clone()),
        ("Weekly records", s.weekly_records.to_string()),
    ];

    let mut row = start_row;
    for (label, value) in lines {
        worksheet.write_string_with_format(row, 0, label, &styles.label)?;
        worksheet.write_string(row, 1, &value)?;
        row += 1;
    }
    Ok(row)
}

fn write_table(
    worksheet: &mut Worksheet,
    table: &ResultTable,
    start_row: u32,
    styles: &Styles,
) -> Result<(), XlsxError> {
    worksheet.write_string_with_format(start_row, 0, &table.title, &styles.heading)?;

    let header_row = start_row + 2;
    for (col, header) in table.headers.iter().enumerate() {
        worksheet.write_string_with_format(header_row, col as u16, header, &styles.header)?;
    }
    worksheet.set_repeat_rows(header_row, header_row)?;

    for (r, values) in table.rows.iter().enumerate() {
        let row = header_row + 1 + r as u32;
        for (col, value) in values.iter().enumerate() {
            match value.parse::<u64>() {
                Ok(n) => worksheet.write_number_with_format(row, col as u16, n as f64, &styles.number)?,
                Err(_) => worksheet.write_string_with_format(row, col as u16, value, &styles.cell)?,
            };
        }
    }

    for (col, header) in table.headers.iter().enumerate() {
        let widest = table
            .rows
            .iter()
            .filter_map(|r| r.get(col))
            .map(|v| v.chars().count())
            .chain(std::iter::once(header.chars().count()))
            .max()
            .unwrap_or(8);
        worksheet.set_column_width(col as u16, (widest + 2) as f64)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_recon::ReportConfig;
    use tempfile::tempdir;

    fn report() -> Report {
        let fixed = Dataset::new(
            "fixed",
            vec!["CMLEVEL".into(), "ROLE".into(), "MIMD".into()],
            vec![vec!["Cluster".into(), "Convenor".into(), "#00000001".into()]],
        )
        .unwrap();
        let weekly = Dataset::new("weekly", vec!["mid".into()], vec![vec![CellValue::Int(1)]]).unwrap();
        rollcall_recon::run(&ReportConfig::default(), &fixed, &weekly).unwrap()
    }

    #[test]
    fn report_workbook_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weekly_report.xlsx");
        export_report(&report(), &path, true).unwrap();

        let mut wb = open_workbook_auto(&path).unwrap();
        assert_eq!(wb.sheet_names(), vec![COMMITTEES_SHEET.to_string(), ROLES_SHEET.to_string()]);

        // Roles sheet: heading, blank row, header, 53 pair rows
        let roles = wb.worksheet_range(ROLES_SHEET).unwrap();
        assert_eq!(roles.get_size(), (56, 5));
        assert_eq!(roles.get_value((2, 2)), Some(&Data::String("Total Cadre Members".into())));
        assert_eq!(roles.get_value((3, 1)), Some(&Data::String("Convenor".into())));
        assert_eq!(roles.get_value((3, 2)), Some(&Data::Float(1.0)));
        assert_eq!(roles.get_value((3, 4)), Some(&Data::String("100.0%".into())));

        let committees = wb.worksheet_range(COMMITTEES_SHEET).unwrap();
        let cells: Vec<String> = committees
            .rows()
            .flat_map(|r| r.iter().map(|c| c.to_string()))
            .collect();
        assert!(cells.iter().any(|c| c == "Analysis of members registered in MyTDP App"));
        assert!(cells.iter().any(|c| c == "Registered with MID mapped"));
        assert!(cells.iter().any(|c| c == "Total"));
    }

    #[test]
    fn import_reads_typed_cells() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weekly.xlsx");

        let mut wb = Workbook::new();
        let ws = wb.add_worksheet();
        ws.write_string(0, 0, "Name").unwrap();
        ws.write_string(0, 1, "mid").unwrap();
        ws.write_string(1, 0, "Asha").unwrap();
        ws.write_number(1, 1, 12345.0).unwrap();
        ws.write_string(2, 0, "Ravi").unwrap();
        ws.write_string(2, 1, "#778").unwrap();
        wb.save(&path).unwrap();

        let ds = import(&path, "weekly", None).unwrap();
        assert_eq!(ds.headers(), ["Name", "mid"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows()[0][1], CellValue::Float(12345.0));
        assert_eq!(ds.rows()[1][1], CellValue::Text("#778".into()));
    }

    #[test]
    fn missing_sheet_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("one.xlsx");
        let mut wb = Workbook::new();
        wb.add_worksheet().write_string(0, 0, "mid").unwrap();
        wb.save(&path).unwrap();

        let err = import(&path, "weekly", Some("Week 42")).unwrap_err();
        assert!(matches!(err, IoError::MissingSheet { ref sheet, .. } if sheet == "Week 42"));
    }
}
