//! XLSX encoder that turns an export matrix into single-sheet workbook bytes.

use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::conf::N_WIDTH_EXCEL_COLUMN_MAX;
use crate::error::ExportError;
use crate::spec::{EnumCellValue, SpecExportMatrix, SpecExportOptions};
use crate::util::{cast_col_num, cast_row_num, sanitize_sheet_name, validate_sheet_fits};

/// Text written in place of NaN, which Excel cannot store as a number.
const C_NAN_STR: &str = "NaN";
/// Text written in place of positive infinity.
const C_POSINF_STR: &str = "Inf";
/// Text written in place of negative infinity.
const C_NEGINF_STR: &str = "-Inf";

/// Encode `matrix` into an in-memory workbook with one sheet.
///
/// Cells are written row-major from `A1`; empty cells are left unwritten.
/// `widths` holds one width per schema column and is clamped to Excel's
/// column limit on write.
pub fn encode_export_matrix(
    matrix: &SpecExportMatrix,
    widths: &[usize],
    options: &SpecExportOptions,
) -> Result<Vec<u8>, ExportError> {
    validate_sheet_fits(matrix)?;

    let fmt_date = Format::new().set_num_format(&options.num_format_date);
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sanitize_sheet_name(&options.sheet_name, "_"))?;

    for (n_idx_row, row) in matrix.rows.iter().enumerate() {
        for (n_idx_col, value) in row.iter().enumerate() {
            write_cell(worksheet, n_idx_row, n_idx_col, value, &fmt_date)?;
        }
    }

    for (n_idx_col, n_width) in widths.iter().enumerate() {
        let n_width_final = usize::min(N_WIDTH_EXCEL_COLUMN_MAX, *n_width);
        worksheet.set_column_width(cast_col_num(n_idx_col)?, n_width_final as f64)?;
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
    fmt_date: &Format,
) -> Result<(), ExportError> {
    let n_row = cast_row_num(row_idx)?;
    let n_col = cast_col_num(col_idx)?;

    match value {
        EnumCellValue::Empty => {}
        EnumCellValue::Number(val) if val.is_finite() => {
            worksheet.write_number(n_row, n_col, *val)?;
        }
        EnumCellValue::Number(val) => {
            worksheet.write_string(n_row, n_col, derive_non_finite_text(*val))?;
        }
        EnumCellValue::Text(val) => {
            worksheet.write_string(n_row, n_col, val)?;
        }
        EnumCellValue::Boolean(val) => {
            worksheet.write_boolean(n_row, n_col, *val)?;
        }
        EnumCellValue::Date(val) => {
            worksheet.write_datetime_with_format(n_row, n_col, val, fmt_date)?;
        }
    }
    Ok(())
}

fn derive_non_finite_text(x: f64) -> &'static str {
    if x.is_nan() {
        C_NAN_STR
    } else if x.is_sign_positive() {
        C_POSINF_STR
    } else {
        C_NEGINF_STR
    }
}
