//! Export constants and default preset factories.

use crate::spec::SpecExportOptions;

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Excel column width maximum, in characters.
pub const N_WIDTH_EXCEL_COLUMN_MAX: usize = 255;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Name of the single data sheet in every exported workbook.
pub const C_SHEET_NAME_RESULTS: &str = "Resultados";
/// File extension appended to the caller-supplied base name.
pub const C_EXT_XLSX: &str = "xlsx";
/// MIME type attached to delivered payloads.
pub const C_MIME_XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Decimal places kept for numeric cells.
pub const N_DECIMALS_NUMERIC: u32 = 2;
/// Highest decimal precision accepted by the projector.
pub const N_DECIMALS_NUMERIC_MAX: u32 = 15;
/// Minimum column width, in characters.
pub const N_WIDTH_CELL_MIN: usize = 10;
/// Padding added to the longest value in a column.
pub const N_WIDTH_CELL_PADDING: usize = 2;
/// Number format used for date cells.
pub const C_NUM_FORMAT_DATE: &str = "yyyy-mm-dd hh:mm:ss";

/// Build default export options.
pub fn derive_default_export_options() -> SpecExportOptions {
    SpecExportOptions::default()
}
