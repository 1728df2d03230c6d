//! Shared export specification models.

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::Deserialize;

use crate::conf::{
    C_NUM_FORMAT_DATE, C_SHEET_NAME_RESULTS, N_DECIMALS_NUMERIC, N_DECIMALS_NUMERIC_MAX,
    N_WIDTH_CELL_MIN, N_WIDTH_CELL_PADDING,
};
use crate::error::ExportError;

////////////////////////////////////////////////////////////////////////////////
// #region CellValueSpecification

/// Normalized cell value flowing from records to the encoder.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EnumCellValue {
    /// Missing/blank value.
    #[default]
    Empty,
    /// Numeric value.
    Number(f64),
    /// Text value.
    Text(String),
    /// Boolean value.
    Boolean(bool),
    /// Date-time value.
    Date(NaiveDateTime),
}

impl EnumCellValue {
    /// Return `true` for [`EnumCellValue::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<f64> for EnumCellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for EnumCellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for EnumCellValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for EnumCellValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for EnumCellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for EnumCellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDateTime> for EnumCellValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDate> for EnumCellValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value.and_time(chrono::NaiveTime::MIN))
    }
}

impl<T: Into<EnumCellValue>> From<Option<T>> for EnumCellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RecordSpecification

/// One input row: field names mapped to values, in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecRecord {
    fields: IndexMap<String, EnumCellValue>,
}

impl SpecRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<EnumCellValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a field. Replacing keeps the original key position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<EnumCellValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Look up a field by name.
    pub fn get(&self, key: &str) -> Option<&EnumCellValue> {
        self.fields.get(key)
    }

    /// Field names in record order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Return `true` when the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for SpecRecord
where
    K: Into<String>,
    V: Into<EnumCellValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

/// Ordered column names governing projection and header emission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecColumnSchema {
    columns: Vec<String>,
}

impl SpecColumnSchema {
    /// Wrap an ordered list of column names as-is.
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Column names in output order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Return `true` when the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Consume the schema, returning the column names.
    pub fn into_inner(self) -> Vec<String> {
        self.columns
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RequestSpecification

/// Caller-facing unit of work, consumed once by the engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecExportRequest {
    /// Records to export.
    pub records: Vec<SpecRecord>,
    /// Base file name; the extension is appended on delivery.
    pub file_name: String,
    /// Column names overriding schema inference.
    pub explicit_headers: Option<Vec<String>>,
    /// Rows rendered above the data block.
    pub meta_data: Option<Vec<Vec<EnumCellValue>>>,
}

impl SpecExportRequest {
    /// Create a request without explicit headers or metadata.
    pub fn new(records: Vec<SpecRecord>, file_name: impl Into<String>) -> Self {
        Self {
            records,
            file_name: file_name.into(),
            explicit_headers: None,
            meta_data: None,
        }
    }

    /// Set explicit column names.
    pub fn with_headers<S: Into<String>>(mut self, headers: impl IntoIterator<Item = S>) -> Self {
        self.explicit_headers = Some(headers.into_iter().map(Into::into).collect());
        self
    }

    /// Set metadata rows.
    pub fn with_meta_data(mut self, meta_data: Vec<Vec<EnumCellValue>>) -> Self {
        self.meta_data = Some(meta_data);
        self
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ExportOptions

/// Engine-wide options. Every field falls back to its default when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpecExportOptions {
    /// Name of the data sheet.
    pub sheet_name: String,
    /// Decimal places kept for numeric cells.
    pub decimals: u32,
    /// Minimum final column width.
    pub width_cell_min: usize,
    /// Width padding added after inference.
    pub width_cell_padding: usize,
    /// Number format applied to date cells.
    pub num_format_date: String,
}

impl Default for SpecExportOptions {
    fn default() -> Self {
        Self {
            sheet_name: C_SHEET_NAME_RESULTS.to_string(),
            decimals: N_DECIMALS_NUMERIC,
            width_cell_min: N_WIDTH_CELL_MIN,
            width_cell_padding: N_WIDTH_CELL_PADDING,
            num_format_date: C_NUM_FORMAT_DATE.to_string(),
        }
    }
}

impl SpecExportOptions {
    /// Parse options from a JSON object; missing keys take default values.
    pub fn from_json_str(text: &str) -> Result<Self, ExportError> {
        let options: Self = serde_json::from_str(text)
            .map_err(|err| ExportError::InvalidOptions(format!("Failed to parse options: {err}")))?;
        options.validate()?;
        Ok(options)
    }

    /// Check option ranges.
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.width_cell_min == 0 {
            return Err(ExportError::InvalidOptions(
                "width_cell_min must be >= 1.".to_string(),
            ));
        }
        if self.decimals > N_DECIMALS_NUMERIC_MAX {
            return Err(ExportError::InvalidOptions(format!(
                "decimals must be <= {N_DECIMALS_NUMERIC_MAX}."
            )));
        }
        Ok(())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region MatrixSpecification

/// Fully assembled row grid handed to the encoder.
///
/// Header and data rows have exactly one cell per schema column; metadata rows
/// are unconstrained.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecExportMatrix {
    /// All rows in output order.
    pub rows: Vec<Vec<EnumCellValue>>,
    /// Index of the header row within `rows`.
    pub row_idx_header: usize,
}

impl SpecExportMatrix {
    /// Metadata rows plus the separator row, if any.
    pub fn prefix_rows(&self) -> &[Vec<EnumCellValue>] {
        &self.rows[..self.row_idx_header]
    }

    /// Header row followed by data rows.
    pub fn table_rows(&self) -> &[Vec<EnumCellValue>] {
        &self.rows[self.row_idx_header..]
    }

    /// Data rows only.
    pub fn data_rows(&self) -> &[Vec<EnumCellValue>] {
        self.rows.get(self.row_idx_header + 1..).unwrap_or(&[])
    }

    /// Number of schema columns.
    pub fn n_cols(&self) -> usize {
        self.rows.get(self.row_idx_header).map_or(0, Vec::len)
    }

    /// Widest row length, metadata included.
    pub fn n_cols_max(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Everything computed for one request before encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecExportPlan {
    /// Resolved column schema.
    pub schema: SpecColumnSchema,
    /// Assembled matrix.
    pub matrix: SpecExportMatrix,
    /// One width per schema column.
    pub widths: Vec<usize>,
    /// Base file name from the request.
    pub file_name: String,
    /// Number of metadata rows supplied.
    pub n_rows_meta: usize,
    /// Non-fatal warnings raised while planning.
    pub warnings: Vec<String>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region DeliverySpecification

/// Encoded document handed to a delivery target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecDeliveryPayload {
    /// File name including extension.
    pub file_name: String,
    /// MIME type of `bytes`.
    pub mime_type: String,
    /// Encoded workbook.
    pub bytes: Vec<u8>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Per-export call report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecExportReport {
    /// Delivered file name including extension.
    pub file_name: String,
    /// Sheet name written to the workbook.
    pub sheet_name: String,
    /// Column names in output order.
    pub columns: Vec<String>,
    /// Column widths attached to the sheet.
    pub widths: Vec<usize>,
    /// Number of metadata rows.
    pub n_rows_meta: usize,
    /// Number of data rows.
    pub n_rows_data: usize,
    /// Size of the encoded workbook.
    pub n_bytes: usize,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecExportReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
