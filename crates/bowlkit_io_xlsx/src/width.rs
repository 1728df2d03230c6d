//! Column width estimation.

use crate::spec::{EnumCellValue, SpecExportOptions};

/// Render a cell the way width inference measures it.
///
/// Numbers use their shortest round-trip text (`2.0` renders as `"2"`).
pub fn stringify_cell_value(value: &EnumCellValue) -> String {
    match value {
        EnumCellValue::Empty => String::new(),
        EnumCellValue::Number(n) => n.to_string(),
        EnumCellValue::Text(s) => s.clone(),
        EnumCellValue::Boolean(b) => b.to_string(),
        EnumCellValue::Date(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

/// Length of a cell's text in Unicode scalar values; empty cells count 0.
pub fn estimate_width_len(value: &EnumCellValue) -> usize {
    match value {
        EnumCellValue::Empty => 0,
        EnumCellValue::Text(s) => s.chars().count(),
        _ => stringify_cell_value(value).chars().count(),
    }
}

/// Compute one width per column as `max(width_cell_min, longest + width_cell_padding)`.
///
/// `rows` must be the header and data rows only; metadata rows are not measured.
/// Cells past `n_cols` are ignored and short rows count as empty.
pub fn estimate_column_widths(
    rows: &[Vec<EnumCellValue>],
    n_cols: usize,
    options: &SpecExportOptions,
) -> Vec<usize> {
    let mut l_width_by_col = vec![0usize; n_cols];
    for row in rows {
        for (n_idx_col, value) in row.iter().take(n_cols).enumerate() {
            l_width_by_col[n_idx_col] =
                usize::max(l_width_by_col[n_idx_col], estimate_width_len(value));
        }
    }

    l_width_by_col
        .into_iter()
        .map(|n_width| usize::max(options.width_cell_min, n_width + options.width_cell_padding))
        .collect()
}
