//! Export matrix assembly.

use crate::spec::{EnumCellValue, SpecColumnSchema, SpecExportMatrix};

/// Concatenate metadata, separator, header and data rows into one matrix.
///
/// Output order: every metadata row verbatim, then a single blank row only when
/// metadata rows were supplied, then the header, then `data_rows` in order.
/// `Some(vec![])` counts as no metadata.
pub fn assemble_export_matrix(
    meta_data: Option<&[Vec<EnumCellValue>]>,
    schema: &SpecColumnSchema,
    data_rows: Vec<Vec<EnumCellValue>>,
) -> SpecExportMatrix {
    let l_meta_rows = meta_data.unwrap_or(&[]);
    let mut l_rows = Vec::with_capacity(l_meta_rows.len() + data_rows.len() + 2);

    if !l_meta_rows.is_empty() {
        l_rows.extend(l_meta_rows.iter().cloned());
        l_rows.push(Vec::new());
    }

    let row_idx_header = l_rows.len();
    l_rows.push(derive_header_row(schema));
    l_rows.extend(data_rows);

    SpecExportMatrix {
        rows: l_rows,
        row_idx_header,
    }
}

/// Header cells, one text cell per schema column.
pub fn derive_header_row(schema: &SpecColumnSchema) -> Vec<EnumCellValue> {
    schema
        .columns()
        .iter()
        .map(|c_col| EnumCellValue::Text(c_col.clone()))
        .collect()
}
