//! Record sources: Polars frames, Polars IPC payloads and JSON documents.

use std::io::Cursor;

use polars::prelude::{AnyValue, DataFrame, IpcReader, SerReader};
use serde_json::Value;

use crate::error::ExportError;
use crate::spec::{EnumCellValue, SpecRecord};

////////////////////////////////////////////////////////////////////////////////
// #region DataFrameSource

/// Convert every frame row into a record keyed by column name, in column order.
///
/// Nulls become explicit empty fields so every column still names a header.
pub fn derive_records_from_dataframe(df: &DataFrame) -> Result<Vec<SpecRecord>, ExportError> {
    let l_colnames: Vec<String> = df
        .get_column_names_str()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    let l_cols = df.get_columns();

    let mut l_records = Vec::with_capacity(df.height());
    for n_idx_row in 0..df.height() {
        let mut record = SpecRecord::new();
        for (c_name, col) in l_colnames.iter().zip(l_cols) {
            let value = col
                .get(n_idx_row)
                .map_err(|err| ExportError::Source(format!("Failed to access cell value: {err}")))?;
            record.insert(c_name.clone(), derive_cell_value_from_any_value(value));
        }
        l_records.push(record);
    }

    Ok(l_records)
}

/// Decode a Polars IPC payload and convert it with [`derive_records_from_dataframe`].
pub fn derive_records_from_ipc_bytes(v_ipc_df: &[u8]) -> Result<Vec<SpecRecord>, ExportError> {
    let df = IpcReader::new(Cursor::new(v_ipc_df))
        .finish()
        .map_err(|err| ExportError::Source(format!("Failed to read IPC DataFrame bytes: {err}")))?;
    derive_records_from_dataframe(&df)
}

fn derive_cell_value_from_any_value(value: AnyValue<'_>) -> EnumCellValue {
    match value {
        AnyValue::Null => EnumCellValue::Empty,
        AnyValue::String(val) => EnumCellValue::Text(val.to_string()),
        AnyValue::StringOwned(val) => EnumCellValue::Text(val.to_string()),
        AnyValue::Boolean(val) => EnumCellValue::Boolean(val),
        AnyValue::UInt8(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt16(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt32(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int8(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int16(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int32(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int128(val) => EnumCellValue::Number(val as f64),
        AnyValue::Float32(val) => EnumCellValue::Number(val as f64),
        AnyValue::Float64(val) => EnumCellValue::Number(val),
        _ => EnumCellValue::Text(value.to_string()),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region JsonSource

/// Parse a JSON array of objects into records, keeping each object's key order.
pub fn derive_records_from_json_str(text: &str) -> Result<Vec<SpecRecord>, ExportError> {
    let value: Value = serde_json::from_str(text)?;
    derive_records_from_json_value(&value)
}

/// Convert a JSON array of objects into records.
///
/// `null` becomes an empty field; nested arrays and objects are kept as their JSON text.
pub fn derive_records_from_json_value(value: &Value) -> Result<Vec<SpecRecord>, ExportError> {
    let Value::Array(l_items) = value else {
        return Err(ExportError::Source(
            "Expected a JSON array of objects.".to_string(),
        ));
    };

    l_items
        .iter()
        .enumerate()
        .map(|(n_idx, item)| {
            let Value::Object(dict_fields) = item else {
                return Err(ExportError::Source(format!(
                    "Expected a JSON object at index {n_idx}."
                )));
            };
            Ok(dict_fields
                .iter()
                .map(|(c_key, val)| (c_key.clone(), derive_cell_value_from_json(val)))
                .collect::<SpecRecord>())
        })
        .collect()
}

fn derive_cell_value_from_json(value: &Value) -> EnumCellValue {
    match value {
        Value::Null => EnumCellValue::Empty,
        Value::Bool(val) => EnumCellValue::Boolean(*val),
        Value::Number(val) => val
            .as_f64()
            .map_or(EnumCellValue::Empty, EnumCellValue::Number),
        Value::String(val) => EnumCellValue::Text(val.clone()),
        Value::Array(_) | Value::Object(_) => EnumCellValue::Text(value.to_string()),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use polars::prelude::{IpcWriter, SerWriter};
    use pretty_assertions::assert_eq;

    use super::*;

    fn frame_bowlers() -> DataFrame {
        polars::df!(
            "name" => ["Ana", "Luis"],
            "games" => [12i64, 9],
            "avg" => [Some(185.456), None],
            "active" => [true, false]
        )
        .expect("frame")
    }

    #[test]
    fn test_derive_records_from_dataframe_keeps_column_order_and_nulls() {
        let l_records = derive_records_from_dataframe(&frame_bowlers()).expect("records");

        assert_eq!(l_records.len(), 2);
        assert_eq!(
            l_records[0].keys().collect::<Vec<_>>(),
            vec!["name", "games", "avg", "active"]
        );
        assert_eq!(l_records[0].get("games"), Some(&EnumCellValue::Number(12.0)));
        assert_eq!(l_records[0].get("avg"), Some(&EnumCellValue::Number(185.456)));
        assert_eq!(l_records[1].get("avg"), Some(&EnumCellValue::Empty));
        assert_eq!(l_records[1].get("active"), Some(&EnumCellValue::Boolean(false)));
    }

    #[test]
    fn test_derive_records_from_ipc_bytes() {
        let mut df = frame_bowlers();
        let mut v_buf: Vec<u8> = Vec::new();
        IpcWriter::new(&mut v_buf).finish(&mut df).expect("write ipc");

        let l_records = derive_records_from_ipc_bytes(&v_buf).expect("records");
        assert_eq!(l_records[1].get("name"), Some(&EnumCellValue::Text("Luis".into())));
    }

    #[test]
    fn test_derive_records_from_ipc_bytes_rejects_garbage() {
        let err = derive_records_from_ipc_bytes(b"not ipc").unwrap_err();
        assert!(matches!(err, ExportError::Source(_)));
    }

    #[test]
    fn test_derive_records_from_json_keeps_key_order() {
        let l_records = derive_records_from_json_str(
            r#"[
                {"sucursal": "Centro", "equipos": 4, "activa": true, "gerente": null},
                {"ambito": "Nacional", "sucursal": "Norte", "tags": ["a", "b"]}
            ]"#,
        )
        .expect("records");

        assert_eq!(
            l_records[0].keys().collect::<Vec<_>>(),
            vec!["sucursal", "equipos", "activa", "gerente"]
        );
        assert_eq!(l_records[0].get("equipos"), Some(&EnumCellValue::Number(4.0)));
        assert_eq!(l_records[0].get("gerente"), Some(&EnumCellValue::Empty));
        assert_eq!(l_records[1].keys().next(), Some("ambito"));
        assert_eq!(
            l_records[1].get("tags"),
            Some(&EnumCellValue::Text(r#"["a","b"]"#.into()))
        );
    }

    #[test]
    fn test_derive_records_from_json_rejects_non_objects() {
        assert!(matches!(
            derive_records_from_json_str(r#"{"a": 1}"#),
            Err(ExportError::Source(_))
        ));
        assert!(matches!(
            derive_records_from_json_str(r#"[{"a": 1}, 2]"#),
            Err(ExportError::Source(msg)) if msg.contains("index 1")
        ));
        assert!(matches!(
            derive_records_from_json_str("not json"),
            Err(ExportError::Source(_))
        ));
    }
}
