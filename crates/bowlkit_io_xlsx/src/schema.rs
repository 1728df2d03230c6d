//! Column schema inference.

use std::collections::BTreeSet;

use crate::spec::{SpecColumnSchema, SpecRecord};
use crate::util::describe_duplicate_columns;

/// Collect every field name across `records` exactly once, in first-occurrence order.
///
/// Records are scanned in input order and each record in its own key order.
pub fn infer_column_schema(records: &[SpecRecord]) -> SpecColumnSchema {
    let mut l_columns: Vec<String> = Vec::new();
    let mut set_seen: BTreeSet<&str> = BTreeSet::new();

    for record in records {
        for c_key in record.keys() {
            if set_seen.insert(c_key) {
                l_columns.push(c_key.to_string());
            }
        }
    }

    SpecColumnSchema::new(l_columns)
}

/// Pick explicit headers verbatim when given, otherwise infer from `records`.
///
/// Duplicate explicit headers are kept; a warning is pushed to `warnings`.
pub fn resolve_column_schema(
    records: &[SpecRecord],
    explicit_headers: Option<&[String]>,
    warnings: &mut Vec<String>,
) -> SpecColumnSchema {
    let Some(headers) = explicit_headers else {
        return infer_column_schema(records);
    };

    if let Some(c_msg) = describe_duplicate_columns(headers) {
        warnings.push(c_msg);
    }
    SpecColumnSchema::new(headers.to_vec())
}
