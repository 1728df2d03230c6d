//! Row projection and numeric precision normalization.

use std::cmp::Ordering;

use crate::spec::{EnumCellValue, SpecColumnSchema, SpecRecord};

////////////////////////////////////////////////////////////////////////////////
// #region NumericRounding

/// Round `value` to `decimals` places, ties away from zero.
///
/// Ties are judged on the exact binary value, as fixed-point formatting does:
/// `0.125` rounds to `0.13`, while `1.005` (stored just below the tie) rounds
/// to `1.0`. Non-finite values are returned unchanged.
pub fn round_half_up(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let n_factor = 10f64.powi(decimals as i32);
    let n_scaled = value * n_factor;
    let n_trunc = n_scaled.trunc();
    let n_frac = (n_scaled - n_trunc).abs();

    let n_rounded = if n_frac == 0.5 {
        // The product may have landed on .5 through rounding; consult the exact digits.
        match compare_tail_with_half(value, decimals) {
            Ordering::Less => n_trunc,
            Ordering::Equal | Ordering::Greater => n_trunc + value.signum(),
        }
    } else {
        n_scaled.round()
    };

    if !n_rounded.is_finite() {
        return value;
    }
    n_rounded / n_factor
}

/// Compare the digits of `|value|` past `decimals` places against one half unit.
fn compare_tail_with_half(value: f64, decimals: u32) -> Ordering {
    let c_exact = format!("{:.400}", value.abs());
    let Some((_, c_frac)) = c_exact.split_once('.') else {
        return Ordering::Less;
    };

    let mut it_tail = c_frac.chars().skip(decimals as usize);
    match it_tail.next() {
        Some(chr) if chr < '5' => Ordering::Less,
        Some(chr) if chr > '5' => Ordering::Greater,
        Some(_) => {
            if it_tail.all(|chr| chr == '0') {
                Ordering::Equal
            } else {
                Ordering::Greater
            }
        }
        None => Ordering::Less,
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RowProjection

/// Normalize one present value: numbers are rounded, everything else passes through.
pub fn normalize_cell_value(value: &EnumCellValue, decimals: u32) -> EnumCellValue {
    match value {
        EnumCellValue::Number(n) => EnumCellValue::Number(round_half_up(*n, decimals)),
        EnumCellValue::Text(_)
        | EnumCellValue::Boolean(_)
        | EnumCellValue::Date(_)
        | EnumCellValue::Empty => value.clone(),
    }
}

/// Map `record` onto `schema`, one cell per column; absent fields become empty cells.
pub fn project_record(
    schema: &SpecColumnSchema,
    record: &SpecRecord,
    decimals: u32,
) -> Vec<EnumCellValue> {
    schema
        .columns()
        .iter()
        .map(|c_col| match record.get(c_col) {
            Some(value) => normalize_cell_value(value, decimals),
            None => EnumCellValue::Empty,
        })
        .collect()
}

/// Project every record in input order.
pub fn project_records(
    schema: &SpecColumnSchema,
    records: &[SpecRecord],
    decimals: u32,
) -> Vec<Vec<EnumCellValue>> {
    records
        .iter()
        .map(|record| project_record(schema, record, decimals))
        .collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
