//! Export engine: records in, one delivered workbook out.

use crate::delivery::{DeliveryTarget, create_delivery_payload};
use crate::error::ExportError;
use crate::matrix::assemble_export_matrix;
use crate::project::project_records;
use crate::schema::resolve_column_schema;
use crate::spec::{SpecExportOptions, SpecExportPlan, SpecExportReport, SpecExportRequest};
use crate::util::sanitize_sheet_name;
use crate::width::estimate_column_widths;
use crate::writer::encode_export_matrix;

/// Resolve schema, project rows, assemble the matrix and size the columns.
///
/// Returns `None` when the request has no records.
pub fn plan_export(
    request: &SpecExportRequest,
    options: &SpecExportOptions,
) -> Option<SpecExportPlan> {
    if request.records.is_empty() {
        return None;
    }

    let mut l_warnings = Vec::new();
    let schema = resolve_column_schema(
        &request.records,
        request.explicit_headers.as_deref(),
        &mut l_warnings,
    );
    let l_data_rows = project_records(&schema, &request.records, options.decimals);
    let matrix = assemble_export_matrix(request.meta_data.as_deref(), &schema, l_data_rows);
    let l_widths = estimate_column_widths(matrix.table_rows(), schema.len(), options);

    let n_rows_meta = matrix.row_idx_header.saturating_sub(1);
    log::debug!(
        "planned export {:?}: {} columns, {} data rows, {} metadata rows",
        request.file_name,
        schema.len(),
        matrix.data_rows().len(),
        n_rows_meta
    );

    Some(SpecExportPlan {
        schema,
        matrix,
        widths: l_widths,
        file_name: request.file_name.clone(),
        n_rows_meta,
        warnings: l_warnings,
    })
}

/// Export `request` to a workbook and hand it to `delivery`.
///
/// An empty record batch is a no-op: nothing is encoded, `delivery` is not
/// called and `Ok(None)` is returned. Encoding and delivery failures are
/// returned unchanged.
pub fn export_records<D: DeliveryTarget + ?Sized>(
    request: SpecExportRequest,
    options: &SpecExportOptions,
    delivery: &mut D,
) -> Result<Option<SpecExportReport>, ExportError> {
    options.validate()?;

    let Some(plan) = plan_export(&request, options) else {
        log::debug!("export {:?} skipped: no records", request.file_name);
        return Ok(None);
    };

    let v_bytes = encode_export_matrix(&plan.matrix, &plan.widths, options)?;
    let payload = create_delivery_payload(&plan.file_name, v_bytes);

    let mut report = SpecExportReport {
        file_name: payload.file_name.clone(),
        sheet_name: sanitize_sheet_name(&options.sheet_name, "_"),
        columns: plan.schema.columns().to_vec(),
        widths: plan.widths.clone(),
        n_rows_meta: plan.n_rows_meta,
        n_rows_data: plan.matrix.data_rows().len(),
        n_bytes: payload.bytes.len(),
        warnings: vec![],
    };
    for c_msg in &plan.warnings {
        log::warn!("export {:?}: {c_msg}", request.file_name);
        report.warn(c_msg);
    }

    delivery.deliver(payload)?;
    log::info!(
        "exported {} ({} rows, {} bytes)",
        report.file_name,
        report.n_rows_data,
        report.n_bytes
    );

    Ok(Some(report))
}

/// Export front-end bound to one option set and one delivery target.
///
/// Holds no per-request state; every call to [`Self::export`] is independent.
pub struct XlsxExporter<D: DeliveryTarget> {
    options: SpecExportOptions,
    delivery: D,
}

impl<D: DeliveryTarget> XlsxExporter<D> {
    /// Create an exporter with explicit options.
    pub fn new(options: SpecExportOptions, delivery: D) -> Result<Self, ExportError> {
        options.validate()?;
        Ok(Self { options, delivery })
    }

    /// Create an exporter with default options.
    pub fn with_delivery(delivery: D) -> Self {
        Self {
            options: SpecExportOptions::default(),
            delivery,
        }
    }

    /// Options applied to every export.
    pub fn options(&self) -> &SpecExportOptions {
        &self.options
    }

    /// Borrow the delivery target.
    pub fn delivery(&self) -> &D {
        &self.delivery
    }

    /// Consume the exporter, returning the delivery target.
    pub fn into_delivery(self) -> D {
        self.delivery
    }

    /// Run one export; see [`export_records`].
    pub fn export(
        &mut self,
        request: SpecExportRequest,
    ) -> Result<Option<SpecExportReport>, ExportError> {
        export_records(request, &self.options, &mut self.delivery)
    }
}
