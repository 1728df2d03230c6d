//! `bowlkit_io_xlsx` v1:
//! tabular export engine for the tournament admin client.
//!
//! Records go through a linear pipeline and come out as one `.xlsx` file:
//! - `schema`    : column schema inference
//! - `project`   : row projection and numeric rounding
//! - `matrix`    : metadata/separator/header/data assembly
//! - `width`     : column width estimation
//! - `writer`    : single-sheet workbook encoder
//! - `delivery`  : delivery targets for the encoded bytes
//! - `exporter`  : the caller-facing engine
//!
//! Supporting modules: `conf` (constants), `spec` (models/options),
//! `util` (helpers), `source` (frame/IPC/JSON record sources),
//! `error`, `logging`.
pub mod conf;
pub mod delivery;
pub mod error;
pub mod exporter;
pub mod logging;
pub mod matrix;
pub mod project;
pub mod schema;
pub mod source;
pub mod spec;
pub mod util;
pub mod width;
pub mod writer;

pub use conf::{C_EXT_XLSX, C_MIME_XLSX, C_SHEET_NAME_RESULTS, derive_default_export_options};
pub use delivery::{DeliveryTarget, DirectoryDelivery, MemoryDelivery, derive_delivery_file_name};
pub use error::ExportError;
pub use exporter::{XlsxExporter, export_records, plan_export};
pub use logging::enable_verbose_logging;
pub use matrix::assemble_export_matrix;
pub use project::{project_record, project_records, round_half_up};
pub use schema::{infer_column_schema, resolve_column_schema};
pub use source::{
    derive_records_from_dataframe, derive_records_from_ipc_bytes, derive_records_from_json_str,
    derive_records_from_json_value,
};
pub use spec::{
    EnumCellValue, SpecColumnSchema, SpecDeliveryPayload, SpecExportMatrix, SpecExportOptions,
    SpecExportPlan, SpecExportReport, SpecExportRequest, SpecRecord,
};
pub use width::{estimate_column_widths, stringify_cell_value};
pub use writer::encode_export_matrix;
