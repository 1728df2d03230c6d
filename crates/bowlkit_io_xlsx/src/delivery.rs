//! Delivery targets that receive encoded workbooks.

use std::path::{Path, PathBuf};

use crate::conf::{C_EXT_XLSX, C_MIME_XLSX};
use crate::error::ExportError;
use crate::spec::SpecDeliveryPayload;

/// Host-side save mechanism for an encoded workbook.
///
/// Implementations report failures through the returned `Result`; the engine
/// never retries.
pub trait DeliveryTarget {
    /// Persist or hand off one payload.
    fn deliver(&mut self, payload: SpecDeliveryPayload) -> Result<(), ExportError>;
}

impl<T: DeliveryTarget + ?Sized> DeliveryTarget for &mut T {
    fn deliver(&mut self, payload: SpecDeliveryPayload) -> Result<(), ExportError> {
        (**self).deliver(payload)
    }
}

/// Append the workbook extension to a base file name.
pub fn derive_delivery_file_name(base_name: &str) -> String {
    format!("{base_name}.{C_EXT_XLSX}")
}

/// Wrap encoded bytes with the delivered file name and MIME type.
pub fn create_delivery_payload(base_name: &str, bytes: Vec<u8>) -> SpecDeliveryPayload {
    SpecDeliveryPayload {
        file_name: derive_delivery_file_name(base_name),
        mime_type: C_MIME_XLSX.to_string(),
        bytes,
    }
}

////////////////////////////////////////////////////////////////////////////////
// #region DirectoryDelivery

/// Writes each payload as a file inside one directory.
#[derive(Debug, Clone)]
pub struct DirectoryDelivery {
    path_dir_out: PathBuf,
}

impl DirectoryDelivery {
    /// Target `path_dir_out`; it is created on first delivery when missing.
    pub fn new(path_dir_out: impl Into<PathBuf>) -> Self {
        Self {
            path_dir_out: path_dir_out.into(),
        }
    }

    /// Output directory.
    pub fn dir_out(&self) -> &Path {
        &self.path_dir_out
    }

    /// Resolve the destination path for `file_name`.
    pub fn derive_path_file_out(&self, file_name: &str) -> Result<PathBuf, ExportError> {
        validate_plain_file_name(file_name)?;
        Ok(self.path_dir_out.join(file_name))
    }
}

impl DeliveryTarget for DirectoryDelivery {
    fn deliver(&mut self, payload: SpecDeliveryPayload) -> Result<(), ExportError> {
        let path_file_out = self.derive_path_file_out(&payload.file_name)?;

        std::fs::create_dir_all(&self.path_dir_out).map_err(|source| ExportError::Delivery {
            path: self.path_dir_out.clone(),
            source,
        })?;
        std::fs::write(&path_file_out, &payload.bytes).map_err(|source| {
            ExportError::Delivery {
                path: path_file_out.clone(),
                source,
            }
        })?;

        log::debug!(
            "wrote {} ({} bytes, {})",
            path_file_out.display(),
            payload.bytes.len(),
            payload.mime_type
        );
        Ok(())
    }
}

/// Reject names that would escape the output directory.
fn validate_plain_file_name(file_name: &str) -> Result<(), ExportError> {
    let c_stem = file_name
        .strip_suffix(&format!(".{C_EXT_XLSX}"))
        .unwrap_or(file_name);
    if c_stem.trim().is_empty()
        || c_stem == "."
        || c_stem == ".."
        || file_name.contains(['/', '\\', '\0'])
    {
        return Err(ExportError::InvalidFileName(file_name.to_string()));
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region MemoryDelivery

/// Keeps delivered payloads in memory, in delivery order.
#[derive(Debug, Clone, Default)]
pub struct MemoryDelivery {
    payloads: Vec<SpecDeliveryPayload>,
}

impl MemoryDelivery {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Payloads received so far.
    pub fn payloads(&self) -> &[SpecDeliveryPayload] {
        &self.payloads
    }

    /// Take ownership of the received payloads.
    pub fn into_payloads(self) -> Vec<SpecDeliveryPayload> {
        self.payloads
    }
}

impl DeliveryTarget for MemoryDelivery {
    fn deliver(&mut self, payload: SpecDeliveryPayload) -> Result<(), ExportError> {
        self.payloads.push(payload);
        Ok(())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_delivery_payload_names_and_types() {
        let payload = create_delivery_payload("reporte_equipos", vec![1, 2, 3]);
        assert_eq!(payload.file_name, "reporte_equipos.xlsx");
        assert_eq!(
            payload.mime_type,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(payload.bytes, vec![1, 2, 3]);
    }

    #[test]
    fn test_directory_delivery_writes_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_dir_out = tmp.path().join("descargas");
        let mut delivery = DirectoryDelivery::new(&path_dir_out);

        delivery
            .deliver(create_delivery_payload("sucursales", b"PK".to_vec()))
            .expect("deliver");

        let v_bytes = std::fs::read(path_dir_out.join("sucursales.xlsx")).expect("read back");
        assert_eq!(v_bytes, b"PK");
    }

    #[test]
    fn test_directory_delivery_rejects_path_like_names() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut delivery = DirectoryDelivery::new(tmp.path());

        for c_name in ["../fuera", "a/b", "", ".."] {
            let err = delivery
                .deliver(create_delivery_payload(c_name, vec![]))
                .unwrap_err();
            assert!(matches!(err, ExportError::InvalidFileName(_)), "{c_name:?}");
        }
    }

    #[test]
    fn test_directory_delivery_reports_io_failure() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_blocker = tmp.path().join("ocupado");
        std::fs::write(&path_blocker, b"file, not dir").expect("write blocker");
        let mut delivery = DirectoryDelivery::new(&path_blocker);

        let err = delivery
            .deliver(create_delivery_payload("x", vec![]))
            .unwrap_err();
        assert!(matches!(err, ExportError::Delivery { .. }));
    }

    #[test]
    fn test_memory_delivery_collects_in_order() {
        let mut delivery = MemoryDelivery::new();
        delivery
            .deliver(create_delivery_payload("a", vec![]))
            .expect("deliver a");
        delivery
            .deliver(create_delivery_payload("b", vec![]))
            .expect("deliver b");

        let l_names: Vec<_> = delivery.payloads().iter().map(|p| p.file_name.as_str()).collect();
        assert_eq!(l_names, vec!["a.xlsx", "b.xlsx"]);
    }
}
