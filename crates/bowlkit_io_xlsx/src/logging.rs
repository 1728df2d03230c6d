//! One-shot logger setup for hosts embedding the export engine.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Once;

use log::LevelFilter;

use crate::error::ExportError;

static INIT_LOGGER: Once = Once::new();

/// Route the engine's `log` records to stderr, or append them to `log_file`.
///
/// Only the first call installs a logger; later calls return `Ok(())` untouched.
pub fn enable_verbose_logging(log_file: Option<&Path>) -> Result<(), ExportError> {
    if INIT_LOGGER.is_completed() {
        return Ok(());
    }

    let target = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .append(true)
                .create(true)
                .open(path)
                .map_err(|source| ExportError::LogFile {
                    path: path.to_path_buf(),
                    source,
                })?;
            env_logger::Target::Pipe(Box::new(file))
        }
        None => env_logger::Target::Stderr,
    };

    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(LevelFilter::Info);
        builder.format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()));
        builder.target(target);
        let _ = builder.try_init();
    });
    Ok(())
}
