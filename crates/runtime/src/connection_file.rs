//! Connection file persistence.
//!
//! A session owner publishes its [`ConnectionFile`] so other processes can
//! join the kernel. Writes go through a temporary file in the destination
//! directory followed by a rename, so readers only ever see a complete record
//! and a failed write leaves nothing behind. The temporary file is created
//! with owner-only permissions on Unix, since the record carries the session
//! key.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use kc_protocol::ConnectionFile;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Conventional location of the connection file for `kernel_id` inside `dir`.
pub fn connection_file_path(dir: &Path, kernel_id: &str) -> PathBuf {
	dir.join(format!("kernel-{kernel_id}.json"))
}

/// Writes `record` to `path`, replacing any existing file.
///
/// # Errors
///
/// - [`Error::Io`] if the directory is missing or not writable
/// - [`Error::Serialize`] if the record cannot be encoded
pub fn write_connection_file(path: &Path, record: &ConnectionFile) -> Result<()> {
	info!(target = "kc.connection_file", path = %path.display(), kernel = record.kernel_name(), "writing connection info");

	let content = record.to_json_vec()?;
	let io_err = |source: std::io::Error| Error::Io { path: path.to_path_buf(), source };

	let dir = match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};
	let mut tmp = tempfile::Builder::new()
		.prefix(".kernel-")
		.suffix(".json.tmp")
		.tempfile_in(dir)
		.map_err(io_err)?;
	tmp.write_all(&content).map_err(io_err)?;
	tmp.as_file().sync_all().map_err(io_err)?;
	tmp.persist(path).map_err(|err| io_err(err.error))?;

	Ok(())
}

/// Reads and validates the connection file at `path`.
///
/// # Errors
///
/// - [`Error::Io`] if the file cannot be read
/// - [`Error::Format`] if a required field is missing or mistyped
pub fn read_connection_file(path: &Path) -> Result<ConnectionFile> {
	let content = fs::read(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
	let record = ConnectionFile::from_json_slice(&content)
		.map_err(|source| Error::Format { path: path.to_path_buf(), source })?;

	debug!(
		target = "kc.connection_file",
		path = %path.display(),
		kernel = record.kernel_name(),
		transport = %record.info().transport(),
		"connection file loaded"
	);
	Ok(record)
}

/// Removes the connection file at `path`.
///
/// Returns `Ok(false)` when there was nothing to remove.
pub fn remove_connection_file(path: &Path) -> Result<bool> {
	match fs::remove_file(path) {
		Ok(()) => {
			debug!(target = "kc.connection_file", path = %path.display(), "connection file removed");
			Ok(true)
		}
		Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
		Err(source) => Err(Error::Io { path: path.to_path_buf(), source }),
	}
}

#[cfg(test)]
mod tests;
