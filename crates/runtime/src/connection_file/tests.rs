use kc_protocol::{ChannelPorts, ChannelRole, ConnectionInfo, FormatError, Transport};
use tempfile::tempdir;

use super::*;

fn sample() -> ConnectionFile {
	let info = ConnectionInfo::new(
		Transport::Tcp,
		"127.0.0.1",
		"python3",
		ChannelPorts { shell: 5555, iopub: 5556, stdin: 5557, control: 5558, hb: 5559 },
	)
	.unwrap();
	ConnectionFile::new(info, "abc123", "hmac-sha256")
}

#[test]
fn round_trip_preserves_every_field() {
	let dir = tempdir().unwrap();
	let path = connection_file_path(dir.path(), "1234");
	let record = sample();

	write_connection_file(&path, &record).unwrap();
	let loaded = read_connection_file(&path).unwrap();

	assert_eq!(loaded, record);
	let info = loaded.info();
	assert_eq!(info.transport(), Transport::Tcp);
	assert_eq!(info.host(), "127.0.0.1");
	for role in ChannelRole::ALL {
		assert_eq!(info.port(role), record.info().port(role), "role {role}");
	}
	assert_eq!(loaded.key(), "abc123");
	assert_eq!(loaded.signature_scheme(), "hmac-sha256");
	assert_eq!(loaded.kernel_name(), "python3");
}

#[test]
fn file_contains_the_expected_fields() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("kernel.json");

	write_connection_file(&path, &sample()).unwrap();
	let text = std::fs::read_to_string(&path).unwrap();

	assert!(text.contains("\"shell_port\": 5555"));
	assert!(text.contains("\"control_port\": 5558"));
	assert!(text.contains("\"transport\": \"tcp\""));
	assert!(text.starts_with("{\n    \"transport\""));
}

#[test]
fn repeated_writes_are_byte_identical() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("kernel.json");

	write_connection_file(&path, &sample()).unwrap();
	let first = std::fs::read(&path).unwrap();
	write_connection_file(&path, &sample()).unwrap();
	let second = std::fs::read(&path).unwrap();

	assert_eq!(first, second);
}

#[test]
fn overwrite_truncates_previous_content() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("kernel.json");
	std::fs::write(&path, "x".repeat(4096)).unwrap();

	write_connection_file(&path, &sample()).unwrap();

	assert_eq!(read_connection_file(&path).unwrap(), sample());
	assert_eq!(std::fs::read(&path).unwrap(), sample().to_json_vec().unwrap());
}

#[test]
fn missing_directory_is_an_io_error_and_leaves_no_file() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("does-not-exist").join("kernel.json");

	let err = write_connection_file(&path, &sample()).unwrap_err();

	assert!(matches!(err, Error::Io { .. }), "unexpected error: {err}");
	assert_eq!(err.path(), Some(path.as_path()));
	assert!(!path.exists());
	assert!(read_connection_file(&path).is_err());
}

#[test]
fn no_temporary_files_left_after_write() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("kernel.json");

	write_connection_file(&path, &sample()).unwrap();

	let names: Vec<_> = std::fs::read_dir(dir.path())
		.unwrap()
		.map(|entry| entry.unwrap().file_name().into_string().unwrap())
		.collect();
	assert_eq!(names, ["kernel.json"]);
}

#[cfg(unix)]
#[test]
fn written_file_is_owner_only() {
	use std::os::unix::fs::PermissionsExt;

	let dir = tempdir().unwrap();
	let path = dir.path().join("kernel.json");
	write_connection_file(&path, &sample()).unwrap();

	let mode = std::fs::metadata(&path).unwrap().permissions().mode();
	assert_eq!(mode & 0o077, 0, "mode {mode:o}");
}

#[test]
fn missing_field_is_reported_with_path_and_name() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("kernel.json");
	std::fs::write(&path, r#"{"transport": "tcp", "ip": "127.0.0.1", "key": "k"}"#).unwrap();

	let err = read_connection_file(&path).unwrap_err();
	match &err {
		Error::Format { path: p, source } => {
			assert_eq!(p, &path);
			assert!(matches!(source, FormatError::MissingField("shell_port")), "unexpected source: {source}");
		}
		other => panic!("unexpected error: {other}"),
	}
	assert!(err.to_string().contains("kernel.json"));
}

#[test]
fn reading_a_missing_file_is_an_io_error() {
	let dir = tempdir().unwrap();
	let err = read_connection_file(&dir.path().join("absent.json")).unwrap_err();
	assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn remove_reports_whether_a_file_existed() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("kernel.json");
	write_connection_file(&path, &sample()).unwrap();

	assert!(remove_connection_file(&path).unwrap());
	assert!(!path.exists());
	assert!(!remove_connection_file(&path).unwrap());
}

#[test]
fn path_follows_kernel_naming_convention() {
	let path = connection_file_path(Path::new("/run/user/1000/jupyter"), "a1b2");
	assert_eq!(path, Path::new("/run/user/1000/jupyter/kernel-a1b2.json"));
}
