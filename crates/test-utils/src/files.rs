//! Temporary file helpers.

use std::io::Write;

use tempfile::NamedTempFile;

/// Write `contents` to a fresh temporary file with the given suffix.
///
/// The file is removed when the returned handle is dropped.
pub fn temp_file_with(contents: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

/// Temporary `.csv` file holding `contents`.
pub fn temp_csv(contents: &str) -> NamedTempFile {
    temp_file_with(contents, ".csv")
}
