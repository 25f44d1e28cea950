//! Flat record files: one record per line, rewritten wholesale on save.

use std::{
    fs::{self, File, OpenOptions},
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
    str,
};

use crate::{error::StoreError, record::Record};

/// Outcome of reading a record file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Lines decoded into records
    pub loaded: usize,
    /// Non-blank lines that failed to decode
    pub skipped: usize,
}

/// Create an empty record file (and its directory) if it does not exist yet
///
/// # Errors
///
/// Returns a `StoreError::Io` if the directory or file cannot be created.
pub fn ensure_file(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            action: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }

    OpenOptions::new().create(true).append(true).open(path).map_err(|source| {
        StoreError::Io { action: "create", path: path.to_path_buf(), source }
    })?;
    Ok(())
}

/// Decode every line of `reader` into records
///
/// Blank lines are ignored. Lines that are not UTF-8 text or do not decode are
/// logged and skipped.
///
/// # Errors
///
/// Returns a `StoreError::Io` if reading fails part way.
pub fn read_records<R: Record>(
    mut reader: impl BufRead,
    source: &Path,
) -> Result<(Vec<R>, LoadSummary), StoreError> {
    let mut records = Vec::new();
    let mut summary = LoadSummary::default();
    let mut raw = Vec::new();
    let mut line_no = 0_usize;

    loop {
        raw.clear();
        let read = reader.read_until(b'\n', &mut raw).map_err(|source_err| StoreError::Io {
            action: "read",
            path: source.to_path_buf(),
            source: source_err,
        })?;
        if read == 0 {
            break;
        }
        line_no = line_no.saturating_add(1);

        let decoded = str::from_utf8(&raw)
            .map_err(|err| format!("not UTF-8 text: {err}"))
            .map(|text| text.trim_end_matches(['\r', '\n']));
        let line = match decoded {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => R::from_line(line).map_err(|err| err.to_string()),
            Err(reason) => Err(reason),
        };

        match line {
            Ok(record) => {
                records.push(record);
                summary.loaded = summary.loaded.saturating_add(1);
            }
            Err(reason) => {
                tracing::warn!(
                    file = %source.display(),
                    line = line_no,
                    "skipping malformed record: {reason}"
                );
                summary.skipped = summary.skipped.saturating_add(1);
            }
        }
    }

    Ok((records, summary))
}

/// Read all records from a file, creating it empty when absent
///
/// # Errors
///
/// Returns a `StoreError::Io` if the file cannot be created, opened or read.
pub fn read_records_from_path<R: Record>(
    path: &Path,
) -> Result<(Vec<R>, LoadSummary), StoreError> {
    ensure_file(path)?;
    let file = File::open(path)
        .map_err(|source| StoreError::Io { action: "open", path: path.to_path_buf(), source })?;
    read_records(BufReader::new(file), path)
}

/// Write one line per record
///
/// # Errors
///
/// Returns a `StoreError::Io` if any write fails.
pub fn write_records<'a, R: Record + 'a>(
    writer: &mut impl Write,
    records: impl IntoIterator<Item = &'a R>,
    target: &Path,
) -> Result<(), StoreError> {
    for record in records {
        writeln!(writer, "{}", record.to_line()).map_err(|source| StoreError::Io {
            action: "write",
            path: target.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Overwrite a file with the given records
///
/// # Errors
///
/// Returns a `StoreError::Io` if the file cannot be created or written.
pub fn write_records_to_path<'a, R: Record + 'a>(
    path: &Path,
    records: impl IntoIterator<Item = &'a R>,
) -> Result<(), StoreError> {
    tracing::debug!(file = %path.display(), "rewriting record file");

    let file = File::create(path)
        .map_err(|source| StoreError::Io { action: "create", path: path.to_path_buf(), source })?;
    let mut writer = BufWriter::new(file);
    write_records(&mut writer, records, path)?;
    writer
        .flush()
        .map_err(|source| StoreError::Io { action: "write", path: path.to_path_buf(), source })
}
