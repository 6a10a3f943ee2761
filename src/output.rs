//! Output file writing and stale-file cleanup.
//!
//! Each chunk is base64-encoded fully in memory and then written to its
//! index-named file (`<prefix>NNN<extension>`), so a failed write never
//! leaves a truncated file behind. Files from previous runs that match the
//! output pattern are removed before anything is written.

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::config::OutputConfig;
use crate::models::Chunk;

/// Per-file counters for the end-of-run summary.
#[derive(Debug, Default, Clone, Copy)]
pub struct WriteReport {
    pub files_written: usize,
    pub files_failed: usize,
    pub bytes_written: u64,
}

/// File name for a 1-based chunk index, e.g. `base64-001.txt`.
pub fn file_name(output: &OutputConfig, index: usize) -> String {
    format!(
        "{}{:03}{}",
        output.file_prefix, index, output.file_extension
    )
}

/// Whether `name` matches the output pattern `<prefix><digits><extension>`.
fn matches_pattern(output: &OutputConfig, name: &str) -> bool {
    let Some(rest) = name.strip_prefix(output.file_prefix.as_str()) else {
        return false;
    };
    let Some(digits) = rest.strip_suffix(output.file_extension.as_str()) else {
        return false;
    };
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Remove output files left over from a previous run.
///
/// Scans the output directory for files matching the output pattern and
/// deletes each one. Per-file failures are logged and skipped. Returns the
/// number of files removed. A missing output directory counts as already
/// clean.
pub fn clean_stale_files(output: &OutputConfig) -> Result<usize> {
    if !output.dir.exists() {
        return Ok(0);
    }

    let entries = std::fs::read_dir(&output.dir).with_context(|| {
        format!("Failed to read output directory: {}", output.dir.display())
    })?;

    let mut removed = 0;
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                eprintln!("Warning: failed to read directory entry: {}", e);
                continue;
            }
        };

        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !matches_pattern(output, name) {
            continue;
        }
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }

        match std::fs::remove_file(entry.path()) {
            Ok(()) => removed += 1,
            Err(e) => eprintln!(
                "Warning: failed to remove {}: {}",
                entry.path().display(),
                e
            ),
        }
    }

    Ok(removed)
}

/// Base64-encode each chunk and write it to its index-named file.
///
/// A failed write is logged and the batch continues with the next file.
pub fn write_chunks(output: &OutputConfig, chunks: &[Chunk]) -> WriteReport {
    let mut report = WriteReport::default();

    for chunk in chunks {
        let encoded = STANDARD.encode(chunk.text.as_bytes());
        let path = output.dir.join(file_name(output, chunk.index));

        match std::fs::write(&path, &encoded) {
            Ok(()) => {
                println!(
                    "wrote {} ({} bytes, {} lines)",
                    path.display(),
                    encoded.len(),
                    chunk.line_count
                );
                report.files_written += 1;
                report.bytes_written += encoded.len() as u64;
            }
            Err(e) => {
                eprintln!("Warning: failed to write {}: {}", path.display(), e);
                report.files_failed += 1;
            }
        }
    }

    report
}
