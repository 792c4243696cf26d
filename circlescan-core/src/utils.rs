use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::Compression;
use flate2::write::GzEncoder;

use crate::errors::CircleScanError;

///
/// Check that an output path can be created: its parent directory must already exist.
///
/// A bare file name has the current directory as its parent.
///
pub fn validate_sink(path: &Path) -> std::result::Result<(), CircleScanError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => return Ok(()),
    };

    if !parent.is_dir() {
        return Err(CircleScanError::InvalidSink(format!(
            "parent directory {} does not exist",
            parent.display()
        )));
    }

    Ok(())
}

///
/// Get a writer for either a gzip'd or non-gzip'd file, chosen by the `.gz` extension.
///
/// # Arguments
///
/// - path: path to the file to write
///
pub fn get_dynamic_writer(path: &Path) -> Result<BufWriter<Box<dyn Write>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::create(path).with_context(|| format!("Failed to create file: {:?}", path))?;
    let file: Box<dyn Write> = match is_gzipped {
        true => Box::new(GzEncoder::new(file, Compression::default())),
        false => Box::new(file),
    };

    Ok(BufWriter::new(file))
}

/// Reverse complement of a nucleotide sequence. IUPAC codes other than ACGTN pass through.
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter()
        .rev()
        .map(|base| match base {
            b'A' => b'T',
            b'C' => b'G',
            b'G' => b'C',
            b'T' => b'A',
            b'a' => b't',
            b'c' => b'g',
            b'g' => b'c',
            b't' => b'a',
            other => *other,
        })
        .collect()
}
