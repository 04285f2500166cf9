//! Header validation for fastText model files.
//!
//! A model file starts with a 4-byte magic number followed by a 4-byte format
//! version, both native-endian signed integers. [`check_model`] reads only
//! that prefix, so it is cheap enough to call before committing to a full
//! load.

use crate::config::{FASTTEXT_VERSION, FILEFORMAT_MAGIC_INT32};
use crate::error::FastTextError;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Returns true if the file at `path` carries a supported model header.
///
/// Missing, unreadable, or short files are reported as `false`; this never
/// returns an error and never touches any loaded model.
pub fn check_model(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    match File::open(path) {
        Ok(mut file) => check_stream(&mut file),
        Err(e) => {
            debug!("Cannot open {} for header check: {}", path.display(), e);
            false
        }
    }
}

/// Header check over an arbitrary reader.
///
/// Reads the magic value first and stops without reading the version if it
/// does not match.
pub fn check_stream<R: Read>(reader: &mut R) -> bool {
    match read_i32(reader) {
        Some(magic) if magic == FILEFORMAT_MAGIC_INT32 => {}
        _ => return false,
    }
    matches!(read_i32(reader), Some(version) if version == FASTTEXT_VERSION)
}

/// Header check used by the model reader, reporting what was found.
pub fn verify_header<R: Read>(reader: &mut R) -> Result<(), FastTextError> {
    let magic = read_i32(reader).ok_or_else(|| {
        FastTextError::InvalidModelHeader("file too short for magic number".to_string())
    })?;
    if magic != FILEFORMAT_MAGIC_INT32 {
        return Err(FastTextError::InvalidModelHeader(format!(
            "bad magic number {}",
            magic
        )));
    }

    let version = read_i32(reader).ok_or_else(|| {
        FastTextError::InvalidModelHeader("file too short for version".to_string())
    })?;
    if version != FASTTEXT_VERSION {
        return Err(FastTextError::InvalidModelHeader(format!(
            "unsupported version {} (expected {})",
            version, FASTTEXT_VERSION
        )));
    }

    Ok(())
}

fn read_i32<R: Read>(reader: &mut R) -> Option<i32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf).ok()?;
    Some(i32::from_ne_bytes(buf))
}
