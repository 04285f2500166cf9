//! Native-endian primitive reads for the model file.

use crate::error::FastTextError;
use std::io::Read;

/// Thin wrapper over a reader that turns short reads into `ModelLoad` errors
/// naming the field being read.
pub struct BinaryReader<R> {
    inner: R,
}

impl<R: Read> BinaryReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    fn read_array<const N: usize>(&mut self, field: &str) -> Result<[u8; N], FastTextError> {
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf).map_err(|e| {
            FastTextError::ModelLoad(format!("Failed to read {}: {}", field, e))
        })?;
        Ok(buf)
    }

    pub fn read_i32(&mut self, field: &str) -> Result<i32, FastTextError> {
        Ok(i32::from_ne_bytes(self.read_array(field)?))
    }

    pub fn read_i64(&mut self, field: &str) -> Result<i64, FastTextError> {
        Ok(i64::from_ne_bytes(self.read_array(field)?))
    }

    pub fn read_f64(&mut self, field: &str) -> Result<f64, FastTextError> {
        Ok(f64::from_ne_bytes(self.read_array(field)?))
    }

    pub fn read_u8(&mut self, field: &str) -> Result<u8, FastTextError> {
        Ok(self.read_array::<1>(field)?[0])
    }

    pub fn read_bool(&mut self, field: &str) -> Result<bool, FastTextError> {
        Ok(self.read_u8(field)? != 0)
    }

    /// Reads bytes up to (and consuming) a NUL terminator.
    pub fn read_cstring(&mut self, field: &str) -> Result<String, FastTextError> {
        let mut bytes = Vec::new();
        loop {
            let byte = self.read_u8(field)?;
            if byte == 0 {
                break;
            }
            bytes.push(byte);
        }
        String::from_utf8(bytes)
            .map_err(|e| FastTextError::ModelLoad(format!("{} is not valid UTF-8: {}", field, e)))
    }

    /// Reads `len` native-endian f32 values.
    ///
    /// The buffer grows with the bytes actually present, so a corrupt length
    /// fails as a short read instead of a huge up-front allocation.
    pub fn read_f32_vec(&mut self, len: usize, field: &str) -> Result<Vec<f32>, FastTextError> {
        let byte_len = len.checked_mul(4).ok_or_else(|| {
            FastTextError::ModelLoad(format!("{} length {} overflows", field, len))
        })?;
        let mut bytes = Vec::new();
        (&mut self.inner)
            .take(byte_len as u64)
            .read_to_end(&mut bytes)
            .map_err(|e| {
                FastTextError::ModelLoad(format!("Failed to read {} ({} floats): {}", field, len, e))
            })?;
        if bytes.len() != byte_len {
            return Err(FastTextError::ModelLoad(format!(
                "Failed to read {}: expected {} floats, file has {} bytes left",
                field,
                len,
                bytes.len()
            )));
        }

        Ok(bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect())
    }
}
