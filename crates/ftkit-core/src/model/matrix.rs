//! Dense row-major matrices backed by Candle tensors.

use super::reader::BinaryReader;
use crate::error::FastTextError;
use candle_core::{Device, Tensor};
use std::io::Read;

/// A `rows x cols` f32 matrix held on the CPU.
#[derive(Debug, Clone)]
pub struct DenseMatrix {
    tensor: Tensor,
    rows: usize,
    cols: usize,
}

impl DenseMatrix {
    /// Builds a matrix from row-major values.
    pub fn from_vec(data: Vec<f32>, rows: usize, cols: usize) -> Result<Self, FastTextError> {
        if data.len() != rows * cols {
            return Err(FastTextError::ModelLoad(format!(
                "matrix data has {} values, expected {}x{}",
                data.len(),
                rows,
                cols
            )));
        }
        let tensor = Tensor::from_vec(data, (rows, cols), &Device::Cpu).map_err(|e| {
            FastTextError::ModelLoad(format!("Failed to create matrix tensor: {}", e))
        })?;
        Ok(Self { tensor, rows, cols })
    }

    /// Reads `i64 rows, i64 cols` followed by the values.
    pub(crate) fn load<R: Read>(
        reader: &mut BinaryReader<R>,
        name: &str,
    ) -> Result<Self, FastTextError> {
        let rows = reader.read_i64(name)?;
        let cols = reader.read_i64(name)?;
        if rows < 0 || cols < 0 {
            return Err(FastTextError::ModelLoad(format!(
                "{} has negative shape {}x{}",
                name, rows, cols
            )));
        }
        let (rows, cols) = (rows as usize, cols as usize);
        let len = rows.checked_mul(cols).ok_or_else(|| {
            FastTextError::ModelLoad(format!("{} shape {}x{} overflows", name, rows, cols))
        })?;
        let data = reader.read_f32_vec(len, name)?;
        Self::from_vec(data, rows, cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn check_ids(&self, ids: &[i32]) -> Result<(), FastTextError> {
        match ids.iter().find(|&&id| id < 0 || id as usize >= self.rows) {
            Some(&bad) => Err(FastTextError::Inference(format!(
                "row {} outside matrix with {} rows",
                bad, self.rows
            ))),
            None => Ok(()),
        }
    }

    /// Copy of a single row.
    pub fn row(&self, id: i32) -> Result<Vec<f32>, FastTextError> {
        self.check_ids(&[id])?;
        Ok(self.tensor.get(id as usize)?.to_vec1::<f32>()?)
    }

    /// Mean of the given rows; zeros when `ids` is empty.
    pub fn mean_rows(&self, ids: &[i32]) -> Result<Vec<f32>, FastTextError> {
        if ids.is_empty() {
            return Ok(vec![0.0; self.cols]);
        }
        self.check_ids(ids)?;

        let index: Vec<u32> = ids.iter().map(|&id| id as u32).collect();
        let index = Tensor::from_vec(index, ids.len(), &Device::Cpu)?;
        let mean = self
            .tensor
            .index_select(&index, 0)?
            .sum(0)?
            .affine(1.0 / ids.len() as f64, 0.0)?;
        Ok(mean.to_vec1::<f32>()?)
    }

    /// Matrix-vector product: one dot product per row.
    pub fn mul_vec(&self, vec: &[f32]) -> Result<Vec<f32>, FastTextError> {
        if vec.len() != self.cols {
            return Err(FastTextError::Inference(format!(
                "vector length {} does not match {} columns",
                vec.len(),
                self.cols
            )));
        }
        if self.rows == 0 {
            return Ok(Vec::new());
        }
        let column = Tensor::from_slice(vec, (self.cols, 1), &Device::Cpu)?;
        let product = self.tensor.matmul(&column)?.squeeze(1)?;
        Ok(product.to_vec1::<f32>()?)
    }
}
