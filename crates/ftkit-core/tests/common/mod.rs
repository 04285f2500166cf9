//! Synthetic model files for integration tests.
//!
//! [`ModelFixture`] serializes the fastText binary layout so tests can build
//! small models with known weights instead of shipping trained ones.

#![allow(dead_code)]

use ftkit_core::config::{FASTTEXT_VERSION, FILEFORMAT_MAGIC_INT32};
use std::path::{Path, PathBuf};

pub const LOSS_HS: i32 = 1;
pub const LOSS_NS: i32 = 2;
pub const LOSS_SOFTMAX: i32 = 3;

pub const MODEL_CBOW: i32 = 1;
pub const MODEL_SG: i32 = 2;
pub const MODEL_SUP: i32 = 3;

/// In-memory description of a model file.
#[derive(Debug, Clone)]
pub struct ModelFixture {
    pub magic: i32,
    pub version: i32,
    pub dim: i32,
    pub loss: i32,
    pub model: i32,
    pub bucket: i32,
    pub minn: i32,
    pub maxn: i32,
    pub word_ngrams: i32,
    pub words: Vec<(String, i64)>,
    pub labels: Vec<(String, i64)>,
    /// Row-major input matrix, `nwords + bucket` rows
    pub input: Vec<f32>,
    /// Row-major output matrix
    pub output: Vec<f32>,
    pub output_rows: usize,
    pub quantized_input: bool,
    /// Row count written into the input matrix header instead of the real one
    pub declared_input_rows: Option<i64>,
}

impl ModelFixture {
    /// Supervised model with no subword buckets.
    pub fn supervised(dim: i32, loss: i32) -> Self {
        Self {
            magic: FILEFORMAT_MAGIC_INT32,
            version: FASTTEXT_VERSION,
            dim,
            loss,
            model: MODEL_SUP,
            bucket: 0,
            minn: 0,
            maxn: 0,
            word_ngrams: 1,
            words: Vec::new(),
            labels: Vec::new(),
            input: Vec::new(),
            output: Vec::new(),
            output_rows: 0,
            quantized_input: false,
            declared_input_rows: None,
        }
    }

    /// Unsupervised model with character n-grams.
    pub fn unsupervised(dim: i32, model: i32, minn: i32, maxn: i32, bucket: i32) -> Self {
        Self {
            model,
            minn,
            maxn,
            bucket,
            loss: LOSS_NS,
            ..Self::supervised(dim, LOSS_NS)
        }
    }

    pub fn word(mut self, word: &str, count: i64) -> Self {
        self.words.push((word.to_string(), count));
        self
    }

    pub fn label(mut self, label: &str, count: i64) -> Self {
        self.labels.push((label.to_string(), count));
        self
    }

    pub fn input_rows(mut self, rows: &[&[f32]]) -> Self {
        self.input = rows.iter().flat_map(|r| r.iter().copied()).collect();
        self
    }

    pub fn output_rows(mut self, rows: &[&[f32]]) -> Self {
        self.output = rows.iter().flat_map(|r| r.iter().copied()).collect();
        self.output_rows = rows.len();
        self
    }

    pub fn input_row_count(&self) -> usize {
        self.words.len() + self.bucket as usize
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        put_i32(&mut out, self.magic);
        put_i32(&mut out, self.version);

        // args
        for value in [
            self.dim,
            5, // ws
            5, // epoch
            1, // minCount
            5, // neg
            self.word_ngrams,
            self.loss,
            self.model,
            self.bucket,
            self.minn,
            self.maxn,
            100, // lrUpdateRate
        ] {
            put_i32(&mut out, value);
        }
        out.extend_from_slice(&1e-4f64.to_ne_bytes());

        // dictionary
        let size = self.words.len() + self.labels.len();
        put_i32(&mut out, size as i32);
        put_i32(&mut out, self.words.len() as i32);
        put_i32(&mut out, self.labels.len() as i32);
        let ntokens: i64 = self.words.iter().map(|(_, c)| c).sum();
        out.extend_from_slice(&ntokens.to_ne_bytes());
        out.extend_from_slice(&(-1i64).to_ne_bytes());
        for (entry, kind) in self
            .words
            .iter()
            .map(|w| (w, 0u8))
            .chain(self.labels.iter().map(|l| (l, 1u8)))
        {
            out.extend_from_slice(entry.0.as_bytes());
            out.push(0);
            out.extend_from_slice(&entry.1.to_ne_bytes());
            out.push(kind);
        }

        out.push(self.quantized_input as u8);
        let declared = self
            .declared_input_rows
            .unwrap_or(self.input_row_count() as i64);
        put_matrix(&mut out, &self.input, self.input_row_count(), declared, self.dim as usize);
        out.push(0);
        put_matrix(
            &mut out,
            &self.output,
            self.output_rows,
            self.output_rows as i64,
            self.dim as usize,
        );
        out
    }

    /// Writes the model into `dir` and returns its path.
    pub fn write(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, self.to_bytes()).expect("Failed to write model fixture");
        path
    }
}

fn put_i32(out: &mut Vec<u8>, value: i32) {
    out.extend_from_slice(&value.to_ne_bytes());
}

fn put_matrix(out: &mut Vec<u8>, data: &[f32], rows: usize, declared_rows: i64, cols: usize) {
    assert_eq!(data.len(), rows * cols, "fixture matrix shape mismatch");
    out.extend_from_slice(&declared_rows.to_ne_bytes());
    out.extend_from_slice(&(cols as i64).to_ne_bytes());
    for value in data {
        out.extend_from_slice(&value.to_ne_bytes());
    }
}

/// Three-label negative-sampling classifier. Every word maps to `[1, 0]`,
/// so any line scores `2`, `1` and `-2` for labels a, b and c.
pub fn ns_classifier() -> ModelFixture {
    ModelFixture::supervised(2, LOSS_NS)
        .word("</s>", 10)
        .word("the", 8)
        .word("quick", 4)
        .word("fox", 2)
        .label("__label__a", 5)
        .label("__label__b", 3)
        .label("__label__c", 1)
        .input_rows(&[&[1.0, 0.0], &[1.0, 0.0], &[1.0, 0.0], &[1.0, 0.0]])
        .output_rows(&[&[2.0, 0.0], &[1.0, 0.0], &[-2.0, 0.0]])
}

/// Three-label hierarchical-softmax classifier over a single word.
pub fn hs_classifier() -> ModelFixture {
    ModelFixture::supervised(2, LOSS_HS)
        .word("</s>", 10)
        .word("hello", 3)
        .label("__label__x", 10)
        .label("__label__y", 5)
        .label("__label__z", 1)
        .input_rows(&[&[0.0, 0.0], &[1.0, -0.5]])
        .output_rows(&[&[0.7, 0.1], &[-1.3, 0.4]])
}

/// Softmax classifier with `wordNgrams = 2` and 5 buckets. Input row `i` is
/// `[i, 1]`, so a sentence vector reveals which rows were averaged.
pub fn bigram_classifier() -> ModelFixture {
    let mut fixture = ModelFixture::supervised(2, LOSS_SOFTMAX)
        .word("</s>", 10)
        .word("the", 8)
        .word("quick", 4)
        .label("__label__a", 5)
        .label("__label__b", 3);
    fixture.word_ngrams = 2;
    fixture.bucket = 5;
    let rows: Vec<[f32; 2]> = (0..fixture.input_row_count())
        .map(|i| [i as f32, 1.0])
        .collect();
    let refs: Vec<&[f32]> = rows.iter().map(|r| r.as_slice()).collect();
    fixture
        .input_rows(&refs)
        .output_rows(&[&[1.0, 0.0], &[-1.0, 0.0]])
}

/// Unsupervised model with `minn = 3`, `maxn = 4` and 10 buckets. Input row
/// `i` is `[i, 1]`.
pub fn cbow_model() -> ModelFixture {
    let fixture = ModelFixture::unsupervised(2, MODEL_CBOW, 3, 4, 10)
        .word("</s>", 10)
        .word("fox", 3);
    let rows: Vec<[f32; 2]> = (0..fixture.input_row_count())
        .map(|i| [i as f32, 1.0])
        .collect();
    let refs: Vec<&[f32]> = rows.iter().map(|r| r.as_slice()).collect();
    fixture.input_rows(&refs).output_rows(&[&[0.0, 0.0], &[0.0, 0.0]])
}
