//! Command implementations.
//!
//! Each command loads the model through the facade and returns plain data;
//! formatting lives in `output`.

use anyhow::{anyhow, bail, Context, Result};
use ftkit_core::{FastTextApi, Prediction};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::info;

/// One dictionary row for `dump dict`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DictEntry {
    pub entry: String,
    pub count: i64,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// Opens `input` for reading, with `-` meaning stdin.
pub fn open_input(input: &str) -> Result<Box<dyn BufRead>> {
    if input == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(input).with_context(|| format!("Failed to open input: {}", input))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Loads the model after checking its header.
pub fn load_model(path: &Path) -> Result<FastTextApi> {
    if !FastTextApi::check_model(path) {
        bail!("{} is not a supported fastText model", path.display());
    }
    let mut api = FastTextApi::new();
    api.load_model(path)
        .with_context(|| format!("Failed to load model: {}", path.display()))?;
    info!(
        "Loaded {} model with {} words and {} labels",
        api.model_name()?,
        api.nwords()?,
        api.nlabels()?
    );
    Ok(api)
}

/// Ranked labels for every input line.
pub fn predict<R: BufRead>(
    api: &FastTextApi,
    reader: R,
    k: i32,
    threshold: f32,
) -> Result<Vec<Vec<Prediction>>> {
    let mut results = Vec::new();
    for line in reader.lines() {
        let line = line.context("Failed to read input line")?;
        results.push(api.predict_proba(&line, k, threshold)?);
    }
    Ok(results)
}

/// Vector of every whitespace-separated word in the input.
pub fn word_vectors<R: BufRead>(api: &FastTextApi, reader: R) -> Result<Vec<(String, Vec<f32>)>> {
    let mut results = Vec::new();
    for line in reader.lines() {
        let line = line.context("Failed to read input line")?;
        for word in line.split_whitespace() {
            results.push((word.to_string(), api.word_vector(word)?));
        }
    }
    Ok(results)
}

/// One sentence vector per input line.
pub fn sentence_vectors<R: BufRead>(api: &FastTextApi, reader: R) -> Result<Vec<Vec<f32>>> {
    let mut results = Vec::new();
    for line in reader.lines() {
        let line = line.context("Failed to read input line")?;
        results.push(api.sentence_vector(&line)?);
    }
    Ok(results)
}

/// Character n-grams of `word` with their input rows.
pub fn ngrams(api: &FastTextApi, word: &str) -> Result<Vec<(String, Vec<f32>)>> {
    if api.bucket()? == 0 {
        return Err(anyhow!(
            "Model has no subword buckets (was it trained with -maxn 0?)"
        ));
    }
    let input = api.model().input_matrix()?;
    api.subwords(word)?
        .into_iter()
        .map(|(ngram, row)| Ok::<_, anyhow::Error>((ngram, input.row(row)?)))
        .collect()
}

/// Words then labels, with training counts.
pub fn dictionary(api: &FastTextApi) -> Result<Vec<DictEntry>> {
    let dict = api.model().dictionary()?;
    let words = (0..dict.nwords()).map(|i| (i, dict.word(i), "word"));
    let labels = (0..dict.nlabels()).map(|i| (dict.nwords() + i, dict.label(i), "label"));

    words
        .chain(labels)
        .map(|(pos, entry, kind)| {
            let entry = entry.ok_or_else(|| anyhow!("Dictionary entry {} missing", pos))?;
            Ok::<_, anyhow::Error>(DictEntry {
                entry: entry.to_string(),
                count: dict.count(pos).unwrap_or(0),
                kind,
            })
        })
        .collect()
}
