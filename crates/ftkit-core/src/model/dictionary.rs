//! Vocabulary and label table, plus the tokenizer and n-gram hashing that
//! turn raw text into input-matrix row ids.
//!
//! Rows `0..nwords` of the input matrix belong to vocabulary words; rows
//! `nwords..nwords + bucket` are shared hash buckets for character n-grams
//! and word n-grams.

use super::args::Args;
use super::reader::BinaryReader;
use crate::config::{BOW, EOS, EOW, WORD_NGRAM_HASH_MULTIPLIER};
use crate::error::FastTextError;
use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;

/// Upper bound on entries reserved before the dictionary is actually read.
const MAX_RESERVED_ENTRIES: usize = 1 << 16;

/// 32-bit FNV-1a over the bytes of `s`.
///
/// Bytes are sign-extended before mixing, matching the hash fastText used to
/// train the bucket layout. Non-ASCII input therefore hashes differently from
/// textbook FNV-1a.
pub fn hash(s: &str) -> u32 {
    let mut h: u32 = 2_166_136_261;
    for &byte in s.as_bytes() {
        h ^= byte as i8 as i32 as u32;
        h = h.wrapping_mul(16_777_619);
    }
    h
}

/// Whether a dictionary entry is a word or a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    Word,
    Label,
}

#[derive(Debug, Clone)]
struct Entry {
    word: String,
    count: i64,
    entry_type: EntryType,
    /// Row ids used for this word's vector: its own id then its n-grams
    subwords: Vec<i32>,
}

/// Row ids and label ids for one tokenized line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    /// Input-matrix rows: words, their subwords, and word n-gram buckets
    pub words: Vec<i32>,
    /// Label positions (`0..nlabels`) found on the line
    pub labels: Vec<i32>,
}

/// Read-only dictionary of a loaded model.
#[derive(Debug, Clone)]
pub struct Dictionary {
    args: Arc<Args>,
    entries: Vec<Entry>,
    word_to_id: HashMap<String, i32>,
    nwords: i32,
    nlabels: i32,
    ntokens: i64,
    pruneidx_size: i64,
    pruneidx: HashMap<i32, i32>,
}

impl Dictionary {
    /// Reads the dictionary section and precomputes each word's subwords.
    pub(crate) fn load<R: Read>(
        reader: &mut BinaryReader<R>,
        args: Arc<Args>,
    ) -> Result<Self, FastTextError> {
        let size = reader.read_i32("dictionary size")?;
        let nwords = reader.read_i32("dictionary nwords")?;
        let nlabels = reader.read_i32("dictionary nlabels")?;
        let ntokens = reader.read_i64("dictionary ntokens")?;
        let pruneidx_size = reader.read_i64("dictionary pruneidx size")?;

        if size < 0 || nwords < 0 || nlabels < 0 || nwords as i64 + nlabels as i64 != size as i64 {
            return Err(FastTextError::ModelLoad(format!(
                "inconsistent dictionary sizes: size={}, nwords={}, nlabels={}",
                size, nwords, nlabels
            )));
        }

        let reserve = (size as usize).min(MAX_RESERVED_ENTRIES);
        let mut entries = Vec::with_capacity(reserve);
        let mut word_to_id = HashMap::with_capacity(reserve);
        for i in 0..size {
            let word = reader.read_cstring("dictionary entry")?;
            let count = reader.read_i64("dictionary entry count")?;
            let entry_type = match reader.read_u8("dictionary entry type")? {
                0 => EntryType::Word,
                1 => EntryType::Label,
                other => {
                    return Err(FastTextError::ModelLoad(format!(
                        "unknown entry type {} for '{}'",
                        other, word
                    )))
                }
            };
            word_to_id.insert(word.clone(), i);
            entries.push(Entry {
                word,
                count,
                entry_type,
                subwords: Vec::new(),
            });
        }

        let mut pruneidx = HashMap::new();
        for _ in 0..pruneidx_size.max(0) {
            let first = reader.read_i32("prune index key")?;
            let second = reader.read_i32("prune index value")?;
            pruneidx.insert(first, second);
        }

        let mut dict = Self {
            args,
            entries,
            word_to_id,
            nwords,
            nlabels,
            ntokens,
            pruneidx_size,
            pruneidx,
        };
        dict.init_ngrams();
        Ok(dict)
    }

    fn init_ngrams(&mut self) {
        for i in 0..self.entries.len() {
            let mut subwords = vec![i as i32];
            if self.entries[i].word != EOS {
                let wrapped = format!("{}{}{}", BOW, self.entries[i].word, EOW);
                self.compute_subwords(&wrapped, &mut subwords, None);
            }
            self.entries[i].subwords = subwords;
        }
    }

    pub fn nwords(&self) -> usize {
        self.nwords as usize
    }

    pub fn nlabels(&self) -> usize {
        self.nlabels as usize
    }

    /// Total tokens seen during training.
    pub fn ntokens(&self) -> i64 {
        self.ntokens
    }

    /// Word at position `i`, or `None` past the end of the word list.
    pub fn word(&self, i: usize) -> Option<&str> {
        if i < self.nwords() {
            Some(&self.entries[i].word)
        } else {
            None
        }
    }

    /// Label at position `i`, or `None` past the end of the label list.
    pub fn label(&self, i: usize) -> Option<&str> {
        if i < self.nlabels() {
            Some(&self.entries[self.nwords() + i].word)
        } else {
            None
        }
    }

    /// Training count of the word or label at entry position `i`.
    pub fn count(&self, i: usize) -> Option<i64> {
        self.entries.get(i).map(|e| e.count)
    }

    /// Entry id of `word`, if present.
    pub fn id(&self, word: &str) -> Option<i32> {
        self.word_to_id.get(word).copied()
    }

    /// Classifies an out-of-vocabulary token by the label prefix.
    pub fn token_type(&self, token: &str) -> EntryType {
        if token.starts_with(self.args.label.as_str()) {
            EntryType::Label
        } else {
            EntryType::Word
        }
    }

    /// Training counts of the labels, in label order.
    pub fn label_counts(&self) -> Vec<i64> {
        self.entries[self.nwords()..]
            .iter()
            .filter(|e| e.entry_type == EntryType::Label)
            .map(|e| e.count)
            .collect()
    }

    /// Input rows that make up the vector of `word`.
    ///
    /// In-vocabulary words contribute their own row plus their n-grams;
    /// unknown words contribute only n-grams.
    pub fn subword_ids(&self, word: &str) -> Vec<i32> {
        if let Some(id) = self.id(word) {
            return self.entries[id as usize].subwords.clone();
        }
        let mut ngrams = Vec::new();
        if word != EOS {
            let wrapped = format!("{}{}{}", BOW, word, EOW);
            self.compute_subwords(&wrapped, &mut ngrams, None);
        }
        ngrams
    }

    /// Subword strings of `word` paired with their input rows.
    pub fn subwords(&self, word: &str) -> Vec<(String, i32)> {
        let mut ngrams = Vec::new();
        let mut substrings = Vec::new();
        if let Some(id) = self.id(word) {
            ngrams.push(id);
            substrings.push(word.to_string());
        }
        if word != EOS {
            let wrapped = format!("{}{}{}", BOW, word, EOW);
            self.compute_subwords(&wrapped, &mut ngrams, Some(&mut substrings));
        }
        substrings.into_iter().zip(ngrams).collect()
    }

    /// Input row holding the bucket of an arbitrary character n-gram.
    pub fn subword_row(&self, subword: &str) -> Option<i32> {
        if self.args.bucket <= 0 {
            return None;
        }
        let bucket = (hash(subword) % self.args.bucket as u32) as i32;
        Some(self.nwords + bucket)
    }

    /// Character n-grams of an already wrapped word (`<word>`).
    ///
    /// N-grams are measured in UTF-8 characters. Single-character n-grams
    /// touching a word boundary are skipped.
    fn compute_subwords(
        &self,
        wrapped: &str,
        ngrams: &mut Vec<i32>,
        mut substrings: Option<&mut Vec<String>>,
    ) {
        if self.args.bucket <= 0 || self.args.maxn <= 0 {
            return;
        }
        let minn = self.args.minn.max(0) as usize;
        let maxn = self.args.maxn as usize;
        let bucket = self.args.bucket as u32;

        let boundaries: Vec<usize> = wrapped
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(wrapped.len()))
            .collect();
        let nchars = boundaries.len() - 1;

        for start in 0..nchars {
            for n in 1..=maxn {
                let end = start + n;
                if end > nchars {
                    break;
                }
                if n < minn || (n == 1 && (start == 0 || end == nchars)) {
                    continue;
                }
                let ngram = &wrapped[boundaries[start]..boundaries[end]];
                let h = (hash(ngram) % bucket) as i32;
                // Substrings stay aligned with ids: pruned n-grams are listed only if kept.
                if self.push_hash(ngrams, h) {
                    if let Some(out) = substrings.as_deref_mut() {
                        out.push(ngram.to_string());
                    }
                }
            }
        }
    }

    /// Maps a bucket id to an input row, honoring the prune index.
    fn push_hash(&self, ids: &mut Vec<i32>, id: i32) -> bool {
        if self.pruneidx_size == 0 || id < 0 {
            return false;
        }
        let id = if self.pruneidx_size > 0 {
            match self.pruneidx.get(&id) {
                Some(&pruned) => pruned,
                None => return false,
            }
        } else {
            id
        };
        ids.push(self.nwords + id);
        true
    }

    fn add_word_ngrams(&self, line: &mut Vec<i32>, hashes: &[i32]) {
        let n = self.args.word_ngrams.max(1) as usize;
        if self.args.bucket <= 0 {
            return;
        }
        let bucket = self.args.bucket as u64;
        for i in 0..hashes.len() {
            let mut h = hashes[i] as i64 as u64;
            for &next in hashes.iter().take((i + n).min(hashes.len())).skip(i + 1) {
                h = h
                    .wrapping_mul(WORD_NGRAM_HASH_MULTIPLIER)
                    .wrapping_add(next as i64 as u64);
                self.push_hash(line, (h % bucket) as i32);
            }
        }
    }

    fn add_subwords(&self, line: &mut Vec<i32>, token: &str, wid: Option<i32>) {
        match wid {
            None => {
                if token != EOS {
                    let wrapped = format!("{}{}{}", BOW, token, EOW);
                    self.compute_subwords(&wrapped, line, None);
                }
            }
            Some(id) if self.args.maxn <= 0 => line.push(id),
            Some(id) => line.extend_from_slice(&self.entries[id as usize].subwords),
        }
    }

    /// Tokenizes the first line of `text` into input rows and label ids.
    ///
    /// Tokens are separated by ASCII whitespace or NUL; a newline ends the
    /// line and contributes the end-of-sentence token.
    pub fn line(&self, text: &str) -> Line {
        let mut line = Line::default();
        let mut word_hashes = Vec::new();

        for token in tokenize(text) {
            let h = hash(token);
            let wid = self.id(token);
            let entry_type = match wid {
                Some(id) => self.entries[id as usize].entry_type,
                None => self.token_type(token),
            };

            match (entry_type, wid) {
                (EntryType::Word, _) => {
                    self.add_subwords(&mut line.words, token, wid);
                    word_hashes.push(h as i32);
                }
                (EntryType::Label, Some(id)) => line.labels.push(id - self.nwords),
                (EntryType::Label, None) => {}
            }

            if token == EOS {
                break;
            }
        }

        self.add_word_ngrams(&mut line.words, &word_hashes);
        line
    }
}

fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\n' | '\r' | '\t' | '\u{0B}' | '\u{0C}' | '\0')
}

/// Splits text the way the fastText reader does, turning each newline into
/// an [`EOS`] token.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        if is_separator(c) {
            if let Some(s) = start.take() {
                tokens.push(&text[s..i]);
            }
            if c == '\n' {
                tokens.push(EOS);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(&text[s..]);
    }
    tokens
}
