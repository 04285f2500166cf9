//! Output formatting for command results.
//!
//! Human output follows the fastText command-line tool so existing scripts
//! keep working; `--json` emits one pretty-printed document instead.

use crate::commands::DictEntry;
use ftkit_core::{Args, Prediction, TestMetrics};
use serde::Serialize;

/// JSON shape of `predict` / `predict-prob` output
#[derive(Serialize)]
struct JsonPredictions<'a> {
    line: usize,
    predictions: &'a [Prediction],
}

/// JSON shape of a labelled vector
#[derive(Serialize)]
struct JsonVector<'a> {
    token: &'a str,
    vector: &'a [f32],
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

fn join_vector(vector: &[f32]) -> String {
    vector
        .iter()
        .map(|v| format!("{:.5}", v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One line per input line; labels only unless `with_prob`.
pub fn format_predictions(results: &[Vec<Prediction>], with_prob: bool, json: bool) -> String {
    if json {
        let lines: Vec<JsonPredictions> = results
            .iter()
            .enumerate()
            .map(|(line, predictions)| JsonPredictions { line, predictions })
            .collect();
        return to_json(&lines);
    }

    results
        .iter()
        .map(|predictions| {
            predictions
                .iter()
                .map(|p| {
                    if with_prob {
                        format!("{} {:.5}", p.label, p.probability)
                    } else {
                        p.label.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `token v1 v2 ...` per row.
pub fn format_vectors(rows: &[(String, Vec<f32>)], json: bool) -> String {
    if json {
        let rows: Vec<JsonVector> = rows
            .iter()
            .map(|(token, vector)| JsonVector { token, vector })
            .collect();
        return to_json(&rows);
    }
    rows.iter()
        .map(|(token, vector)| format!("{} {}", token, join_vector(vector)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_sentence_vectors(rows: &[Vec<f32>], json: bool) -> String {
    if json {
        return to_json(rows);
    }
    rows.iter()
        .map(|v| join_vector(v))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_metrics(metrics: &TestMetrics, json: bool) -> String {
    if json {
        return to_json(metrics);
    }
    format!(
        "N\t{}\nP@{}\t{:.3}\nR@{}\t{:.3}",
        metrics.examples, metrics.k, metrics.precision, metrics.k, metrics.recall
    )
}

pub fn format_args(args: &Args, json: bool) -> String {
    if json {
        return to_json(args);
    }
    [
        ("dim", args.dim.to_string()),
        ("ws", args.ws.to_string()),
        ("epoch", args.epoch.to_string()),
        ("minCount", args.min_count.to_string()),
        ("neg", args.neg.to_string()),
        ("wordNgrams", args.word_ngrams.to_string()),
        ("loss", args.loss.to_string()),
        ("model", args.model.to_string()),
        ("bucket", args.bucket.to_string()),
        ("minn", args.minn.to_string()),
        ("maxn", args.maxn.to_string()),
        ("lrUpdateRate", args.lr_update_rate.to_string()),
        ("t", args.t.to_string()),
    ]
    .iter()
    .map(|(name, value)| format!("{} {}", name, value))
    .collect::<Vec<_>>()
    .join("\n")
}

pub fn format_dictionary(entries: &[DictEntry], json: bool) -> String {
    if json {
        return to_json(entries);
    }
    let mut output = format!("{}\n", entries.len());
    output.push_str(
        &entries
            .iter()
            .map(|e| format!("{} {} {}", e.entry, e.count, e.kind))
            .collect::<Vec<_>>()
            .join("\n"),
    );
    output
}

pub fn format_check(path: &str, valid: bool, json: bool) -> String {
    if json {
        return to_json(&serde_json::json!({ "path": path, "valid": valid }));
    }
    if valid {
        format!("{}: valid fastText model", path)
    } else {
        format!("{}: not a supported fastText model", path)
    }
}
