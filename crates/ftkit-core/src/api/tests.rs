//! Facade behaviour without a loaded model. Loaded-model behaviour is
//! covered by the integration tests, which write real model files.

use super::*;

#[test]
fn test_new_is_unloaded() {
    let api = FastTextApi::new();
    assert!(!api.is_model_loaded());
}

#[test]
fn test_reads_require_model() {
    let api = FastTextApi::new();

    assert_eq!(api.predict_proba("hello", 1, 0.0), Err(FastTextError::NotLoaded));
    assert_eq!(api.predict("hello", 1, 0.0), Err(FastTextError::NotLoaded));
    assert_eq!(api.word_vector("hello"), Err(FastTextError::NotLoaded));
    assert_eq!(api.subword_vector("hel"), Err(FastTextError::NotLoaded));
    assert_eq!(api.sentence_vector("hello"), Err(FastTextError::NotLoaded));
    assert_eq!(api.vector("hello"), Err(FastTextError::NotLoaded));
    assert_eq!(api.words(), Err(FastTextError::NotLoaded));
    assert_eq!(api.labels(), Err(FastTextError::NotLoaded));
    assert_eq!(api.word(0), Err(FastTextError::NotLoaded));
    assert_eq!(api.label(0), Err(FastTextError::NotLoaded));
    assert_eq!(api.nwords(), Err(FastTextError::NotLoaded));
    assert_eq!(api.dim(), Err(FastTextError::NotLoaded));
    assert_eq!(api.loss_name(), Err(FastTextError::NotLoaded));
    assert_eq!(api.model_name(), Err(FastTextError::NotLoaded));
    assert_eq!(api.label_prefix(), Err(FastTextError::NotLoaded));
}

#[test]
fn test_predict_checks_load_before_k() {
    let api = FastTextApi::new();
    assert_eq!(api.predict_proba("hello", 0, 0.0), Err(FastTextError::NotLoaded));
}

#[test]
fn test_unload_when_unloaded() {
    let mut api = FastTextApi::new();
    api.unload_model();
    assert!(!api.is_model_loaded());
}

#[test]
fn test_failed_load_stays_unloaded() {
    let mut api = FastTextApi::new();
    let result = api.load_model("/nonexistent/model.bin");
    assert!(matches!(result, Err(FastTextError::ModelLoad(_))));
    assert!(!api.is_model_loaded());
}

#[test]
fn test_test_requires_model() {
    let api = FastTextApi::new();
    assert_eq!(api.test("/nonexistent/test.txt", 1), Err(FastTextError::NotLoaded));
}

#[test]
fn test_check_model_missing_file() {
    assert!(!FastTextApi::check_model("/nonexistent/model.bin"));
}
