//! Model path resolution for the CLI.
//!
//! Search order:
//! 1. `--model` flag
//! 2. `$FTKIT_MODEL` environment variable
//! 3. `model.bin` in the platform data directory

use anyhow::{anyhow, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Default model file name inside the data directory
const MODEL_FILENAME: &str = "model.bin";

/// Environment variable naming a model file
const MODEL_ENV: &str = "FTKIT_MODEL";

/// Returns the platform data directory.
///
/// - macOS: `~/Library/Application Support/dev.ftkit.ftkit/`
/// - Linux: `~/.local/share/ftkit/`
/// - Windows: `%APPDATA%\ftkit\ftkit\data\`
pub fn data_dir() -> Result<PathBuf> {
    ProjectDirs::from("dev", "ftkit", "ftkit")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| anyhow!("Could not determine data directory"))
}

/// Resolves the model file from the flag, the environment, then the data
/// directory.
pub fn model_path(flag: Option<&Path>) -> Result<PathBuf> {
    resolve_model_path(flag, std::env::var(MODEL_ENV).ok())
}

fn resolve_model_path(flag: Option<&Path>, env: Option<String>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = env.filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    let default = data_dir()?.join(MODEL_FILENAME);
    if default.exists() {
        return Ok(default);
    }
    Err(anyhow!(
        "No model given. Searched locations:\n\
         - --model flag\n\
         - ${} environment variable\n\
         - {}",
        MODEL_ENV,
        default.display()
    ))
}
