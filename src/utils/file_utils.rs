//! File system utilities

use anyhow::{anyhow, Result};
use std::fs;
use std::path::Path;

/// Ensure directory exists
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .map_err(|e| anyhow!("Failed to create directory {}: {}", path.display(), e))?;
    }
    Ok(())
}

/// Sanitize filename for filesystem
///
/// Keeps spaces and punctuation so `Lofi Beats Mix.mp3` stays as is; only
/// characters that would escape the target directory or are reserved on common
/// platforms are replaced.
pub fn sanitize_filename(filename: &str) -> String {
    let cleaned: String = filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '|' | '?' | '*' => '_',
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let trimmed = cleaned.trim();
    if trimmed.is_empty() || trimmed.chars().all(|c| c == '.') {
        "download".to_string()
    } else {
        trimmed.to_string()
    }
}
