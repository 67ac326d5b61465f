//! Single-line in-place file rewriting.
//!
//! The edit is deliberately narrow: one file, one line number, one substring
//! substitution. Every other byte of the file, including line endings and a
//! missing trailing newline, passes through untouched. The new content is
//! written to a temp file in the same directory and renamed over the
//! original, so a crash mid-write never leaves a half-edited file behind.

use std::{fs, io::Write, path::Path};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// Replace `old` with `new` on line `lineno` (1-based) of `path`.
///
/// The substitution only happens if the targeted line actually contains
/// `old`; otherwise the file is rewritten byte-identically.
pub fn replace_in_line(path: &Path, lineno: usize, old: &str, new: &str) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let permissions = fs::metadata(path)
        .with_context(|| format!("Failed to stat file: {}", path.display()))?
        .permissions();

    let mut edited = String::with_capacity(content.len());
    // split_inclusive keeps each line's terminator, so \n vs \r\n and a
    // missing final newline all survive the round trip.
    for (index, line) in content.split_inclusive('\n').enumerate() {
        if index + 1 == lineno && line.contains(old) {
            edited.push_str(&line.replace(old, new));
        } else {
            edited.push_str(line);
        }
    }

    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;
    tmp.write_all(edited.as_bytes())
        .context("Failed to write edited content")?;
    // The rename would otherwise replace the original's mode with the temp
    // file's 0o600, dropping e.g. an exec bit git tracks.
    tmp.as_file()
        .set_permissions(permissions)
        .context("Failed to carry over file permissions")?;
    tmp.persist(path)
        .with_context(|| format!("Failed to replace file: {}", path.display()))?;

    Ok(())
}
