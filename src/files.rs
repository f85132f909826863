//! Locating source files and laying out converted output.
//!
//! Output is grouped by the first letter of the program name, e.g. `<target>/hex/P/PONG.hex`,
//! with an optional flat copy in `<target>/hex/PONG.hex`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Files directly in `dir` with one of `extensions` (compared case insensitively), sorted.
#[tracing::instrument]
pub fn find_sources(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let mut sources = vec![];
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Unable to read directory {}", dir.display()))?
    {
        let path = entry?.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)));
        if path.is_file() && matches {
            sources.push(path);
        }
    }
    sources.sort();

    Ok(sources)
}

/// Program name of a source file, i.e. its file name without extension.
pub fn program_name(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_owned)
        .with_context(|| format!("Invalid file name {}", path.display()))
}

fn output_dir(dir: PathBuf) -> Result<PathBuf> {
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Unable to create directory {}", dir.display()))?;
    Ok(dir)
}

/// `<target>/<kind>/<first letter of name>/<name>.<ext>`, creating the directories.
pub fn grouped_path(target: &Path, kind: &str, name: &str, ext: &str) -> Result<PathBuf> {
    let group = name.chars().next().map(String::from).unwrap_or_default();
    let dir = output_dir(target.join(kind).join(group))?;
    Ok(dir.join(format!("{}.{}", name, ext)))
}

/// `<target>/<kind>/<name>.<ext>`, creating the directories.
pub fn flat_path(target: &Path, kind: &str, name: &str, ext: &str) -> Result<PathBuf> {
    let dir = output_dir(target.join(kind))?;
    Ok(dir.join(format!("{}.{}", name, ext)))
}

pub fn write(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).with_context(|| format!("Unable to write {}", path.display()))
}
