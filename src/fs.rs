use std::fs;
use std::path::Path;
use walkdir::WalkDir;
use crate::error::{Error, Result};
use crate::log;

/// Kept across rebuilds so the output can stay a git checkout.
const PRESERVED: &str = ".git";

/// Empty `output_dir` except for `.git`, then make sure it exists.
pub fn prepare_output_dir(output_dir: &Path) -> Result<()> {
    if output_dir.exists() {
        log!("clean"; "{}", output_dir.display());
        for entry in fs::read_dir(output_dir).map_err(|e| Error::io(output_dir, e))? {
            let entry = entry.map_err(|e| Error::io(output_dir, e))?;
            if entry.file_name() == PRESERVED {
                continue;
            }
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| Error::io(&path, e))?;
            let removed = if file_type.is_dir() {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };
            removed.map_err(|e| Error::io(&path, e))?;
        }
    }
    fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))
}

fn process_asset(path: &Path, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::copy(path, output_path).map_err(|e| Error::io(path, e))?;
    Ok(())
}

/// Copy every immediate entry of `src` into `output_dir`.
///
/// Files overwrite by name; directories are merged recursively, so a later
/// call wins on any path both sources provide. A missing `src` is skipped.
/// Symlinks are followed and their targets copied.
/// Returns the number of top-level entries copied.
pub fn copy_static(src: &Path, output_dir: &Path) -> Result<usize> {
    if !src.exists() {
        return Ok(0);
    }
    log!("static"; "{} -> {}", src.display(), output_dir.display());

    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let at = e.path().unwrap_or(src).to_path_buf();
            Error::io(at, e.into())
        })?;
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let output_path = output_dir.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&output_path).map_err(|e| Error::io(&output_path, e))?;
        } else if entry.file_type().is_file() {
            process_asset(entry.path(), &output_path)?;
        } else {
            continue;
        }
        if entry.depth() == 1 {
            copied += 1;
        }
    }
    Ok(copied)
}
