//! Content tree scanning.
//!
//! Each directory becomes a [`FolderNode`]; `_index.md` marks it as having
//! an index page, other `*.md` files become its content files, and
//! subdirectories are scanned recursively.

use comrak::ComrakOptions;
use std::path::Path;
use walkdir::WalkDir;
use crate::content::parse_md_file;
use crate::domain::{display_name, ContentFile, FolderNode, INDEX_FILE};
use crate::error::{Error, Result};

/// Scan `path` as the content root.
pub fn scan(path: &Path, comrak_options: &ComrakOptions) -> Result<FolderNode> {
    scan_folder(path, String::new(), None, comrak_options)
}

fn scan_folder(
    path: &Path,
    name: String,
    parent: Option<&Path>,
    comrak_options: &ComrakOptions,
) -> Result<FolderNode> {
    let mut folder = FolderNode {
        path: path.to_path_buf(),
        name,
        parent: parent.map(Path::to_path_buf),
        ..Default::default()
    };

    for entry in WalkDir::new(path).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            let at = e.path().unwrap_or(path).to_path_buf();
            Error::io(at, e.into())
        })?;
        let Some(file_name) = entry.file_name().to_str() else {
            continue;
        };
        if file_name.starts_with('.') {
            continue;
        }

        let file_type = entry.file_type();
        if file_type.is_file() && file_name.ends_with(".md") {
            if file_name == INDEX_FILE {
                folder.is_index = true;
                folder.index = parse_md_file(entry.path(), true, comrak_options)?;
            } else {
                folder.files.push(ContentFile::new(file_name.to_string()));
            }
        } else if file_type.is_dir() {
            let child = scan_folder(
                entry.path(),
                display_name(file_name).to_string(),
                Some(path),
                comrak_options,
            )?;
            folder.folders.push(child);
        }
    }

    folder.files.sort_by(|a, b| a.file.cmp(&b.file));
    folder.folders.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(folder)
}
