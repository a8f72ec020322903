//! JSON data files exposed to templates as `data.<stem>`.

use std::fs;
use std::path::Path;
use walkdir::WalkDir;
use crate::domain::DataMapping;
use crate::error::{Error, Result};

/// Load every `*.json` file directly under `dir`, keyed by file stem.
/// Symlinked files count as the file they point to.
pub fn load_data(dir: &Path) -> Result<DataMapping> {
    let mut data = DataMapping::new();

    let entries = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    for entry in entries {
        let entry = entry.map_err(|e| {
            let at = e.path().unwrap_or(dir).to_path_buf();
            Error::io(at, e.into())
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let value = serde_json::from_str(&text).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        data.insert(stem.to_string(), value);
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_json_files_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("menu.json"), r#"[{"title": "Home"}]"#).unwrap();
        fs::write(dir.path().join("site.json"), r#"{"name": "demo"}"#).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::write(dir.path().join("old.json.bak"), "{").unwrap();
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let data = load_data(dir.path()).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data["menu"], json!([{"title": "Home"}]));
        assert_eq!(data["site"]["name"], "demo");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_json_is_loaded() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        fs::create_dir(&data).unwrap();
        fs::write(dir.path().join("authors.json"), r#"{"ann": 1}"#).unwrap();
        symlink(dir.path().join("authors.json"), data.join("authors.json")).unwrap();

        let loaded = load_data(&data).unwrap();
        assert_eq!(loaded["authors"], json!({"ann": 1}));
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.json"), "{\"a\": ").unwrap();
        let err = load_data(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Json { .. }));
    }

    #[test]
    fn test_missing_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_data(&dir.path().join("data")).is_err());
    }
}
