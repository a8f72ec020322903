//! Site configuration, loaded once from `config.yaml`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const CONFIG_FILE: &str = "config.yaml";

/// Default values for serde deserialization
mod config_defaults {
    use std::path::PathBuf;

    pub fn content() -> PathBuf {
        "content".into()
    }
    pub fn public() -> PathBuf {
        "public".into()
    }
    pub fn themes() -> PathBuf {
        "themes".into()
    }
    pub fn data() -> PathBuf {
        "data".into()
    }
    pub fn r#static() -> PathBuf {
        "static".into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,

    /// Active theme, selects `<themes>/<theme>/{layouts,static}`.
    pub theme: String,

    /// Any other top-level keys, passed through to templates untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "config_defaults::content")]
    pub content: PathBuf,
    #[serde(default = "config_defaults::public")]
    pub public: PathBuf,
    #[serde(default = "config_defaults::themes")]
    pub themes: PathBuf,
    #[serde(default = "config_defaults::data")]
    pub data: PathBuf,
    #[serde(default = "config_defaults::r#static")]
    pub r#static: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            content: config_defaults::content(),
            public: config_defaults::public(),
            themes: config_defaults::themes(),
            data: config_defaults::data(),
            r#static: config_defaults::r#static(),
        }
    }
}

impl Config {
    /// Read and parse a config file. Relative `app.*` paths are resolved
    /// against the directory holding the file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut config = Self::parse(&text, path)?;
        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            config.app.resolve_against(base);
        }
        Ok(config)
    }

    /// `origin` only labels errors.
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|source| Error::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn theme_dir(&self) -> PathBuf {
        self.app.themes.join(&self.theme)
    }

    pub fn layouts_dir(&self) -> PathBuf {
        self.theme_dir().join("layouts")
    }

    pub fn theme_static_dir(&self) -> PathBuf {
        self.theme_dir().join("static")
    }
}

impl AppConfig {
    fn resolve_against(&mut self, base: &Path) {
        for path in [
            &mut self.content,
            &mut self.public,
            &mut self.themes,
            &mut self.data,
            &mut self.r#static,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}
