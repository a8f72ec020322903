//! Build error types.
//!
//! Every failure aborts the build; nothing here is recovered locally.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Front-matter delimiters missing or out of bounds.
    #[error("malformed content file `{path}`: {reason}")]
    Format { path: PathBuf, reason: &'static str },

    #[error("invalid front matter in `{path}`")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid JSON in `{path}`")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A convention key (`template`, `files_template`) holding a non-string value.
    #[error("`{key}` in `{path}` must be a string")]
    Field { path: PathBuf, key: &'static str },

    #[error("template `{name}` not found in `{layouts}`")]
    TemplateNotFound { name: String, layouts: PathBuf },

    /// A layout file that does not compile, used or not.
    #[error("failed to load templates from `{layouts}`")]
    Layouts {
        layouts: PathBuf,
        #[source]
        source: tera::Error,
    },

    #[error("template `{name}` failed")]
    Template {
        name: String,
        #[source]
        source: tera::Error,
    },

    #[error("IO error at `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file parsing error in `{path}`")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for malformed structured data: front matter, data files, convention keys.
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            Self::Yaml { .. } | Self::Json { .. } | Self::Field { .. }
        )
    }
}
