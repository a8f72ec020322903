use std::io;
use std::path::{Path, PathBuf};
use serde_json::Value;
use tera::{Context, Tera};
use walkdir::WalkDir;
use crate::config::Config;
use crate::domain::{DataMapping, FolderNode, FolderView, PageRecord};
use crate::error::{Error, Result};

pub const INDEX_TEMPLATE: &str = "index.html";
pub const PAGE_TEMPLATE: &str = "page.html";

/// Everything a template can see.
#[derive(Clone, Copy)]
pub struct RenderInputs<'a> {
    pub config: &'a Config,
    pub root: &'a FolderNode,
    pub data: &'a DataMapping,
    pub folder: &'a FolderNode,
    pub page: &'a PageRecord,
}

/// Templates of the active theme, loaded once from its `layouts` directory.
pub struct Renderer {
    tera: Tera,
    layouts: PathBuf,
}

impl Renderer {
    pub fn new(config: &Config) -> Result<Self> {
        let layouts = config.layouts_dir();
        if !layouts.is_dir() {
            return Err(Error::io(layouts, io::ErrorKind::NotFound.into()));
        }

        let files = template_files(&layouts)?;
        let mut tera = Tera::default();
        // Page bodies are already HTML.
        tera.autoescape_on(vec![]);
        // All at once, so `extends` and `include` resolve whatever the file order.
        tera.add_template_files(files).map_err(|source| Error::Layouts {
            layouts: layouts.clone(),
            source,
        })?;

        Ok(Self { tera, layouts })
    }

    pub fn layouts(&self) -> &Path {
        &self.layouts
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    pub fn render(&self, name: &str, inputs: &RenderInputs<'_>) -> Result<String> {
        if !self.has_template(name) {
            return Err(Error::TemplateNotFound {
                name: name.to_string(),
                layouts: self.layouts.clone(),
            });
        }

        let mut context = Context::new();
        context.insert("config", inputs.config);
        context.insert("root", inputs.root);
        context.insert("data", inputs.data);
        context.insert("folder", &FolderView::resolve(inputs.folder, inputs.root));
        context.insert("page", inputs.page);

        self.tera.render(name, &context).map_err(|source| Error::Template {
            name: name.to_string(),
            source,
        })
    }
}

/// Every file under `layouts`, named by its `/`-separated relative path.
fn template_files(layouts: &Path) -> Result<Vec<(PathBuf, Option<String>)>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(layouts).min_depth(1).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let at = e.path().unwrap_or(layouts).to_path_buf();
            Error::io(at, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(layouts).unwrap_or(entry.path());
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        files.push((entry.into_path(), Some(name)));
    }
    Ok(files)
}

fn string_key<'a>(
    record: &'a PageRecord,
    key: &'static str,
    path: &Path,
) -> Result<Option<&'a str>> {
    match record.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(Error::Field {
            path: path.to_path_buf(),
            key,
        }),
    }
}

/// Template for a folder's `_index.md`: its own `template`, else `index.html`.
pub fn index_template<'a>(page: &'a PageRecord, path: &Path) -> Result<&'a str> {
    Ok(string_key(page, "template", path)?.unwrap_or(INDEX_TEMPLATE))
}

/// Template for a content file: its own `template`, else the folder index's
/// `files_template`, else `page.html`.
pub fn file_template<'a>(
    page: &'a PageRecord,
    folder: &'a FolderNode,
    path: &Path,
) -> Result<&'a str> {
    if let Some(name) = string_key(page, "template", path)? {
        return Ok(name);
    }
    let fallback = string_key(&folder.index, "files_template", &folder.index_path())?;
    Ok(fallback.unwrap_or(PAGE_TEMPLATE))
}
