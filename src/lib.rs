use std::path::{Path, PathBuf};
use clap::Parser;
use comrak::ComrakOptions;
use crate::config::Config;
use crate::content::{make_comrak_options, parse_md_file};
use crate::data::load_data;
use crate::domain::{DataMapping, FolderNode, PageRecord};
use crate::error::{Error, Result};
use crate::fs::{copy_static, prepare_output_dir};
use crate::template::{file_template, index_template, RenderInputs, Renderer};

pub mod config;
pub mod content;
pub mod data;
pub mod domain;
pub mod error;
pub mod fs;
pub mod logger;
pub mod template;
pub mod tree;

pub const OUTPUT_FILE: &str = "index.html";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Site directory; the config and relative paths in it are resolved here
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Config file name, relative to the site directory
    #[arg(short, long, default_value = config::CONFIG_FILE)]
    pub config: PathBuf,
}

impl Args {
    pub fn config_path(&self) -> PathBuf {
        self.root.join(&self.config)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    /// Pages written, index pages included.
    pub pages: usize,
    /// Top-level static entries copied, from both sources.
    pub static_entries: usize,
}

/// A scanned site, ready to build.
///
/// The content tree, data files and templates are loaded once in
/// [`Site::new`] and only read afterwards.
pub struct Site {
    config: Config,
    root: FolderNode,
    data: DataMapping,
    renderer: Renderer,
    comrak_options: ComrakOptions,
}

impl Site {
    pub fn new(config: Config) -> Result<Self> {
        let comrak_options = make_comrak_options();
        let root = tree::scan(&config.app.content, &comrak_options)?;
        let renderer = Renderer::new(&config)?;
        let data = load_data(&config.app.data)?;
        log!("load"; "templates from {}, {} data files", renderer.layouts().display(), data.len());

        Ok(Self {
            config,
            root,
            data,
            renderer,
            comrak_options,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn root(&self) -> &FolderNode {
        &self.root
    }

    pub fn data(&self) -> &DataMapping {
        &self.data
    }

    /// Clean the output directory, render every page, then copy static assets.
    pub fn build(&self) -> Result<BuildSummary> {
        log!("build"; "building site...");
        let output_dir = &self.config.app.public;
        prepare_output_dir(output_dir)?;

        let mut summary = BuildSummary::default();
        self.build_folder(&self.root, output_dir, &mut summary)?;

        summary.static_entries += copy_static(&self.config.app.r#static, output_dir)?;
        summary.static_entries += copy_static(&self.config.theme_static_dir(), output_dir)?;

        log!("done"; "{} pages, {} static entries", summary.pages, summary.static_entries);
        Ok(summary)
    }

    fn build_folder(
        &self,
        folder: &FolderNode,
        out_dir: &Path,
        summary: &mut BuildSummary,
    ) -> Result<()> {
        if folder.is_index {
            let path = folder.index_path();
            let page = parse_md_file(&path, false, &self.comrak_options)?;
            let template = index_template(&page, &path)?;
            self.write(template, out_dir, folder, &page)?;
            summary.pages += 1;
        }

        for file in &folder.files {
            let path = folder.path.join(&file.file);
            let page = parse_md_file(&path, false, &self.comrak_options)?;
            let template = file_template(&page, folder, &path)?;
            self.write(template, &out_dir.join(&file.name), folder, &page)?;
            summary.pages += 1;
        }

        for child in &folder.folders {
            self.build_folder(child, &out_dir.join(&child.name), summary)?;
        }
        Ok(())
    }

    fn write(&self, template: &str, dir: &Path, folder: &FolderNode, page: &PageRecord) -> Result<()> {
        let inputs = RenderInputs {
            config: &self.config,
            root: &self.root,
            data: &self.data,
            folder,
            page,
        };
        let rendered_html = self.renderer.render(template, &inputs)?;

        std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        let html_path = dir.join(OUTPUT_FILE);
        std::fs::write(&html_path, rendered_html).map_err(|e| Error::io(&html_path, e))?;
        log!("page"; "{}", html_path.display());
        Ok(())
    }
}

/// Load the config at `config_path` and run one full build.
pub fn build_site(config_path: &Path) -> Result<BuildSummary> {
    let config = Config::from_path(config_path)?;
    Site::new(config)?.build()
}
