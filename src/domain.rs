use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Front matter of one page, plus the rendered body under [`CONTENT_KEY`].
pub type PageRecord = serde_json::Map<String, serde_json::Value>;

/// JSON data files keyed by file stem.
pub type DataMapping = serde_json::Map<String, serde_json::Value>;

pub const CONTENT_KEY: &str = "content";
pub const INDEX_FILE: &str = "_index.md";

static ORDER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.(?P<name>.+)").expect("valid regex"));

/// Strip a leading `digits.` ordering prefix: `10.about` -> `about`.
pub fn display_name(name: &str) -> &str {
    ORDER_PREFIX
        .captures(name)
        .and_then(|c| c.name("name"))
        .map_or(name, |m| m.as_str())
}

/// A non-index markdown file inside a folder.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ContentFile {
    /// Raw filename, e.g. `10.about.md`.
    pub file: String,
    /// Output name, e.g. `about`.
    pub name: String,
}

impl ContentFile {
    pub fn new(file: String) -> Self {
        let stripped = display_name(&file);
        let name = Path::new(stripped)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(stripped)
            .to_string();
        Self { file, name }
    }
}

#[derive(Debug, Serialize, Clone, Default)]
pub struct FolderNode {
    pub path: PathBuf,
    pub name: String,
    pub is_index: bool,
    /// Header of `_index.md`; empty when the folder has none.
    pub index: PageRecord,
    pub folders: Vec<FolderNode>,
    pub files: Vec<ContentFile>,
    /// Path of the parent folder, `None` for the content root. Templates
    /// see the resolved node instead, through [`FolderView`].
    #[serde(skip)]
    pub parent: Option<PathBuf>,
}

impl FolderNode {
    pub fn index_path(&self) -> PathBuf {
        self.path.join(INDEX_FILE)
    }

    /// Find the node scanned from `path` in the subtree rooted here.
    pub fn find(&self, path: &Path) -> Option<&FolderNode> {
        if self.path == path {
            return Some(self);
        }
        self.folders
            .iter()
            .filter(|f| path.starts_with(&f.path))
            .find_map(|f| f.find(path))
    }

    /// Resolve this node's parent within the tree rooted at `root`.
    pub fn parent_in<'a>(&self, root: &'a FolderNode) -> Option<&'a FolderNode> {
        self.parent.as_deref().and_then(|p| root.find(p))
    }
}

/// A folder as templates see it: the node itself plus its ancestors,
/// so `folder.parent.index.title` resolves.
#[derive(Debug, Serialize)]
pub struct FolderView<'a> {
    #[serde(flatten)]
    pub node: &'a FolderNode,
    pub parent: Option<Box<FolderView<'a>>>,
}

impl<'a> FolderView<'a> {
    pub fn resolve(node: &'a FolderNode, root: &'a FolderNode) -> Self {
        let parent = node
            .parent_in(root)
            .map(|p| Box::new(FolderView::resolve(p, root)));
        Self { node, parent }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_strips_order_prefix() {
        assert_eq!(display_name("12.projects"), "projects");
        assert_eq!(display_name("projects"), "projects");
        assert_eq!(display_name("003.a-b.c"), "a-b.c");
        assert_eq!(display_name("12"), "12");
        assert_eq!(display_name("v1.2"), "v1.2");
    }

    #[test]
    fn test_content_file_name() {
        assert_eq!(ContentFile::new("10.about.md".into()).name, "about");
        assert_eq!(ContentFile::new("20-b.md".into()).name, "20-b");
        assert_eq!(ContentFile::new("notes.v2.md".into()).name, "notes.v2");
    }

    #[test]
    fn test_parent_lookup() {
        let child = FolderNode {
            path: "content/1.blog".into(),
            name: "blog".into(),
            parent: Some("content".into()),
            ..Default::default()
        };
        let root = FolderNode {
            path: "content".into(),
            folders: vec![child.clone()],
            ..Default::default()
        };
        assert_eq!(child.parent_in(&root).map(|p| &p.path), Some(&root.path));
        assert!(root.parent_in(&root).is_none());
        assert!(root.find(Path::new("content/2.other")).is_none());
    }

    #[test]
    fn test_folder_view_exposes_ancestors() {
        let year = FolderNode {
            path: "content/1.blog/2020".into(),
            name: "2020".into(),
            parent: Some("content/1.blog".into()),
            ..Default::default()
        };
        let mut index = PageRecord::new();
        index.insert("title".into(), "Blog".into());
        let blog = FolderNode {
            path: "content/1.blog".into(),
            name: "blog".into(),
            is_index: true,
            index,
            folders: vec![year],
            parent: Some("content".into()),
            ..Default::default()
        };
        let root = FolderNode {
            path: "content".into(),
            folders: vec![blog],
            ..Default::default()
        };

        let year = &root.folders[0].folders[0];
        let value = serde_json::to_value(FolderView::resolve(year, &root)).unwrap();
        assert_eq!(value["name"], "2020");
        assert_eq!(value["parent"]["name"], "blog");
        assert_eq!(value["parent"]["index"]["title"], "Blog");
        assert_eq!(value["parent"]["folders"][0]["name"], "2020");
        assert_eq!(value["parent"]["parent"]["name"], "");
        assert!(value["parent"]["parent"]["parent"].is_null());
    }
}
