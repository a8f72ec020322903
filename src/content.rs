use comrak::{ComrakOptions, ComrakRenderOptions, ListStyleType};
use std::fs;
use std::path::Path;
use crate::domain::{PageRecord, CONTENT_KEY};
use crate::error::{Error, Result};

pub const DELIMITER: &str = "---";

/// Last zero-based header line index that may still be a non-delimiter;
/// the closing `---` may come one line after it.
pub const MAX_HEADER_LINES: usize = 50;

pub fn make_comrak_options() -> ComrakOptions {
    let mut comrak_options = ComrakOptions::default();
    comrak_options.extension.table = true;
    comrak_options.extension.autolink = true;
    comrak_options.extension.tagfilter = true;
    comrak_options.extension.strikethrough = true;
    comrak_options.extension.tasklist = true;
    comrak_options.parse.smart = true;
    let mut render_options = ComrakRenderOptions::default();
    render_options.unsafe_ = true;
    render_options.list_style = ListStyleType::Plus;
    comrak_options.render = render_options;
    comrak_options
}

/// Split a content file into its YAML header and markdown body.
///
/// Both slices borrow from `text`; the delimiter lines are dropped.
pub fn split_front_matter(text: &str) -> std::result::Result<(&str, &str), &'static str> {
    let mut lines = text.split_inclusive('\n');
    let first = lines.next().unwrap_or_default();
    if !first.starts_with(DELIMITER) {
        return Err("not started by `---`");
    }

    let header_start = first.len();
    let mut offset = header_start;
    for (i, line) in lines.enumerate() {
        if line.starts_with(DELIMITER) {
            return Ok((&text[header_start..offset], &text[offset + line.len()..]));
        }
        if i > MAX_HEADER_LINES {
            break;
        }
        offset += line.len();
    }
    Err("closing `---` not reached after 50 lines")
}

fn decode_header(path: &Path, header: &str) -> Result<PageRecord> {
    if header.trim().is_empty() {
        return Ok(PageRecord::new());
    }
    serde_yaml::from_str::<Option<PageRecord>>(header)
        .map(Option::unwrap_or_default)
        .map_err(|source| Error::Yaml {
            path: path.to_path_buf(),
            source,
        })
}

/// Parse a content file into a page record.
///
/// With `header_only` the markdown body is left unread; otherwise it is
/// rendered to HTML and stored under `content`.
pub fn parse_md_file(
    path: &Path,
    header_only: bool,
    comrak_options: &ComrakOptions,
) -> Result<PageRecord> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let (header, body) = split_front_matter(&text).map_err(|reason| Error::Format {
        path: path.to_path_buf(),
        reason,
    })?;

    let mut page = decode_header(path, header)?;
    if !header_only {
        let html_content = comrak::markdown_to_html(body, comrak_options);
        page.insert(CONTENT_KEY.to_string(), html_content.into());
    }
    Ok(page)
}
