//! Sitemap serialization
//!
//! Renders the batch result into an image sitemap document (sitemap urlset
//! plus the Google image extension namespace) and writes it atomically:
//! write to a `.tmp` sibling, then rename over the target, so a failed run
//! never leaves a half-written file in place.

use crate::batch::SitemapEntry;
use crate::error::SerializeError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const IMAGE_NS: &str = "http://www.google.com/schemas/sitemap-image/1.1";

/// Escape text content for XML. URLs are escaped defensively even though
/// well-formed URLs rarely need more than `&`.
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render sitemap entries into an XML document, one `url` element per entry
/// in insertion order.
pub fn render(entries: &[SitemapEntry]) -> String {
    let mut output = String::new();
    output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    output.push_str(&format!(
        "<urlset xmlns=\"{}\" xmlns:image=\"{}\">\n",
        SITEMAP_NS, IMAGE_NS
    ));

    for entry in entries {
        output.push_str("<url>\n");
        output.push_str(&format!("<loc>{}</loc>\n", escape_xml(&entry.loc)));
        for image in &entry.images {
            output.push_str("<image:image>\n");
            output.push_str(&format!("<image:loc>{}</image:loc>\n", escape_xml(image)));
            output.push_str("</image:image>\n");
        }
        output.push_str("</url>\n");
    }

    output.push_str("</urlset>\n");
    output
}

/// Writes the rendered sitemap to a configured path with replace-if-exists
/// semantics.
pub struct SitemapWriter {
    path: PathBuf,
}

impl SitemapWriter {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the sitemap file atomically.
    ///
    /// An empty entry list is a no-op returning Ok(false); nothing is
    /// created or touched. Otherwise parent directories are created as
    /// needed, the document is written to a temp sibling and renamed over
    /// the target, fully replacing any previous run's file. Returns true
    /// iff the target exists as a regular file afterwards.
    pub fn write(&self, entries: &[SitemapEntry]) -> Result<bool, SerializeError> {
        if entries.is_empty() {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| SerializeError::CreateDir {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let output = render(entries);

        let temp_path = self.path.with_extension("xml.tmp");
        fs::write(&temp_path, output.as_bytes()).map_err(|e| SerializeError::Write {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            SerializeError::Replace {
                path: self.path.clone(),
                source: e,
            }
        })?;

        info!(path = ?self.path, urls = entries.len(), "Sitemap written");
        Ok(self.path.is_file())
    }
}
