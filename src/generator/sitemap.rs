//! Sitemap generation.
//!
//! Lists static and listing pages, every document landing page, and every
//! PDF published under `assets/`, for search engine indexing.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.org/index.html</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <changefreq>monthly</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::document::Document;
use crate::utils::path::{collect_pdfs, url_path};
use crate::utils::plural::plural_count;
use crate::{debug, log};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Monthly,
    Yearly,
}

impl ChangeFreq {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

/// Top-level pages and their priorities.
const PAGES: [(&str, f32); 10] = [
    ("index.html", 1.0),
    ("cqc.html", 0.9),
    ("cqc-reports.html", 0.8),
    ("cqc-media.html", 0.8),
    ("cqc-publications.html", 0.8),
    ("special-advisor.html", 0.9),
    ("court-monitor.html", 0.9),
    ("otoole.html", 0.8),
    ("otoole-timeline.html", 0.7),
    ("blackman.html", 0.8),
];

const DOCUMENT_PRIORITY: f32 = 0.7;
const PDF_PRIORITY: f32 = 0.6;

/// Build sitemap if enabled. Returns the written path.
pub fn build_sitemap(config: &SiteConfig, docs: &[Document]) -> Result<Option<PathBuf>> {
    if !config.build.sitemap.enable {
        return Ok(None);
    }
    let base_url = config.site.base_url().unwrap_or_default();
    let sitemap = Sitemap::build(&config.build.output, base_url, docs);
    sitemap.write(&config.output_join(&config.build.sitemap.path)).map(Some)
}

#[derive(Debug, Default)]
struct Sitemap {
    urls: Vec<UrlEntry>,
    pages: usize,
    documents: usize,
    pdfs: usize,
}

#[derive(Debug)]
struct UrlEntry {
    loc: String,
    lastmod: Option<String>,
    changefreq: ChangeFreq,
    priority: f32,
}

impl Sitemap {
    fn build(output: &Path, base_url: &str, docs: &[Document]) -> Self {
        let mut sitemap = Self::default();
        let entry = |rel: &str, path: &Path, changefreq, priority| UrlEntry {
            loc: format!("{base_url}/{rel}"),
            lastmod: file_date(path),
            changefreq,
            priority,
        };

        for (page, priority) in PAGES {
            let path = output.join(page);
            if path.is_file() {
                sitemap.urls.push(entry(page, &path, ChangeFreq::Monthly, priority));
                sitemap.pages += 1;
            }
        }

        for doc in docs {
            let path = output.join(doc.document_url());
            if path.is_file() {
                sitemap.urls.push(entry(
                    doc.document_url(),
                    &path,
                    ChangeFreq::Monthly,
                    DOCUMENT_PRIORITY,
                ));
                sitemap.documents += 1;
            } else {
                debug!("sitemap"; "no landing page for {}", doc.document_url());
            }
        }

        for pdf in collect_pdfs(&output.join("assets")) {
            let rel = url_path(pdf.strip_prefix(output).unwrap_or(&pdf));
            sitemap
                .urls
                .push(entry(&rel, &pdf, ChangeFreq::Yearly, PDF_PRIORITY));
            sitemap.pdfs += 1;
        }

        sitemap
    }

    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for entry in self.urls {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape_xml(&entry.loc));
            xml.push_str("</loc>\n");
            if let Some(lastmod) = entry.lastmod {
                xml.push_str("    <lastmod>");
                xml.push_str(&lastmod);
                xml.push_str("</lastmod>\n");
            }
            xml.push_str("    <changefreq>");
            xml.push_str(entry.changefreq.as_str());
            xml.push_str("</changefreq>\n");
            xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    fn write(self, path: &Path) -> Result<PathBuf> {
        let summary = format!(
            "{} ({} pages, {} documents, {} PDFs)",
            plural_count(self.urls.len(), "URL"),
            self.pages,
            self.documents,
            self.pdfs
        );
        let xml = self.into_xml();

        fs::write(path, xml)
            .with_context(|| format!("Failed to write sitemap to {}", path.display()))?;

        log!("sitemap"; "{}", summary);
        Ok(path.to_path_buf())
    }
}

/// File modification date as `YYYY-MM-DD`, local time.
fn file_date(path: &Path) -> Option<String> {
    let modified = fs::metadata(path).and_then(|m| m.modified()).ok()?;
    Some(DateTime::<Local>::from(modified).format("%Y-%m-%d").to_string())
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config_at;
    use crate::document::{DocumentFields, Section, SlugRegistry};
    use tempfile::TempDir;

    fn entry(loc: &str) -> UrlEntry {
        UrlEntry {
            loc: loc.to_string(),
            lastmod: Some("2025-01-01".to_string()),
            changefreq: ChangeFreq::Monthly,
            priority: 0.7,
        }
    }

    fn doc(section: Section, title: &str) -> Document {
        let mut slugs = SlugRegistry::new();
        Document::new(
            section,
            DocumentFields {
                title: title.into(),
                url: "https://example.org".into(),
                ..Default::default()
            },
            &mut slugs,
        )
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_sitemap_empty() {
        let xml = Sitemap::default().into_xml();

        assert!(xml.contains(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
        assert!(xml.contains("</urlset>"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_sitemap_entry_fields() {
        let sitemap = Sitemap {
            urls: vec![entry("https://example.org/index.html")],
            ..Default::default()
        };
        let xml = sitemap.into_xml();

        assert!(xml.contains("<loc>https://example.org/index.html</loc>"));
        assert!(xml.contains("<lastmod>2025-01-01</lastmod>"));
        assert!(xml.contains("<changefreq>monthly</changefreq>"));
        assert!(xml.contains("<priority>0.7</priority>"));
    }

    #[test]
    fn test_sitemap_escapes_special_chars() {
        let sitemap = Sitemap {
            urls: vec![entry("https://example.org/assets/cqc/a&b.pdf")],
            ..Default::default()
        };
        let xml = sitemap.into_xml();
        assert!(xml.contains("<loc>https://example.org/assets/cqc/a&amp;b.pdf</loc>"));
    }

    #[test]
    fn test_build_from_output_tree() {
        let dir = TempDir::new().unwrap();
        let out = dir.path();
        fs::write(out.join("index.html"), "").unwrap();
        fs::write(out.join("blackman.html"), "").unwrap();
        fs::create_dir_all(out.join("documents")).unwrap();
        fs::write(out.join("documents/savp-memo.html"), "").unwrap();
        fs::create_dir_all(out.join("assets/cqc")).unwrap();
        fs::write(out.join("assets/cqc/Annual Report.pdf"), "").unwrap();

        let docs = [doc(Section::Savp, "Memo"), doc(Section::Savp, "Missing Page")];
        let sitemap = Sitemap::build(out, "https://example.org", &docs);

        assert_eq!((sitemap.pages, sitemap.documents, sitemap.pdfs), (2, 1, 1));
        let xml = sitemap.into_xml();
        assert!(xml.contains("<loc>https://example.org/index.html</loc>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.contains("<loc>https://example.org/documents/savp-memo.html</loc>"));
        assert!(xml.contains("<loc>https://example.org/assets/cqc/Annual%20Report.pdf</loc>"));
        assert!(xml.contains("<changefreq>yearly</changefreq>"));
        assert!(!xml.contains("missing-page"));

        let today = Local::now().format("%Y-%m-%d").to_string();
        assert!(xml.contains(&format!("<lastmod>{today}</lastmod>")));
    }

    #[test]
    fn test_build_sitemap_disabled() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config_at(dir.path());
        config.build.sitemap.enable = false;
        assert!(build_sitemap(&config, &[]).unwrap().is_none());
    }

    #[test]
    fn test_build_sitemap_writes_file() {
        let dir = TempDir::new().unwrap();
        let config = test_config_at(dir.path());
        fs::create_dir_all(&config.build.output).unwrap();

        let path = build_sitemap(&config, &[]).unwrap().unwrap();
        assert_eq!(path, config.output_join("sitemap.xml"));
        assert!(fs::read_to_string(path).unwrap().contains("<urlset"));
    }
}
