//! Unified document model.
//!
//! Every row of every section becomes one [`Document`]. Section adapters
//! hand over a [`DocumentFields`] tuple; the slug and landing page URL are
//! derived here, once, through the build's [`SlugRegistry`].

mod section;
pub mod slug;

pub use section::{RowLayout, Section};
pub use slug::{SlugRegistry, candidate_slug, composite_key, document_url, generate_slug};

use serde::{Deserialize, Serialize};

/// Raw fields produced by a section adapter.
///
/// Optional columns default to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFields {
    pub title: String,
    pub url: String,
    pub date: String,
    pub description: String,
    pub category: String,
    pub source: String,
    pub file_path: String,
}

/// A document in the archive.
///
/// `slug` and `document_url` are fixed at construction and have no setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    section: Section,
    /// Authoritative location of the resource (external link or `./assets/...`).
    pub url: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub source: String,
    slug: String,
    document_url: String,
    /// Path under the output root when the resource was copied locally.
    #[serde(default)]
    pub file_path: String,
}

impl Document {
    /// Build a document, claiming a unique slug in `slugs`.
    pub fn new(section: Section, fields: DocumentFields, slugs: &mut SlugRegistry) -> Self {
        let slug = slugs.claim(section, &candidate_slug(&fields.title));
        let document_url = document_url(section, &slug);

        let DocumentFields {
            title,
            url,
            date,
            description,
            category,
            source,
            file_path,
        } = fields;

        Self {
            title,
            section,
            url,
            date,
            description,
            category,
            source,
            slug,
            document_url,
            file_path,
        }
    }

    pub const fn section(&self) -> Section {
        self.section
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Landing page URL, relative to the output root.
    pub fn document_url(&self) -> &str {
        &self.document_url
    }

    /// Composite key `{section}-{slug}`, also the search index id.
    pub fn id(&self) -> String {
        composite_key(self.section, &self.slug)
    }

    pub fn is_local(&self) -> bool {
        !self.file_path.is_empty()
    }

    /// Resource link as seen from a page `depth` directories below the output root.
    pub fn resource_href(&self, depth: usize) -> String {
        if self.is_local() {
            format!("{}{}", "../".repeat(depth), self.file_path)
        } else {
            self.url.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str) -> DocumentFields {
        DocumentFields {
            title: title.to_string(),
            url: "https://example.com/a.pdf".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_derives_slug_and_url() {
        let mut slugs = SlugRegistry::new();
        let doc = Document::new(
            Section::CqcReports,
            fields("A Review of Broome Developmental Services"),
            &mut slugs,
        );
        assert_eq!(doc.slug(), "a-review-of-broome-developmental-services");
        assert_eq!(
            doc.document_url(),
            "documents/cqc-reports-a-review-of-broome-developmental-services.html"
        );
        assert_eq!(doc.id(), "cqc-reports-a-review-of-broome-developmental-services");
    }

    #[test]
    fn test_duplicate_titles_get_suffixes() {
        let mut slugs = SlugRegistry::new();
        let first = Document::new(Section::CqcReports, fields("Annual Report"), &mut slugs);
        let second = Document::new(Section::CqcReports, fields("Annual Report"), &mut slugs);

        assert_eq!(first.document_url(), "documents/cqc-reports-annual-report.html");
        assert_eq!(second.document_url(), "documents/cqc-reports-annual-report-2.html");
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_same_title_in_other_section_keeps_slug() {
        let mut slugs = SlugRegistry::new();
        let a = Document::new(Section::Blackman, fields("Status Report"), &mut slugs);
        let b = Document::new(Section::Otoole, fields("Status Report"), &mut slugs);
        assert_eq!(a.slug(), b.slug());
        assert_ne!(a.document_url(), b.document_url());
    }

    #[test]
    fn test_degenerate_title_uses_fallback() {
        let mut slugs = SlugRegistry::new();
        let a = Document::new(Section::Savp, fields("???"), &mut slugs);
        let b = Document::new(Section::Savp, fields("!!!"), &mut slugs);
        assert_eq!(a.slug(), "untitled");
        assert_eq!(b.slug(), "untitled-2");
    }

    #[test]
    fn test_resource_href() {
        let mut slugs = SlugRegistry::new();
        let external = Document::new(Section::CqcMedia, fields("Story"), &mut slugs);
        assert_eq!(external.resource_href(1), "https://example.com/a.pdf");

        let local = Document::new(
            Section::CqcReports,
            DocumentFields {
                title: "Local".into(),
                url: "./assets/cqc/local.pdf".into(),
                file_path: "assets/cqc/local.pdf".into(),
                ..Default::default()
            },
            &mut slugs,
        );
        assert!(local.is_local());
        assert_eq!(local.resource_href(0), "assets/cqc/local.pdf");
        assert_eq!(local.resource_href(1), "../assets/cqc/local.pdf");
    }

    #[test]
    fn test_deserialize_ignores_registry_extras() {
        let json = r#"{
            "title": "T", "section": "savp", "section_name": "Special Advisor",
            "section_path": "special-advisor.html", "url": "u",
            "slug": "t", "document_url": "documents/savp-t.html"
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.section(), Section::Savp);
        assert_eq!(doc.document_url(), "documents/savp-t.html");
        assert_eq!(doc.description, "");
    }
}
