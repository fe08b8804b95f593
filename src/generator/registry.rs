//! Document registry (`data/document-registry.json`).
//!
//! The registry is the hand-off between collection and everything after
//! it: landing pages, search index and sitemap read documents back from
//! here rather than from the adapters.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::{fs, path::Path};

use crate::document::{Document, Section, document_url};

/// Registry record: every document field plus section display data.
#[derive(Debug, Serialize)]
struct RegistryEntry<'a> {
    title: &'a str,
    section: Section,
    section_name: &'static str,
    section_path: &'static str,
    url: &'a str,
    date: &'a str,
    description: &'a str,
    category: &'a str,
    source: &'a str,
    slug: &'a str,
    document_url: &'a str,
    file_path: &'a str,
}

impl<'a> From<&'a Document> for RegistryEntry<'a> {
    fn from(doc: &'a Document) -> Self {
        let section = doc.section();
        Self {
            title: &doc.title,
            section,
            section_name: section.name(),
            section_path: section.path(),
            url: &doc.url,
            date: &doc.date,
            description: &doc.description,
            category: &doc.category,
            source: &doc.source,
            slug: doc.slug(),
            document_url: doc.document_url(),
            file_path: &doc.file_path,
        }
    }
}

pub fn to_json(docs: &[Document]) -> Result<String> {
    let entries: Vec<RegistryEntry> = docs.iter().map(RegistryEntry::from).collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

pub fn write_registry(path: &Path, docs: &[Document]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, to_json(docs)?)
        .with_context(|| format!("Failed to write registry to {}", path.display()))
}

/// Read documents back, rejecting records whose URL disagrees with their slug.
pub fn load_registry(path: &Path) -> Result<Vec<Document>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read registry {}", path.display()))?;
    let docs: Vec<Document> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse registry {}", path.display()))?;

    for doc in &docs {
        let expected = document_url(doc.section(), doc.slug());
        if doc.document_url() != expected {
            bail!(
                "registry entry `{}` has document_url `{}`, expected `{}`",
                doc.title,
                doc.document_url(),
                expected
            );
        }
    }
    Ok(docs)
}
