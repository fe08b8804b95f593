//! Client-side search index (`search-index.json`).
//!
//! A flat array the browser loads into its search library; `url` points at
//! the landing page, not the resource.

use anyhow::{Context, Result};
use serde::Serialize;
use std::{fs, path::Path};

use crate::document::{Document, Section};

pub const SEARCH_INDEX: &str = "search-index.json";

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SearchEntry<'a> {
    pub id: String,
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub date: &'a str,
    pub section: Section,
    pub source: &'a str,
    pub url: &'a str,
}

impl<'a> From<&'a Document> for SearchEntry<'a> {
    fn from(doc: &'a Document) -> Self {
        Self {
            id: doc.id(),
            title: &doc.title,
            description: &doc.description,
            category: &doc.category,
            date: &doc.date,
            section: doc.section(),
            source: &doc.source,
            url: doc.document_url(),
        }
    }
}

pub fn build_index(docs: &[Document]) -> Vec<SearchEntry<'_>> {
    docs.iter().map(SearchEntry::from).collect()
}

/// Write `{output}/search-index.json`.
pub fn write_search_index(output: &Path, docs: &[Document]) -> Result<()> {
    let path = output.join(SEARCH_INDEX);
    let json = serde_json::to_string_pretty(&build_index(docs))?;
    fs::write(&path, json)
        .with_context(|| format!("Failed to write search index to {}", path.display()))
}
