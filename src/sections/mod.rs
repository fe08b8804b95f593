//! Section adapters: CSV rows → [`Document`]s.
//!
//! Each section has its own CSV schema. An adapter reads its export(s),
//! resolves where every row's resource lives, and builds documents through
//! the shared [`BuildContext`] so slugs stay unique across the whole build.
//!
//! # Pipeline position
//!
//! ```text
//! data/*.csv ──► SectionAdapter::collect ──► Vec<Document> ──► listing / registry
//!                      │
//!                      └─► files::AssetStore (copy local PDFs into output/assets)
//! ```

mod cqc_media;
mod cqc_publications;
mod cqc_reports;
mod court_monitor;
pub mod files;
mod otoole_timeline;
mod savp;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::SiteConfig;
use crate::document::{Document, DocumentFields, Section, SlugRegistry};
use crate::utils::date::{parse_date, reference_date};
use crate::utils::plural::plural_count;
use crate::{debug, log};

use files::AssetStore;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("input file `{0}` not found")]
    MissingInput(PathBuf),

    #[error("failed to parse `{path}` (row {row})")]
    Csv {
        path: PathBuf,
        row: u64,
        #[source]
        source: csv::Error,
    },
}

// ============================================================================
// Build context
// ============================================================================

/// State shared by every adapter in one build.
///
/// Owns the used-slug set; adapters receive it explicitly instead of
/// reaching for global state.
pub struct BuildContext<'a> {
    pub config: &'a SiteConfig,
    pub slugs: SlugRegistry,
    pub skipped: SkipReport,
}

impl<'a> BuildContext<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self {
            config,
            slugs: SlugRegistry::new(),
            skipped: SkipReport::default(),
        }
    }

    /// Build a document, claiming its slug.
    pub fn document(&mut self, section: Section, fields: DocumentFields) -> Document {
        Document::new(section, fields, &mut self.slugs)
    }

    /// Log and record a row that produced no document.
    pub fn skip(&mut self, section: Section, title: &str, reason: SkipReason) {
        log!("skip"; "{}: {} ({})", section, display_title(title), reason.as_str());
        self.skipped.entries.push(Skipped {
            section,
            title: title.to_string(),
            reason,
        });
    }

    pub fn asset_store(&self, section: Section) -> Result<AssetStore> {
        AssetStore::open(
            section,
            self.config.source_dir(section),
            &self.config.build.output,
        )
    }
}

fn display_title(title: &str) -> &str {
    if title.is_empty() { "<untitled row>" } else { title }
}

// ============================================================================
// Skip report
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Title column empty.
    EmptyTitle,
    /// Neither a URL nor a matching local file.
    NoLocation,
}

impl SkipReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyTitle => "empty title",
            Self::NoLocation => "no file or link",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub section: Section,
    pub title: String,
    pub reason: SkipReason,
}

/// Rows dropped during a build, summarized at the end.
#[derive(Debug, Default)]
pub struct SkipReport {
    entries: Vec<Skipped>,
}

impl SkipReport {
    #[cfg(test)]
    pub fn entries(&self) -> &[Skipped] {
        &self.entries
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn count_for(&self, section: Section) -> usize {
        self.entries.iter().filter(|s| s.section == section).count()
    }

    pub fn print_summary(&self) {
        if self.entries.is_empty() {
            return;
        }
        log!("skip"; "{} without a document:", plural_count(self.entries.len(), "row"));
        for entry in &self.entries {
            log!("skip"; "- [{}] {} ({})", entry.section, display_title(&entry.title), entry.reason.as_str());
        }
    }
}

// ============================================================================
// Adapter trait
// ============================================================================

/// Maps one section's CSV export(s) to documents.
pub trait SectionAdapter {
    fn section(&self) -> Section;

    fn collect(&self, ctx: &mut BuildContext) -> Result<Vec<Document>>;
}

pub fn adapter_for(section: Section) -> Box<dyn SectionAdapter> {
    match section {
        Section::CqcReports => Box::new(cqc_reports::CqcReports),
        Section::CqcMedia => Box::new(cqc_media::CqcMedia),
        Section::CqcPublications => Box::new(cqc_publications::CqcPublications),
        Section::Savp => Box::new(savp::Savp),
        Section::Blackman => Box::new(court_monitor::CourtMonitor::blackman()),
        Section::Otoole => Box::new(court_monitor::CourtMonitor::otoole()),
        Section::OtooleTimeline => Box::new(otoole_timeline::OtooleTimeline),
    }
}

/// Run every adapter in `order`, sharing one context.
///
/// Slug suffixes depend on this order: the first document to claim a slug
/// keeps it.
pub fn collect_documents(
    order: &[Section],
    ctx: &mut BuildContext,
) -> Result<Vec<(Section, Vec<Document>)>> {
    let mut collected = Vec::with_capacity(order.len());
    for &section in order {
        let adapter = adapter_for(section);
        let docs = adapter
            .collect(ctx)
            .with_context(|| format!("Failed to collect {} documents", section.name()))?;
        debug!("collect"; "{}: {}", section, plural_count(docs.len(), "document"));
        collected.push((section, docs));
    }
    Ok(collected)
}

// ============================================================================
// CSV helpers
// ============================================================================

/// Deserialize every record of a CSV file with a header row.
pub fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.is_file() {
        return Err(SourceError::MissingInput(path.to_path_buf()).into());
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut rows = Vec::new();
    for (i, record) in reader.deserialize().enumerate() {
        let row = record.map_err(|source| SourceError::Csv {
            path: path.to_path_buf(),
            row: i as u64 + 2,
            source,
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Stable sort by parsed date; unparseable dates go last.
pub fn sort_by_date<T>(rows: &mut [T], date: impl Fn(&T) -> &str) {
    let reference = reference_date();
    rows.sort_by_cached_key(|row| {
        let parsed = parse_date(date(row), reference);
        (parsed.is_none(), parsed)
    });
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Temp-dir fixtures shared by the adapter tests.

    use super::*;
    use crate::config::test_config_at;
    use std::fs;
    use tempfile::TempDir;

    pub struct Fixture {
        pub dir: TempDir,
        pub config: SiteConfig,
    }

    impl Fixture {
        pub fn new() -> Self {
            let dir = TempDir::new().unwrap();
            fs::create_dir_all(dir.path().join("data")).unwrap();
            let config = test_config_at(dir.path());
            Self { dir, config }
        }

        pub fn write_data(&self, name: &str, content: &str) {
            fs::write(self.config.data_file(name), content).unwrap();
        }

        /// Create a source directory for `section` holding `files`.
        pub fn with_sources(mut self, section: Section, files: &[&str]) -> Self {
            let src = self.dir.path().join("sources").join(section.id());
            fs::create_dir_all(&src).unwrap();
            for name in files {
                fs::write(src.join(name), format!("%PDF {name}")).unwrap();
            }
            self.config.sources.set(section, src);
            self
        }

        pub fn output(&self, rel: &str) -> PathBuf {
            self.config.output_join(rel)
        }
    }
}
