//! Slug generation, uniqueness resolution and landing page URLs.
//!
//! The three functions here are the only place document identifiers are
//! derived. Every consumer (listing rows, landing pages, search index,
//! sitemap) goes through [`document_url`] or the value stored on a
//! [`Document`](super::Document).
//!
//! ```text
//! "Annual Report"  ──generate_slug──►  annual-report
//!                  ──resolve (cqc-reports, used)──►  annual-report-2
//!                  ──document_url──►  documents/cqc-reports-annual-report-2.html
//! ```

use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::LazyLock;

use super::Section;

/// Slug used when a title has no ASCII alphanumerics left after normalization.
pub const FALLBACK_SLUG: &str = "untitled";

static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static HYPHENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());

/// Convert a title to a URL-safe slug.
///
/// Lowercases, drops everything outside `[a-z0-9]`, whitespace and `-`,
/// turns whitespace runs into `-`, collapses hyphen runs and trims hyphens.
/// Accented letters are dropped, not transliterated.
///
/// Returns an empty string when nothing survives normalization.
pub fn generate_slug(title: &str) -> String {
    let lower = title.to_lowercase();
    let kept = DISALLOWED.replace_all(&lower, "");
    let dashed = WHITESPACE.replace_all(&kept, "-");
    let collapsed = HYPHENS.replace_all(&dashed, "-");
    collapsed.trim_matches('-').to_string()
}

/// Slug candidate for a title, never empty.
pub fn candidate_slug(title: &str) -> String {
    let slug = generate_slug(title);
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Composite uniqueness key: `{section}-{slug}`.
#[inline]
pub fn composite_key(section: Section, slug: &str) -> String {
    format!("{}-{}", section.id(), slug)
}

/// Landing page URL: `documents/{section}-{slug}.html`.
#[inline]
pub fn document_url(section: Section, slug: &str) -> String {
    format!("documents/{}.html", composite_key(section, slug))
}

/// Pick the first free slug for `section`, suffixing `-2`, `-3`, … on collision.
///
/// Pure: `used` is not modified. The caller inserts the chosen composite key.
pub fn ensure_unique_slug(slug: &str, section: Section, used: &FxHashSet<String>) -> String {
    if !used.contains(&composite_key(section, slug)) {
        return slug.to_string();
    }

    (2u32..)
        .map(|n| format!("{slug}-{n}"))
        .find(|candidate| !used.contains(&composite_key(section, candidate)))
        .unwrap_or_else(|| slug.to_string())
}

/// Composite keys claimed so far in one build.
///
/// Shared by every section adapter in run order, so the same slug can live
/// in two sections but never twice in one.
#[derive(Debug, Default)]
pub struct SlugRegistry {
    used: FxHashSet<String>,
}

impl SlugRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve without claiming.
    pub fn resolve(&self, section: Section, candidate: &str) -> String {
        ensure_unique_slug(candidate, section, &self.used)
    }

    /// Resolve and claim the resulting composite key.
    pub fn claim(&mut self, section: Section, candidate: &str) -> String {
        let slug = self.resolve(section, candidate);
        self.used.insert(composite_key(section, &slug));
        slug
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.used.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
