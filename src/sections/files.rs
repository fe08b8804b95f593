//! Local document resolution and publishing.
//!
//! A CSV cell names either an external URL or a file in the section's
//! source folder. Local files are matched by a normalized key and copied
//! into `{output}/assets/{asset_dir}/`.
//!
//! # Key normalization
//!
//! ```text
//! "Annual Report: 1996-97"  →  "annual report- 1996-97.pdf"
//! "The \"Willowbrook\" Case" →  "the willowbrook case.pdf"
//! ```

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::debug;
use crate::document::Section;

/// File name a CSV value maps to: lowercase, `:` → `-`, quotes dropped, `.pdf` appended.
pub fn asset_key(name: &str) -> String {
    let mut key: String = name
        .trim()
        .to_lowercase()
        .chars()
        .filter(|&c| c != '"')
        .map(|c| if c == ':' { '-' } else { c })
        .collect();
    key.push_str(".pdf");
    key
}

/// Values starting with `http` are links, never file names.
pub fn is_external(value: &str) -> bool {
    value.trim_start().starts_with("http")
}

/// Where a document's resource ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// `https://...` or `./assets/{dir}/{key}`
    pub url: String,
    /// `assets/{dir}/{key}` for local resources, empty for links
    pub file_path: String,
}

impl Location {
    pub fn external(url: &str) -> Self {
        Self {
            url: url.trim().to_string(),
            file_path: String::new(),
        }
    }

    fn local(asset_dir: &str, key: &str) -> Self {
        let file_path = format!("assets/{asset_dir}/{key}");
        Self {
            url: format!("./{file_path}"),
            file_path,
        }
    }
}

/// Source folder index plus the section's asset directory in the output.
#[derive(Debug)]
pub struct AssetStore {
    section: Section,
    /// Lowercased file name → full path.
    sources: FxHashMap<String, PathBuf>,
    /// `{output}/assets/{asset_dir}`
    target: PathBuf,
}

impl AssetStore {
    /// Index the top level of `source_dir` (if configured).
    pub fn open(section: Section, source_dir: Option<&Path>, output: &Path) -> Result<Self> {
        let mut sources = FxHashMap::default();

        if let Some(dir) = source_dir {
            let entries = fs::read_dir(dir)
                .with_context(|| format!("Failed to read source directory {}", dir.display()))?;
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_file() {
                    let name = entry.file_name().to_string_lossy().to_lowercase();
                    sources.insert(name, path);
                }
            }
            debug!("assets"; "{}: indexed {} source files", section, sources.len());
        }

        Ok(Self {
            section,
            sources,
            target: output.join("assets").join(section.asset_dir()),
        })
    }

    /// Source file matching `name` after key normalization.
    pub fn find(&self, name: &str) -> Option<&Path> {
        self.sources.get(&asset_key(name)).map(PathBuf::as_path)
    }

    /// Copy `source` into the asset directory as `key`.
    pub fn publish(&self, source: &Path, key: &str) -> Result<Location> {
        fs::create_dir_all(&self.target)
            .with_context(|| format!("Failed to create {}", self.target.display()))?;
        let dest = self.target.join(key);
        fs::copy(source, &dest).with_context(|| {
            format!("Failed to copy {} to {}", source.display(), dest.display())
        })?;
        Ok(Location::local(self.section.asset_dir(), key))
    }

    /// Asset `key` already present in the output tree from an earlier build.
    pub fn existing(&self, key: &str) -> Option<Location> {
        self.target
            .join(key)
            .is_file()
            .then(|| Location::local(self.section.asset_dir(), key))
    }

    /// Resolve a row's resource.
    ///
    /// Tries each candidate in turn: an `http` value is used as a link, a
    /// value matching a source file is copied in as `key`. Falls back to an
    /// asset already published as `key`.
    pub fn resolve(&self, candidates: &[&str], key: &str) -> Result<Option<Location>> {
        for candidate in candidates.iter().map(|c| c.trim()).filter(|c| !c.is_empty()) {
            if is_external(candidate) {
                return Ok(Some(Location::external(candidate)));
            }
            if let Some(source) = self.find(candidate) {
                return self.publish(source, key).map(Some);
            }
        }
        Ok(self.existing(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with(files: &[&str]) -> (TempDir, AssetStore) {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();
        for name in files {
            fs::write(src.join(name), name.as_bytes()).unwrap();
        }
        let store = AssetStore::open(Section::CqcReports, Some(&src), &dir.path().join("out")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_asset_key() {
        assert_eq!(asset_key("Annual Report: 1996-97"), "annual report- 1996-97.pdf");
        assert_eq!(asset_key("The \"Willowbrook\" Case"), "the willowbrook case.pdf");
        assert_eq!(asset_key("  Padded  "), "padded.pdf");
    }

    #[test]
    fn test_is_external() {
        assert!(is_external("https://example.org/a.pdf"));
        assert!(is_external("http://example.org"));
        assert!(!is_external("Annual Report"));
        assert!(!is_external("PDF"));
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let (_dir, store) = store_with(&["Annual Report- 1996.PDF"]);
        assert!(store.find("annual report: 1996").is_some());
        assert!(store.find("Other").is_none());
    }

    #[test]
    fn test_resolve_external_first() {
        let (_dir, store) = store_with(&["a.pdf"]);
        let loc = store
            .resolve(&["https://example.org/x", "a"], "a.pdf")
            .unwrap()
            .unwrap();
        assert_eq!(loc.url, "https://example.org/x");
        assert!(loc.file_path.is_empty());
    }

    #[test]
    fn test_resolve_copies_local_file() {
        let (dir, store) = store_with(&["matched name.pdf"]);
        let loc = store
            .resolve(&["", "Matched Name"], "title key.pdf")
            .unwrap()
            .unwrap();
        assert_eq!(loc.url, "./assets/cqc/title key.pdf");
        assert_eq!(loc.file_path, "assets/cqc/title key.pdf");
        let copied = dir.path().join("out/assets/cqc/title key.pdf");
        assert_eq!(fs::read_to_string(copied).unwrap(), "matched name.pdf");
    }

    #[test]
    fn test_resolve_falls_back_to_existing_asset() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        fs::create_dir_all(out.join("assets/savp")).unwrap();
        fs::write(out.join("assets/savp/memo.pdf"), "x").unwrap();

        let store = AssetStore::open(Section::Savp, None, &out).unwrap();
        let loc = store.resolve(&["Memo"], "memo.pdf").unwrap().unwrap();
        assert_eq!(loc.file_path, "assets/savp/memo.pdf");

        assert!(store.resolve(&["Missing"], "missing.pdf").unwrap().is_none());
    }

    #[test]
    fn test_open_missing_dir_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        assert!(AssetStore::open(Section::Blackman, Some(&missing), dir.path()).is_err());
    }
}
