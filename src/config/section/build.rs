//! `[build]` configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::path::normalize_path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Directory holding the CSV exports.
    pub data: PathBuf,

    /// Directory holding `base-template.html` and the content templates.
    pub templates: PathBuf,

    /// Site output directory.
    pub output: PathBuf,

    /// Document registry JSON file.
    pub registry: PathBuf,

    pub sitemap: SitemapConfig,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            data: "data".into(),
            templates: "templates".into(),
            output: "docs".into(),
            registry: "data/document-registry.json".into(),
            sitemap: SitemapConfig::default(),
        }
    }
}

impl BuildSectionConfig {
    /// Resolve every path against the project root.
    pub fn normalize(&mut self, root: &Path) {
        self.data = normalize_path(&root.join(&self.data));
        self.templates = normalize_path(&root.join(&self.templates));
        self.output = normalize_path(&root.join(&self.output));
        self.registry = normalize_path(&root.join(&self.registry));
        // sitemap.path stays relative; it is joined with `output` at write time
    }
}

/// `[build.sitemap]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Enable sitemap generation.
    pub enable: bool,
    /// Output path for sitemap file, relative to the output directory.
    pub path: PathBuf,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "sitemap.xml".into(),
        }
    }
}
