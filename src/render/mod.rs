//! HTML page rendering.
//!
//! # Module Structure
//!
//! - `template` - `Template<V>` loaded from the templates directory
//! - `base` - the shared page shell
//! - `listing` - section listing pages
//! - `landing` - per-document landing pages
//! - `pages` - static pages (index, cqc, court-monitor, 404)
//!
//! All text pulled from CSV data is HTML-escaped before it reaches a page.

mod base;
mod landing;
mod listing;
mod pages;
mod template;

pub use base::BaseTemplate;
pub use landing::render_landing;
pub use listing::{ListingTemplate, render_listing};
pub use pages::STATIC_PAGES;
pub use template::Template;

use base::BASE_TEMPLATE;

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::config::SiteConfig;
use crate::document::Section;

/// Load `base-template.html`.
pub fn load_base(config: &SiteConfig) -> Result<BaseTemplate> {
    Ok(Template::load(&config.template_file(BASE_TEMPLATE))?)
}

/// Load a section's listing content template.
pub fn load_listing(config: &SiteConfig, section: Section) -> Result<ListingTemplate> {
    Ok(Template::load(
        &config.template_file(&section.content_template()),
    )?)
}

/// Write a page, creating parent directories.
pub fn write_page(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::template::TemplateError;
    use crate::config::test_config_at;
    use tempfile::TempDir;

    #[test]
    fn test_missing_base_template_is_fatal() {
        let dir = TempDir::new().unwrap();
        let config = test_config_at(dir.path());
        let err = load_base(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TemplateError>(),
            Some(TemplateError::Missing(_))
        ));
    }

    #[test]
    fn test_load_listing_template() {
        let dir = TempDir::new().unwrap();
        let config = test_config_at(dir.path());
        fs::create_dir_all(&config.build.templates).unwrap();
        fs::write(config.template_file("savp-content.html"), "<table>{rows}</table>").unwrap();

        let template = load_listing(&config, Section::Savp).unwrap();
        assert_eq!(template.content(), "<table>{rows}</table>");
        assert!(load_listing(&config, Section::Blackman).is_err());
    }

    #[test]
    fn test_write_page_creates_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("documents/savp-memo.html");
        write_page(&path, "<html></html>").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "<html></html>");
    }
}
