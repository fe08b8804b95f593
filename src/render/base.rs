//! The shared page shell (`base-template.html`).
//!
//! Placeholders: `{meta_title}`, `{meta_description}`, `{canonical_url}`,
//! `{breadcrumb}`, `{page_title}`, `{content}`, `{path_prefix}`.

use super::template::{Template, TemplateVars, fill};
use crate::utils::html::{escape, escape_attr};

pub const BASE_TEMPLATE: &str = "base-template.html";

pub type BaseTemplate = Template<BaseVars<'static>>;

/// Variables for the base template.
///
/// Text fields are escaped on injection; `breadcrumb` and `content` are
/// trusted HTML fragments, inserted as-is. `{path_prefix}` inside hand-written
/// content must be expanded before it gets here.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseVars<'a> {
    pub meta_title: &'a str,
    pub meta_description: &'a str,
    pub canonical_url: &'a str,
    pub breadcrumb: &'a str,
    pub page_title: &'a str,
    pub content: &'a str,
    /// `./` for root pages, `../` for `documents/`.
    pub path_prefix: &'a str,
}

impl TemplateVars for BaseVars<'_> {
    fn apply(&self, content: &str) -> String {
        let meta_title = escape(self.meta_title);
        let meta_description = escape_attr(self.meta_description);
        let canonical_url = escape_attr(self.canonical_url);
        let page_title = escape(self.page_title);
        fill(
            content,
            &[
                ("meta_title", &*meta_title),
                ("meta_description", &*meta_description),
                ("canonical_url", &*canonical_url),
                ("breadcrumb", self.breadcrumb),
                ("page_title", &*page_title),
                ("content", self.content),
                ("path_prefix", self.path_prefix),
            ],
        )
    }
}
