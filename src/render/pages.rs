//! Static pages built from content files in the templates directory.

use super::base::{BaseTemplate, BaseVars};
use super::template::fill;

const PATH_PREFIX: &str = "./";

/// A hand-written page: `{name}-content.html` wrapped in the base template.
#[derive(Debug, Clone, Copy)]
pub struct StaticPage {
    /// Output file name, e.g. `index.html`.
    pub output: &'static str,
    pub content_file: &'static str,
    pub meta_title: &'static str,
    pub meta_description: &'static str,
    pub page_title: &'static str,
}

pub const STATIC_PAGES: [StaticPage; 4] = [
    StaticPage {
        output: "index.html",
        content_file: "index-content.html",
        meta_title: "About Clarence J. Sundram",
        meta_description: "Clarence J. Sundram is a nationally recognized expert on conditions in institutions and community programs for persons with mental disabilities, serving as court monitor, special advisor, and founding chairman of the NY Commission on Quality of Care.",
        page_title: "About",
    },
    StaticPage {
        output: "cqc.html",
        content_file: "cqc-content.html",
        meta_title: "Commission on Quality of Care for the Mentally Disabled",
        meta_description: "Overview of the New York State Commission on Quality of Care for the Mentally Disabled and Clarence J. Sundram's work as founding Chairman.",
        page_title: "Commission on Quality of Care",
    },
    StaticPage {
        output: "court-monitor.html",
        content_file: "court-monitor-content.html",
        meta_title: "Court Monitor Work",
        meta_description: "Clarence J. Sundram's work as Court Monitor and Special Master in class action lawsuits involving the rights of persons with mental disabilities.",
        page_title: "Court Monitor",
    },
    StaticPage {
        output: "404.html",
        content_file: "404-content.html",
        meta_title: "Page Not Found",
        meta_description: "The page you are looking for could not be found.",
        page_title: "404 - Page Not Found",
    },
];

impl StaticPage {
    /// Wrap a content file. Its own `{path_prefix}` links are expanded first.
    pub fn render(&self, base: &BaseTemplate, content: &str) -> String {
        let content = fill(content, &[("path_prefix", PATH_PREFIX)]);
        base.render(&BaseVars {
            meta_title: self.meta_title,
            meta_description: self.meta_description,
            canonical_url: self.output,
            breadcrumb: "",
            page_title: self.page_title,
            content: &content,
            path_prefix: PATH_PREFIX,
        })
    }
}
