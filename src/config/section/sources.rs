//! `[sources]` configuration: where each section's local documents live.
//!
//! ```toml
//! [sources]
//! cqc-reports = "~/Dropbox/Archive/CQC Reports"
//! blackman = "~/Dropbox/Archive/Blackman"
//! ```
//!
//! Sections without an entry only resolve rows that carry an external URL
//! or whose asset is already present in the output tree.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::document::Section;
use crate::utils::path::resolve_against;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SourcesConfig {
    pub cqc_reports: Option<PathBuf>,
    pub cqc_media: Option<PathBuf>,
    pub cqc_publications: Option<PathBuf>,
    pub savp: Option<PathBuf>,
    pub blackman: Option<PathBuf>,
    pub otoole: Option<PathBuf>,
    pub otoole_timeline: Option<PathBuf>,
}

impl SourcesConfig {
    pub fn dir(&self, section: Section) -> Option<&Path> {
        self.slot(section).as_deref()
    }

    const fn slot(&self, section: Section) -> &Option<PathBuf> {
        match section {
            Section::CqcReports => &self.cqc_reports,
            Section::CqcMedia => &self.cqc_media,
            Section::CqcPublications => &self.cqc_publications,
            Section::Savp => &self.savp,
            Section::Blackman => &self.blackman,
            Section::Otoole => &self.otoole,
            Section::OtooleTimeline => &self.otoole_timeline,
        }
    }

    fn slot_mut(&mut self, section: Section) -> &mut Option<PathBuf> {
        match section {
            Section::CqcReports => &mut self.cqc_reports,
            Section::CqcMedia => &mut self.cqc_media,
            Section::CqcPublications => &mut self.cqc_publications,
            Section::Savp => &mut self.savp,
            Section::Blackman => &mut self.blackman,
            Section::Otoole => &mut self.otoole,
            Section::OtooleTimeline => &mut self.otoole_timeline,
        }
    }

    #[cfg(test)]
    pub fn set(&mut self, section: Section, dir: impl Into<PathBuf>) {
        *self.slot_mut(section) = Some(dir.into());
    }

    /// Expand `~` and resolve relative entries against the project root.
    pub fn normalize(&mut self, root: &Path) {
        for section in Section::BUILD_ORDER {
            if let Some(dir) = self.slot_mut(section).take() {
                *self.slot_mut(section) = Some(resolve_against(&dir, root));
            }
        }
    }

    /// Configured directories must exist.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for section in Section::BUILD_ORDER {
            if let Some(dir) = self.dir(section)
                && !dir.is_dir()
            {
                diag.error_with_hint(
                    field_path(section),
                    format!("source directory `{}` does not exist", dir.display()),
                    "fix the path or remove the entry to rely on URLs only",
                );
            }
        }
    }
}

const fn field_path(section: Section) -> FieldPath {
    match section {
        Section::CqcReports => FieldPath::new("sources.cqc-reports"),
        Section::CqcMedia => FieldPath::new("sources.cqc-media"),
        Section::CqcPublications => FieldPath::new("sources.cqc-publications"),
        Section::Savp => FieldPath::new("sources.savp"),
        Section::Blackman => FieldPath::new("sources.blackman"),
        Section::Otoole => FieldPath::new("sources.otoole"),
        Section::OtooleTimeline => FieldPath::new("sources.otoole-timeline"),
    }
}
