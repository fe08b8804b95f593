//! The closed set of archive sections.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::date::DateStyle;

/// Top-level content category with its own listing page and input schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    CqcReports,
    CqcMedia,
    CqcPublications,
    Savp,
    Blackman,
    Otoole,
    OtooleTimeline,
}

/// Column layout of a section's listing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLayout {
    /// date | category badge | title | description
    Report,
    /// date | title | source
    Publication,
}

impl Section {
    /// Every section, in the order a full build runs them.
    pub const BUILD_ORDER: [Self; 7] = [
        Self::CqcReports,
        Self::Savp,
        Self::Blackman,
        Self::Otoole,
        Self::OtooleTimeline,
        Self::CqcMedia,
        Self::CqcPublications,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            Self::CqcReports => "cqc-reports",
            Self::CqcMedia => "cqc-media",
            Self::CqcPublications => "cqc-publications",
            Self::Savp => "savp",
            Self::Blackman => "blackman",
            Self::Otoole => "otoole",
            Self::OtooleTimeline => "otoole-timeline",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::CqcReports => "CQC Reports",
            Self::CqcMedia => "CQC Media Coverage",
            Self::CqcPublications => "CQC Publications",
            Self::Savp => "Special Advisor",
            Self::Blackman => "Blackman-Jones Court Monitor",
            Self::Otoole => "O'Toole Court Monitor",
            Self::OtooleTimeline => "O'Toole Timeline",
        }
    }

    /// Listing page, relative to the output root.
    pub const fn path(self) -> &'static str {
        match self {
            Self::CqcReports => "cqc-reports.html",
            Self::CqcMedia => "cqc-media.html",
            Self::CqcPublications => "cqc-publications.html",
            Self::Savp => "special-advisor.html",
            Self::Blackman => "blackman.html",
            Self::Otoole => "otoole.html",
            Self::OtooleTimeline => "otoole-timeline.html",
        }
    }

    pub const fn date_style(self) -> DateStyle {
        match self {
            Self::CqcReports | Self::Blackman | Self::Otoole => DateStyle::MonthYear,
            Self::CqcMedia | Self::CqcPublications | Self::Savp | Self::OtooleTimeline => {
                DateStyle::Iso
            }
        }
    }

    pub const fn row_layout(self) -> RowLayout {
        match self {
            Self::CqcPublications => RowLayout::Publication,
            _ => RowLayout::Report,
        }
    }

    /// Directory under `assets/` that copied local files land in.
    pub const fn asset_dir(self) -> &'static str {
        match self {
            Self::CqcReports | Self::CqcMedia | Self::CqcPublications => "cqc",
            Self::Savp => "savp",
            Self::Blackman => "blackman",
            Self::Otoole | Self::OtooleTimeline => "otoole",
        }
    }

    /// Listing content template file name, e.g. `cqc-reports-content.html`.
    pub fn content_template(self) -> String {
        format!("{}-content.html", self.id())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_order_covers_every_section_once() {
        let mut ids: Vec<_> = Section::BUILD_ORDER.iter().map(|s| s.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 7);
    }

    #[test]
    fn test_serde_uses_id() {
        let json = serde_json::to_string(&Section::OtooleTimeline).unwrap();
        assert_eq!(json, "\"otoole-timeline\"");
        let back: Section = serde_json::from_str("\"cqc-reports\"").unwrap();
        assert_eq!(back, Section::CqcReports);
    }

    #[test]
    fn test_listing_paths() {
        assert_eq!(Section::Savp.path(), "special-advisor.html");
        assert_eq!(Section::CqcReports.content_template(), "cqc-reports-content.html");
    }
}
