//! O'Toole timeline: `otoole-timeline.csv`.
//!
//! Each row is a court action with the news coverage it drew; the coverage
//! headline becomes the document title.

use anyhow::Result;
use serde::Deserialize;

use super::{BuildContext, SectionAdapter, SkipReason, read_rows};
use crate::document::{Document, DocumentFields, Section};
use crate::sections::files::asset_key;
use crate::utils::date::format_date;

const DATA_FILE: &str = "otoole-timeline.csv";
const CATEGORY: &str = "Timeline Event";

#[derive(Debug, Deserialize)]
struct TimelineRow {
    #[serde(rename = "DATE", default)]
    date: String,
    #[serde(rename = "ACTION", default)]
    action: String,
    #[serde(rename = "News Coverage")]
    coverage: String,
    #[serde(rename = "URL", default)]
    url: String,
}

pub struct OtooleTimeline;

impl SectionAdapter for OtooleTimeline {
    fn section(&self) -> Section {
        Section::OtooleTimeline
    }

    fn collect(&self, ctx: &mut BuildContext) -> Result<Vec<Document>> {
        let section = self.section();
        let rows: Vec<TimelineRow> = read_rows(&ctx.config.data_file(DATA_FILE))?;
        let store = ctx.asset_store(section)?;
        let mut docs = Vec::with_capacity(rows.len());

        for row in rows {
            let title = row.coverage.trim();
            if title.is_empty() {
                ctx.skip(section, title, SkipReason::EmptyTitle);
                continue;
            }

            let Some(location) = store.resolve(&[&row.url], &asset_key(title))? else {
                ctx.skip(section, title, SkipReason::NoLocation);
                continue;
            };

            let fields = DocumentFields {
                title: title.to_string(),
                url: location.url,
                date: format_date(&row.date, section.date_style()),
                description: row.action,
                category: CATEGORY.to_string(),
                source: String::new(),
                file_path: location.file_path,
            };
            docs.push(ctx.document(section, fields));
        }

        Ok(docs)
    }
}
