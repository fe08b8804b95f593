//! Special Advisor documents: `savp.csv`.
//!
//! The `URL` column holds either a link or the literal `PDF`, meaning the
//! document is a local file published as `assets/savp/{slug}.pdf`.

use anyhow::Result;
use serde::Deserialize;

use super::{BuildContext, SectionAdapter, SkipReason, read_rows};
use crate::document::{Document, DocumentFields, Section, generate_slug};
use crate::sections::files::asset_key;
use crate::utils::date::format_date;

const DATA_FILE: &str = "savp.csv";

/// `URL` value marking a local PDF.
const LOCAL_MARKER: &str = "PDF";

#[derive(Debug, Deserialize)]
struct SavpRow {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Date", default)]
    date: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "Type", default)]
    kind: String,
    #[serde(rename = "URL", default)]
    url: String,
}

pub struct Savp;

impl SectionAdapter for Savp {
    fn section(&self) -> Section {
        Section::Savp
    }

    fn collect(&self, ctx: &mut BuildContext) -> Result<Vec<Document>> {
        let section = self.section();
        let rows: Vec<SavpRow> = read_rows(&ctx.config.data_file(DATA_FILE))?;
        let store = ctx.asset_store(section)?;
        let mut docs = Vec::with_capacity(rows.len());

        for row in rows {
            let title = row.title.trim();
            if title.is_empty() {
                ctx.skip(section, title, SkipReason::EmptyTitle);
                continue;
            }

            let url = row.url.trim();
            let location = if url == LOCAL_MARKER {
                let key = format!("{}.pdf", generate_slug(title));
                store.resolve(&[title], &key)?
            } else {
                store.resolve(&[url], &asset_key(url))?
            };
            let Some(location) = location else {
                ctx.skip(section, title, SkipReason::NoLocation);
                continue;
            };

            let fields = DocumentFields {
                title: title.to_string(),
                url: location.url,
                date: format_date(&row.date, section.date_style()),
                description: row.description,
                category: row.kind,
                source: String::new(),
                file_path: location.file_path,
            };
            docs.push(ctx.document(section, fields));
        }

        Ok(docs)
    }
}
