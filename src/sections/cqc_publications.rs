//! CQC publications: `CQC-Publications.csv`, listed oldest first.

use anyhow::Result;
use serde::Deserialize;

use super::{BuildContext, SectionAdapter, SkipReason, read_rows, sort_by_date};
use crate::document::{Document, DocumentFields, Section};
use crate::sections::files::asset_key;
use crate::utils::date::format_date;

const DATA_FILE: &str = "CQC-Publications.csv";
const CATEGORY: &str = "Publication";

#[derive(Debug, Deserialize)]
struct PublicationRow {
    #[serde(rename = "Date", default)]
    date: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Publication", default)]
    publication: String,
    #[serde(rename = "URL", default)]
    url: String,
}

pub struct CqcPublications;

impl SectionAdapter for CqcPublications {
    fn section(&self) -> Section {
        Section::CqcPublications
    }

    fn collect(&self, ctx: &mut BuildContext) -> Result<Vec<Document>> {
        let section = self.section();
        let mut rows: Vec<PublicationRow> = read_rows(&ctx.config.data_file(DATA_FILE))?;
        sort_by_date(&mut rows, |r| &r.date);

        let store = ctx.asset_store(section)?;
        let mut docs = Vec::with_capacity(rows.len());

        for row in rows {
            let title = row.title.trim();
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
                description: String::new(),
                category: CATEGORY.to_string(),
                source: row.publication.trim().to_string(),
                file_path: location.file_path,
            };
            docs.push(ctx.document(section, fields));
        }

        Ok(docs)
    }
}
