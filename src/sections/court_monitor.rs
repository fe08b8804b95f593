//! Court monitor reports: `blackman.csv` and `otoole.csv`.
//!
//! Both share one schema: `Document, Date, Description` plus optional
//! `URL` and `File` columns. A row links to its URL when present,
//! otherwise to the named file (or the title) in the source folder.

use anyhow::Result;
use serde::Deserialize;

use super::{BuildContext, SectionAdapter, SkipReason, read_rows};
use crate::document::{Document, DocumentFields, Section};
use crate::sections::files::asset_key;
use crate::utils::date::format_date;

const CATEGORY: &str = "Court Monitor Report";

#[derive(Debug, Deserialize)]
struct MonitorRow {
    #[serde(rename = "Document")]
    document: String,
    #[serde(rename = "Date", default)]
    date: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "URL", default)]
    url: String,
    #[serde(rename = "File", default)]
    file: String,
}

pub struct CourtMonitor {
    section: Section,
    data_file: &'static str,
}

impl CourtMonitor {
    pub const fn blackman() -> Self {
        Self {
            section: Section::Blackman,
            data_file: "blackman.csv",
        }
    }

    pub const fn otoole() -> Self {
        Self {
            section: Section::Otoole,
            data_file: "otoole.csv",
        }
    }
}

impl SectionAdapter for CourtMonitor {
    fn section(&self) -> Section {
        self.section
    }

    fn collect(&self, ctx: &mut BuildContext) -> Result<Vec<Document>> {
        let section = self.section;
        let rows: Vec<MonitorRow> = read_rows(&ctx.config.data_file(self.data_file))?;
        let store = ctx.asset_store(section)?;
        let mut docs = Vec::with_capacity(rows.len());

        for row in rows {
            let title = row.document.trim();
            if title.is_empty() {
                ctx.skip(section, title, SkipReason::EmptyTitle);
                continue;
            }

            let file = row.file.trim();
            let key = asset_key(if file.is_empty() { title } else { file });
            let Some(location) = store.resolve(&[&row.url, file, title], &key)? else {
                ctx.skip(section, title, SkipReason::NoLocation);
                continue;
            };

            let fields = DocumentFields {
                title: title.to_string(),
                url: location.url,
                date: format_date(&row.date, section.date_style()),
                description: row.description,
                category: CATEGORY.to_string(),
                source: String::new(),
                file_path: location.file_path,
            };
            docs.push(ctx.document(section, fields));
        }

        Ok(docs)
    }
}
