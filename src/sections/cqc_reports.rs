//! CQC Reports: `cqc-reports.csv` plus the `cqc-reports-matching.csv` lookup.
//!
//! The matching file maps a report title to either a URL or the name of
//! the scanned PDF in the archive folder. Titles absent from it are matched
//! against the folder directly.

use anyhow::Result;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use super::{BuildContext, SectionAdapter, SkipReason, read_rows, sort_by_date};
use crate::document::{Document, DocumentFields, Section};
use crate::sections::files::asset_key;
use crate::utils::date::format_date;

const DATA_FILE: &str = "cqc-reports.csv";
const MATCHING_FILE: &str = "cqc-reports-matching.csv";

#[derive(Debug, Deserialize)]
struct ReportRow {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Date", default)]
    date: String,
    #[serde(rename = "Category", default)]
    category: String,
    #[serde(rename = "Description", default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct MatchRow {
    title: String,
    #[serde(default)]
    filename: String,
}

pub struct CqcReports;

impl SectionAdapter for CqcReports {
    fn section(&self) -> Section {
        Section::CqcReports
    }

    fn collect(&self, ctx: &mut BuildContext) -> Result<Vec<Document>> {
        let section = self.section();
        let matches: FxHashMap<String, String> =
            read_rows::<MatchRow>(&ctx.config.data_file(MATCHING_FILE))?
                .into_iter()
                .map(|r| (r.title.trim().to_string(), r.filename.trim().to_string()))
                .collect();

        let mut rows: Vec<ReportRow> = read_rows(&ctx.config.data_file(DATA_FILE))?;
        sort_by_date(&mut rows, |r| &r.date);

        let store = ctx.asset_store(section)?;
        let mut docs = Vec::with_capacity(rows.len());

        for row in rows {
            let title = row.title.trim();
            if title.is_empty() {
                ctx.skip(section, title, SkipReason::EmptyTitle);
                continue;
            }

            let matched = matches.get(title).map_or("", String::as_str);
            let Some(location) = store.resolve(&[matched, title], &asset_key(title))? else {
                ctx.skip(section, title, SkipReason::NoLocation);
                continue;
            };

            let fields = DocumentFields {
                title: title.to_string(),
                url: location.url,
                date: format_date(&row.date, section.date_style()),
                description: row.description,
                category: row.category,
                source: String::new(),
                file_path: location.file_path,
            };
            docs.push(ctx.document(section, fields));
        }

        Ok(docs)
    }
}
