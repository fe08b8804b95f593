//! CQC media coverage: `CQC-Coverage.csv`.
//!
//! The outlet name doubles as category badge and source.

use anyhow::Result;
use serde::Deserialize;

use super::{BuildContext, SectionAdapter, SkipReason, read_rows};
use crate::document::{Document, DocumentFields, Section};
use crate::sections::files::asset_key;
use crate::utils::date::format_date;

const DATA_FILE: &str = "CQC-Coverage.csv";

#[derive(Debug, Deserialize)]
struct CoverageRow {
    #[serde(rename = "Date", default)]
    date: String,
    #[serde(rename = "Media", default)]
    media: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "URL", default)]
    url: String,
}

pub struct CqcMedia;

impl SectionAdapter for CqcMedia {
    fn section(&self) -> Section {
        Section::CqcMedia
    }

    fn collect(&self, ctx: &mut BuildContext) -> Result<Vec<Document>> {
        let section = self.section();
        let rows: Vec<CoverageRow> = read_rows(&ctx.config.data_file(DATA_FILE))?;
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

            let media = row.media.trim().to_string();
            let fields = DocumentFields {
                title: title.to_string(),
                url: location.url,
                date: format_date(&row.date, section.date_style()),
                description: row.description,
                category: media.clone(),
                source: media,
                file_path: location.file_path,
            };
            docs.push(ctx.document(section, fields));
        }

        Ok(docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::test_support::Fixture;

    #[test]
    fn test_coverage_rows_keep_file_order() {
        let fx = Fixture::new();
        fx.write_data(
            DATA_FILE,
            "Date,Media,Title,Description,URL\n\
             5/1/1987,New York Times,Later Story,Second,https://nyt.example/2\n\
             1/2/1985,Daily News,Earlier Story,First,https://dn.example/1\n",
        );

        let mut ctx = BuildContext::new(&fx.config);
        let docs = CqcMedia.collect(&mut ctx).unwrap();

        assert_eq!(docs[0].title, "Later Story");
        assert_eq!(docs[0].date, "1987-05-01");
        assert_eq!(docs[0].category, "New York Times");
        assert_eq!(docs[0].source, "New York Times");
        assert_eq!(docs[1].url, "https://dn.example/1");
    }
}
