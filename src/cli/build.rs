//! Site building orchestration.
//!
//! Build pipeline phases:
//! - **Static pages** - index, cqc, court-monitor, 404
//! - **Collect** - every section adapter, in build order, sharing one slug registry
//! - **Listings** - one listing page per section
//! - **Registry** - write the document registry, then read it back
//! - **Landing pages** - one page per registry document
//! - **Search index / Sitemap** - derived from the registry
//! - **Summary** - per-section counts and skipped rows

use anyhow::{Context, Result};
use std::fs;

use crate::config::SiteConfig;
use crate::document::{Document, Section};
use crate::generator::{registry, search::write_search_index, sitemap::build_sitemap};
use crate::logger::{self, ProgressLine};
use crate::render::{
    BaseTemplate, STATIC_PAGES, load_base, load_listing, render_landing, render_listing,
    write_page,
};
use crate::sections::{BuildContext, SkipReport, collect_documents};
use crate::utils::plural::plural_count;
use crate::{debug, log};

/// Build the entire site.
///
/// Pipeline: static pages -> collect -> listings -> registry -> landing pages -> search -> sitemap
pub fn build_site(config: &SiteConfig) -> Result<()> {
    fs::create_dir_all(&config.build.output).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.build.output.display()
        )
    })?;

    let base = load_base(config)?;

    logger::rule();
    log!("build"; "generating static pages");
    build_static_pages(config, &base)?;

    logger::rule();
    log!("build"; "collecting documents");
    let mut ctx = BuildContext::new(config);
    let collected = collect_documents(&Section::BUILD_ORDER, &mut ctx)?;
    build_listings(config, &base, &collected)?;

    let documents: Vec<Document> = collected.into_iter().flat_map(|(_, docs)| docs).collect();
    registry::write_registry(&config.build.registry, &documents)?;
    log!("build"; "registry: {}", config.root_relative(&config.build.registry).display());

    // Everything downstream reads the registry, not the in-memory collection
    let documents = registry::load_registry(&config.build.registry)?;

    logger::rule();
    log!("build"; "generating document landing pages");
    build_landing_pages(config, &base, &documents)?;

    logger::rule();
    write_search_index(&config.build.output, &documents)?;
    if build_sitemap(config, &documents)?.is_none() {
        debug!("sitemap"; "disabled");
    }

    print_summary(&documents, &ctx.skipped);
    Ok(())
}

fn build_static_pages(config: &SiteConfig, base: &BaseTemplate) -> Result<()> {
    for page in &STATIC_PAGES {
        let content_path = config.template_file(page.content_file);
        let content = fs::read_to_string(&content_path)
            .with_context(|| format!("Failed to read {}", content_path.display()))?;
        write_page(&config.output_join(page.output), &page.render(base, &content))?;
        debug!("page"; "{}", page.output);
    }
    log!("build"; "{}", plural_count(STATIC_PAGES.len(), "static page"));
    Ok(())
}

fn build_listings(
    config: &SiteConfig,
    base: &BaseTemplate,
    collected: &[(Section, Vec<Document>)],
) -> Result<()> {
    for (section, docs) in collected {
        let content = load_listing(config, *section)?;
        let html = render_listing(base, &content, *section, docs);
        write_page(&config.output_join(section.path()), &html)?;
        log!("build"; "{}: {}", section.path(), plural_count(docs.len(), "document"));
    }
    Ok(())
}

fn build_landing_pages(config: &SiteConfig, base: &BaseTemplate, docs: &[Document]) -> Result<()> {
    let counts: Vec<(&'static str, usize)> = Section::BUILD_ORDER
        .iter()
        .map(|s| (s.id(), docs.iter().filter(|d| d.section() == *s).count()))
        .collect();
    let mut progress = ProgressLine::new(&counts);

    for doc in docs {
        write_page(&config.output_join(doc.document_url()), &render_landing(base, doc))?;
        progress.inc(doc.section().id());
    }

    progress.finish();
    Ok(())
}

fn print_summary(docs: &[Document], skipped: &SkipReport) {
    logger::rule();
    log!("done"; "build complete: {}", plural_count(docs.len(), "document"));
    for section in Section::BUILD_ORDER {
        let count = docs.iter().filter(|d| d.section() == section).count();
        match skipped.count_for(section) {
            0 => log!("done"; "  {}: {}", section.id(), count),
            n => log!("done"; "  {}: {} ({} skipped)", section.id(), count, n),
        }
    }
    skipped.print_summary();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::test_support::Fixture;
    use std::path::Path;

    const BASE: &str = "<html><head><title>{meta_title}</title>\
        <link rel=\"canonical\" href=\"{canonical_url}\"></head>\
        <body>{breadcrumb}<h1>{page_title}</h1>{content}\
        <script src=\"{path_prefix}search.js\"></script></body></html>";

    fn write_templates(dir: &Path) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join("base-template.html"), BASE).unwrap();
        for page in &STATIC_PAGES {
            fs::write(dir.join(page.content_file), "<p>static</p>").unwrap();
        }
        for section in Section::BUILD_ORDER {
            fs::write(
                dir.join(section.content_template()),
                "<table><tbody>{rows}</tbody></table>",
            )
            .unwrap();
        }
    }

    fn write_data(fx: &Fixture) {
        fx.write_data("cqc-reports-matching.csv", "title,filename\nAnnual Report,annual report 1990\n");
        fx.write_data(
            "cqc-reports.csv",
            "Title,Date,Category,Description\n\
             Annual Report,7/1/1990,Annual,Yearly summary\n\
             ,1/1/1991,Annual,\n",
        );
        fx.write_data(
            "CQC-Coverage.csv",
            "Date,Media,Title,Description,URL\n3/4/1992,Times,Annual Report,Story,https://news.example.org/a\n",
        );
        fx.write_data(
            "CQC-Publications.csv",
            "Date,Title,Publication,URL\n1995,Care Standards,Journal,https://journal.example.org/b\n",
        );
        fx.write_data(
            "savp.csv",
            "Title,Date,Description,Type,URL\nLost Memo,2004,,Memo,PDF\n",
        );
        fx.write_data(
            "blackman.csv",
            "Document,Date,Description,URL,File\nFirst Report,6/30/2000,Findings,https://court.example.org/1,\n",
        );
        fx.write_data("otoole.csv", "Document,Date,Description,URL,File\n");
        fx.write_data(
            "otoole-timeline.csv",
            "DATE,ACTION,News Coverage,URL\n1/2/2003,Filed,Case Filed,https://news.example.org/c\n",
        );
    }

    fn fixture() -> Fixture {
        let fx = Fixture::new().with_sources(Section::CqcReports, &["Annual Report 1990.pdf"]);
        write_templates(&fx.config.build.templates);
        write_data(&fx);
        fx
    }

    #[test]
    fn test_build_site_end_to_end() {
        let fx = fixture();
        build_site(&fx.config).unwrap();

        for page in ["index.html", "cqc.html", "court-monitor.html", "404.html"] {
            assert!(fx.output(page).is_file(), "missing {page}");
        }
        for section in Section::BUILD_ORDER {
            assert!(fx.output(section.path()).is_file(), "missing {}", section.path());
        }

        // Same title in two sections keeps the bare slug in each
        assert!(fx.output("documents/cqc-reports-annual-report.html").is_file());
        assert!(fx.output("documents/cqc-media-annual-report.html").is_file());
        assert!(fx.output("assets/cqc/annual report.pdf").is_file());

        let listing = fs::read_to_string(fx.output("cqc-reports.html")).unwrap();
        assert!(listing.contains("href=\"documents/cqc-reports-annual-report.html\""));
        assert!(listing.contains("src=\"./search.js\""));

        let landing =
            fs::read_to_string(fx.output("documents/cqc-reports-annual-report.html")).unwrap();
        assert!(landing.contains("href=\"../assets/cqc/annual report.pdf\""));

        let docs = registry::load_registry(&fx.config.build.registry).unwrap();
        assert_eq!(docs.len(), 5);

        let index = fs::read_to_string(fx.output("search-index.json")).unwrap();
        assert!(index.contains("\"id\": \"otoole-timeline-case-filed\""));
        assert!(!index.contains("Lost Memo"));

        let sitemap = fs::read_to_string(fx.output("sitemap.xml")).unwrap();
        assert!(!sitemap.contains("savp-lost-memo"));
        assert!(sitemap.contains("<loc>https://example.org/assets/cqc/annual%20report.pdf</loc>"));
        assert!(sitemap.contains("<loc>https://example.org/blackman.html</loc>"));
    }

    #[test]
    fn test_build_site_records_skipped_rows() {
        let fx = fixture();
        let mut ctx = BuildContext::new(&fx.config);
        collect_documents(&Section::BUILD_ORDER, &mut ctx).unwrap();

        // Empty cqc-reports title and the savp memo with no local PDF
        assert_eq!(ctx.skipped.len(), 2);
        assert_eq!(ctx.skipped.count_for(Section::CqcReports), 1);
        assert_eq!(ctx.skipped.count_for(Section::Savp), 1);
    }

    #[test]
    fn test_build_site_without_sitemap() {
        let mut fx = fixture();
        fx.config.build.sitemap.enable = false;
        build_site(&fx.config).unwrap();
        assert!(!fx.output("sitemap.xml").exists());
        assert!(fx.output("search-index.json").is_file());
    }

    #[test]
    fn test_missing_template_aborts() {
        let fx = fixture();
        fs::remove_file(fx.config.template_file("savp-content.html")).unwrap();
        assert!(build_site(&fx.config).is_err());
    }

    #[test]
    fn test_missing_csv_aborts() {
        let fx = fixture();
        fs::remove_file(fx.config.data_file("blackman.csv")).unwrap();
        let err = build_site(&fx.config).unwrap_err();
        assert!(format!("{err:#}").contains("blackman.csv"));
    }
}
