//! Section listing pages (`cqc-reports.html`, `special-advisor.html`, ...).
//!
//! Each section has a content template (`{section}-content.html`) with a
//! `{rows}` placeholder. Rows are table fragments whose titles link to the
//! document's landing page.

use super::base::{BaseTemplate, BaseVars};
use super::template::{Template, TemplateVars, fill};
use crate::document::{Document, RowLayout, Section};
use crate::utils::html::{escape, escape_attr};

/// Listing pages live at the output root.
const PATH_PREFIX: &str = "./";

/// Variables for a listing content template.
///
/// The template's own `{path_prefix}` links are expanded in the same pass as
/// `{rows}`, so row data is never rescanned.
pub struct ListingVars {
    pub rows: String,
}

impl TemplateVars for ListingVars {
    fn apply(&self, content: &str) -> String {
        fill(
            content,
            &[("rows", self.rows.as_str()), ("path_prefix", PATH_PREFIX)],
        )
    }
}

pub type ListingTemplate = Template<ListingVars>;

/// Table rows for `docs`, in the given order.
pub fn render_rows(section: Section, docs: &[Document]) -> String {
    let render: fn(&Document) -> String = match section.row_layout() {
        RowLayout::Report => report_row,
        RowLayout::Publication => publication_row,
    };
    docs.iter().map(render).collect::<Vec<_>>().join("\n")
}

/// date | category badge | title | description
fn report_row(doc: &Document) -> String {
    format!(
        r#"
        <tr class="border-t border-t-[#d3dbe4]">
          <td class="align-top px-4 py-2 w-[150px] text-[#58728d] text-sm font-normal leading-normal">
            {date}
          </td>
          <td class="align-top px-4 py-2 w-60 text-sm font-normal leading-normal">
            <button class="flex min-w-[84px] max-w-[480px] cursor-pointer items-center justify-center overflow-hidden rounded-full h-8 px-4 bg-[#e9edf1] text-[#101419] text-sm font-medium leading-normal w-full">
              <span class="truncate">{category}</span>
            </button>
          </td>
          <td class="align-top px-4 py-2 w-[200px] text-[#101419] text-sm font-normal leading-normal">
            <a href="{href}" class="underline hover:text-blue-600">{title}</a>
          </td>
          <td class="align-top px-4 py-2 w-[400px] text-[#58728d] text-sm font-normal leading-normal">
            {description}
          </td>
        </tr>"#,
        date = escape(&doc.date),
        category = escape(&doc.category),
        href = escape_attr(doc.document_url()),
        title = escape(&doc.title.to_uppercase()),
        description = escape(&doc.description),
    )
}

/// date | title | source
fn publication_row(doc: &Document) -> String {
    format!(
        r#"
        <tr class="border-t border-t-[#d3dbe4]">
          <td class="align-top px-4 py-2 w-[150px] text-[#58728d] text-sm font-normal leading-normal">
            {date}
          </td>
          <td class="align-top px-4 py-2 w-[400px] text-[#101419] text-sm font-normal leading-normal">
            <a href="{href}" class="underline hover:text-blue-600">{title}</a>
          </td>
          <td class="align-top px-4 py-2 w-[400px] text-[#58728d] text-sm font-normal leading-normal">
            {source}
          </td>
        </tr>"#,
        date = escape(&doc.date),
        href = escape_attr(doc.document_url()),
        title = escape(&doc.title),
        source = escape(&doc.source),
    )
}

/// Full listing page: rows into the content template, content into the base.
pub fn render_listing(
    base: &BaseTemplate,
    content: &ListingTemplate,
    section: Section,
    docs: &[Document],
) -> String {
    let body = content.render(&ListingVars {
        rows: render_rows(section, docs),
    });
    let description = format!("{} in the archive.", section.name());

    base.render(&BaseVars {
        meta_title: section.name(),
        meta_description: &description,
        canonical_url: section.path(),
        breadcrumb: "",
        page_title: section.name(),
        content: &body,
        path_prefix: PATH_PREFIX,
    })
}
