//! Per-document landing pages under `documents/`.
//!
//! Landing pages give every archived item a stable, indexable URL with
//! its metadata, a link to the resource and a way back to its section.

use super::base::{BaseTemplate, BaseVars};
use crate::document::Document;
use crate::utils::html::{META_DESCRIPTION_LIMIT, escape, escape_attr, truncate_description};

/// Directory depth of `documents/{section}-{slug}.html` below the output root.
const DEPTH: usize = 1;

pub fn render_landing(base: &BaseTemplate, doc: &Document) -> String {
    let section = doc.section();
    let section_href = format!("../{}", section.path());
    let section_name = escape(section.name());

    let breadcrumb = format!(
        r#"
        <div class="bg-white border-b border-solid border-b-[#e9edf1] px-10 py-3">
          <div class="flex items-center gap-2 text-sm">
            <a href="{href}" class="text-[#58728d] hover:text-[#0066cc]">{name}</a>
            <span class="text-[#58728d]">/</span>
            <span class="text-[#101419]">Document</span>
          </div>
        </div>"#,
        href = escape_attr(&section_href),
        name = section_name,
    );

    let content = format!(
        r#"
        <div class="px-40 flex flex-1 justify-center py-5">
          <div class="layout-content-container flex flex-col max-w-[960px] flex-1">
            <div class="flex flex-col gap-6 px-4 py-6">
              <h1 class="text-[#101419] text-4xl font-bold leading-tight tracking-[-0.015em]">{title}</h1>
              <div class="flex flex-wrap gap-4">
                {metadata}
              </div>
              {description}
              <div class="flex gap-3 flex-wrap">
                <a href="{resource}" target="_blank"
                   class="flex min-w-[200px] max-w-[400px] cursor-pointer items-center justify-center overflow-hidden rounded-full h-12 px-6 bg-[#1971c2] text-white text-base font-bold leading-normal tracking-[0.015em] hover:bg-[#1864ab] transition-colors">
                  <span class="truncate">View Document</span>
                </a>
                <a href="{section_href}"
                   class="flex min-w-[200px] max-w-[400px] cursor-pointer items-center justify-center overflow-hidden rounded-full h-12 px-6 bg-[#e9edf1] text-[#101419] text-base font-bold leading-normal tracking-[0.015em] hover:bg-[#d3dbe4] transition-colors">
                  <span class="truncate">Back to {section_name}</span>
                </a>
              </div>
            </div>
          </div>
        </div>"#,
        title = escape(&doc.title),
        metadata = metadata_html(doc),
        description = description_html(doc),
        resource = escape_attr(&doc.resource_href(DEPTH)),
        section_href = escape_attr(&section_href),
        section_name = section_name,
    );

    let summary = if doc.description.trim().is_empty() {
        &doc.title
    } else {
        &doc.description
    };
    let meta_description = truncate_description(summary, META_DESCRIPTION_LIMIT);

    base.render(&BaseVars {
        meta_title: &doc.title,
        meta_description: &meta_description,
        canonical_url: doc.document_url(),
        breadcrumb: &breadcrumb,
        // The h1 in the content already carries the title
        page_title: "",
        content: &content,
        path_prefix: "../",
    })
}

/// Date, category badge and source, each only when present.
fn metadata_html(doc: &Document) -> String {
    let mut items = Vec::with_capacity(3);

    if !doc.date.is_empty() {
        items.push(format!(
            r#"
                <div class="flex items-center gap-2">
                  <p class="text-[#58728d] text-sm font-medium">Date:</p>
                  <p class="text-[#101419] text-sm">{}</p>
                </div>"#,
            escape(&doc.date)
        ));
    }

    if !doc.category.is_empty() {
        items.push(format!(
            r#"
                <div class="flex items-center gap-2">
                  <p class="text-[#58728d] text-sm font-medium">Category:</p>
                  <button class="flex min-w-[84px] cursor-pointer items-center justify-center overflow-hidden rounded-full h-8 px-4 bg-[#e9edf1] text-[#101419] text-sm font-medium leading-normal">
                    <span class="truncate">{}</span>
                  </button>
                </div>"#,
            escape(&doc.category)
        ));
    }

    if !doc.source.is_empty() {
        items.push(format!(
            r#"
                <div class="flex items-center gap-2">
                  <p class="text-[#58728d] text-sm font-medium">Source:</p>
                  <p class="text-[#101419] text-sm">{}</p>
                </div>"#,
            escape(&doc.source)
        ));
    }

    items.join("\n")
}

fn description_html(doc: &Document) -> String {
    if doc.description.is_empty() {
        return String::new();
    }
    format!(
        r#"
              <div class="flex flex-col gap-2">
                <p class="text-[#58728d] text-sm font-medium">Description</p>
                <p class="text-[#101419] text-base leading-relaxed">{}</p>
              </div>"#,
        escape(&doc.description)
    )
}
