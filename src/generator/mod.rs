//! Content generators for static site output.
//!
//! Generates auxiliary files from the collected documents:
//!
//! - **Registry**: every document with section metadata (`document-registry.json`)
//! - **Search index**: client-side search records (`search-index.json`)
//! - **Sitemap**: search engine indexing (`sitemap.xml`)

pub mod registry;
pub mod search;
pub mod sitemap;
