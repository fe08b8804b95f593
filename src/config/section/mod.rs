//! Configuration section definitions.
//!
//! Each module corresponds to a section in `docket.toml`:
//!
//! | Module    | TOML Section                  | Purpose                              |
//! |-----------|-------------------------------|--------------------------------------|
//! | `site`    | `[site]`                      | Public site URL                     |
//! | `build`   | `[build]`, `[build.sitemap]`  | Input/output paths, sitemap          |
//! | `sources` | `[sources]`                   | Local document folders per section   |
//! | `check`   | `[check]`                     | PDF text checker thresholds          |

mod build;
mod check;
mod site;
mod sources;

pub use build::BuildSectionConfig;
pub use check::CheckConfig;
pub use site::SiteInfoConfig;
pub use sources::SourcesConfig;
