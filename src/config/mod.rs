//! Site configuration management for `docket.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [site], [build], [sources], [check]
//! ├── error.rs       # ConfigError, ConfigDiagnostics
//! ├── util.rs        # config file search, URL checks
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Example
//!
//! ```toml
//! [site]
//! url = "https://clarencesundram.org"
//!
//! [build]
//! data = "data"
//! templates = "templates"
//! output = "docs"
//!
//! [sources]
//! cqc-reports = "~/Dropbox/Archive of CJS/CQC Reports"
//! ```

mod error;
pub mod section;
mod util;

pub use error::{ConfigDiagnostics, ConfigError, FieldPath};
pub use section::{BuildSectionConfig, CheckConfig, SiteInfoConfig, SourcesConfig};

use util::find_config_file;

use crate::{
    cli::{BuildArgs, CheckArgs, Cli, Commands},
    debug,
    document::Section,
    log,
    utils::path::normalize_path,
};
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing docket.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteInfoConfig,

    #[serde(default)]
    pub build: BuildSectionConfig,

    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub check: CheckConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file; the project root is
    /// the config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let Some(config_path) = find_config_file(&cli.config) else {
            bail!(ConfigError::NotFound(cli.config.clone()));
        };

        let mut config = Self::from_path(&config_path)?;
        config.config_path = normalize_path(&config_path);

        let root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Self::update_option(&mut config.build.output, cli.output.as_ref());
        Self::update_option(&mut config.build.data, cli.data.as_ref());
        config.apply_command_options(&cli.command);
        config.normalize_paths(&root);
        debug!("config"; "project root: {}", config.get_root().display());

        config.validate(&cli.command)?;
        Ok(config)
    }

    /// Load configuration from file path, warning about unknown fields.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            log!("warning"; "- {}", field);
        }
    }

    // ========================================================================
    // paths
    // ========================================================================

    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Resolve every configured path against `root`.
    ///
    /// Also used by tests to point a default config at a temp directory.
    pub fn normalize_paths(&mut self, root: &Path) {
        self.root = normalize_path(root);
        self.build.normalize(&self.root);
        self.sources.normalize(&self.root);
    }

    /// Path of a CSV export in the data directory.
    pub fn data_file(&self, name: &str) -> PathBuf {
        self.build.data.join(name)
    }

    /// Path of a template in the templates directory.
    pub fn template_file(&self, name: &str) -> PathBuf {
        self.build.templates.join(name)
    }

    /// Path under the output directory.
    pub fn output_join(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.build.output.join(rel)
    }

    pub fn source_dir(&self, section: Section) -> Option<&Path> {
        self.sources.dir(section)
    }

    /// Get path relative to the project root
    pub fn root_relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }


    // ========================================================================
    // cli configuration updates
    // ========================================================================

    fn apply_command_options(&mut self, command: &Commands) {
        match command {
            Commands::Build { build_args } => self.apply_build_args(build_args),
            Commands::Check { args } => self.apply_check_args(args),
        }
    }

    fn apply_build_args(&mut self, args: &BuildArgs) {
        crate::logger::set_verbose(args.verbose);

        if let Some(ref url) = args.site_url {
            self.site.url = Some(url.clone());
        }
        if args.no_sitemap {
            self.build.sitemap.enable = false;
        }
    }

    fn apply_check_args(&mut self, args: &CheckArgs) {
        crate::logger::set_verbose(args.verbose);
        Self::update_option(&mut self.check.min_text_length, args.min_text_length.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration for the current command.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self, command: &Commands) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        match command {
            Commands::Build { .. } => {
                self.site.validate(self.build.sitemap.enable, &mut diag);
                self.sources.validate(&mut diag);
            }
            Commands::Check { .. } => self.check.validate(&mut diag),
        }

        diag.print_warnings();
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config text. Panics if there are unknown fields.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// Default config rooted at `root`, sitemap URL set.
#[cfg(test)]
pub fn test_config_at(root: &Path) -> SiteConfig {
    let mut config = test_parse_config("[site]\nurl = \"https://example.org\"\n");
    config.normalize_paths(root);
    config
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn build_command(args: BuildArgs) -> Commands {
        Commands::Build { build_args: args }
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let err = SiteConfig::parse_with_ignored("[site\nurl = \"https://a.org\"").unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }

    #[test]
    fn test_site_title_is_unknown_field() {
        let (_, ignored) =
            SiteConfig::parse_with_ignored("[site]\ntitle = \"Archive\"").unwrap();
        assert_eq!(ignored, ["site.title"]);
    }

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.build.data, PathBuf::from("data"));
        assert_eq!(config.build.templates, PathBuf::from("templates"));
        assert_eq!(config.build.output, PathBuf::from("docs"));
        assert!(config.build.sitemap.enable);
        assert!(config.site.url.is_none());
        assert_eq!(config.check.min_text_length, 100);
    }

    #[test]
    fn test_full_config() {
        let config = test_parse_config(
            r#"
[site]
url = "https://clarencesundram.org"

[build]
output = "public"
registry = "public/registry.json"

[build.sitemap]
enable = false

[sources]
cqc-reports = "~/pdfs/cqc"

[check]
min_text_length = 50
timeout_secs = 5
"#,
        );
        assert_eq!(config.site.base_url(), Some("https://clarencesundram.org"));
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert!(!config.build.sitemap.enable);
        assert_eq!(
            config.sources.dir(Section::CqcReports),
            Some(Path::new("~/pdfs/cqc"))
        );
        assert_eq!(config.check.timeout_secs, 5);
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[site]\nurl = \"https://a.org\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
        assert_eq!(config.site.url.as_deref(), Some("https://a.org"));
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let (_, ignored) = SiteConfig::parse_with_ignored("[site]\nurl = \"https://a.org\"").unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_build_args_override() {
        let mut config = test_parse_config("[site]\nurl = \"https://a.org\"");
        config.apply_command_options(&build_command(BuildArgs {
            site_url: Some("https://b.org".into()),
            no_sitemap: true,
            verbose: false,
        }));
        assert_eq!(config.site.url.as_deref(), Some("https://b.org"));
        assert!(!config.build.sitemap.enable);
    }

    #[test]
    fn test_validate_sitemap_without_url() {
        let config = test_parse_config("");
        assert!(config.validate(&build_command(BuildArgs::default())).is_err());

        let mut config = test_parse_config("");
        config.build.sitemap.enable = false;
        assert!(config.validate(&build_command(BuildArgs::default())).is_ok());
    }

    #[test]
    fn test_check_does_not_need_url() {
        let config = test_parse_config("");
        let command = Commands::Check {
            args: CheckArgs::default(),
        };
        assert!(config.validate(&command).is_ok());
    }

    #[test]
    fn test_normalize_paths() {
        let config = test_config_at(Path::new("/archive"));
        assert_eq!(config.get_root(), Path::new("/archive"));
        assert_eq!(config.data_file("savp.csv"), PathBuf::from("/archive/data/savp.csv"));
        assert_eq!(
            config.template_file("base-template.html"),
            PathBuf::from("/archive/templates/base-template.html")
        );
        assert_eq!(
            config.output_join("documents"),
            PathBuf::from("/archive/docs/documents")
        );
        assert_eq!(
            config.root_relative(Path::new("/archive/data/document-registry.json")),
            Path::new("data/document-registry.json")
        );
    }
}
