//! `[site]` configuration.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath, util::is_site_url};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Public base URL, e.g. `https://clarencesundram.org`. Required for the sitemap.
    pub url: Option<String>,
}

impl SiteInfoConfig {
    pub const URL: FieldPath = FieldPath::new("site.url");

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> Option<&str> {
        self.url.as_deref().map(|url| url.trim_end_matches('/'))
    }

    /// # Checks
    /// - `url` is an absolute http(s) URL
    /// - `url` is set when the sitemap is enabled
    pub fn validate(&self, sitemap_enabled: bool, diag: &mut ConfigDiagnostics) {
        match &self.url {
            Some(url) if !is_site_url(url) => diag.error_with_hint(
                Self::URL,
                format!("`{url}` is not a valid site URL"),
                "use an absolute URL such as `https://example.org`",
            ),
            None if sitemap_enabled => diag.error_with_hint(
                Self::URL,
                "sitemap generation is enabled but no site URL is configured",
                "set `[site] url`, pass `--site-url`, or disable `[build.sitemap]`",
            ),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trims_slash() {
        let site = SiteInfoConfig {
            url: Some("https://example.org/".into()),
        };
        assert_eq!(site.base_url(), Some("https://example.org"));
    }

    #[test]
    fn test_validate_requires_url_for_sitemap() {
        let site = SiteInfoConfig::default();

        let mut diag = ConfigDiagnostics::new();
        site.validate(true, &mut diag);
        assert!(diag.has_errors());

        let mut diag = ConfigDiagnostics::new();
        site.validate(false, &mut diag);
        assert!(!diag.has_errors());
    }

    #[test]
    fn test_validate_rejects_bare_host() {
        let site = SiteInfoConfig {
            url: Some("example.org".into()),
        };
        let mut diag = ConfigDiagnostics::new();
        site.validate(false, &mut diag);
        assert_eq!(diag.errors()[0].field, SiteInfoConfig::URL);
    }
}
