//! `[check]` configuration for `docket check`.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Trimmed text shorter than this means the PDF is likely a scan.
    pub min_text_length: usize,

    /// Seconds to wait for `pdftotext` per file.
    pub timeout_secs: u64,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            min_text_length: 100,
            timeout_secs: 30,
        }
    }
}

impl CheckConfig {
    pub const MIN_TEXT_LENGTH: FieldPath = FieldPath::new("check.min_text_length");
    pub const TIMEOUT_SECS: FieldPath = FieldPath::new("check.timeout_secs");

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.timeout_secs == 0 {
            diag.error(Self::TIMEOUT_SECS, "must be greater than zero");
        }
        if self.min_text_length == 0 {
            diag.warn(Self::MIN_TEXT_LENGTH, "is 0, every PDF will pass");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let check = CheckConfig::default();
        assert_eq!(check.min_text_length, 100);
        assert_eq!(check.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let check = CheckConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        check.validate(&mut diag);
        assert!(diag.has_errors());
    }

    #[test]
    fn test_zero_min_length_warns() {
        let check = CheckConfig {
            min_text_length: 0,
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        check.validate(&mut diag);
        assert!(!diag.has_errors());
        assert_eq!(diag.warnings().len(), 1);
    }
}
