//! `docket check`: find published PDFs without extractable text.
//!
//! Scanned documents often carry no text layer, which keeps them out of
//! search engines. Every PDF under `{output}/assets` is run through
//! `pdftotext`; short or missing output is reported.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use owo_colors::OwoColorize;
use thiserror::Error;

use crate::config::SiteConfig;
use crate::utils::exec::{Cmd, Finished};
use crate::utils::path::collect_pdfs;
use crate::utils::plural::plural_count;
use crate::{debug, log, logger};

const PDFTOTEXT: &str = "pdftotext";

#[derive(Debug, Error)]
pub enum CheckError {
    #[error(
        "`pdftotext` not found on PATH\n\n\
         To install on macOS:\n  brew install poppler\n\n\
         To install on Ubuntu/Debian:\n  sudo apt-get install poppler-utils"
    )]
    ToolMissing,

    #[error("found {no_text} without text and {failed} that failed to process")]
    Problems { no_text: String, failed: String },
}

/// Outcome for one PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStatus {
    HasText,
    /// Fewer than the minimum characters; likely a scan that needs OCR.
    NoText,
    /// Non-zero exit, timeout or spawn failure.
    Failed,
}

/// Classify `pdftotext` output. `None` means extraction failed.
pub fn classify(text: Option<&str>, min_text_length: usize) -> TextStatus {
    match text {
        None => TextStatus::Failed,
        Some(text) if text.trim().chars().count() < min_text_length => TextStatus::NoText,
        Some(_) => TextStatus::HasText,
    }
}

#[derive(Debug, Default)]
pub struct CheckReport {
    has_text: Vec<PathBuf>,
    no_text: Vec<PathBuf>,
    failed: Vec<PathBuf>,
}

impl CheckReport {
    pub fn add(&mut self, path: PathBuf, status: TextStatus) {
        match status {
            TextStatus::HasText => self.has_text.push(path),
            TextStatus::NoText => self.no_text.push(path),
            TextStatus::Failed => self.failed.push(path),
        }
    }

    pub fn total(&self) -> usize {
        self.has_text.len() + self.no_text.len() + self.failed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.no_text.is_empty() && self.failed.is_empty()
    }

    pub fn print(&self) {
        logger::rule();
        log!(
            "check";
            "PDFs with searchable text: {}/{}",
            self.has_text.len(),
            self.total()
        );

        if !self.no_text.is_empty() {
            log!(
                "warning";
                "{} with little or no text (may be scanned images that need OCR):",
                plural_count(self.no_text.len(), "PDF")
            );
            for path in &self.no_text {
                eprintln!("  - {}", path.display());
            }
        }

        if !self.failed.is_empty() {
            log!("error"; "{} failed to process:", plural_count(self.failed.len(), "PDF"));
            for path in &self.failed {
                eprintln!("  - {}", path.display().red());
            }
        }

        if self.is_clean() {
            log!("done"; "all PDFs appear to have searchable text");
        }
    }

    pub fn into_result(self) -> Result<()> {
        if self.is_clean() {
            return Ok(());
        }
        Err(CheckError::Problems {
            no_text: plural_count(self.no_text.len(), "PDF"),
            failed: plural_count(self.failed.len(), "PDF"),
        }
        .into())
    }
}

/// Check every published PDF. Errors when any lacks text or failed.
pub fn check_pdfs(config: &SiteConfig) -> Result<()> {
    if Cmd::new(PDFTOTEXT).locate().is_none() {
        return Err(CheckError::ToolMissing.into());
    }

    let assets = config.output_join("assets");
    let pdfs = collect_pdfs(&assets);
    if pdfs.is_empty() {
        log!("check"; "no PDFs under {}", assets.display());
        return Ok(());
    }

    log!("check"; "checking {} for searchable text", plural_count(pdfs.len(), "PDF"));
    let timeout = config.check.timeout();
    let report = check_files(
        &pdfs,
        &config.build.output,
        config.check.min_text_length,
        |path| extract_text(path, timeout),
    );

    report.print();
    report.into_result()
}

/// Classify each of `pdfs` using `extract`. Report paths are relative to `output`.
pub fn check_files(
    pdfs: &[PathBuf],
    output: &Path,
    min_text_length: usize,
    mut extract: impl FnMut(&Path) -> Option<String>,
) -> CheckReport {
    let mut report = CheckReport::default();
    let total = pdfs.len();

    for (i, pdf) in pdfs.iter().enumerate() {
        let rel = pdf.strip_prefix(output).unwrap_or(pdf).to_path_buf();
        let status = classify(extract(pdf).as_deref(), min_text_length);
        debug!("check"; "[{}/{}] {} ({:?})", i + 1, total, rel.display(), status);
        report.add(rel, status);
    }

    report
}

/// Run `pdftotext <file> -`. `None` on failure or timeout.
fn extract_text(path: &Path, timeout: Duration) -> Option<String> {
    let outcome = Cmd::new(PDFTOTEXT)
        .arg(path)
        .arg("-")
        .timeout(timeout)
        .run();

    match outcome {
        Ok(Finished::Exited(out)) if out.status.success() => Some(out.stdout_lossy()),
        Ok(Finished::Exited(out)) => {
            debug!("check"; "{}: {} {}", path.display(), out.status, out.stderr_line());
            None
        }
        Ok(Finished::TimedOut) => {
            debug!("check"; "{}: timed out after {}s", path.display(), timeout.as_secs());
            None
        }
        Err(e) => {
            log!("error"; "{}: {:#}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let long = "x".repeat(120);
        assert_eq!(classify(Some(&long), 100), TextStatus::HasText);
        assert_eq!(classify(Some("  short  \n"), 100), TextStatus::NoText);
        assert_eq!(classify(Some(""), 100), TextStatus::NoText);
        assert_eq!(classify(None, 100), TextStatus::Failed);
    }

    #[test]
    fn test_classify_counts_trimmed_chars() {
        let padded = format!("\n\n{}\n\n", "é".repeat(10));
        assert_eq!(classify(Some(&padded), 10), TextStatus::HasText);
        assert_eq!(classify(Some(&padded), 11), TextStatus::NoText);
    }

    #[test]
    fn test_check_files_groups_results() {
        let output = Path::new("/site/docs");
        let pdfs = [
            output.join("assets/cqc/a.pdf"),
            output.join("assets/cqc/scan.pdf"),
            output.join("assets/savp/broken.pdf"),
        ];

        let report = check_files(&pdfs, output, 5, |path| {
            match path.file_stem().and_then(|s| s.to_str()) {
                Some("a") => Some("plenty of text".to_string()),
                Some("scan") => Some("  ".to_string()),
                _ => None,
            }
        });

        assert_eq!(report.total(), 3);
        assert_eq!(report.has_text, [PathBuf::from("assets/cqc/a.pdf")]);
        assert_eq!(report.no_text, [PathBuf::from("assets/cqc/scan.pdf")]);
        assert_eq!(report.failed, [PathBuf::from("assets/savp/broken.pdf")]);
        assert!(!report.is_clean());

        let err = report.into_result().unwrap_err();
        assert_eq!(
            err.to_string(),
            "found 1 PDF without text and 1 PDF that failed to process"
        );
    }

    #[test]
    fn test_clean_report_is_ok() {
        let mut report = CheckReport::default();
        report.add(PathBuf::from("assets/cqc/a.pdf"), TextStatus::HasText);
        assert!(report.is_clean());
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_tool_missing_has_install_hints() {
        let msg = CheckError::ToolMissing.to_string();
        assert!(msg.contains("brew install poppler"));
        assert!(msg.contains("sudo apt-get install poppler-utils"));
    }
}
