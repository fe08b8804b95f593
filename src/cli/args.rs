//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Docket archive site builder CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Data directory holding the CSV exports (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub data: Option<PathBuf>,

    /// Config file path (default: docket.toml)
    #[arg(short = 'C', long, default_value = "docket.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build the whole site: listings, landing pages, registry, search index, sitemap
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Report which copied PDFs have extractable text
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        args: CheckArgs,
    },
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Override site URL used for sitemap entries.
    ///
    /// Useful when the deployed URL differs from the one in docket.toml:
    ///   docket build --site-url "https://staging.example.org"
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,

    /// Skip sitemap generation
    #[arg(long)]
    pub no_sitemap: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

/// Check command arguments.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Minimum trimmed text length for a PDF to count as searchable
    #[arg(short, long)]
    pub min_text_length: Option<usize>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build() {
        let cli = Cli::parse_from(["docket", "build", "--site-url", "https://a.org", "--no-sitemap"]);
        let Commands::Build { build_args } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(build_args.site_url.as_deref(), Some("https://a.org"));
        assert!(build_args.no_sitemap);
        assert!(!build_args.verbose);
        assert_eq!(cli.config, PathBuf::from("docket.toml"));
    }

    #[test]
    fn test_parse_check_with_global_flags() {
        let cli = Cli::parse_from(["docket", "-C", "site.toml", "--color", "never", "check", "-V"]);
        assert_eq!(cli.config, PathBuf::from("site.toml"));
        assert_eq!(cli.color, ColorChoice::Never);
        let Commands::Check { args } = cli.command else {
            panic!("expected check");
        };
        assert!(args.verbose);
        assert_eq!(args.min_text_length, None);
    }

    #[test]
    fn test_alias() {
        let cli = Cli::parse_from(["docket", "b"]);
        assert!(matches!(cli.command, Commands::Build { .. }));
    }
}
