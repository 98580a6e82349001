use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use sitemap_core::ArtifactKind;
use sitemap_logging::LogDestination;

#[derive(Debug, Parser)]
#[command(
    name = "sitemap_console",
    version,
    about = "Generate and validate sitemaps through a running sitemap service"
)]
pub struct Cli {
    /// RON configuration file. Defaults apply when omitted.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Overrides the configured service base url.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[arg(long, value_enum, default_value_t = LogTarget::File, global = true)]
    pub log: LogTarget,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a sitemap for a website.
    Generate {
        #[arg(long)]
        website_url: String,
        /// Extra form field, `name=value`.
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
        /// Save the generated sitemap into the download directory.
        #[arg(long)]
        download: bool,
    },
    /// Validate the most recently generated sitemap.
    Validate {
        /// List every validated url, not only the sample.
        #[arg(long)]
        show_all: bool,
        /// Save the validation report into the download directory.
        #[arg(long)]
        download: bool,
    },
    /// Start generation and validation together.
    RunBoth {
        #[arg(long)]
        website_url: String,
    },
    /// Fetch a previously produced artifact by name.
    Download {
        #[arg(value_enum)]
        kind: ArtifactArg,
        filename: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(value: LogTarget) -> Self {
        match value {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ArtifactArg {
    Sitemap,
    Report,
}

impl From<ArtifactArg> for ArtifactKind {
    fn from(value: ArtifactArg) -> Self {
        match value {
            ArtifactArg::Sitemap => ArtifactKind::Sitemap,
            ArtifactArg::Report => ArtifactKind::ValidationReport,
        }
    }
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected name=value, got {raw:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generate_with_extra_fields() {
        let cli = Cli::try_parse_from([
            "sitemap_console",
            "--log",
            "terminal",
            "generate",
            "--website-url",
            "https://example.com",
            "--field",
            "depth=3",
        ])
        .unwrap();

        assert_eq!(cli.log, LogTarget::Terminal);
        match cli.command {
            Command::Generate {
                website_url,
                fields,
                download,
            } => {
                assert_eq!(website_url, "https://example.com");
                assert_eq!(fields, vec![("depth".to_string(), "3".to_string())]);
                assert!(!download);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejects_field_without_separator() {
        assert!(parse_field("depth").is_err());
        assert!(parse_field("=3").is_err());
        assert_eq!(
            parse_field("q=a=b").unwrap(),
            ("q".to_string(), "a=b".to_string())
        );
    }
}
