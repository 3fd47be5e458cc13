//! Shopdx CLI
//!
//! # Usage
//!
//! ```bash
//! # Diagnose the built-in demo shop
//! shopdx diagnose --demo
//!
//! # Diagnose every shop in a JSON file, strict grading, markdown report
//! shopdx diagnose --input shops.json --policy strict --format markdown -o report.md
//!
//! # Print the active threshold catalog
//! shopdx catalog --catalog overrides.yaml
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` to change the level.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shopdx_core::GradePolicy;
use shopdx_out::ReportFormat;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "shopdx")]
#[command(author, version, about = "Food-delivery shop performance diagnosis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Diagnose one shop or a JSON array of shops
    Diagnose(DiagnoseArgs),
    /// Print the active threshold catalog as YAML
    Catalog {
        /// YAML overrides on top of the built-in catalog
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
struct DiagnoseArgs {
    /// Shop record(s) as JSON; `-` reads stdin
    #[arg(short, long, conflicts_with = "demo", required_unless_present = "demo")]
    input: Option<PathBuf>,

    /// Use the built-in demo shop
    #[arg(long)]
    demo: bool,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// text, markdown or json
    #[arg(short, long, default_value = "text")]
    format: ReportFormat,

    /// averaged or strict (default from SHOPDX_POLICY)
    #[arg(long)]
    policy: Option<GradePolicy>,

    /// Number of top issues to report (default from SHOPDX_TOP_ISSUES)
    #[arg(long)]
    top: Option<usize>,

    /// YAML catalog overrides
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// YAML playbook overrides
    #[arg(long)]
    playbook: Option<PathBuf>,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shopdx=info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Diagnose(args) => commands::diagnose(args).await,
        Commands::Catalog { catalog } => commands::print_catalog(catalog.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnose_demo_uses_defaults() {
        let cli = Cli::try_parse_from(["shopdx", "diagnose", "--demo"]).expect("parse");
        match cli.command {
            Commands::Diagnose(args) => {
                assert!(args.demo);
                assert!(args.input.is_none());
                assert_eq!(args.format, ReportFormat::Text);
                assert!(args.policy.is_none());
                assert!(args.top.is_none());
            }
            _ => panic!("expected diagnose command"),
        }
    }

    #[test]
    fn diagnose_parses_every_option() {
        let cli = Cli::try_parse_from([
            "shopdx", "diagnose", "--input", "shops.json", "--format", "md", "--policy",
            "strict", "--top", "3", "-o", "out.md", "--catalog", "c.yaml", "--playbook",
            "p.yaml",
        ])
        .expect("parse");
        match cli.command {
            Commands::Diagnose(args) => {
                assert_eq!(args.input, Some(PathBuf::from("shops.json")));
                assert_eq!(args.format, ReportFormat::Markdown);
                assert_eq!(args.policy, Some(GradePolicy::Strict));
                assert_eq!(args.top, Some(3));
                assert_eq!(args.output, Some(PathBuf::from("out.md")));
                assert_eq!(args.catalog, Some(PathBuf::from("c.yaml")));
                assert_eq!(args.playbook, Some(PathBuf::from("p.yaml")));
            }
            _ => panic!("expected diagnose command"),
        }
    }

    #[test]
    fn diagnose_needs_input_or_demo() {
        assert!(Cli::try_parse_from(["shopdx", "diagnose"]).is_err());
        assert!(
            Cli::try_parse_from(["shopdx", "diagnose", "--demo", "--input", "x.json"]).is_err()
        );
    }

    #[test]
    fn unknown_policy_is_rejected() {
        assert!(
            Cli::try_parse_from(["shopdx", "diagnose", "--demo", "--policy", "lenient"]).is_err()
        );
        assert!(Cli::try_parse_from(["shopdx", "diagnose", "--demo", "--format", "pdf"]).is_err());
    }

    #[test]
    fn catalog_takes_optional_overrides() {
        let cli = Cli::try_parse_from(["shopdx", "catalog"]).expect("parse");
        assert!(matches!(cli.command, Commands::Catalog { catalog: None }));
    }
}
