//! Subcommand implementations

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use shopdx_catalog::Catalog;
use shopdx_core::{demo_shop, parse_records, RawMetrics};
use shopdx_engine::{DiagnosisEngine, EngineConfig};
use shopdx_out::ReportRenderer;
use tracing::info;

use crate::DiagnoseArgs;

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load_shops(args: &DiagnoseArgs) -> Result<Vec<RawMetrics>> {
    match &args.input {
        Some(path) => {
            let json = read_input(path)?;
            parse_records(&json).with_context(|| format!("invalid shop data in {}", path.display()))
        }
        None => Ok(vec![demo_shop()]),
    }
}

fn engine_config(args: &DiagnoseArgs) -> Result<EngineConfig> {
    let mut config = EngineConfig::from_env()?;
    if let Some(policy) = args.policy {
        config = config.with_policy(policy);
    }
    if let Some(top) = args.top {
        config = config.with_top_issues(top);
    }
    Ok(config)
}

pub async fn diagnose(args: DiagnoseArgs) -> Result<()> {
    let shops = load_shops(&args)?;
    let engine = DiagnosisEngine::from_files(args.catalog.as_deref(), args.playbook.as_deref())?
        .with_config(engine_config(&args)?);

    let reports = if shops.len() > 1 {
        engine.diagnose_batch(shops).await?
    } else {
        shops.iter().map(|raw| engine.diagnose(raw)).collect()
    };

    let rendered = ReportRenderer::builtin()?.render_all(&reports, args.format)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, format!("{rendered}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(reports = reports.len(), path = %path.display(), "report written");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

pub fn print_catalog(overrides: Option<&Path>) -> Result<()> {
    let catalog = match overrides {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin(),
    };
    print!("{}", catalog.to_yaml()?);
    Ok(())
}
