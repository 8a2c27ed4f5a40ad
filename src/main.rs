use anyhow::{Context, Result};
use clap::Parser;
use dfstat::util::report;
use dfstat::{ByteUnit, DfInspector, DfMetric, InspectorConfig};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dfstat", about = "Parse captured df output into disk usage metrics", version)]
struct Cli {
    /// Read the df report from this file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Unit of the numeric columns in the report: B, KB, MB, GB, TB, PB
    #[arg(long, default_value = "KB")]
    raw_unit: ByteUnit,

    /// Unit to report metrics in
    #[arg(short, long, default_value = "GB")]
    display_unit: ByteUnit,

    /// Keep devices starting with this prefix (only when --mount-point is "")
    #[arg(long, default_value = "")]
    device_prefix: String,

    /// Exact mount point to report; pass "" to select by --device-prefix
    #[arg(short, long, default_value = "/")]
    mount_point: String,

    /// Print a JSON snapshot of the parsed metrics
    #[arg(long)]
    json: bool,

    /// Print the effective inspector config as TOML, then exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    fn inspector_config(&self) -> InspectorConfig {
        InspectorConfig {
            raw_unit:           self.raw_unit,
            display_unit:       self.display_unit,
            device_starts_with: self.device_prefix.clone(),
            mount_point:        self.mount_point.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cfg = cli.inspector_config();
    if cli.print_config {
        return run_print_config(&cfg);
    }

    let text = read_report(cli.input.as_ref())?;
    let metrics = DfInspector::new(cfg.clone())
        .parse(&text)
        .context("df report is corrupt")?;

    if cli.json {
        run_json_snapshot(&metrics, cfg.display_unit)
    } else {
        run_report(&metrics, cfg.display_unit)
    }
}

fn read_report(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("reading {}", p.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading df report from stdin")?;
            Ok(text)
        }
    }
}

fn run_json_snapshot(metrics: &[DfMetric], unit: ByteUnit) -> Result<()> {
    use serde_json::json;

    let snapshot = json!({
        "dfstat_version": env!("CARGO_PKG_VERSION"),
        "timestamp":      chrono::Local::now().to_rfc3339(),
        "display_unit":   unit,
        "metrics":        metrics,
    });

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn run_report(metrics: &[DfMetric], unit: ByteUnit) -> Result<()> {
    print!("{}", report::generate(metrics, unit));
    Ok(())
}

fn run_print_config(cfg: &InspectorConfig) -> Result<()> {
    println!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_match_inspector_defaults() {
        let cli = Cli::parse_from(["dfstat"]);
        assert_eq!(cli.inspector_config(), InspectorConfig::default());
    }

    #[test]
    fn test_cli_prefix_mode() {
        let cli = Cli::parse_from([
            "dfstat", "--mount-point", "", "--device-prefix", "/dev/sd", "-d", "mb",
        ]);
        let cfg = cli.inspector_config();
        assert!(cfg.mount_point.is_empty());
        assert_eq!(cfg.device_starts_with, "/dev/sd");
        assert_eq!(cfg.display_unit, ByteUnit::MB);
    }

    #[test]
    fn test_cli_rejects_unknown_unit() {
        assert!(Cli::try_parse_from(["dfstat", "--raw-unit", "blocks"]).is_err());
    }
}
