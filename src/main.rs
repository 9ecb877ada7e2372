use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use esp_check_rs::config::{CheckConfig, DEFAULT_HTTP_PORT, DEFAULT_UDP_PORT};
use esp_check_rs::ping::SystemPing;
use esp_check_rs::report::render_report;
use esp_check_rs::runner::run_check;
use esp_check_rs::types::ProbeReport;

use anyhow::Result;
use clap::Parser;

/// esp-check-rs — Pre-flash connectivity check for ESP32 devices: ping, UDP service probe, HTTP port probe.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "esp-check-rs",
    version,
    about = "Pre-flash connectivity check for ESP32 devices: ping, UDP service probe, HTTP port probe.",
    long_about = None
)]
struct Cli {
    /// Device address (IP or hostname). If omitted, uses the firmware's static IP default.
    target: Option<String>,

    /// UDP service port the device firmware listens on.
    #[arg(long = "udp-port", default_value_t = DEFAULT_UDP_PORT)]
    udp_port: u16,

    /// HTTP port probed for a web server.
    #[arg(long = "http-port", default_value_t = DEFAULT_HTTP_PORT)]
    http_port: u16,

    /// Per-probe timeout in milliseconds (UDP reply wait, TCP connect).
    #[arg(long = "timeout-ms", default_value_t = 5000)]
    timeout_ms: u64,

    /// Write the report as pretty JSON to this path (optional).
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = CheckConfig::for_target(cli.target.clone());
    cfg.udp_port = cli.udp_port;
    cfg.http_port = cli.http_port;
    cfg.probe_timeout = Duration::from_millis(cli.timeout_ms);

    println!("esp-check-rs configuration:");
    println!(
        "  target     : {}{}",
        cfg.target,
        if cli.target.is_none() {
            " (default)"
        } else {
            ""
        }
    );
    println!("  udp_port   : {}", cfg.udp_port);
    println!("  http_port  : {}", cfg.http_port);
    println!("  timeout_ms : {}", cli.timeout_ms);
    println!(
        "  output     : {}",
        cli.output
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<none>".to_string())
    );
    println!();

    let report = run_check(&cfg, &SystemPing).await;
    print!("{}", render_report(&report));

    if let Some(path) = cli.output.as_deref() {
        if let Err(e) = write_report_json(path, &report) {
            eprintln!("Failed to write JSON to {}: {}", path.display(), e);
        } else {
            println!("Wrote JSON report to {}", path.display());
        }
    }

    // Diagnostic tool: probe failures are reported, never turned into a
    // nonzero exit.
    Ok(())
}

fn write_report_json(path: &std::path::Path, report: &ProbeReport) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}
