//! injections-bridge
//!
//! Prints the injection script for the capabilities enabled in a config file:
//! `injections-bridge [path/to/injections.yaml]`. Logs go to stderr so the
//! script on stdout can be piped straight into a host build step.

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use injections_bridge::{config, script};

fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "injections.yaml".to_string());

    let cfg = match config::load_from_file(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(%path, error = %e, "config load failed");
            return ExitCode::FAILURE;
        }
    };

    let enabled: Vec<&str> = cfg.capabilities.enabled().map(|c| c.as_str()).collect();
    let js = script::generate_injection_js(&cfg.capabilities);
    tracing::info!(%path, capabilities = ?enabled, bytes = js.len(), "injection script composed");

    println!("{js}");
    ExitCode::SUCCESS
}
