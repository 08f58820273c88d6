//! DevSniper - Dev-Wallet Sell Sniper Core
//!
//! Runs the sniper service over the host message port: line-delimited JSON
//! requests on stdin, responses and outbound wallet requests on stdout.

mod adapters;
mod application;
mod config;
mod domain;
mod ports;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{fmt, EnvFilter};

use crate::adapters::cli::{CliApp, Command, RunCmd, SettingsCmd};
use crate::adapters::notify::{LogNotificationSink, WebhookNotificationSink};
use crate::adapters::storage::FileSettingsStore;
use crate::adapters::wallet_bridge::{BridgeResponse, WalletBridge};
use crate::application::{Request, Response, SniperService};
use crate::config::{load_config, Config};
use crate::ports::{NotificationSink, SettingsStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (secrets go here, not in config.toml)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    init_logging(app.verbose, app.debug);

    match app.command {
        Command::Run(cmd) => run_command(cmd).await,
        Command::Settings(cmd) => settings_command(cmd).await,
    }
}

fn init_logging(verbose: bool, debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };

    // Logs go to stderr; stdout carries the message port
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_command(cmd: RunCmd) -> Result<()> {
    tracing::info!("Starting DevSniper service...");

    let config = load_config(&cmd.config).context("Failed to load configuration")?;

    let settings: Arc<dyn SettingsStore> = Arc::new(FileSettingsStore::new(
        config.storage.expanded_settings_path(),
    ));
    let notifier = build_notifier(&config);
    let (bridge, bridge_rx) = WalletBridge::new();

    let service = Arc::new(SniperService::new(
        Arc::clone(&bridge) as Arc<dyn crate::ports::ExecutionPort>,
        settings,
        notifier,
        config.monitor.expected_domain.clone(),
    ));

    run_message_port(service, bridge, bridge_rx).await
}

fn build_notifier(config: &Config) -> Arc<dyn NotificationSink> {
    if config.alerts.webhook_enabled {
        tracing::info!(url = %config.alerts.webhook_url, "using webhook notifications");
        Arc::new(WebhookNotificationSink::new(config.alerts.webhook_url.clone()))
    } else {
        Arc::new(LogNotificationSink::new())
    }
}

/// Drive the service over stdin/stdout.
///
/// Each inbound line is either a wallet provider response
/// (`{"type": "walletResponse", ...}`) routed to the bridge, or a service
/// request dispatched on its own task so a buy awaiting its wallet response
/// never blocks the port. Outbound lines are service responses (echoing the
/// caller's `id` when present) and bridge requests wrapped as
/// `{"type": "walletRequest", ...}`.
async fn run_message_port(
    service: Arc<SniperService>,
    bridge: Arc<WalletBridge>,
    mut bridge_rx: mpsc::UnboundedReceiver<crate::adapters::wallet_bridge::BridgeRequest>,
) -> Result<()> {
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<String>();

    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(line) = out_rx.recv().await {
            if stdout.write_all(line.as_bytes()).await.is_err() {
                break;
            }
            if stdout.write_all(b"\n").await.is_err() {
                break;
            }
            let _ = stdout.flush().await;
        }
    });

    // Forward outbound wallet requests to the host
    let bridge_out = out_tx.clone();
    tokio::spawn(async move {
        while let Some(request) = bridge_rx.recv().await {
            match serde_json::to_value(&request) {
                Ok(mut value) => {
                    if let Some(obj) = value.as_object_mut() {
                        obj.insert("type".to_string(), "walletRequest".into());
                    }
                    let _ = bridge_out.send(value.to_string());
                }
                Err(e) => tracing::error!(error = %e, "failed to serialize wallet request"),
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line.context("stdin read failed")? else {
                    tracing::info!("Host closed the message port");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                dispatch_line(&line, &service, &bridge, &out_tx);
            }
        }
    }

    drop(out_tx);
    writer.await.ok();
    tracing::info!("DevSniper stopped");
    Ok(())
}

fn dispatch_line(
    line: &str,
    service: &Arc<SniperService>,
    bridge: &Arc<WalletBridge>,
    out_tx: &mpsc::UnboundedSender<String>,
) {
    let value: serde_json::Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => {
            send_response(out_tx, None, Response::error(e.to_string()));
            return;
        }
    };

    if value.get("type").and_then(|t| t.as_str()) == Some("walletResponse") {
        match serde_json::from_value::<BridgeResponse>(value) {
            Ok(response) => bridge.handle_response(response),
            Err(e) => tracing::warn!(error = %e, "malformed wallet response"),
        }
        return;
    }

    let id = value.get("id").cloned();
    match Request::parse(value) {
        Ok(request) => {
            let service = Arc::clone(service);
            let out_tx = out_tx.clone();
            tokio::spawn(async move {
                let response = service.handle(request).await;
                send_response(&out_tx, id, response);
            });
        }
        Err(error) => send_response(out_tx, id, Response::error(error)),
    }
}

fn send_response(
    out_tx: &mpsc::UnboundedSender<String>,
    id: Option<serde_json::Value>,
    response: Response,
) {
    match serde_json::to_value(&response) {
        Ok(mut value) => {
            if let (Some(obj), Some(id)) = (value.as_object_mut(), id) {
                obj.insert("id".to_string(), id);
            }
            let _ = out_tx.send(value.to_string());
        }
        Err(e) => tracing::error!(error = %e, "failed to serialize response"),
    }
}

async fn settings_command(cmd: SettingsCmd) -> Result<()> {
    let config = load_config(&cmd.config).context("Failed to load configuration")?;
    let store = FileSettingsStore::new(config.storage.expanded_settings_path());
    let settings = store.get().await;
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
