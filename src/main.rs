//! qrcode-mcp: QR code generation MCP server
//!
//! Serves the `qrcode` tool over stdio. Logs go to stderr so stdout carries
//! nothing but protocol messages.

use anyhow::Result;
use clap::Parser;
use qrcode_mcp::{
    config::{LogFormat, ServerConfig},
    mcp::QrCodeMcpServer,
};
use rmcp::{ServiceExt, transport::stdio};
use tracing::{error, info};
use tracing_subscriber::fmt;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();
    init_tracing(&config);

    info!("qrcode-mcp server v{} starting...", env!("CARGO_PKG_VERSION"));
    info!("Protocol: Model Context Protocol (MCP)");
    info!("Transport: stdio");

    let server = QrCodeMcpServer::new_with_png();

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("Failed to start qrcode-mcp server: {}", e);
    })?;

    info!("qrcode-mcp server initialized successfully");
    info!("Client info: {:?}", service.peer_info());

    // Shutdown hook: a signal cancels the running service, which then
    // finishes in-flight requests and returns from `waiting()`.
    let cancel = service.cancellation_token();
    tokio::spawn(async move {
        match shutdown_signal().await {
            Ok(signal) => info!("Received {}, shutting down gracefully", signal),
            Err(e) => {
                error!("Failed to install signal handlers: {}", e);
                return;
            }
        }
        cancel.cancel();
    });

    let reason = service.waiting().await?;

    info!("qrcode-mcp server stopped: {:?}", reason);
    Ok(())
}

/// Initializes logging on stderr
///
/// Respects RUST_LOG first, then `--log-level`.
fn init_tracing(config: &ServerConfig) {
    let builder = fmt()
        .with_env_filter(config.env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(false);

    match config.log_format {
        LogFormat::Text => builder.with_ansi(false).init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Resolves when the process is asked to stop
#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result.map(|()| "SIGINT"),
        _ = sigterm.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<&'static str> {
    tokio::signal::ctrl_c().await.map(|()| "Ctrl+C")
}
