use anyhow::{Context, Result};
use clap::Parser;
use std::net::Ipv4Addr;
use std::sync::Arc;
use studentapi::{api, config, logging, students::StudentService};
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(
    name = "student-api",
    about = "In-memory student records over HTTP",
    version
)]
struct Cli {
    /// Port to listen on; overrides SERVER_PORT.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = config::load().context("failed to load configuration")?;
    logging::init_tracing(&config.log_file);
    if let Some(port) = cli.port {
        config.server_port = port;
    }
    tracing::debug!(
        server_port = config.server_port,
        summary_url = %config.summary_url,
        summary_model = %config.summary_model,
        summary_timeout = ?config.summary_timeout,
        log_file = %config.log_file.display(),
        "Loaded configuration"
    );

    let service =
        StudentService::from_config(&config).context("failed to build summary client")?;
    let app = api::create_router(Arc::new(service));

    let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, config.server_port))
        .await
        .with_context(|| format!("failed to bind port {}", config.server_port))?;
    let port = listener.local_addr()?.port();
    tracing::info!("Listening on http://0.0.0.0:{}", port);

    axum::serve(listener, app)
        .await
        .context("HTTP server terminated unexpectedly")?;
    Ok(())
}
