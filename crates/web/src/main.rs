use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::info;

use vpcconsole_web::server::WebServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let web_addr: SocketAddr = std::env::var("VPCCONSOLE_WEB_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
        .parse()?;

    let cloud_addr = std::env::var("VPCCONSOLE_CLOUD_ADDR")
        .unwrap_or_else(|_| "http://127.0.0.1:8700".to_string());

    let user_file = std::env::var("VPCCONSOLE_USER_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| vpcconsole_common::default_user_file());

    let assets_dir = std::env::var("VPCCONSOLE_ASSETS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| vpcconsole_common::default_assets_dir());

    let cfg = WebServerConfig {
        cloud_addr,
        user_file,
        assets_dir,
    };

    info!(
        "Starting VPC console on http://{} (cloud gateway: {})",
        web_addr, cfg.cloud_addr
    );

    vpcconsole_web::server::serve(web_addr, cfg).await
}
