//! Serve command - runs the HTTP API

use clap::Args;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::create_router;
use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Arguments for the serve command
#[derive(Debug, Clone, Default, Args)]
pub struct ServeArgs {
    /// HTTP listen address, overriding server.host/server.port
    #[arg(long = "http-addr", value_name = "HOST:PORT")]
    pub http_addr: Option<String>,
}

/// Run the HTTP server
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    let state = crate::create_app_state(&config).await?;
    let app = create_router(state);

    let addr = listen_addr(&config, args.http_addr);
    let listener = TcpListener::bind(addr.as_str())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", addr, e))?;
    info!("Starting user service on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

/// `--http-addr` wins over the configured host and port; hostnames such
/// as `localhost` are resolved at bind time.
fn listen_addr(config: &AppConfig, http_addr: Option<String>) -> String {
    http_addr.unwrap_or_else(|| format!("{}:{}", config.server.host, config.server.port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listen_addr_from_config() {
        let config = AppConfig::default();
        assert_eq!(listen_addr(&config, None), "127.0.0.1:8080");
    }

    #[test]
    fn test_http_addr_overrides_config() {
        let config = AppConfig::default();
        let addr = listen_addr(&config, Some("localhost:9000".to_string()));
        assert_eq!(addr, "localhost:9000");
    }
}
