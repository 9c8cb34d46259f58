use std::{env, net::SocketAddr, sync::Arc};

use bedrock_api::{load_sdk_config, BedrockHandler};
use text_completion::CompletionClient;
use tracing::*;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt::init();
    info!(
        "Starting... CARGO_PKG_NAME={}, CARGO_PKG_VERSION={}, version={}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        option_env!("version").unwrap_or("(not defined at compile)")
    );

    let sdk_config = load_sdk_config().await;
    info!("Bedrock region={:?}", sdk_config.region());
    let bedrock: Arc<dyn CompletionClient> = Arc::new(BedrockHandler::new(&sdk_config));

    let bind_addr: SocketAddr = read_env_var_or("BEDROCK_DEMO_BIND_ADDR", DEFAULT_BIND_ADDR)
        .parse()
        .map_err(|e| format!("Invalid BEDROCK_DEMO_BIND_ADDR: {}", e))?;
    let local_addr = web_form::init(bind_addr, bedrock).await?;
    info!("Open http://{}/", local_addr);

    let _signal_err = tokio::signal::ctrl_c().await;
    info!("Received Ctrl-C, shutting down.");

    Ok(())
}

fn read_env_var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}
