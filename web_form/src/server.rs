use axum::{
    response::Html,
    routing::{get, post},
    Router,
};
use std::{error::Error, net::SocketAddr, sync::Arc};
use text_completion::CompletionClient;
use tracing::{info, warn};

use crate::{generate::generate, render_page, WebFormHandler};

pub fn router(completion_client: Arc<dyn CompletionClient>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/generate", post(generate))
        .with_state(WebFormHandler::new(completion_client))
}

/// Binds `addr` and serves the form in the background.
///
/// Returns the bound address (useful when `addr` asks for port 0).
pub async fn init(
    addr: SocketAddr,
    completion_client: Arc<dyn CompletionClient>,
) -> Result<SocketAddr, Box<dyn Error + Send + Sync>> {
    let app = router(completion_client);
    let server = axum::Server::try_bind(&addr)?.serve(app.into_make_service());
    let local_addr = server.local_addr();

    info!("Starting server on {}...", local_addr);
    tokio::spawn(async move {
        let _ = server.await.map_err(|why| warn!("Server ended: {:?}", why));
    });

    Ok(local_addr)
}

async fn index() -> Html<String> {
    Html(render_page())
}
