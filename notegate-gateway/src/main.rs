//! Entry point for the `notegate-gateway` HTTP server.

use std::sync::Arc;

use notegate_core::RequestVerifier;
use notegate_gateway::{
    config::Config,
    routes::{create_router, AppContext},
};
use notegate_mirror::{GistPublisher, MirrorPublisher, MirrorSync};
use notegate_store::NoteStore;
use tracing::info;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "configuration error");
            std::process::exit(1);
        }
    };

    let verifier = match RequestVerifier::from_hex(&config.discord_public_key) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error = %e, "DISCORD_PUBLIC_KEY is not usable");
            std::process::exit(1);
        }
    };

    let store = match NoteStore::open(&config.db_path) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            tracing::error!(path = %config.db_path.display(), error = %e, "failed to open note store");
            std::process::exit(1);
        }
    };

    let publisher: Arc<dyn MirrorPublisher> =
        Arc::new(GistPublisher::new(&config.gist_id, config.github_token.clone()));
    let mirror = MirrorSync::spawn(Arc::clone(&store), publisher);

    let ctx = Arc::new(AppContext {
        verifier,
        note_secret: config.note_secret.clone().into_bytes(),
        store,
        mirror,
    });
    let app = create_router(ctx);

    let listener = match tokio::net::TcpListener::bind(&config.listen_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %config.listen_addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %config.listen_addr, "notegate-gateway listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
