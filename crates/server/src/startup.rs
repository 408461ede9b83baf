use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::logging::init_logging_default;
use dotenvy::dotenv;
use models::{Account, Book};
use service::{idgen::RandomIds, storage::JsonMapStore, StoreService};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks.
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => (cfg.server.host, cfg.server.port),
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

fn load_data_dir() -> String {
    match configs::load_default() {
        Ok(mut cfg) => {
            cfg.storage.normalize_from_env();
            cfg.storage.data_dir
        }
        Err(_) => env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()),
    }
}

/// Public entry: wire up storage and the service, then run the HTTP
/// server until it fails or the process is stopped.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_default();

    let data_dir = load_data_dir();
    common::env::ensure_data_dir(&data_dir).await?;

    // Durable ordered maps, one file per collection.
    let catalog = JsonMapStore::<Book>::open(format!("{data_dir}/books.json")).await?;
    let ledger = JsonMapStore::<Account>::open(format!("{data_dir}/accounts.json")).await?;

    let service = Arc::new(StoreService::new(catalog, ledger, Arc::new(RandomIds)));
    let state = ServerState { service };

    let app: Router = routes::build_router(build_cors(), state);

    let addr = load_bind_addr()?;
    info!(%addr, "starting bookmart server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
