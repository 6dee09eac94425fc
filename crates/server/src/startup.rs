use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use service::prices::{domain::default_seed, FoodItem, MemoryPriceRepository};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Seed items from config, or the built-in list when none are configured.
fn seed_items(cfg: &AppConfig) -> Vec<FoodItem> {
    if cfg.prices.seed.is_empty() {
        return default_seed();
    }
    cfg.prices
        .seed
        .iter()
        .map(|s| FoodItem::new(s.name.clone(), s.price))
        .collect()
}

pub fn build_state(cfg: &AppConfig) -> ServerState {
    let seed = seed_items(cfg);
    info!(items = seed.len(), "seeded price list");
    ServerState::new(Arc::new(MemoryPriceRepository::new(seed)))
}

/// Router with the production middleware stack.
pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

fn load_bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = cfg.server.bind_addr();
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {raw}: {e}")))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl+C, shutting down");
    }
}

/// Serve `app` on an already bound listener until Ctrl+C.
pub async fn serve(listener: TcpListener, app: Router) -> anyhow::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Public entry: build the app from config and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg);
    let app = build_app(state);

    let addr = load_bind_addr(&cfg)?;
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    info!(addr = %local, "API served at http://{local}");
    serve(listener, app).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use configs::SeedItem;

    #[test]
    fn empty_seed_falls_back_to_builtin() {
        let cfg = AppConfig::default();
        let names: Vec<String> = seed_items(&cfg).into_iter().map(|i| i.name).collect();
        assert_eq!(names, ["apple", "orange", "banana"]);
    }

    #[test]
    fn configured_seed_replaces_builtin() {
        let mut cfg = AppConfig::default();
        cfg.prices.seed = vec![SeedItem { name: "kiwi".into(), price: 7.5 }];
        assert_eq!(seed_items(&cfg), vec![FoodItem::new("kiwi", 7.5)]);
    }

    #[test]
    fn bad_host_is_invalid_config() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "not a host".into();
        assert!(matches!(load_bind_addr(&cfg), Err(StartupError::InvalidConfig(_))));
    }
}
