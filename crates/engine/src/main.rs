//! Twelve Ninja Engine - Main entry point.

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use twelveninja_engine::app::{App, Repositories};
use twelveninja_engine::infrastructure::{
    clock::{SystemClock, SystemRandom},
    memory::{InMemoryEventLog, InMemoryPlayerRepo, InMemoryTileRepo},
    world::generate_world,
};
use twelveninja_engine::{api, EngineConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "twelveninja_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Twelve Ninja Engine");

    let config = EngineConfig::from_env();

    let world = generate_world(config.world_radius, config.world_seed);
    let tiles = InMemoryTileRepo::seeded(world)?;
    tracing::info!(
        radius = config.world_radius,
        seed = ?config.world_seed,
        tiles = tiles.len(),
        "World generated"
    );

    let repositories = Repositories {
        tile: Arc::new(tiles),
        player: Arc::new(InMemoryPlayerRepo::new()),
        events: Arc::new(InMemoryEventLog::new()),
    };
    let app = Arc::new(App::new(
        repositories,
        Arc::new(SystemClock),
        Arc::new(SystemRandom),
    ));

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer(config.cors_allowed_origins.as_deref()) {
        router = router.layer(cors);
    }

    let addr = config.bind_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer(allowed_origins: Option<&str>) -> Option<CorsLayer> {
    let allowed_origins = allowed_origins?;

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins == "*" {
        return Some(cors.allow_origin(Any));
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();

    if origins.is_empty() {
        return None;
    }
    Some(cors.allow_origin(origins))
}
