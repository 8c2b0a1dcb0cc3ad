//! Twelve Ninja Player - headless driver.
//!
//! Loads (or creates) a player, looks at the map around the origin, performs
//! one action on the current tile and fights one encounter.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use twelveninja_domain::{AxialBounds, AxialCoord, CombatAction, CombatPhase, PlayerId};

use twelveninja_player::application::services::CombatEvent;
use twelveninja_player::infrastructure::{HttpGameApi, SystemRandomProvider, SystemTimeProvider};
use twelveninja_player::ports::outbound::GameApiPort;
use twelveninja_player::{GameSession, PlayerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "twelveninja_player=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PlayerConfig::from_env();
    tracing::info!(engine_url = %config.engine_url, "Starting Twelve Ninja Player");

    let api: Arc<dyn GameApiPort> = Arc::new(HttpGameApi::with_timeout(
        &config.engine_url,
        config.request_timeout,
    ));

    let player_id = match config.player_id {
        Some(id) => id,
        None => {
            let created = api.create_player(config.username.clone()).await?;
            tracing::info!(username = %created.username, "Created player");
            PlayerId::from_uuid(created.id)
        }
    };

    let session = GameSession::new(
        api,
        player_id,
        Arc::new(SystemTimeProvider),
        Arc::new(SystemRandomProvider),
    );
    let player = session.enter(AxialBounds::DEFAULT_VIEW).await?;

    let tiles = session.tile_store().snapshot();
    let explored = tiles.tiles().iter().filter(|t| t.explored()).count();
    tracing::info!(
        player_id = %player.id(),
        hp = player.hp().current(),
        stamina = player.stamina().current(),
        ryo = player.ryo(),
        tiles = tiles.tiles().len(),
        explored,
        "Map loaded"
    );

    let here = player
        .current_tile_id()
        .or_else(|| tiles.tile_at(AxialCoord::ORIGIN).map(|t| t.id()));
    match here {
        Some(tile_id) => match session.perform_action(config.action, tile_id).await {
            Ok(outcome) => tracing::info!(
                action = %config.action,
                success = outcome.success,
                damage = outcome.damage.unwrap_or(0),
                "{}",
                outcome.message
            ),
            Err(e) => tracing::warn!(action = %config.action, error = %e, "{}", e.user_message()),
        },
        None => tracing::warn!("No tile to act on"),
    }

    let combat = session
        .start_combat()
        .await?
        .with_enemy_turn_delay(config.enemy_turn_delay);
    let mut events = combat.subscribe();
    combat.start_default().await?;

    loop {
        match combat.phase().await {
            CombatPhase::Resolved(result) => {
                tracing::info!(?result, "Combat over");
                break;
            }
            CombatPhase::PlayerTurn => {
                let actions = combat.available_actions().await;
                let action = if actions.contains(&CombatAction::Ability) {
                    CombatAction::Ability
                } else {
                    CombatAction::Attack
                };
                combat.submit(action).await?;
            }
            CombatPhase::EnemyTurn | CombatPhase::NotStarted => match events.recv().await {
                Ok(CombatEvent::Message(m)) => tracing::info!(actor = m.actor(), "{}", m.message()),
                Ok(CombatEvent::PhaseChanged(_)) | Err(RecvError::Lagged(_)) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "Combat event stream ended");
                    break;
                }
            },
        }
    }
    drop(combat);

    let player = session.return_to_map(AxialBounds::DEFAULT_VIEW).await?;
    tracing::info!(
        hp = player.hp().current(),
        stamina = player.stamina().current(),
        xp = player.xp(),
        ryo = player.ryo(),
        "Back on the map"
    );

    session.close();
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
