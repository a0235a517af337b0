mod config;
mod game;
mod util;

use std::time::{Duration, Instant};

use tokio::time::MissedTickBehavior;
use tracing::{info, Level};
use uuid::Uuid;

use crate::config::SimConfig;
use crate::game::actions::{ActionBuffer, ActionSender, PlayerAction};
use crate::game::game_loop;
use crate::game::state::{Controls, GameState, GameTime};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize logging; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(Level::INFO.to_string())),
        )
        .with_target(false)
        .init();

    info!("Nebula Strike Server v{}", env!("CARGO_PKG_VERSION"));

    let config = SimConfig::load_or_default();
    config.validate().map_err(anyhow::Error::msg)?;
    info!(
        "Configuration loaded: seed={}, tick_rate={}, max_players={}",
        config.seed, config.tick_rate, config.max_players
    );

    let mut state = GameState::new(config.seed);
    let buffer = ActionBuffer::default();

    // until the transport layer lands, a synthetic pilot exercises the loop
    spawn_demo_pilot(buffer.sender());

    let mut ticker =
        tokio::time::interval(Duration::from_millis(1000 / config.tick_rate as u64));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let started = Instant::now();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = started.elapsed().as_millis() as GameTime;
                let pending = buffer.drain();

                // the host owns the persisted store: ensure a best-run
                // record exists before the core ever sees the player
                for msg in &pending {
                    if matches!(msg.action, PlayerAction::Join) {
                        state.persisted.entry(msg.player_id).or_default();
                    }
                }

                game_loop::step(&mut state, now, pending, config.max_players);

                for event in &state.events {
                    tracing::debug!(kind = ?event.kind, who = ?event.who, "event");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    let snapshot = bincode::serde::encode_to_vec(&state, bincode::config::standard())?;
    info!(
        "Final snapshot: {} bytes, phase {}, {} best-run records",
        snapshot.len(),
        state.phase,
        state.persisted.len()
    );
    info!("Server stopped");

    Ok(())
}

/// Join one synthetic player and sweep its controls forever
fn spawn_demo_pilot(sender: ActionSender) {
    tokio::spawn(async move {
        let id = Uuid::new_v4();
        if sender.try_send(id, PlayerAction::Join).is_err() {
            return;
        }
        info!("Demo pilot {} joined", id);

        let mut ticker = tokio::time::interval(Duration::from_millis(100));
        let mut t: f32 = 0.0;
        loop {
            ticker.tick().await;
            t += 0.1;
            let controls = Controls {
                x: t.sin(),
                y: 0.25 * (t * 0.7).cos(),
                fire: true,
            };
            if sender.try_send(id, PlayerAction::SetControls(controls)).is_err() {
                break;
            }
        }
    });
}
