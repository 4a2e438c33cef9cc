//! # engine::driver
//!
//! **Tick loop** — turns wall-clock time into clock seconds.
//!
//! One task per game: every `tick_interval` it advances the session and
//! broadcasts the outcome. The task exits when the game ends, is stopped, or
//! is replaced by a newer game.

use std::sync::atomic::Ordering;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};
use uuid::Uuid;

use crate::engine::session::Advance;
use crate::events::WsEvent;
use crate::state::SharedState;

/// Spawn the tick loop for `game_id`.
pub fn spawn_game_loop(state: SharedState, game_id: Uuid) -> JoinHandle<()> {
    tokio::spawn(run_game_loop(state, game_id))
}

async fn run_game_loop(state: SharedState, game_id: Uuid) {
    let mut ticker = interval(state.config.tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick of a tokio interval completes immediately
    ticker.tick().await;

    info!(%game_id, every = ?state.config.tick_interval, "⏱️ Tick loop running");

    loop {
        ticker.tick().await;

        let outcome = {
            let mut session = state.session.write().await;
            if session.game_id() != game_id {
                debug!(%game_id, "newer game started — tick loop retiring");
                break;
            }
            session.advance()
        };

        if !publish(&state, outcome) {
            break;
        }
    }

    info!(%game_id, "⏱️ Tick loop finished");
}

/// Broadcast one [`Advance`]. Returns whether the loop should keep going.
fn publish(state: &SharedState, outcome: Advance) -> bool {
    match outcome {
        Advance::Idle => false,
        Advance::Ticked { tick, situation, remaining_secs, profit_loss } => {
            state.tick_count.fetch_add(1, Ordering::Relaxed);
            state.broadcast(&WsEvent::Tick { tick, situation, remaining_secs, profit_loss });
            true
        }
        Advance::Ended { tick, situation, summary } => {
            state.tick_count.fetch_add(1, Ordering::Relaxed);
            state.broadcast(&WsEvent::Tick {
                tick,
                situation,
                remaining_secs: 0,
                profit_loss: summary.profit_loss,
            });
            state.broadcast(&WsEvent::GameEnded { summary: Box::new(summary) });
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{config::SimConfig, state::build_state};

    #[tokio::test]
    async fn test_loop_for_replaced_game_exits_without_advancing() {
        let state = build_state(SimConfig {
            game_duration_secs: 30,
            tick_interval: Duration::from_millis(10),
            seed: Some(5),
            ..SimConfig::default()
        });
        state.session.write().await.start().unwrap();

        let stale_id = Uuid::new_v4();
        tokio::time::timeout(Duration::from_secs(2), spawn_game_loop(state.clone(), stale_id))
            .await
            .expect("stale loop should retire on its first tick")
            .unwrap();

        assert_eq!(state.session.read().await.status().remaining_secs, 30);
        assert_eq!(state.tick_count.load(Ordering::Relaxed), 0);
    }
}
