//! Player action feed
//!
//! The host applies a queue of pending actions before (or atomically with)
//! each tick. Connection handlers submit through a lock-free bounded
//! channel so the simulation loop never blocks on input.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use thiserror::Error;

use crate::game::phase;
use crate::game::state::{Controls, GameState, GameTime, Player, PlayerId};

/// One pending action from a player connection
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerAction {
    Join,
    Leave,
    SetControls(Controls),
}

#[derive(Debug, Clone, Copy)]
pub struct ActionMessage {
    pub player_id: PlayerId,
    pub action: PlayerAction,
}

/// Apply one action to the state
///
/// All failure modes degrade to a no-op: unknown identities are dropped,
/// duplicate joins and full-roster joins are ignored.
pub fn apply(state: &mut GameState, now: GameTime, msg: ActionMessage, max_players: usize) {
    match msg.action {
        PlayerAction::Join => {
            if state.players.is_empty() {
                // first join of a fresh round
                state.reset_round(now);
                phase::start_phase(state, now);
            }

            if state.player_by_identity(msg.player_id).is_some()
                || state.players.len() >= max_players
            {
                return;
            }

            let slot = state.next_player_index();
            let id = state.next_entity_id();
            state.players.push(Player::new(id, msg.player_id, slot));
            tracing::info!(player = %msg.player_id, slot, "player joined");
        }
        PlayerAction::Leave => {
            // no death event for an explicit leave
            if let Some(index) = state
                .players
                .iter()
                .position(|p| p.player_id == msg.player_id)
            {
                state.players.remove(index);
                tracing::info!(player = %msg.player_id, "player left");
            }
        }
        PlayerAction::SetControls(controls) => {
            if let Some(player) = state.player_by_identity_mut(msg.player_id) {
                // network input is untrusted; clamp the movement axes
                player.controls = Controls {
                    x: controls.x.clamp(-1.0, 1.0),
                    y: controls.y.clamp(-1.0, 1.0),
                    fire: controls.fire,
                };
            }
        }
    }
}

/// Lock-free action buffer using a bounded channel
///
/// Multiple connection handlers submit without blocking; the game loop
/// drains everything pending at the start of each tick.
pub struct ActionBuffer {
    sender: Sender<ActionMessage>,
    receiver: Receiver<ActionMessage>,
    capacity: usize,
}

impl ActionBuffer {
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
        }
    }

    /// Create a sender handle for a connection
    pub fn sender(&self) -> ActionSender {
        ActionSender {
            sender: self.sender.clone(),
        }
    }

    /// Drain all pending actions for this tick, in submission order
    pub fn drain(&self) -> Vec<ActionMessage> {
        self.receiver.try_iter().collect()
    }

    #[inline]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ActionBuffer {
    fn default() -> Self {
        // 4 players at 60 Hz client input rate leaves plenty of headroom
        Self::new(256)
    }
}

/// Clonable sender handle for connection handlers
#[derive(Clone)]
pub struct ActionSender {
    sender: Sender<ActionMessage>,
}

impl ActionSender {
    /// Submit an action (non-blocking)
    #[inline]
    pub fn try_send(
        &self,
        player_id: PlayerId,
        action: PlayerAction,
    ) -> Result<(), ActionBufferError> {
        self.sender
            .try_send(ActionMessage { player_id, action })
            .map_err(|e| match e {
                TrySendError::Full(_) => ActionBufferError::Full,
                TrySendError::Disconnected(_) => ActionBufferError::Disconnected,
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionBufferError {
    /// Buffer is full (backpressure)
    #[error("action buffer full")]
    Full,
    /// Channel disconnected (simulation stopped)
    #[error("simulation loop stopped")]
    Disconnected,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn join(state: &mut GameState, now: GameTime, id: PlayerId) {
        apply(
            state,
            now,
            ActionMessage {
                player_id: id,
                action: PlayerAction::Join,
            },
            4,
        );
    }

    #[test]
    fn test_first_join_resets_round() {
        let mut state = GameState::new(1);
        state.rng.next_value();
        state.phase = 9;

        join(&mut state, 1000, Uuid::new_v4());

        assert_eq!(state.players.len(), 1);
        assert_eq!(state.rng.cursor(), 0);
        // reset rewinds to phase 0, then phase 1 starts with its intro
        assert_eq!(state.phase, 1);
        assert_eq!(state.phase_start, 1000 + 4000);
    }

    #[test]
    fn test_second_join_does_not_reset() {
        let mut state = GameState::new(1);
        join(&mut state, 1000, Uuid::new_v4());
        state.rng.next_value();

        join(&mut state, 2000, Uuid::new_v4());

        assert_eq!(state.players.len(), 2);
        assert_eq!(state.rng.cursor(), 1);
        assert_eq!(state.phase, 1);
        assert_eq!(state.phase_start, 1000 + 4000);
    }

    #[test]
    fn test_duplicate_join_is_noop() {
        let mut state = GameState::new(1);
        let id = Uuid::new_v4();
        join(&mut state, 0, id);
        join(&mut state, 0, id);
        assert_eq!(state.players.len(), 1);
    }

    #[test]
    fn test_join_respects_capacity() {
        let mut state = GameState::new(1);
        for _ in 0..6 {
            join(&mut state, 0, Uuid::new_v4());
        }
        assert_eq!(state.players.len(), 4);
    }

    #[test]
    fn test_leave_removes_silently() {
        let mut state = GameState::new(1);
        let id = Uuid::new_v4();
        join(&mut state, 0, id);

        apply(
            &mut state,
            100,
            ActionMessage {
                player_id: id,
                action: PlayerAction::Leave,
            },
            4,
        );

        assert!(state.players.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_controls_are_clamped() {
        let mut state = GameState::new(1);
        let id = Uuid::new_v4();
        join(&mut state, 0, id);

        apply(
            &mut state,
            100,
            ActionMessage {
                player_id: id,
                action: PlayerAction::SetControls(Controls {
                    x: 5.0,
                    y: -3.0,
                    fire: true,
                }),
            },
            4,
        );

        let player = state.player_by_identity(id).unwrap();
        assert_eq!(player.controls.x, 1.0);
        assert_eq!(player.controls.y, -1.0);
        assert!(player.controls.fire);
    }

    #[test]
    fn test_controls_for_unknown_player_dropped() {
        let mut state = GameState::new(1);
        apply(
            &mut state,
            0,
            ActionMessage {
                player_id: Uuid::new_v4(),
                action: PlayerAction::SetControls(Controls {
                    x: 1.0,
                    y: 0.0,
                    fire: false,
                }),
            },
            4,
        );
        assert!(state.players.is_empty());
    }

    #[test]
    fn test_buffer_submit_and_drain() {
        let buffer = ActionBuffer::new(8);
        let sender = buffer.sender();
        let id = Uuid::new_v4();

        sender.try_send(id, PlayerAction::Join).unwrap();
        sender
            .try_send(
                id,
                PlayerAction::SetControls(Controls {
                    x: 1.0,
                    y: 0.0,
                    fire: true,
                }),
            )
            .unwrap();

        let drained = buffer.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].action, PlayerAction::Join);
        assert_eq!(buffer.pending_count(), 0);
    }

    #[test]
    fn test_buffer_backpressure() {
        let buffer = ActionBuffer::new(1);
        let sender = buffer.sender();
        let id = Uuid::new_v4();

        sender.try_send(id, PlayerAction::Join).unwrap();
        assert_eq!(
            sender.try_send(id, PlayerAction::Leave),
            Err(ActionBufferError::Full)
        );
    }
}
