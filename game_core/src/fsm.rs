//! Game State Machine
//!
//! Round and match flow: start screen, round setup, play, game over.
//! `GameOver` is passed through on the way back to the start screen; it is
//! never a resting state.

use tracing::{debug, warn};

/// Game states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsmState {
    StartScreen,
    RoundInit,
    Playing,
    GameOver,
}

/// Actions that trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    StartPressed,
    RoundReady,
    PointScored,
    MatchWon,
    Presented,
}

/// Result of a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    pub success: bool,
    pub from_state: FsmState,
    pub to_state: FsmState,
    pub action: GameAction,
}

/// Game Finite State Machine
#[derive(Debug, Clone)]
pub struct GameFsm {
    state: FsmState,
}

impl GameFsm {
    pub fn new() -> Self {
        Self {
            state: FsmState::StartScreen,
        }
    }

    /// Get current state
    pub fn state(&self) -> FsmState {
        self.state
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: GameAction) -> TransitionResult {
        let from_state = self.state;

        match self.get_next_state(action) {
            Some(next_state) => {
                self.state = next_state;
                debug!(?from_state, to_state = ?next_state, ?action, "transition");
                TransitionResult {
                    success: true,
                    from_state,
                    to_state: next_state,
                    action,
                }
            }
            None => {
                warn!(?from_state, ?action, "rejected transition");
                TransitionResult {
                    success: false,
                    from_state,
                    to_state: from_state,
                    action,
                }
            }
        }
    }

    /// Get next state for a given action (if valid)
    fn get_next_state(&self, action: GameAction) -> Option<FsmState> {
        match (self.state, action) {
            (FsmState::StartScreen, GameAction::StartPressed) => Some(FsmState::RoundInit),
            (FsmState::RoundInit, GameAction::RoundReady) => Some(FsmState::Playing),
            (FsmState::Playing, GameAction::PointScored) => Some(FsmState::RoundInit),
            (FsmState::Playing, GameAction::MatchWon) => Some(FsmState::GameOver),
            (FsmState::GameOver, GameAction::Presented) => Some(FsmState::StartScreen),

            // Invalid transition
            _ => None,
        }
    }
}

impl Default for GameFsm {
    fn default() -> Self {
        Self::new()
    }
}
