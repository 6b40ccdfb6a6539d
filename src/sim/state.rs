//! Game phase and per-game session state
//!
//! Everything here is reset by `MemoryGame::start`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::difficulty::DifficultyProfile;

/// Why a game was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    /// Move budget exhausted with pairs left
    OutOfMoves,
    /// Countdown reached zero with pairs left
    OutOfTime,
}

impl fmt::Display for LossReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LossReason::OutOfMoves => f.write_str("Out of Moves! You lost!"),
            LossReason::OutOfTime => f.write_str("Time's up! You lost!"),
        }
    }
}

/// Current phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// No game started yet
    #[default]
    Idle,
    /// Cards can be selected
    Playing,
    /// Every pair matched
    Won,
    /// Ran out of moves or time
    Lost(LossReason),
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost(_))
    }
}

/// Mutable state of the game in progress
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Board indices of face-up cards awaiting comparison (at most 2)
    pub flipped: Vec<usize>,
    pub matched_pairs: usize,
    pub moves_left: u32,
    pub seconds_left: u32,
    pub hints_left: u32,
    /// Selections are ignored while set
    pub is_locked: bool,
}

impl SessionState {
    /// Fresh budgets for a new game
    pub fn from_profile(profile: &DifficultyProfile) -> Self {
        Self {
            flipped: Vec::with_capacity(2),
            matched_pairs: 0,
            moves_left: profile.move_budget,
            seconds_left: profile.time_budget_secs,
            hints_left: profile.hint_budget,
            is_locked: false,
        }
    }

    /// Status line shown under the board
    pub fn status_text(&self) -> String {
        status_line(self.moves_left, self.seconds_left)
    }
}

/// `Moves Left: 12 | Time Left: 30s`
pub fn status_line(moves_left: u32, seconds_left: u32) -> String {
    format!("Moves Left: {} | Time Left: {}s", moves_left, seconds_left)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;

    #[test]
    fn test_from_profile() {
        let state = SessionState::from_profile(&Difficulty::Medium.builtin_profile());
        assert!(state.flipped.is_empty());
        assert_eq!(state.matched_pairs, 0);
        assert_eq!(state.moves_left, 24);
        assert_eq!(state.seconds_left, 40);
        assert_eq!(state.hints_left, 2);
        assert!(!state.is_locked);
        assert_eq!(state.status_text(), "Moves Left: 24 | Time Left: 40s");
    }

    #[test]
    fn test_status_line() {
        assert_eq!(status_line(0, 0), "Moves Left: 0 | Time Left: 0s");
        assert_eq!(status_line(12, 30), "Moves Left: 12 | Time Left: 30s");
    }

    #[test]
    fn test_loss_messages() {
        assert_eq!(LossReason::OutOfMoves.to_string(), "Out of Moves! You lost!");
        assert_eq!(LossReason::OutOfTime.to_string(), "Time's up! You lost!");
        assert!(GamePhase::Lost(LossReason::OutOfTime).is_terminal());
        assert!(GamePhase::Won.is_terminal());
        assert!(!GamePhase::Playing.is_terminal());
        assert!(!GamePhase::Idle.is_terminal());
    }
}
