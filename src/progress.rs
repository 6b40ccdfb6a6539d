//! Streak and high score bookkeeping
//!
//! Lives for the whole process; `MemoryGame::start` does not reset it.

use serde::{Deserialize, Serialize};

/// Player progress across games
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProgress {
    /// Successful matches since the last loss
    pub current_streak: u32,
    /// Best streak seen at a win
    pub high_score: u32,
}

impl PlayerProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_match(&mut self) {
        self.current_streak += 1;
    }

    /// Fold the streak into the high score. Returns true on a new best.
    pub fn record_win(&mut self) -> bool {
        if self.current_streak > self.high_score {
            self.high_score = self.current_streak;
            true
        } else {
            false
        }
    }

    pub fn record_loss(&mut self) {
        self.current_streak = 0;
    }
}
