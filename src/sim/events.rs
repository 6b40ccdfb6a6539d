//! Events the game emits toward the presentation layer

use serde::{Deserialize, Serialize};

use super::board::Card;
use super::state::LossReason;

/// A state change worth rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new board was dealt; lay it out `cols` wide
    BoardDealt { cols: u32, cards: Vec<Card> },
    /// One card changed face or matched
    CardChanged { index: usize, card: Card },
    /// Move or time budget changed
    Status { moves_left: u32, seconds_left: u32 },
    /// Streak or high score changed
    Progress { streak: u32, high_score: u32 },
    /// Hide win/lose screens and stop any celebration
    ResetScreens,
    Won,
    Lost(LossReason),
    /// Start the decorative win effect
    Celebrate,
    /// User-visible message that is not an outcome
    Notice(String),
}

/// Receives events from the game as they happen
pub trait Presenter {
    fn present(&mut self, event: GameEvent);
}

/// Records events in order
impl Presenter for Vec<GameEvent> {
    fn present(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Discards everything
impl Presenter for () {
    fn present(&mut self, _event: GameEvent) {}
}
