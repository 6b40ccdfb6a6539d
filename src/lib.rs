//! Cat Match - a memory matching game with cat cards
//!
//! Core modules:
//! - `sim`: Deterministic game core (board, flip/match state machine, hints, timers)
//! - `progress`: Streak and high score bookkeeping across games
//! - `difficulty`: Difficulty catalog (board size, move/time/hint budgets)
//! - `settings`: Presentation preferences (theme, selected difficulty)
//! - `confetti`: Decorative particle overlay for the win screen

pub mod confetti;
pub mod difficulty;
pub mod progress;
pub mod settings;
pub mod sim;

pub use confetti::Confetti;
pub use difficulty::{Difficulty, DifficultyCatalog, DifficultyProfile};
pub use progress::PlayerProgress;
pub use settings::{Settings, Theme};
pub use sim::{GameEvent, GamePhase, LossReason, MemoryGame, Presenter};

/// Game configuration constants
pub mod consts {
    /// Delay before a mismatched pair is turned face down again
    pub const MISMATCH_DELAY_MS: u64 = 800;
    /// How long a hint keeps its pair face up
    pub const HINT_REVEAL_MS: u64 = 1000;
    /// Countdown period
    pub const COUNTDOWN_PERIOD_MS: u64 = 1000;

    /// Card images; pools larger than this cycle through it
    pub const CAT_IMAGES: [&str; 4] = [
        "https://tinyurl.com/2n4mjfwt",
        "https://tinyurl.com/28u3vtxm",
        "https://tinyurl.com/4zkhyn9c",
        "https://tinyurl.com/bdhcyvmf",
    ];

    /// Notice shown when a hint is requested with no charges left
    pub const NO_HINTS_NOTICE: &str = "No More Hints Left";
}
