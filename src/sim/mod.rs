//! Deterministic game core
//!
//! All gameplay decisions live here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - Virtual time only (the host calls `MemoryGame::advance`)
//! - No rendering or platform dependencies; output goes through `Presenter`

pub mod board;
pub mod events;
pub mod game;
pub mod hint;
pub mod state;
pub mod timers;

pub use board::{Board, Card, PairKey};
pub use events::{GameEvent, Presenter};
pub use game::{HintOutcome, MemoryGame, SelectOutcome};
pub use hint::find_hint_pair;
pub use state::{GamePhase, LossReason, SessionState, status_line};
pub use timers::{Scheduled, Scheduler, Task};
