//! Difficulty catalog
//!
//! Board size plus move, time and hint budgets, keyed by difficulty name.
//! The built-in table can be replaced by a JSON catalog supplied by the host.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Largest board a profile may ask for
pub const MAX_CARDS: usize = 512;

/// Difficulty levels
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Built-in profile for this level
    pub const fn builtin_profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile::new(2, 4, 12, 30, 1),
            Difficulty::Medium => DifficultyProfile::new(4, 4, 24, 40, 2),
            Difficulty::Hard => DifficultyProfile::new(4, 6, 40, 60, 3),
        }
    }
}

/// Board dimensions and per-game budgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub rows: u32,
    pub cols: u32,
    /// Pair attempts allowed
    #[serde(rename = "moves")]
    pub move_budget: u32,
    /// Countdown length
    #[serde(rename = "time")]
    pub time_budget_secs: u32,
    #[serde(rename = "hints")]
    pub hint_budget: u32,
}

impl DifficultyProfile {
    pub const fn new(
        rows: u32,
        cols: u32,
        move_budget: u32,
        time_budget_secs: u32,
        hint_budget: u32,
    ) -> Self {
        Self {
            rows,
            cols,
            move_budget,
            time_budget_secs,
            hint_budget,
        }
    }

    /// `rows * cols`, saturating instead of overflowing on huge grids
    pub fn card_count(&self) -> usize {
        (self.rows as usize).saturating_mul(self.cols as usize)
    }

    pub fn pair_count(&self) -> usize {
        self.card_count() / 2
    }

    /// A board needs an even number of cards, at least one pair, at most `MAX_CARDS`
    pub fn is_valid(&self) -> bool {
        match (self.rows as usize).checked_mul(self.cols as usize) {
            Some(cards) => (2..=MAX_CARDS).contains(&cards) && cards % 2 == 0,
            None => false,
        }
    }
}

/// Difficulty name -> profile table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultyCatalog {
    profiles: BTreeMap<Difficulty, DifficultyProfile>,
}

impl Default for DifficultyCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DifficultyCatalog {
    /// The easy/medium/hard table shipped with the game
    pub fn builtin() -> Self {
        let profiles = Difficulty::ALL
            .iter()
            .map(|d| (*d, d.builtin_profile()))
            .collect();
        Self { profiles }
    }

    /// Parse a catalog such as `{"easy": {"rows": 2, "cols": 4, "moves": 12, "time": 30, "hints": 1}}`
    ///
    /// Profiles with an odd, empty or oversized grid are dropped with a warning.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let parsed: BTreeMap<Difficulty, DifficultyProfile> = serde_json::from_str(json)?;
        let profiles = parsed
            .into_iter()
            .filter(|(difficulty, profile)| {
                if profile.is_valid() {
                    true
                } else {
                    log::warn!(
                        "Ignoring {} profile: {}x{} grid is not an even board of 2..={} cards",
                        difficulty.as_str(),
                        profile.rows,
                        profile.cols,
                        MAX_CARDS
                    );
                    false
                }
            })
            .collect();
        Ok(Self { profiles })
    }

    pub fn get(&self, difficulty: Difficulty) -> Option<&DifficultyProfile> {
        self.profiles.get(&difficulty)
    }

    /// Profile for `difficulty`, falling back to the built-in one when the catalog lacks it
    pub fn profile(&self, difficulty: Difficulty) -> DifficultyProfile {
        self.get(difficulty)
            .copied()
            .unwrap_or_else(|| difficulty.builtin_profile())
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
