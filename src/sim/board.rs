//! Board generation
//!
//! A board is a row-major sequence of cards in which every pair key appears
//! exactly twice. Keys are drawn from a pool that cycles the cat image catalog,
//! so large boards reuse images under distinct keys (told apart by `variant`).

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::consts::CAT_IMAGES;

/// Identity shared by exactly two cards on a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairKey(pub u32);

impl PairKey {
    /// Index into the image catalog
    pub fn image_index(&self) -> usize {
        self.0 as usize % CAT_IMAGES.len()
    }

    pub fn image_url(&self) -> &'static str {
        CAT_IMAGES[self.image_index()]
    }

    /// How many times the catalog had been cycled when this key was minted
    pub fn variant(&self) -> u32 {
        self.0 / CAT_IMAGES.len() as u32
    }
}

/// A single card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub key: PairKey,
    pub is_flipped: bool,
    pub is_matched: bool,
}

impl Card {
    pub fn new(key: PairKey) -> Self {
        Self {
            key,
            is_flipped: false,
            is_matched: false,
        }
    }

    /// Face down and still in play
    pub fn is_hidden(&self) -> bool {
        !self.is_flipped && !self.is_matched
    }
}

/// The dealt cards of one game
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub rows: u32,
    pub cols: u32,
    cards: Vec<Card>,
}

impl Board {
    /// Deal a shuffled `rows` x `cols` board
    ///
    /// The caller guarantees `rows * cols` is even and at least 2.
    pub fn generate<R: Rng + ?Sized>(rows: u32, cols: u32, rng: &mut R) -> Self {
        let needed_pairs = (rows as usize).saturating_mul(cols as usize) / 2;

        // Cycle the catalog until the pool can cover every pair
        let mut pool: Vec<PairKey> = Vec::with_capacity(needed_pairs + CAT_IMAGES.len());
        while pool.len() < needed_pairs {
            let start = pool.len() as u32;
            pool.extend((start..start + CAT_IMAGES.len() as u32).map(PairKey));
        }

        pool.shuffle(rng);
        pool.truncate(needed_pairs);

        let mut cards: Vec<Card> = pool.iter().chain(pool.iter()).copied().map(Card::new).collect();
        cards.shuffle(rng);

        log::debug!("Dealt {}x{} board ({} pairs)", rows, cols, needed_pairs);

        Self { rows, cols, cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub(crate) fn card_mut(&mut self, index: usize) -> Option<&mut Card> {
        self.cards.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }
}
