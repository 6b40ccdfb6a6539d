//! Confetti overlay for the win screen
//!
//! Purely decorative: pieces fall at a fixed speed per 20 ms frame and wrap
//! back to the top. The host draws `pieces()` onto a full-window canvas.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Pieces per launch
pub const CONFETTI_COUNT: usize = 150;
/// Frame length the fall speeds are expressed in
pub const FRAME_MS: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfettiPiece {
    pub pos: Vec2,
    pub radius: f32,
    /// Degrees, 0-360
    pub hue: f32,
    /// Pixels per frame
    pub fall_speed: f32,
}

impl ConfettiPiece {
    pub fn css_color(&self) -> String {
        format!("hsl({:.0}, 100%, 60%)", self.hue)
    }
}

#[derive(Debug, Clone)]
pub struct Confetti {
    size: Vec2,
    pieces: Vec<ConfettiPiece>,
    rng: Pcg32,
}

impl Confetti {
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        Self {
            size: Vec2::new(width, height),
            pieces: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    /// Scatter a fresh set of pieces above the top edge
    pub fn launch(&mut self) {
        let size = self.size;
        let rng = &mut self.rng;
        self.pieces = (0..CONFETTI_COUNT)
            .map(|_| ConfettiPiece {
                pos: Vec2::new(
                    rng.random::<f32>() * size.x,
                    rng.random::<f32>() * -size.y,
                ),
                radius: rng.random::<f32>() * 6.0 + 4.0,
                hue: rng.random::<f32>() * 360.0,
                fall_speed: rng.random::<f32>() * 5.0 + 1.0,
            })
            .collect();
    }

    /// Move every piece down by `dt_ms` worth of frames
    pub fn step(&mut self, dt_ms: f32) {
        let frames = dt_ms / FRAME_MS;
        for piece in &mut self.pieces {
            piece.pos.y += piece.fall_speed * frames;
            if piece.pos.y > self.size.y {
                piece.pos.y = 0.0;
            }
        }
    }

    pub fn stop(&mut self) {
        self.pieces.clear();
    }

    pub fn is_active(&self) -> bool {
        !self.pieces.is_empty()
    }

    pub fn pieces(&self) -> &[ConfettiPiece] {
        &self.pieces
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }
}
