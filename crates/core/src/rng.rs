//! RNG module - seeded randomness for shape selection and block colors
//!
//! Every shape is equally likely on each spawn (no bag). A simple LCG keeps
//! games reproducible: the same seed replays the same shapes and colors.

use crate::types::{Color, ShapeKind, SHAPE_COUNT};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // The low bits of an LCG cycle with a short period; scale so that
        // the high bits pick the result.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Uniformly pick one of the seven shapes
    pub fn next_shape(&mut self) -> ShapeKind {
        ShapeKind::ALL[self.next_range(SHAPE_COUNT as u32) as usize]
    }

    /// Random opaque color
    pub fn next_color(&mut self) -> Color {
        let bits = self.next_u32();
        Color::new((bits >> 24) as u8, (bits >> 16) as u8, (bits >> 8) as u8)
    }

    /// Current state (for restarting with the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
