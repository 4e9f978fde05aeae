//! Randomness sources for dice
//!
//! All dice randomness flows through [`DiceSource`] so that a run can be
//! replayed from a seed, or driven by a fixed script in tests.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of dice randomness
pub trait DiceSource {
    /// A uniform face in 1..=6
    fn roll_face(&mut self) -> u8;

    /// A uniform face in 4..=6
    fn roll_high_face(&mut self) -> u8;

    /// True with the given probability. Probabilities at or above 1.0 always hit.
    fn chance(&mut self, probability: f64) -> bool;

    /// A uniform index in 0..len. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Dice backed by any `rand` generator
#[derive(Debug, Clone)]
pub struct RandomDice<R> {
    rng: R,
}

impl<R: Rng> RandomDice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomDice<StdRng> {
    /// Deterministic dice for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Dice seeded from the operating system
    pub fn from_os() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> DiceSource for RandomDice<R> {
    fn roll_face(&mut self) -> u8 {
        self.rng.random_range(1..=6)
    }

    fn roll_high_face(&mut self) -> u8 {
        self.rng.random_range(4..=6)
    }

    fn chance(&mut self, probability: f64) -> bool {
        // Draw-and-compare keeps probabilities above 1.0 legal
        self.rng.random::<f64>() < probability
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Dice that replay queued outcomes, then fall back to a seeded generator
///
/// Faces are shared by `roll_face` and `roll_high_face`; a queued face below
/// 4 handed to `roll_high_face` is lifted into range so the modifier
/// contract still holds.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    faces: VecDeque<u8>,
    chances: VecDeque<bool>,
    indices: VecDeque<usize>,
    fallback: RandomDice<StdRng>,
}

impl ScriptedDice {
    pub fn new(seed: u64) -> Self {
        Self {
            faces: VecDeque::new(),
            chances: VecDeque::new(),
            indices: VecDeque::new(),
            fallback: RandomDice::seeded(seed),
        }
    }

    /// Queue faces, consumed in order
    pub fn with_faces(mut self, faces: impl IntoIterator<Item = u8>) -> Self {
        self.push_faces(faces);
        self
    }

    /// Queue chance outcomes, consumed in order
    pub fn with_chances(mut self, chances: impl IntoIterator<Item = bool>) -> Self {
        self.push_chances(chances);
        self
    }

    /// Queue picked indices, consumed in order
    pub fn with_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.indices.extend(indices);
        self
    }

    pub fn push_faces(&mut self, faces: impl IntoIterator<Item = u8>) {
        self.faces.extend(faces.into_iter().map(|f| f.clamp(1, 6)));
    }

    pub fn push_chances(&mut self, chances: impl IntoIterator<Item = bool>) {
        self.chances.extend(chances);
    }

    /// Number of queued faces not yet consumed
    pub fn remaining_faces(&self) -> usize {
        self.faces.len()
    }
}

impl DiceSource for ScriptedDice {
    fn roll_face(&mut self) -> u8 {
        match self.faces.pop_front() {
            Some(face) => face,
            None => self.fallback.roll_face(),
        }
    }

    fn roll_high_face(&mut self) -> u8 {
        match self.faces.pop_front() {
            Some(face) => face.max(4),
            None => self.fallback.roll_high_face(),
        }
    }

    fn chance(&mut self, probability: f64) -> bool {
        match self.chances.pop_front() {
            Some(hit) => hit,
            None => self.fallback.chance(probability),
        }
    }

    fn pick_index(&mut self, len: usize) -> usize {
        match self.indices.pop_front() {
            Some(idx) if idx < len => idx,
            _ => self.fallback.pick_index(len),
        }
    }
}
