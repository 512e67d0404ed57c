//! Test RNGs — deterministic `DeterministicRng` implementations.

use daggerkeep_core::rng::DeterministicRng;

/// Always rolls the same face, clamped into the requested range.
#[derive(Debug, Clone, Copy)]
pub struct MockRng(pub u32);

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        self.0.clamp(min, max)
    }
}

/// Replays a scripted sequence of faces, one per call. Dice tests use it to
/// pin the hope die and the fear die in that order.
///
/// Panics once the script is exhausted.
#[derive(Debug)]
pub struct SequenceRng {
    faces: std::vec::IntoIter<u32>,
}

impl SequenceRng {
    /// Create a new `SequenceRng` replaying `faces`.
    #[must_use]
    pub fn new(faces: Vec<u32>) -> Self {
        Self {
            faces: faces.into_iter(),
        }
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, _min: u32, _max: u32) -> u32 {
        self.faces
            .next()
            .expect("SequenceRng script exhausted; add more faces to the test")
    }
}
