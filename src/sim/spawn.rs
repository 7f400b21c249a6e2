//! Weighted random target generation
//!
//! The spawner has no timing logic; the session decides when to call it.

use glam::Vec2;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use super::state::{TARGET_KINDS, Target, TargetKind};
use crate::settings::Tuning;

/// Stateless target factory
#[derive(Debug, Clone, Copy, Default)]
pub struct Spawner;

impl Spawner {
    /// Pick a category from the fixed 9:3:2 table
    pub fn pick_kind<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static TargetKind {
        match WeightedIndex::new(TARGET_KINDS.iter().map(|k| k.weight)) {
            Ok(dist) => &TARGET_KINDS[dist.sample(rng)],
            Err(e) => {
                log::error!("Invalid spawn weights ({}), spawning {:?}", e, TARGET_KINDS[0].color);
                &TARGET_KINDS[0]
            }
        }
    }

    /// Build a target above the visible area at a random column
    ///
    /// `tuning` must be sanitized (positive height, size within width).
    pub fn spawn<R: Rng + ?Sized>(&self, rng: &mut R, id: u32, tuning: &Tuning) -> Target {
        let kind = self.pick_kind(rng);
        let size = tuning.target_size;
        let max_x = (tuning.width - size).max(0.0);
        let x = rng.random_range(0.0..=max_x);
        // Strictly above the visible area
        let y = rng.random_range(-tuning.height..0.0);
        Target::new(id, kind, Vec2::new(x, y), size)
    }
}
