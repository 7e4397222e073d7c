//! The set of live lightning bolts and the per-frame spawn policy.

use std::time::Instant;

use rand::Rng;
use ratatui::layout::Size;
use squall_core::GlyphSink;
use tracing::debug;

use crate::bolt::LightningBolt;
use crate::render::draw_bolt;

/// Most bolts allowed on screen at once.
pub const MAX_ACTIVE_BOLTS: usize = 3;

/// Fire-and-forget notification that a bolt has just been spawned.
pub trait ThunderSink {
    fn thunder(&mut self);
}

/// Counts thunder claps without making a sound.
impl ThunderSink for usize {
    fn thunder(&mut self) {
        *self += 1;
    }
}

/// Live bolts, rebuilt every frame from the survivors of the last one.
#[derive(Debug, Clone)]
pub struct BoltRegistry {
    bolts: Vec<LightningBolt>,
    cap: usize,
}

impl Default for BoltRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BoltRegistry {
    pub fn new() -> Self {
        Self::with_cap(MAX_ACTIVE_BOLTS)
    }

    pub fn with_cap(cap: usize) -> Self {
        Self {
            bolts: Vec::with_capacity(cap),
            cap,
        }
    }

    /// Run one frame of the spawn policy, then advance every bolt and drop
    /// the ones that have fully expired.
    ///
    /// A bolt spawns when a uniform draw in `[0, 100)` falls below
    /// `chance` and fewer than the cap are alive. It starts on row 1 at a
    /// column drawn from the middle half of the grid, and `thunder` is
    /// notified exactly once.
    pub fn tick<R, T>(
        &mut self,
        now: Instant,
        size: Size,
        chance: f32,
        rng: &mut R,
        thunder: &mut T,
    ) where
        R: Rng + ?Sized,
        T: ThunderSink + ?Sized,
    {
        if rng.gen_range(0.0..100.0_f32) < chance && self.bolts.len() < self.cap {
            thunder.thunder();
            let width = u32::from(size.width);
            let col = rng.gen_range(width / 4..=width * 3 / 4) as u16;
            self.bolts.push(LightningBolt::new(col, 1, size, now, rng));
            debug!(col, active = self.bolts.len(), "lightning bolt spawned");
        }

        let before = self.bolts.len();
        self.bolts.retain_mut(|bolt| bolt.update(now, rng));
        let expired = before - self.bolts.len();
        if expired > 0 {
            debug!(expired, active = self.bolts.len(), "lightning bolts expired");
        }
    }

    /// Draw every visible segment of every live bolt.
    pub fn draw<S: GlyphSink + ?Sized>(&self, now: Instant, sink: &mut S) {
        for bolt in &self.bolts {
            draw_bolt(bolt, now, sink);
        }
    }

    /// Drop every bolt regardless of its phase.
    pub fn clear(&mut self) {
        self.bolts.clear();
    }

    pub fn bolts(&self) -> &[LightningBolt] {
        &self.bolts
    }

    pub fn len(&self) -> usize {
        self.bolts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bolts.is_empty()
    }
}
