//! Storm state management.

use std::time::Instant;

use rand::Rng;
use ratatui::{buffer::Buffer, layout::Size};
use squall_core::{GlyphSink, Palette};
use tracing::debug;

use crate::canvas::BufferSink;
use crate::rain::RainField;
use crate::registry::{BoltRegistry, ThunderSink};

/// Everything that moves on screen: rain drops and lightning bolts.
#[derive(Debug, Clone)]
pub struct Storm {
    /// Rain drop per column.
    rain: RainField,
    /// Live lightning bolts.
    bolts: BoltRegistry,
    /// Grid size in character cells.
    size: Size,
    /// Spawn chance in percent per frame.
    lightning_chance: f32,
}

impl Storm {
    pub fn new(size: Size, lightning_chance: f32) -> Self {
        Self {
            rain: RainField::new(size.width, size.height),
            bolts: BoltRegistry::new(),
            size,
            lightning_chance,
        }
    }

    /// Drop every bolt and every rain drop and adopt a new grid size.
    pub fn reset(&mut self, size: Size) {
        debug!(
            width = size.width,
            height = size.height,
            bolts = self.bolts.len(),
            drops = self.rain.active(),
            "storm reset"
        );
        self.bolts.clear();
        self.rain.reset(size.width, size.height);
        self.size = size;
    }

    /// Advance one frame: lightning first, then rain.
    pub fn tick<R, T>(&mut self, now: Instant, rng: &mut R, thunder: &mut T)
    where
        R: Rng + ?Sized,
        T: ThunderSink + ?Sized,
    {
        self.bolts.tick(now, self.size, self.lightning_chance, rng, thunder);
        self.rain.advance();
        self.rain.seed(rng);
    }

    /// Draw rain, then lightning on top.
    pub fn draw<S: GlyphSink + ?Sized>(&self, now: Instant, sink: &mut S) {
        self.rain.draw(sink);
        self.bolts.draw(now, sink);
    }

    /// Paint the current frame onto a ratatui buffer.
    pub fn render(&self, buf: &mut Buffer, now: Instant, palette: &Palette) {
        let mut sink = BufferSink::new(buf, palette);
        self.draw(now, &mut sink);
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn rain(&self) -> &RainField {
        &self.rain
    }

    pub fn bolts(&self) -> &BoltRegistry {
        &self.bolts
    }
}
