//! Age-based glyph selection for lightning.

use std::time::{Duration, Instant};

use squall_core::{GlyphSink, Stroke, Tone};

use crate::bolt::{LightningBolt, SEGMENT_LIFESPAN, Segment};
use crate::chars::LIGHTNING_CHARS;

/// Visual decay tier of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Age ratio below 0.33.
    Fresh,
    /// Age ratio in [0.33, 0.66).
    Mid,
    /// Age ratio 0.66 and up.
    Old,
}

impl Tier {
    /// Tier for a segment of the given age, or `None` once it has outlived
    /// `lifespan` and should not be drawn.
    ///
    /// Compared in whole nanoseconds so the 33% and 66% boundaries are
    /// exact.
    pub fn for_age(age: Duration, lifespan: Duration) -> Option<Self> {
        let age = age.as_nanos();
        let lifespan = lifespan.as_nanos();
        if age >= lifespan {
            None
        } else if age * 100 < lifespan * 33 {
            Some(Tier::Fresh)
        } else if age * 100 < lifespan * 66 {
            Some(Tier::Mid)
        } else {
            Some(Tier::Old)
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Tier::Fresh => LIGHTNING_CHARS[2],
            Tier::Mid => LIGHTNING_CHARS[1],
            Tier::Old => LIGHTNING_CHARS[0],
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Tier::Fresh | Tier::Mid => Tone::Bright,
            Tier::Old => Tone::Dim,
        }
    }
}

/// Stroke for one segment at `now`, if it is still visible.
pub fn segment_stroke(segment: &Segment, now: Instant) -> Option<Stroke> {
    let tier = Tier::for_age(segment.age(now), SEGMENT_LIFESPAN)?;
    Some(Stroke {
        col: segment.col,
        row: segment.row,
        glyph: tier.glyph(),
        tone: tier.tone(),
    })
}

/// Draw every visible segment of `bolt`.
pub fn draw_bolt<S: GlyphSink + ?Sized>(bolt: &LightningBolt, now: Instant, sink: &mut S) {
    for stroke in bolt
        .segments()
        .iter()
        .filter_map(|seg| segment_stroke(seg, now))
    {
        sink.put(stroke);
    }
}
