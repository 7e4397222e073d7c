//! Rainstorm simulation for squall.
//!
//! Falling rain plus procedurally grown, branching lightning bolts that
//! fade with age. Everything here is driven by explicit `now` instants and
//! a caller-supplied random generator, so a seeded run is reproducible.

mod bolt;
mod canvas;
mod chars;
mod rain;
mod registry;
mod render;
mod state;

pub use bolt::{
    FORK_CHANCE, GROWTH_DELAY, LightningBolt, Phase, SEGMENT_LIFESPAN, SUBFORK_CHANCE, Segment,
    fork_length_range, target_length_range,
};
pub use canvas::BufferSink;
pub use chars::{LIGHTNING_CHARS, RAIN_CHAR};
pub use rain::RainField;
pub use registry::{BoltRegistry, MAX_ACTIVE_BOLTS, ThunderSink};
pub use render::{Tier, draw_bolt, segment_stroke};
pub use state::Storm;
