//! Branching lightning bolts (stateful).
//!
//! A bolt grows one trunk segment per [`GROWTH_DELAY`] of wall-clock time,
//! occasionally sprouting forks, until it reaches its target length or the
//! bottom of the grid. It then decays: nothing new is added and the bolt
//! stays alive only while at least one of its segments is younger than
//! [`SEGMENT_LIFESPAN`]. Forks are stored in the same segment list as the
//! trunk, so they share the bolt's lifetime.

use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

use rand::Rng;
use ratatui::layout::Size;
use tracing::trace;

/// Minimum wall-clock interval between two growth steps.
pub const GROWTH_DELAY: Duration = Duration::from_millis(5);

/// How long a segment stays visible.
pub const SEGMENT_LIFESPAN: Duration = Duration::from_millis(900);

/// Percent chance that a trunk growth step sprouts a fork.
pub const FORK_CHANCE: u32 = 13;

/// Percent chance that a fork step sprouts a fork of its own.
pub const SUBFORK_CHANCE: u32 = 5;

/// A single drawn point of a bolt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// 1-based column.
    pub col: u16,
    /// 1-based row.
    pub row: u16,
    /// When the segment was created.
    pub born: Instant,
}

impl Segment {
    /// Age of the segment at `now` (zero if `now` precedes creation).
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.born)
    }

    /// Whether the segment has outlived [`SEGMENT_LIFESPAN`].
    pub fn is_expired(&self, now: Instant) -> bool {
        self.age(now) >= SEGMENT_LIFESPAN
    }
}

/// Lifecycle phase of a bolt. Expiry is not a phase: it is reported by
/// [`LightningBolt::update`] returning `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Growing,
    Decaying,
}

/// One lightning strike: a trunk plus any forks, sharing one lifecycle.
#[derive(Debug, Clone)]
pub struct LightningBolt {
    /// Segments in creation order; forks are interleaved with the trunk.
    segments: Vec<Segment>,
    /// Time of the last growth step.
    last_growth: Instant,
    /// Cleared once, never set again.
    growing: bool,
    /// Segment count at which growth stops.
    target_length: usize,
    /// Grid size the bolt was created for.
    size: Size,
}

/// A fork waiting to be extended.
#[derive(Debug)]
struct Branch {
    col: u16,
    row: u16,
    remaining: usize,
}

impl LightningBolt {
    /// Start a bolt at (`start_col`, `start_row`) on a grid of `size` cells.
    ///
    /// The start position is clamped onto the grid and becomes the first
    /// segment, stamped `now`.
    pub fn new<R: Rng + ?Sized>(
        start_col: u16,
        start_row: u16,
        size: Size,
        now: Instant,
        rng: &mut R,
    ) -> Self {
        let target_length = rng.gen_range(target_length_range(size.height));
        let col = start_col.clamp(1, max_col(size));
        let row = start_row.clamp(1, max_row(size));

        let mut segments = Vec::with_capacity(target_length);
        segments.push(Segment {
            col,
            row,
            born: now,
        });

        Self {
            segments,
            last_growth: now,
            growing: true,
            target_length,
            size,
        }
    }

    /// Advance the bolt by one frame.
    ///
    /// Grows at most one trunk step (plus forks) when [`GROWTH_DELAY`] has
    /// passed since the previous step. Returns `false` once the bolt has
    /// stopped growing and every segment has expired; the caller should
    /// then drop it.
    pub fn update<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) -> bool {
        if self.growing && now.saturating_duration_since(self.last_growth) >= GROWTH_DELAY {
            self.last_growth = now;
            self.grow(now, rng);
        }
        self.is_alive(now)
    }

    /// Alive while growing or while any segment is still fresh.
    pub fn is_alive(&self, now: Instant) -> bool {
        self.growing || self.segments.iter().any(|s| !s.is_expired(now))
    }

    pub fn is_growing(&self) -> bool {
        self.growing
    }

    pub fn phase(&self) -> Phase {
        if self.growing {
            Phase::Growing
        } else {
            Phase::Decaying
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn target_length(&self) -> usize {
        self.target_length
    }

    fn grow<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) {
        if self.segments.len() >= self.target_length {
            self.growing = false;
            return;
        }
        let Some(&tip) = self.segments.last() else {
            self.growing = false;
            return;
        };
        if tip.row >= max_row(self.size) {
            self.growing = false;
            return;
        }

        let next = Segment {
            col: drift(tip.col, max_col(self.size), rng),
            row: tip.row + 1,
            born: now,
        };
        self.segments.push(next);

        if rng.gen_range(0..100) < FORK_CHANCE {
            let branches = self.add_fork(next, now, rng);
            trace!(row = next.row, branches, "bolt forked");
        }
    }

    /// Grow a fork downwards from `from`, with sub-forks handled depth
    /// first off an explicit work list. Returns the number of branches
    /// grown, the fork itself included.
    fn add_fork<R: Rng + ?Sized>(&mut self, from: Segment, now: Instant, rng: &mut R) -> usize {
        let bottom = max_row(self.size);
        let right = max_col(self.size);

        let mut pending = vec![Branch {
            col: from.col,
            row: from.row,
            remaining: rng.gen_range(fork_length_range(self.size.height)),
        }];
        let mut branches = 1;

        while let Some(branch) = pending.last_mut() {
            if branch.remaining == 0 || branch.row >= bottom {
                pending.pop();
                continue;
            }
            branch.remaining -= 1;
            branch.col = drift(branch.col, right, rng);
            branch.row += 1;

            let segment = Segment {
                col: branch.col,
                row: branch.row,
                born: now,
            };
            self.segments.push(segment);

            if rng.gen_range(0..100) < SUBFORK_CHANCE {
                pending.push(Branch {
                    col: segment.col,
                    row: segment.row,
                    remaining: rng.gen_range(fork_length_range(self.size.height)),
                });
                branches += 1;
            }
        }
        branches
    }
}

/// Range the trunk target length is drawn from: `[h/2, h-2]`, at least 1.
pub fn target_length_range(height: u16) -> RangeInclusive<usize> {
    let h = height as usize;
    let low = (h / 2).max(1);
    low..=h.saturating_sub(2).max(low)
}

/// Range a fork length is drawn from: `[h/6, h/3]`, at least 1.
pub fn fork_length_range(height: u16) -> RangeInclusive<usize> {
    let h = height as usize;
    let low = (h / 6).max(1);
    low..=(h / 3).max(low)
}

fn max_col(size: Size) -> u16 {
    size.width.saturating_sub(1).max(1)
}

fn max_row(size: Size) -> u16 {
    size.height.saturating_sub(1).max(1)
}

/// Shift `col` by -1, 0 or +1, staying within `[1, right]`.
fn drift<R: Rng + ?Sized>(col: u16, right: u16, rng: &mut R) -> u16 {
    let step: i32 = rng.gen_range(-1..=1);
    (i32::from(col) + step).clamp(1, i32::from(right)) as u16
}
