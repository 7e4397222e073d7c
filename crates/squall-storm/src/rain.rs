//! Rain animation (stateful).

use rand::Rng;
use squall_core::{GlyphSink, Stroke, Tone};

use crate::chars::RAIN_CHAR;

/// One optional drop per terminal column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RainField {
    /// Current 1-based row of the drop in each column, `None` when idle.
    drops: Vec<Option<u16>>,
    /// Number of rows a drop falls through.
    height: u16,
}

impl RainField {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            drops: vec![None; width as usize],
            height,
        }
    }

    /// Idle every column and adopt new dimensions.
    pub fn reset(&mut self, width: u16, height: u16) {
        self.drops.clear();
        self.drops.resize(width as usize, None);
        self.height = height;
    }

    /// Move every drop down one row, retiring drops past the bottom.
    pub fn advance(&mut self) {
        let height = self.height;
        for slot in &mut self.drops {
            *slot = slot.map(|row| row + 1).filter(|&row| row <= height);
        }
    }

    /// Start new drops at the top of idle columns.
    ///
    /// Each idle column starts a drop with probability `2 / (width + 1)`.
    pub fn seed<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let width = self.drops.len();
        for slot in &mut self.drops {
            if slot.is_none() && rng.gen_range(0..=width) < 2 {
                *slot = Some(1);
            }
        }
    }

    pub fn draw<S: GlyphSink + ?Sized>(&self, sink: &mut S) {
        for (col, row) in self.drops.iter().enumerate() {
            if let Some(row) = *row {
                sink.put(Stroke {
                    col: col as u16 + 1,
                    row,
                    glyph: RAIN_CHAR,
                    tone: Tone::Rain,
                });
            }
        }
    }

    /// Number of drops currently falling.
    pub fn active(&self) -> usize {
        self.drops.iter().filter(|d| d.is_some()).count()
    }

    pub fn width(&self) -> usize {
        self.drops.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_new_field_is_idle() {
        let rain = RainField::new(80, 24);
        assert_eq!(rain.width(), 80);
        assert_eq!(rain.active(), 0);
    }

    #[test]
    fn test_drop_falls_and_retires() {
        let mut rain = RainField::new(3, 4);
        rain.drops[1] = Some(1);

        for expected in 2..=4 {
            rain.advance();
            assert_eq!(rain.drops[1], Some(expected));
        }
        rain.advance();
        assert_eq!(rain.drops[1], None);
    }

    #[test]
    fn test_seed_only_fills_idle_columns() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut rain = RainField::new(4, 10);
        rain.drops[0] = Some(7);

        for _ in 0..200 {
            rain.seed(&mut rng);
        }
        assert_eq!(rain.drops[0], Some(7));
        assert!(rain.drops[1..].iter().all(|d| *d == Some(1)));
    }

    #[test]
    fn test_draw_uses_one_based_columns() {
        let mut rain = RainField::new(5, 10);
        rain.drops[0] = Some(3);
        rain.drops[4] = Some(9);

        let mut strokes: Vec<Stroke> = Vec::new();
        rain.draw(&mut strokes);
        assert_eq!(
            strokes,
            vec![
                Stroke {
                    col: 1,
                    row: 3,
                    glyph: '|',
                    tone: Tone::Rain,
                },
                Stroke {
                    col: 5,
                    row: 9,
                    glyph: '|',
                    tone: Tone::Rain,
                },
            ]
        );
    }

    #[test]
    fn test_reset_clears_and_resizes() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut rain = RainField::new(40, 20);
        for _ in 0..50 {
            rain.seed(&mut rng);
            rain.advance();
        }
        assert!(rain.active() > 0);

        rain.reset(10, 5);
        assert_eq!(rain.width(), 10);
        assert_eq!(rain.active(), 0);
    }
}
