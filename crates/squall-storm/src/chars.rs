//! Character constants for the storm.

/// Lightning glyphs from oldest to freshest.
pub const LIGHTNING_CHARS: [char; 3] = ['*', '+', '#'];

/// Glyph for a falling rain drop.
pub const RAIN_CHAR: char = '|';
