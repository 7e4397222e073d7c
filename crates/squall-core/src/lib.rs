//! Core types shared across the squall crates.
//!
//! The simulation never deals in terminal escape codes. It speaks in
//! [`Tone`]s and hands [`Stroke`]s to a [`GlyphSink`]; a [`Palette`] built
//! from the configured [`NamedColor`]s decides what a tone looks like.

use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The eight classic terminal color names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl NamedColor {
    /// Every accepted color, in help-text order.
    pub const ALL: [NamedColor; 8] = [
        NamedColor::Black,
        NamedColor::Red,
        NamedColor::Green,
        NamedColor::Yellow,
        NamedColor::Blue,
        NamedColor::Magenta,
        NamedColor::Cyan,
        NamedColor::White,
    ];

    /// Lowercase name as typed by the user.
    pub fn name(self) -> &'static str {
        match self {
            NamedColor::Black => "black",
            NamedColor::Red => "red",
            NamedColor::Green => "green",
            NamedColor::Yellow => "yellow",
            NamedColor::Blue => "blue",
            NamedColor::Magenta => "magenta",
            NamedColor::Cyan => "cyan",
            NamedColor::White => "white",
        }
    }

    /// Normal-intensity terminal color (SGR 30-37).
    pub fn color(self) -> Color {
        match self {
            NamedColor::Black => Color::Black,
            NamedColor::Red => Color::Red,
            NamedColor::Green => Color::Green,
            NamedColor::Yellow => Color::Yellow,
            NamedColor::Blue => Color::Blue,
            NamedColor::Magenta => Color::Magenta,
            NamedColor::Cyan => Color::Cyan,
            NamedColor::White => Color::Gray,
        }
    }

    /// High-intensity terminal color (SGR 90-97).
    pub fn bright(self) -> Color {
        match self {
            NamedColor::Black => Color::DarkGray,
            NamedColor::Red => Color::LightRed,
            NamedColor::Green => Color::LightGreen,
            NamedColor::Yellow => Color::LightYellow,
            NamedColor::Blue => Color::LightBlue,
            NamedColor::Magenta => Color::LightMagenta,
            NamedColor::Cyan => Color::LightCyan,
            NamedColor::White => Color::White,
        }
    }

    /// Comma separated list of accepted names, for help and error text.
    pub fn names() -> String {
        Self::ALL.map(NamedColor::name).join(", ")
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a color name is not one of [`NamedColor::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color '{0}' (available colors: {names})", names = NamedColor::names())]
pub struct ParseColorError(String);

impl FromStr for NamedColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| ParseColorError(s.to_string()))
    }
}

/// Abstract color tag attached to every drawn glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Falling rain, in the configured rain color.
    Rain,
    /// Fresh lightning, in the configured bright color.
    Bright,
    /// Fading lightning; fixed gray regardless of configuration.
    Dim,
}

/// Resolves tones to terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub rain: Color,
    pub bright: Color,
    pub dim: Color,
}

impl Palette {
    /// Build a palette from the configured rain and lightning colors.
    pub fn new(rain: NamedColor, lightning: NamedColor) -> Self {
        Self {
            rain: rain.color(),
            bright: lightning.bright(),
            dim: Color::DarkGray,
        }
    }

    pub fn color(&self, tone: Tone) -> Color {
        match tone {
            Tone::Rain => self.rain,
            Tone::Bright => self.bright,
            Tone::Dim => self.dim,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(NamedColor::Blue, NamedColor::Yellow)
    }
}

/// One drawing command: put `glyph` at 1-based (`col`, `row`) in `tone`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    pub col: u16,
    pub row: u16,
    pub glyph: char,
    pub tone: Tone,
}

/// Destination for drawing commands.
///
/// Coordinates are 1-based cursor positions, the same addressing a terminal
/// uses for cursor moves. Implementations decide how (and whether) a
/// stroke outside their area is shown.
pub trait GlyphSink {
    fn put(&mut self, stroke: Stroke);
}

/// Collecting sink, handy for inspecting what a frame would draw.
impl GlyphSink for Vec<Stroke> {
    fn put(&mut self, stroke: Stroke) {
        self.push(stroke);
    }
}
