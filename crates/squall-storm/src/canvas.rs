//! Glyph sink that paints onto a ratatui buffer.

use ratatui::buffer::Buffer;
use squall_core::{GlyphSink, Palette, Stroke};

/// Adapts a ratatui [`Buffer`] to [`GlyphSink`], resolving tones through a
/// [`Palette`]. Strokes outside the buffer area are ignored.
#[derive(Debug)]
pub struct BufferSink<'a> {
    buf: &'a mut Buffer,
    palette: &'a Palette,
}

impl<'a> BufferSink<'a> {
    pub fn new(buf: &'a mut Buffer, palette: &'a Palette) -> Self {
        Self { buf, palette }
    }
}

impl GlyphSink for BufferSink<'_> {
    fn put(&mut self, stroke: Stroke) {
        let area = self.buf.area;
        let (Some(x), Some(y)) = (stroke.col.checked_sub(1), stroke.row.checked_sub(1)) else {
            return;
        };
        if x >= area.width || y >= area.height {
            return;
        }
        if let Some(cell) = self.buf.cell_mut((area.x + x, area.y + y)) {
            cell.set_char(stroke.glyph)
                .set_fg(self.palette.color(stroke.tone));
        }
    }
}
