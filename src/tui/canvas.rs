use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;

use crate::scene::Surface;
use crate::shared::Rgb;

// upper half block: fg paints the top sample, bg the bottom one
const HALF_BLOCK: &str = "▀";

/// Blits a surface two samples per cell.
pub struct SurfaceView<'a>(pub &'a Surface);

impl Widget for SurfaceView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let surface = self.0;
        for row in 0..area.height {
            for col in 0..area.width {
                let (x, y) = (col as usize, row as usize * 2);
                let (Some(top), Some(bottom)) = (surface.pixel(x, y), surface.pixel(x, y + 1)) else {
                    continue;
                };
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(HALF_BLOCK).set_fg(to_color(top)).set_bg(to_color(bottom));
                }
            }
        }
    }
}

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}
