use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::cover::Pixels;

/// Draws a pixel grid with `▀`: the foreground is the upper pixel, the
/// background the lower one, so each cell holds two rows.
pub struct HalfBlocks<'a> {
    pixels: &'a Pixels,
}

impl<'a> HalfBlocks<'a> {
    pub fn new(pixels: &'a Pixels) -> Self {
        Self { pixels }
    }
}

impl Widget for HalfBlocks<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let src_rows = self.pixels.len();
        let src_cols = self.pixels.first().map_or(0, Vec::len);
        if src_rows == 0 || src_cols == 0 || area.width == 0 || area.height == 0 {
            return;
        }

        let rows = (src_rows.div_ceil(2)).min(usize::from(area.height));
        let cols = src_cols.min(usize::from(area.width));
        let x0 = area.x + (area.width - cols as u16) / 2;
        let y0 = area.y + (area.height - rows as u16) / 2;

        for cy in 0..rows {
            let top_y = cy * 2;
            let bot_y = top_y + 1;
            for cx in 0..cols {
                let top = self.pixels[top_y][cx];
                let bot = self.pixels.get(bot_y).map(|r| r[cx]).unwrap_or(top);
                buf[(x0 + cx as u16, y0 + cy as u16)]
                    .set_char('▀')
                    .set_fg(Color::Rgb(top.0, top.1, top.2))
                    .set_bg(Color::Rgb(bot.0, bot.1, bot.2));
            }
        }
    }
}
