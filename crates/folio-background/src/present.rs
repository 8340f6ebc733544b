//! Presenting a surface on terminal cells.
//!
//! Each cell shows two vertically stacked pixels with the upper half block:
//! the foreground paints the top half, the background the bottom half.

use folio_core::Rgb;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::animator::Container;
use crate::surface::{Pixel, Surface};

/// Layout pixels covered by one terminal cell (width, height).
pub const CELL_LAYOUT_PX: (f32, f32) = (4.0, 8.0);

const UPPER_HALF: &str = "▀";

/// Layout box for a terminal area.
pub fn container_for(area: Rect) -> Container {
    Container::new(
        area.width as f32 * CELL_LAYOUT_PX.0,
        area.height as f32 * CELL_LAYOUT_PX.1,
    )
}

/// Normalized position of a terminal cell inside `area`, or `None` outside.
pub fn normalized_position(area: Rect, column: u16, row: u16) -> Option<(f32, f32)> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    let inside = column >= area.x
        && column < area.x + area.width
        && row >= area.y
        && row < area.y + area.height;
    inside.then(|| {
        (
            (column - area.x) as f32 / area.width as f32 + 0.5 / area.width as f32,
            (row - area.y) as f32 / area.height as f32 + 0.5 / area.height as f32,
        )
    })
}

/// Average a block of premultiplied pixels.
fn average(surface: &Surface, x0: usize, x1: usize, y0: usize, y1: usize) -> Pixel {
    let mut acc = [0.0f32; 4];
    let mut n = 0usize;
    for y in y0..y1.min(surface.height()) {
        for x in x0..x1.min(surface.width()) {
            let p = surface.pixel(x, y);
            for (a, v) in acc.iter_mut().zip(p) {
                *a += v;
            }
            n += 1;
        }
    }
    if n == 0 {
        return [0.0; 4];
    }
    let inv = 1.0 / n as f32;
    [acc[0] * inv, acc[1] * inv, acc[2] * inv, acc[3] * inv]
}

/// Composite a premultiplied pixel over an opaque base color.
fn over(px: Pixel, base: Rgb) -> Rgb {
    let [br, bg, bb] = base.to_unit();
    let k = 1.0 - px[3].clamp(0.0, 1.0);
    Rgb::from_unit(px[0] + br * k, px[1] + bg * k, px[2] + bb * k)
}

/// Sample the colors for the cell at (`col`, `row`) of an area sized
/// `cols x rows`. Returns (upper, lower).
pub fn cell_colors(surface: &Surface, cols: u16, rows: u16, col: u16, row: u16, base: Rgb) -> (Rgb, Rgb) {
    let sw = surface.width();
    let sh = surface.height();
    let half_rows = rows as usize * 2;
    let x0 = col as usize * sw / cols as usize;
    let x1 = ((col as usize + 1) * sw / cols as usize).max(x0 + 1);
    let y_top = row as usize * 2;
    let edge = |i: usize| i * sh / half_rows;
    let (t0, t1) = (edge(y_top), edge(y_top + 1).max(edge(y_top) + 1));
    let (b0, b1) = (edge(y_top + 1), edge(y_top + 2).max(edge(y_top + 1) + 1));
    (
        over(average(surface, x0, x1, t0, t1), base),
        over(average(surface, x0, x1, b0, b1), base),
    )
}

/// Draws an aurora surface, or a flat base color when there is none.
#[derive(Debug, Clone, Copy)]
pub struct AuroraWidget<'a> {
    surface: Option<&'a Surface>,
    base: Rgb,
}

impl<'a> AuroraWidget<'a> {
    pub fn new(surface: Option<&'a Surface>, base: Rgb) -> Self {
        Self { surface, base }
    }
}

impl Widget for AuroraWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }
        let base = self.base.to_color();
        for row in 0..area.height {
            for col in 0..area.width {
                let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) else {
                    continue;
                };
                match self.surface {
                    Some(surface) => {
                        let (upper, lower) =
                            cell_colors(surface, area.width, area.height, col, row, self.base);
                        cell.set_symbol(UPPER_HALF)
                            .set_fg(upper.to_color())
                            .set_bg(lower.to_color());
                    }
                    None => {
                        cell.set_symbol(" ").set_bg(base);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{BlendMode, GradientStop};
    use ratatui::style::Color;

    const BASE: Rgb = Rgb::new(10, 10, 16);

    #[test]
    fn test_container_uses_cell_metrics() {
        let c = container_for(Rect::new(0, 0, 20, 5));
        assert_eq!(c, Container::new(80.0, 40.0));
    }

    #[test]
    fn test_normalized_position() {
        let area = Rect::new(10, 2, 20, 10);
        assert_eq!(normalized_position(area, 9, 5), None);
        assert_eq!(normalized_position(area, 30, 5), None);
        let (x, y) = normalized_position(area, 10, 2).expect("inside");
        assert!((x - 0.025).abs() < 1e-6 && (y - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_missing_surface_paints_base() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        AuroraWidget::new(None, BASE).render(area, &mut buf);
        assert_eq!(buf[(3, 1)].bg, Color::Rgb(10, 10, 16));
        assert_eq!(buf[(3, 1)].symbol(), " ");
    }

    #[test]
    fn test_transparent_surface_shows_base() {
        let area = Rect::new(0, 0, 4, 2);
        let surface = Surface::new(16.0, 16.0, 1.0).expect("surface");
        let mut buf = Buffer::empty(area);
        AuroraWidget::new(Some(&surface), BASE).render(area, &mut buf);
        let cell = &buf[(0, 0)];
        assert_eq!(cell.symbol(), UPPER_HALF);
        assert_eq!(cell.fg, Color::Rgb(10, 10, 16));
        assert_eq!(cell.bg, Color::Rgb(10, 10, 16));
    }

    #[test]
    fn test_halves_sample_their_own_rows() {
        // Paint only the bottom half of the surface white.
        let mut surface = Surface::new(4.0, 16.0, 1.0).expect("surface");
        let white = Rgb::new(255, 255, 255);
        let stops = [GradientStop::new(0.0, white, 1.0)];
        surface.fill_radial_gradient(2.0, 16.0, 100.0, 8.0, &stops, BlendMode::SourceOver);
        let (upper, lower) = cell_colors(&surface, 1, 1, 0, 0, BASE);
        assert_eq!(upper, BASE);
        assert_eq!(lower, white);
    }
}
