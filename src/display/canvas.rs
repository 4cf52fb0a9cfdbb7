/// Drawing surface abstraction and the software raster behind it.
///
/// Draw calls use logical canvas coordinates (800×600, y down); the
/// `FrameBuffer` scales them onto however many terminal pixels are
/// available.  Colour is kept in floating point so repeated translucent
/// fades decay all the way to black instead of sticking on rounding.

use crate::entities::{CANVAS_HEIGHT, CANVAS_WIDTH};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `0.0..=1.0`.
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Minimal 2D fill API the game draws through.
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba);
    fn fill_triangle(&mut self, points: [(f32, f32); 3], color: Rgba);
}

// ── Frame buffer ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct FrameBuffer {
    cols: usize,
    rows: usize,
    pixels: Vec<[f32; 3]>,
}

impl FrameBuffer {
    /// A black raster of `cols` × `rows` pixels.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows, pixels: vec![[0.0; 3]; cols * rows] }
    }

    /// Raster that fills a terminal of the given size: one HUD row on top,
    /// one hint row at the bottom, and two pixels per remaining cell.
    pub fn for_terminal(width: u16, height: u16) -> Self {
        let rows = height.saturating_sub(2) as usize * 2;
        Self::new(width as usize, rows)
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Pixel colour, rounded to 8-bit channels.  Out of range reads black.
    pub fn pixel(&self, col: usize, row: usize) -> (u8, u8, u8) {
        if col >= self.cols || row >= self.rows {
            return (0, 0, 0);
        }
        let [r, g, b] = self.pixels[row * self.cols + col];
        (to_u8(r), to_u8(g), to_u8(b))
    }

    fn scale(&self) -> (f32, f32) {
        (self.cols as f32 / CANVAS_WIDTH, self.rows as f32 / CANVAS_HEIGHT)
    }

    fn blend(&mut self, col: usize, row: usize, color: Rgba) {
        let a = color.a.clamp(0.0, 1.0);
        let px = &mut self.pixels[row * self.cols + col];
        for (dst, src) in px.iter_mut().zip([color.r, color.g, color.b]) {
            *dst = *dst * (1.0 - a) + f32::from(src) * a;
        }
    }
}

fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Pixel indices whose centres fall inside `[start, end)` once scaled.
/// A span thinner than a pixel still covers the pixel holding its middle,
/// so small shapes never vanish at low resolutions.
fn pixel_span(start: f32, end: f32, scale: f32, len: usize) -> std::ops::Range<usize> {
    let lo = (start * scale - 0.5).ceil();
    let hi = (end * scale - 0.5).ceil();
    let (lo, hi) = if hi > lo {
        (lo, hi)
    } else {
        let mid = ((start + end) / 2.0 * scale).floor();
        (mid, mid + 1.0)
    };
    let lo = lo.clamp(0.0, len as f32) as usize;
    let hi = hi.clamp(0.0, len as f32) as usize;
    lo..hi
}

fn edge(a: (f32, f32), b: (f32, f32), p: (f32, f32)) -> f32 {
    (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0)
}

impl Surface for FrameBuffer {
    fn width(&self) -> f32 {
        CANVAS_WIDTH
    }

    fn height(&self) -> f32 {
        CANVAS_HEIGHT
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        let (sx, sy) = self.scale();
        for row in pixel_span(y, y + h, sy, self.rows) {
            for col in pixel_span(x, x + w, sx, self.cols) {
                self.blend(col, row, color);
            }
        }
    }

    fn fill_triangle(&mut self, points: [(f32, f32); 3], color: Rgba) {
        let (sx, sy) = self.scale();
        let [a, b, c] = points;
        let area = edge(a, b, c);
        if area == 0.0 {
            return;
        }

        let min_x = a.0.min(b.0).min(c.0);
        let max_x = a.0.max(b.0).max(c.0);
        let min_y = a.1.min(b.1).min(c.1);
        let max_y = a.1.max(b.1).max(c.1);

        for row in pixel_span(min_y, max_y, sy, self.rows) {
            for col in pixel_span(min_x, max_x, sx, self.cols) {
                // Pixel centre back in canvas space
                let p = ((col as f32 + 0.5) / sx, (row as f32 + 0.5) / sy);
                let w0 = edge(b, c, p) * area.signum();
                let w1 = edge(c, a, p) * area.signum();
                let w2 = edge(a, b, p) * area.signum();
                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    self.blend(col, row, color);
                }
            }
        }
    }
}
