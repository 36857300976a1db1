use std::f32::consts::PI;

use super::color::Color;
use super::display_context::DisplayContext;

/// Software rasterizer over an owned pixel buffer.
///
/// The buffer is a contiguous row-major array of packed [`Color`] values,
/// origin at the top-left, index `x + y * width`. Every drawing operation
/// clips silently to the buffer bounds: partially or fully off-buffer
/// geometry draws only the visible portion and never errors. A canvas is
/// allocated for a fixed size and never resized in place; a size change
/// means constructing a new canvas.
pub struct Canvas {
    pixels: Vec<Color>,
    width: u32,
    height: u32,
    alpha_key: Option<Color>,
}

impl Canvas {
    /// Create a canvas with every pixel set to black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![Color::BLACK; (width * height) as usize],
            width,
            height,
            alpha_key: None,
        }
    }

    /// Set every pixel to `color`.
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Write a single pixel. Out-of-bounds coordinates are a no-op.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.pixels[x as usize + y as usize * self.width as usize] = color;
    }

    /// Read a pixel back, or `None` out of bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.pixels[x as usize + y as usize * self.width as usize])
    }

    /// Trace a 1-pixel-wide line from `(x0, y0)` to `(x1, y1)` inclusive.
    ///
    /// Steps one pixel per iteration along the major axis (whichever of
    /// |dx|, |dy| is larger), carrying a fractional slope along the minor
    /// axis and rounding to the nearest pixel each step. The trace is
    /// 8-connected for shallow and steep lines alike; a zero-length line
    /// plots exactly `(x0, y0)`.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();

        if dx >= dy {
            let slope = if dx == 0 { 0.0 } else { dy as f32 / dx as f32 };
            let slope = if y0 < y1 { slope } else { -slope };
            let step = if x0 < x1 { 1 } else { -1 };

            let mut x = x0;
            let mut carry = y0 as f32;
            for _ in 0..=dx {
                self.set_pixel(x, carry.round() as i32, color);
                carry += slope;
                x += step;
            }
        } else {
            let slope = dx as f32 / dy as f32;
            let slope = if x0 < x1 { slope } else { -slope };
            let step = if y0 < y1 { 1 } else { -1 };

            let mut y = y0;
            let mut carry = x0 as f32;
            for _ in 0..=dy {
                self.set_pixel(carry.round() as i32, y, color);
                carry += slope;
                y += step;
            }
        }
    }

    /// Draw an unfilled rectangle outline.
    ///
    /// The outline spans the closed ranges `[x, x+w]` and `[y, y+h]`, so
    /// the stroke is `w+1` by `h+1` pixels with the bottom-right corner at
    /// `(x+w, y+h)` inclusive. Negative extents draw nothing.
    pub fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        for i in x..=x + w {
            self.set_pixel(i, y, color);
            self.set_pixel(i, y + h, color);
        }
        for j in y..=y + h {
            self.set_pixel(x, j, color);
            self.set_pixel(x + w, j, color);
        }
    }

    /// Fill every pixel in `[x, x+w) × [y, y+h)`.
    pub fn draw_rect_filled(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        for j in y..y + h {
            for i in x..x + w {
                self.set_pixel(i, j, color);
            }
        }
    }

    /// Trace a circle outline of radius `r` around `(cx, cy)`.
    ///
    /// Parametric trace: the angle sweeps the left half-circle
    /// `[π/2, 3π/2)` in steps of `π / (4r)`, and the x-offset is mirrored
    /// to plot the matching right-half point per sampled row. The step
    /// choice keeps consecutive samples within a pixel vertically for
    /// typical radii but can leave 1–2 pixel gaps at very small or very
    /// large radii; that sampling is part of the stroke's contract and is
    /// kept as-is. `r <= 0` draws nothing.
    pub fn draw_circle(&mut self, cx: i32, cy: i32, r: i32, color: Color) {
        if r <= 0 {
            return;
        }

        let step = PI / (4.0 * r as f32);
        let mut theta = PI / 2.0;
        while theta < 1.5 * PI {
            let span = r as f32 * theta.cos();
            let y = cy + (r as f32 * theta.sin()) as i32;

            self.set_pixel(cx + span as i32, y, color);
            self.set_pixel(cx - span as i32, y, color);
            theta += step;
        }
    }

    /// Fill a circle of radius `r` around `(cx, cy)`.
    ///
    /// Same angular sampling as [`draw_circle`](Self::draw_circle), but
    /// each mirrored point pair is joined with a horizontal line instead
    /// of plotted as two points, giving a scanline-style fill that
    /// inherits the outline's sampling characteristics.
    pub fn draw_circle_filled(&mut self, cx: i32, cy: i32, r: i32, color: Color) {
        if r <= 0 {
            return;
        }

        let step = PI / (4.0 * r as f32);
        let mut theta = PI / 2.0;
        while theta < 1.5 * PI {
            let span = r as f32 * theta.cos();
            let y = cy + (r as f32 * theta.sin()) as i32;

            self.draw_line(cx + span as i32, y, cx - span as i32, y, color);
            theta += step;
        }
    }

    /// Copy a `w × h` block of 3-byte-per-pixel B,G,R source data onto the
    /// buffer with its top-left at `(x, y)`.
    ///
    /// Each triplet is packed into a [`Color`]; if an alpha key is set,
    /// source pixels equal to the key are skipped and the destination is
    /// left untouched. Destination writes clip per
    /// [`set_pixel`](Self::set_pixel). A source slice shorter than
    /// `w * h * 3` copies only the triplets present.
    pub fn blit(&mut self, x: i32, y: i32, w: i32, h: i32, source: &[u8]) {
        if w <= 0 || h <= 0 {
            return;
        }

        let count = w as usize * h as usize;
        for (idx, bgr) in source.chunks_exact(3).take(count).enumerate() {
            let color = Color::from_bgr(bgr[0], bgr[1], bgr[2]);
            if self.alpha_key == Some(color) {
                continue;
            }

            let i = (idx % w as usize) as i32;
            let j = (idx / w as usize) as i32;
            self.set_pixel(x + i, y + j, color);
        }
    }

    /// Treat `color` as transparent in subsequent [`blit`](Self::blit) calls.
    pub fn set_alpha_key(&mut self, color: Color) {
        self.alpha_key = Some(color);
    }

    /// Remove the transparency key; subsequent blits write every pixel.
    pub fn clear_alpha_key(&mut self) {
        self.alpha_key = None;
    }

    /// Current transparency key, if any.
    pub fn alpha_key(&self) -> Option<Color> {
        self.alpha_key
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Buffer dimensions as `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Dimensions in the form the presenter consumes.
    pub fn display_context(&self) -> DisplayContext {
        DisplayContext::new(self.width, self.height)
    }

    /// Read-only view of the packed pixel buffer.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// The pixel buffer as raw bytes (B, G, R, X per pixel).
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}
