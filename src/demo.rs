use crate::core::{Button, Canvas, Color, Controller, FrameTiming};
use crate::loaders::BmpImage;

/// Sprite pixels rearranged for blitting - rows in visual top-down order
struct Sprite {
    width: i32,
    height: i32,
    pixels: Vec<u8>,
}

impl Sprite {
    fn from_image(image: &BmpImage) -> Self {
        let mut pixels = Vec::with_capacity(image.pixels().len());
        for row in image.rows_top_down() {
            pixels.extend_from_slice(row);
        }
        Self {
            width: image.width(),
            height: image.height(),
            pixels,
        }
    }
}

/// Animated scene exercising every canvas primitive.
///
/// Each frame draws a rotating line fan, rectangle outlines and fills, a
/// pulsing pair of circles, and (when a sprite was loaded) the sprite at
/// the pointer with a magenta color key. Holding Space disables the key
/// so the sprite's keyed texels show through.
pub struct DemoScene {
    sprite: Option<Sprite>,
}

const BACKGROUND: Color = Color::rgb(24, 24, 32);
const SPRITE_KEY: Color = Color::MAGENTA;

impl DemoScene {
    pub fn new(sprite: Option<&BmpImage>) -> Self {
        Self {
            sprite: sprite.map(Sprite::from_image),
        }
    }

    /// Draw one frame into `canvas`.
    pub fn draw(&self, canvas: &mut Canvas, timing: &FrameTiming, input: &dyn Controller) {
        canvas.clear(BACKGROUND);

        let w = canvas.width() as i32;
        let h = canvas.height() as i32;
        let (cx, cy) = (w / 2, h / 2);

        // Rotating line fan around the center
        let reach = (w.min(h) / 3) as f32;
        for arm in 0..4 {
            let angle = timing.time + arm as f32 * std::f32::consts::FRAC_PI_2;
            let x1 = cx + (reach * angle.cos()) as i32;
            let y1 = cy + (reach * angle.sin()) as i32;
            canvas.draw_line(cx, cy, x1, y1, Color::rgb(90, 200, 250));
        }

        // Static frame plus a filled panel in the corner
        canvas.draw_rect(8, 8, w - 17, h - 17, Color::rgb(70, 70, 90));
        canvas.draw_rect_filled(16, 16, 120, 48, Color::rgb(40, 90, 50));
        canvas.draw_rect(16, 16, 120, 48, Color::rgb(120, 220, 140));

        // Pulsing circles in the lower-right quadrant
        let pulse = 20 + (10.0 * (timing.time * 2.0).sin()) as i32;
        canvas.draw_circle(w * 3 / 4, h * 3 / 4, pulse + 12, Color::rgb(250, 180, 60));
        canvas.draw_circle_filled(w * 3 / 4, h * 3 / 4, pulse, Color::rgb(200, 90, 40));

        // Sprite follows the pointer; Space bypasses the color key
        if let Some(sprite) = &self.sprite {
            let (mx, my) = match input.mouse_position() {
                Some((x, y)) => (x as i32, y as i32),
                None => (cx, cy),
            };

            if input.is_down(Button::Space) {
                canvas.clear_alpha_key();
            } else {
                canvas.set_alpha_key(SPRITE_KEY);
            }
            canvas.blit(
                mx - sprite.width / 2,
                my - sprite.height / 2,
                sprite.width,
                sprite.height,
                &sprite.pixels,
            );
            canvas.clear_alpha_key();
        }
    }
}
