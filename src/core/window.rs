use super::color::Color;
use super::display_context::DisplayContext;

/// Presentation seam - an opaque pixel sink the frame loop hands the
/// finished buffer to.
///
/// The rasterizer knows nothing about windows or device contexts; it only
/// exposes its buffer and dimensions. Whatever sits on the other side of
/// this trait (a wgpu surface, a test double) is responsible for getting
/// those pixels on screen.
pub trait PresentTarget {
    /// Dimensions of the pixel sink in physical pixels
    fn size(&self) -> DisplayContext;

    /// Consume one frame's packed pixel buffer
    fn present(&mut self, pixels: &[Color]) -> Result<(), Box<dyn std::error::Error>>;

    /// Ask the platform to schedule another frame
    fn request_redraw(&self);
}
