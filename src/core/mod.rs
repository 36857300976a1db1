pub mod canvas;
pub mod clock;
pub mod color;
pub mod controller;
pub mod display_context;
pub mod gpu_context;
pub mod input_adapter;
pub mod surface_renderer;
pub mod window;

pub use canvas::Canvas;
pub use clock::{FrameClock, FrameTiming};
pub use color::Color;
pub use controller::{Button, Controller, KeyTable};
pub use display_context::DisplayContext;
pub use gpu_context::GpuContext;
pub use input_adapter::WinitController;
pub use surface_renderer::SurfaceRenderer;
pub use window::PresentTarget;
