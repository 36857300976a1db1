use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use soft_canvas::cli::Cli;
use soft_canvas::core::{Canvas, FrameClock, SurfaceRenderer, WinitController};
use soft_canvas::demo::DemoScene;
use soft_canvas::loaders::BmpImage;

const FPS_UPDATE_INTERVAL: f32 = 1.0;

struct App {
    cli: Cli,
    scene: DemoScene,
    window: Option<Arc<Window>>,
    presenter: Option<SurfaceRenderer>,
    canvas: Option<Canvas>,
    controller: WinitController,
    clock: FrameClock,
    frame_count: u32,
    fps_update_timer: f32,
}

impl App {
    fn new(cli: Cli, scene: DemoScene) -> Self {
        Self {
            cli,
            scene,
            window: None,
            presenter: None,
            canvas: None,
            controller: WinitController::new(),
            clock: FrameClock::new(),
            frame_count: 0,
            fps_update_timer: 0.0,
        }
    }

    fn update_fps_title(&mut self, delta: f32) {
        self.frame_count += 1;
        self.fps_update_timer += delta;

        if self.fps_update_timer >= FPS_UPDATE_INTERVAL {
            let fps = self.frame_count as f32 / self.fps_update_timer;
            if let Some(window) = &self.window {
                window.set_title(&format!("Soft Canvas - {:.0} FPS", fps));
            }
            self.frame_count = 0;
            self.fps_update_timer = 0.0;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title("Soft Canvas")
                    .with_inner_size(winit::dpi::LogicalSize::new(self.cli.width, self.cli.height)),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    eprintln!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let presenter = match SurfaceRenderer::new(window.clone()) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Failed to initialize presenter: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let size = presenter.dimensions();
            self.canvas = Some(Canvas::new(size.width, size.height));
            self.window = Some(window);
            self.presenter = Some(presenter);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.controller.process_event(&event);

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize(size.width, size.height);
                    // The buffer is never resized in place; a new surface
                    // size means a new canvas.
                    self.canvas = Some(Canvas::new(size.width, size.height));
                }
            }
            WindowEvent::RedrawRequested => {
                let timing = self.clock.tick();
                self.update_fps_title(timing.delta);

                if let (Some(canvas), Some(presenter)) = (&mut self.canvas, &self.presenter) {
                    self.scene.draw(canvas, &timing, &self.controller);
                    if let Err(e) = presenter.render_pixels(canvas.pixels()) {
                        eprintln!("Present error: {}", e);
                    }
                }
                self.controller.reset_deltas();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let sprite = match &cli.sprite {
        Some(path) => Some(
            BmpImage::load(path).with_context(|| format!("failed to load sprite {:?}", path))?,
        ),
        None => None,
    };
    if let Some(image) = &sprite {
        println!("Sprite loaded: {}x{}", image.width(), image.height());
    }

    let scene = DemoScene::new(sprite.as_ref());
    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli, scene);

    println!("Soft Canvas - Space to disable the sprite color key, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
