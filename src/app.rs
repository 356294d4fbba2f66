//! Windowed application: winit event loop driving an [`OceanView`].

use std::sync::Arc;
use std::time::Instant;

use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::canvas::Pixmap;
use crate::error::{Error, Result};
use crate::lifecycle::{FrameHost, FrameRequest, OceanView, ResizeListener};
use crate::params::RenderConfig;
use crate::rendering::RenderSystem;
use crate::scene::Backdrop;

/// Window-backed frame host: one redraw per requested frame
struct WindowHost {
    window: Arc<Window>,
    next_id: u64,
    pending: Option<FrameRequest>,
    resize_listener: Option<ResizeListener>,
}

impl WindowHost {
    fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            next_id: 0,
            pending: None,
            resize_listener: None,
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl FrameHost for WindowHost {
    fn viewport(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    fn request_frame(&mut self) -> FrameRequest {
        let request = FrameRequest(self.next_id());
        self.pending = Some(request);
        self.window.request_redraw();
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.pending == Some(request) {
            self.pending = None;
        }
    }

    fn add_resize_listener(&mut self) -> ResizeListener {
        let listener = ResizeListener(self.next_id());
        self.resize_listener = Some(listener);
        listener
    }

    fn remove_resize_listener(&mut self, listener: ResizeListener) {
        if self.resize_listener == Some(listener) {
            self.resize_listener = None;
        }
    }
}

/// Main application state
pub struct App {
    // Window and presentation
    host: Option<WindowHost>,
    render_system: Option<RenderSystem>,

    view: OceanView<Pixmap>,
    render_config: RenderConfig,

    start_time: Instant,
    startup_error: Option<Error>,
}

impl App {
    pub fn new(backdrop: Backdrop, render_config: RenderConfig) -> Self {
        Self {
            host: None,
            render_system: None,
            view: OceanView::new(backdrop),
            render_config,
            start_time: Instant::now(),
            startup_error: None,
        }
    }

    /// Open the window and run until it is closed
    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.run_app(&mut self)?;
        match self.startup_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title(self.render_config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));
        let window = Arc::new(event_loop.create_window(window_attributes)?);

        let render_system = pollster::block_on(RenderSystem::new(Arc::clone(&window)))?;

        let mut host = WindowHost::new(window);
        self.view.mount(&mut host)?;

        println!("\nOceanview is running!");
        println!("Press ESC to quit\n");

        self.host = Some(host);
        self.render_system = Some(render_system);
        Ok(())
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(host) = self.host.as_mut() {
            self.view.unmount(host);
        }
        event_loop.exit();
    }

    fn handle_resize(&mut self, width: u32, height: u32) {
        let Some(host) = self.host.as_ref() else {
            return;
        };
        if host.resize_listener.is_none() {
            return;
        }
        self.view.resize(width, height);
        if let Some(render_system) = self.render_system.as_mut() {
            render_system.resize(width, height);
        }
    }

    /// Frame callback for a redraw the view asked for
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(host), Some(render_system)) = (self.host.as_mut(), self.render_system.as_mut())
        else {
            return;
        };
        // Redraws the view did not request (expose events, cancelled frames) are skipped
        if host.pending.take().is_none() {
            return;
        }

        let now_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let Some(surface) = self.view.frame(host, now_ms) else {
            return;
        };

        match render_system.present(&surface.to_rgba_image()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost, reconfiguring");
                render_system.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("Out of GPU memory, exiting");
                self.shutdown(event_loop);
            }
            Err(e) => warn!("Skipped frame: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.host.is_some() {
            return; // Already initialized
        }

        if let Err(e) = self.init(event_loop) {
            error!("Failed to start: {}", e);
            self.startup_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => self.shutdown(event_loop),
            WindowEvent::Resized(size) => self.handle_resize(size.width, size.height),
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(host) = self.host.as_mut() {
            self.view.unmount(host);
        }
        info!("Event loop exiting");
    }
}
