use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, info};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use super::surface::FrameView;
use crate::cli::Cli;
use crate::control::{show_lighting_panel, PanelActions, PanelStatus};
use crate::frame::FrameClock;
use crate::session::Session;

const MAX_CAMERA_STEP: f32 = 0.1;

fn is_release(event: &WindowEvent) -> bool {
    match event {
        WindowEvent::KeyboardInput { event, .. } => !event.state.is_pressed(),
        WindowEvent::MouseInput { state, .. } => !state.is_pressed(),
        _ => false,
    }
}

struct ViewerApp {
    session: Session,
    initial_size: (u32, u32),
    show_ui: bool,
    window: Option<Arc<Window>>,
    view: Option<FrameView>,
    clock: FrameClock,
    status: PanelStatus,
}

impl ViewerApp {
    fn new(session: Session, cli: &Cli) -> Self {
        Self {
            session,
            initial_size: (cli.width, cli.height),
            show_ui: !cli.no_ui,
            window: None,
            view: None,
            clock: FrameClock::new(),
            status: PanelStatus::default(),
        }
    }

    fn redraw(&mut self) {
        let (Some(window), Some(view)) = (&self.window, &mut self.view) else {
            return;
        };

        let info = self.clock.tick();
        // A stall (window drag, first frame) should not fling the camera.
        self.session.update_camera(info.delta.min(MAX_CAMERA_STEP));
        if self.session.render_if_stale() {
            debug!("frame {} re-rasterized", info.number);
            let frame = self.session.frame();
            let (width, height) = frame.dimensions();
            view.upload(frame.pixels(), width, height);
        }

        self.status.fps = self.clock.fps();
        self.status.triangles = self.session.scene().triangle_count();

        let mut actions = PanelActions::default();
        let session = &self.session;
        let status = &self.status;
        let show_ui = self.show_ui;
        let presented = view.present(window, |ctx| {
            if show_ui {
                let pass = show_lighting_panel(ctx, session.controls(), status);
                actions.coefficients_changed |= pass.coefficients_changed;
                actions.save_requested |= pass.save_requested;
            }
        });
        match presented {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = window.inner_size();
                view.resize(size.width, size.height);
            }
            Err(e) => error!("render error: {}", e),
        }

        if actions.save_requested {
            match self.session.render_and_save() {
                Ok(paths) => {
                    self.status.last_export = Some(paths.image.display().to_string());
                    let frame = self.session.frame();
                    let (width, height) = frame.dimensions();
                    view.upload(frame.pixels(), width, height);
                }
                Err(e) => error!("save failed: {:#}", e),
            }
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (width, height) = self.initial_size;
        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("SH Relight")
                .with_inner_size(winit::dpi::PhysicalSize::new(width, height)),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                error!("failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let view = match pollster::block_on(FrameView::new(window.clone())) {
            Ok(view) => view,
            Err(e) => {
                error!("failed to initialize viewer: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        let (surface_width, surface_height) = view.surface_size();
        self.session.resize(surface_width, surface_height);
        self.window = Some(window);
        self.view = Some(view);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(view), Some(window)) = (&mut self.view, &self.window) {
            if self.show_ui && view.handle_event(window, &event) {
                // Releases still reach the camera so a held key or drag never sticks.
                if is_release(&event) {
                    self.session.handle_camera_event(&event);
                }
                return;
            }
        }

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
                if size.width > 0 && size.height > 0 {
                    if let Some(view) = &mut self.view {
                        view.resize(size.width, size.height);
                    }
                    self.session.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            other => self.session.handle_camera_event(&other),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Open the interactive viewer and block until the window closes.
pub fn run(cli: &Cli) -> Result<()> {
    let session = Session::from_cli(cli)?;
    let event_loop = EventLoop::new()?;
    let mut app = ViewerApp::new(session, cli);

    info!("controls: drag or A/D/W/S to orbit, wheel or Q/E to zoom, Escape quits");
    event_loop.run_app(&mut app)?;
    Ok(())
}
