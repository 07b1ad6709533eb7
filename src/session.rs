use std::rc::Rc;

use anyhow::{Context, Result};
use log::info;
use winit::event::WindowEvent;

use crate::camera::Camera;
use crate::cli::Cli;
use crate::control::ControlSync;
use crate::export::{save_render, ExportPaths, ExportTarget};
use crate::raster::{self, FrameBuffer, RenderStats, DEFAULT_BACKGROUND};
use crate::scene::{Scene, SurfaceProvider};
use crate::sh::interchange::read_coefficients;
use crate::sh::ShEnvironment;

/// Everything one viewing session owns.
///
/// The scene owns the environment; the control sync and every shading
/// instance share it. Frames are re-rasterized only when an instance was
/// refreshed or the camera moved.
pub struct Session {
    scene: Scene,
    controls: ControlSync,
    camera: Camera,
    frame: FrameBuffer,
    background: [f32; 3],
    export: ExportTarget,
    camera_moved: bool,
    last_stats: RenderStats,
}

impl Session {
    pub fn new(
        provider: &dyn SurfaceProvider,
        width: u32,
        height: u32,
        export: ExportTarget,
    ) -> Self {
        let environment = Rc::new(ShEnvironment::default());
        let scene = Scene::from_provider(Rc::clone(&environment), provider);
        let controls = ControlSync::new(environment);
        Self {
            scene,
            controls,
            camera: Camera::new(),
            frame: FrameBuffer::new(width.max(1), height.max(1)),
            background: DEFAULT_BACKGROUND,
            export,
            camera_moved: true,
            last_stats: RenderStats::default(),
        }
    }

    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let session = Self::new(
            &cli.scene,
            cli.width,
            cli.height,
            ExportTarget::new(cli.output_dir.clone(), cli.timestamp),
        );
        if let Some(path) = &cli.coeffs {
            let coefficients = read_coefficients(path)?;
            session
                .controls
                .import(&coefficients)
                .with_context(|| format!("failed to apply {}", path.display()))?;
            info!("loaded coefficients from {}", path.display());
        }
        Ok(session)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn controls(&self) -> &ControlSync {
        &self.controls
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn last_stats(&self) -> RenderStats {
        self.last_stats
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.frame.resize(width.max(1), height.max(1));
        self.camera_moved = true;
    }

    /// Advance held camera keys by `delta_time` seconds.
    pub fn update_camera(&mut self, delta_time: f32) {
        if self.camera.update(delta_time) {
            self.camera_moved = true;
        }
    }

    /// Feed a window event to the camera.
    pub fn handle_camera_event(&mut self, event: &WindowEvent) {
        if self.camera.process_event(event) {
            self.camera_moved = true;
        }
    }

    /// Rasterize if anything changed since the last frame. Returns whether a
    /// new frame was produced.
    pub fn render_if_stale(&mut self) -> bool {
        let dirty = self.scene.take_dirty();
        if !(dirty || self.camera_moved) {
            return false;
        }
        self.render();
        true
    }

    /// Unconditional render pass.
    pub fn render(&mut self) -> RenderStats {
        self.scene.take_dirty();
        self.camera_moved = false;
        self.last_stats =
            raster::render(&self.scene, &self.camera, self.background, &mut self.frame);
        self.last_stats
    }

    /// Render with the current coefficients, then write the image and the
    /// coefficients used for it.
    pub fn render_and_save(&mut self) -> Result<ExportPaths> {
        self.render();
        let coefficients = self.scene.environment().get();
        save_render(&self.export, &self.frame, &coefficients)
    }
}
