use std::cell::Cell;
use std::rc::{Rc, Weak};

use glam::Vec3;
use log::trace;

use super::texture::Texture;
use crate::sh::{evaluate, Refresh, ShCoefficients, ShEnvironment};

/// One relit surface material.
///
/// Holds a shared handle to the session's environment and reads the
/// coefficients at shading time. The environment's push only flips the
/// `dirty` flag; a renderer uses it to decide whether a frame is stale.
pub struct ShadingInstance {
    label: String,
    environment: Rc<ShEnvironment>,
    texture: Option<Texture>,
    base_color: [f32; 3],
    dirty: Cell<bool>,
    refreshes: Cell<u64>,
}

impl ShadingInstance {
    /// Create an instance and subscribe it to `environment`.
    pub fn attach(
        environment: &Rc<ShEnvironment>,
        label: impl Into<String>,
        texture: Option<Texture>,
        base_color: [f32; 3],
    ) -> Rc<Self> {
        let instance = Rc::new(Self {
            label: label.into(),
            environment: Rc::clone(environment),
            texture,
            base_color,
            dirty: Cell::new(true),
            refreshes: Cell::new(0),
        });
        let subscriber: Weak<dyn Refresh> = Rc::downgrade(&instance) as Weak<dyn Refresh>;
        environment.subscribe(subscriber);
        instance
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn environment(&self) -> &Rc<ShEnvironment> {
        &self.environment
    }

    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }

    /// Coefficients as the next evaluation will see them.
    pub fn coefficients(&self) -> ShCoefficients {
        self.environment.get()
    }

    pub fn irradiance(&self, normal: Vec3) -> f32 {
        evaluate(&self.environment.get(), normal)
    }

    /// Albedo at `uv`: texture if present, otherwise the base colour.
    pub fn albedo(&self, uv: [f32; 2]) -> [f32; 3] {
        match &self.texture {
            Some(texture) => texture.sample(uv),
            None => self.base_color,
        }
    }

    /// Final colour for one surface sample: albedo scaled by SH irradiance.
    pub fn shade(&self, normal: Vec3, uv: [f32; 2]) -> [f32; 3] {
        self.shade_with(&self.environment.get(), normal, uv)
    }

    /// Like [`shade`](Self::shade) with a coefficient snapshot taken once per frame.
    pub fn shade_with(
        &self,
        coefficients: &ShCoefficients,
        normal: Vec3,
        uv: [f32; 2],
    ) -> [f32; 3] {
        let e = evaluate(coefficients, normal);
        let albedo = self.albedo(uv);
        [albedo[0] * e, albedo[1] * e, albedo[2] * e]
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Clear and return the dirty flag.
    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }

    /// Pushes received from the environment.
    pub fn refresh_count(&self) -> u64 {
        self.refreshes.get()
    }
}

impl Refresh for ShadingInstance {
    fn refresh(&self) {
        self.dirty.set(true);
        self.refreshes.set(self.refreshes.get() + 1);
        trace!("{} marked for re-shade", self.label);
    }
}
