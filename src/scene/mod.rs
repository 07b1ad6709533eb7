pub mod primitives;

use std::rc::Rc;

use clap::ValueEnum;
use glam::Vec3;
use log::info;

use crate::sh::ShEnvironment;
use crate::shading::{ShadingInstance, Texture};

/// Renderable triangle mesh with per-vertex unit normals and UVs.
#[derive(Debug, Clone)]
pub struct Surface {
    pub name: String,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    pub texture: Option<Texture>,
    pub base_color: [f32; 3],
}

impl Surface {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            indices: Vec::new(),
            texture: None,
            base_color: [0.8, 0.8, 0.8],
        }
    }

    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_base_color(mut self, color: [f32; 3]) -> Self {
        self.base_color = color;
        self
    }

    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3, uv: [f32; 2]) {
        self.positions.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.indices.len() < 3
    }

    /// Every position has a normal and a UV. Providers fill these `pub`
    /// fields directly, so the renderer checks before indexing them.
    pub fn has_complete_attributes(&self) -> bool {
        self.normals.len() == self.positions.len() && self.uvs.len() == self.positions.len()
    }
}

/// Supplies the surfaces of a scene.
pub trait SurfaceProvider {
    /// Build the geometry for this scene
    fn build_surfaces(&self) -> Vec<Surface>;

    /// Get scene name for debugging
    fn name(&self) -> &str {
        "Scene"
    }
}

/// Built-in procedural scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    Sphere,
    Torus,
    Showcase,
}

impl SurfaceProvider for SceneKind {
    fn build_surfaces(&self) -> Vec<Surface> {
        match self {
            SceneKind::Sphere => vec![
                primitives::uv_sphere("sphere", Vec3::ZERO, 1.0, 48, 64)
                    .with_texture(Texture::checker(256, 16, 0.08)),
            ],
            SceneKind::Torus => vec![
                primitives::torus("torus", Vec3::ZERO, 1.0, 0.4, 64, 32)
                    .with_texture(Texture::checker(256, 8, 0.55)),
            ],
            SceneKind::Showcase => vec![
                primitives::uv_sphere("sphere", Vec3::new(-0.9, 0.0, 0.0), 0.8, 40, 56)
                    .with_texture(Texture::checker(256, 16, 0.08)),
                primitives::torus("torus", Vec3::new(1.1, -0.35, 0.0), 0.6, 0.25, 48, 24)
                    .with_texture(Texture::checker(256, 8, 0.55)),
                primitives::plane("ground", -0.8, 3.0, 6.0).with_base_color([0.7, 0.7, 0.7]),
            ],
        }
    }

    fn name(&self) -> &str {
        match self {
            SceneKind::Sphere => "sphere",
            SceneKind::Torus => "torus",
            SceneKind::Showcase => "showcase",
        }
    }
}

/// A session: the shared environment plus every surface and its shading instance.
///
/// The scene owns the environment and outlives both the control surface and
/// the instances, which only borrow it through `Rc` clones.
pub struct Scene {
    environment: Rc<ShEnvironment>,
    entries: Vec<(Surface, Rc<ShadingInstance>)>,
}

impl Scene {
    pub fn new(environment: Rc<ShEnvironment>) -> Self {
        Self {
            environment,
            entries: Vec::new(),
        }
    }

    pub fn from_provider(environment: Rc<ShEnvironment>, provider: &dyn SurfaceProvider) -> Self {
        let mut scene = Self::new(environment);
        for surface in provider.build_surfaces() {
            scene.add_surface(surface);
        }
        info!(
            "scene '{}' ready: {} surfaces, {} triangles",
            provider.name(),
            scene.entries.len(),
            scene.triangle_count()
        );
        scene
    }

    /// Attach a shading instance for `surface`. Empty surfaces are kept but
    /// never shaded.
    pub fn add_surface(&mut self, surface: Surface) -> Rc<ShadingInstance> {
        let instance = ShadingInstance::attach(
            &self.environment,
            surface.name.clone(),
            surface.texture.clone(),
            surface.base_color,
        );
        self.entries.push((surface, Rc::clone(&instance)));
        instance
    }

    pub fn environment(&self) -> &Rc<ShEnvironment> {
        &self.environment
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Surface, &ShadingInstance)> {
        self.entries.iter().map(|(s, i)| (s, i.as_ref()))
    }

    pub fn instances(&self) -> impl Iterator<Item = &Rc<ShadingInstance>> {
        self.entries.iter().map(|(_, i)| i)
    }

    pub fn triangle_count(&self) -> usize {
        self.entries.iter().map(|(s, _)| s.triangle_count()).sum()
    }

    /// True if any instance was refreshed since the last call. Clears every flag.
    pub fn take_dirty(&self) -> bool {
        self.entries
            .iter()
            .fold(false, |dirty, (_, instance)| instance.take_dirty() | dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_showcase_attaches_one_instance_per_surface() {
        let env = Rc::new(ShEnvironment::default());
        let scene = Scene::from_provider(Rc::clone(&env), &SceneKind::Showcase);
        assert_eq!(scene.instances().count(), 3);
        assert_eq!(env.subscriber_count(), 3);
        assert!(scene.triangle_count() > 0);
    }

    #[test]
    fn test_take_dirty_clears_all_instances() {
        let env = Rc::new(ShEnvironment::default());
        let scene = Scene::from_provider(Rc::clone(&env), &SceneKind::Showcase);
        assert!(scene.take_dirty());
        assert!(!scene.take_dirty());

        env.set(3, -1.0).unwrap();
        assert!(scene.instances().all(|i| i.is_dirty()));
        assert!(scene.take_dirty());
        assert!(scene.instances().all(|i| !i.is_dirty()));
    }

    #[test]
    fn test_empty_surface_is_accepted() {
        let env = Rc::new(ShEnvironment::default());
        let mut scene = Scene::new(env);
        scene.add_surface(Surface::new("nothing"));
        assert_eq!(scene.triangle_count(), 0);
        assert!(scene.entries().next().unwrap().0.is_empty());
    }
}
