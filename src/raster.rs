//! CPU triangle rasterizer; the shading stage of the renderer.
//!
//! Every covered pixel interpolates a normal and UV with perspective
//! correction, renormalizes the normal and runs the SH evaluator through the
//! surface's [`ShadingInstance`](crate::shading::ShadingInstance).

use glam::{Mat4, Vec2, Vec3, Vec4};
use log::{debug, warn};

use crate::camera::Camera;
use crate::math::to_rgba8;
use crate::scene::Scene;

const EPSILON: f32 = 1e-8;
const NEAR_W: f32 = 1e-3;

pub const DEFAULT_BACKGROUND: [f32; 3] = [0.0, 0.0, 0.0];

/// RGBA8 colour buffer with an `f32` depth buffer.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    color: Vec<[u8; 4]>,
    depth: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            color: vec![[0; 4]; pixel_count],
            depth: vec![f32::INFINITY; pixel_count],
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Tightly packed RGBA8 rows, top row first.
    pub fn pixels(&self) -> &[u8] {
        bytemuck::cast_slice(&self.color)
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.color[(y * self.width + x) as usize]
    }

    pub fn depth(&self, x: u32, y: u32) -> f32 {
        self.depth[(y * self.width + x) as usize]
    }

    pub fn clear(&mut self, background: [f32; 3]) {
        self.color.fill(to_rgba8(background));
        self.depth.fill(f32::INFINITY);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != (self.width, self.height) {
            *self = Self::new(width, height);
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub triangles: usize,
    pub fragments: usize,
}

/// Vertex after projection.
#[derive(Clone, Copy)]
struct ScreenVertex {
    pix: Vec2,
    depth: f32,
    inv_w: f32,
    normal: Vec3,
    uv: [f32; 2],
}

/// Render `scene` from `camera` into `target`.
pub fn render(
    scene: &Scene,
    camera: &Camera,
    background: [f32; 3],
    target: &mut FrameBuffer,
) -> RenderStats {
    target.clear(background);
    let view_projection = camera.view_projection(target.aspect());
    let mut stats = RenderStats::default();

    for (surface, instance) in scene.entries() {
        if surface.is_empty() {
            continue;
        }
        if !surface.has_complete_attributes() {
            warn!(
                "skipping surface '{}': {} positions, {} normals, {} uvs",
                surface.name,
                surface.positions.len(),
                surface.normals.len(),
                surface.uvs.len()
            );
            continue;
        }
        // One snapshot per surface per frame; every fragment sees the same values.
        let coefficients = instance.coefficients();

        let projected: Vec<Option<ScreenVertex>> = (0..surface.vertex_count())
            .map(|i| {
                project(
                    &view_projection,
                    surface.positions[i],
                    surface.normals[i],
                    surface.uvs[i],
                    target.width,
                    target.height,
                )
            })
            .collect();

        for tri in surface.indices.chunks_exact(3) {
            let fetch = |i: u32| projected.get(i as usize).copied().flatten();
            let (Some(v0), Some(v1), Some(v2)) = (fetch(tri[0]), fetch(tri[1]), fetch(tri[2]))
            else {
                continue;
            };

            stats.triangles += 1;
            stats.fragments += rasterize_triangle([v0, v1, v2], target, |normal, uv| {
                instance.shade_with(&coefficients, normal, uv)
            });
        }
    }

    debug!(
        "rendered {} triangles, {} fragments",
        stats.triangles, stats.fragments
    );
    stats
}

fn project(
    view_projection: &Mat4,
    position: Vec3,
    normal: Vec3,
    uv: [f32; 2],
    width: u32,
    height: u32,
) -> Option<ScreenVertex> {
    let clip: Vec4 = *view_projection * position.extend(1.0);
    // Triangles touching the camera plane are dropped instead of clipped.
    if clip.w < NEAR_W {
        return None;
    }
    let inv_w = 1.0 / clip.w;
    let ndc = clip.truncate() * inv_w;
    Some(ScreenVertex {
        pix: Vec2::new(
            (ndc.x * 0.5 + 0.5) * width as f32,
            (0.5 - ndc.y * 0.5) * height as f32,
        ),
        depth: ndc.z,
        inv_w,
        normal,
        uv,
    })
}

/// Barycentric weights of `p`, or `None` for a degenerate triangle.
pub fn barycentric_coordinates(p: Vec2, v0: Vec2, v1: Vec2, v2: Vec2) -> Option<Vec3> {
    let e1 = v1 - v0;
    let e2 = v2 - v0;
    let p_v0 = p - v0;

    let area_x2 = e1.perp_dot(e2);
    if area_x2.abs() < EPSILON {
        return None;
    }

    let beta = p_v0.perp_dot(e2) / area_x2;
    let gamma = e1.perp_dot(p_v0) / area_x2;
    Some(Vec3::new(1.0 - beta - gamma, beta, gamma))
}

fn rasterize_triangle(
    v: [ScreenVertex; 3],
    target: &mut FrameBuffer,
    shade: impl Fn(Vec3, [f32; 2]) -> [f32; 3],
) -> usize {
    let min = v[0].pix.min(v[1].pix).min(v[2].pix);
    let max = v[0].pix.max(v[1].pix).max(v[2].pix);
    let min_x = min.x.floor().max(0.0) as u32;
    let min_y = min.y.floor().max(0.0) as u32;
    let max_x = max.x.ceil().min(target.width as f32) as u32;
    let max_y = max.y.ceil().min(target.height as f32) as u32;

    if (v[1].pix - v[0].pix).perp_dot(v[2].pix - v[0].pix).abs() < EPSILON {
        return 0;
    }

    let mut fragments = 0;
    for y in min_y..max_y {
        for x in min_x..max_x {
            let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let Some(bary) = barycentric_coordinates(center, v[0].pix, v[1].pix, v[2].pix) else {
                continue;
            };
            if bary.min_element() < 0.0 {
                continue;
            }

            let depth = bary.x * v[0].depth + bary.y * v[1].depth + bary.z * v[2].depth;
            let index = (y * target.width + x) as usize;
            if depth < 0.0 || !(depth < target.depth[index]) {
                continue;
            }

            // Perspective-correct weights.
            let w = Vec3::new(bary.x * v[0].inv_w, bary.y * v[1].inv_w, bary.z * v[2].inv_w);
            let w = w / (w.x + w.y + w.z);

            let normal =
                (v[0].normal * w.x + v[1].normal * w.y + v[2].normal * w.z).normalize_or_zero();
            let uv = [
                v[0].uv[0] * w.x + v[1].uv[0] * w.y + v[2].uv[0] * w.z,
                v[0].uv[1] * w.x + v[1].uv[1] * w.y + v[2].uv[1] * w.z,
            ];

            target.depth[index] = depth;
            target.color[index] = to_rgba8(shade(normal, uv));
            fragments += 1;
        }
    }
    fragments
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::scene::Surface;
    use crate::sh::ShEnvironment;

    const AMBIENT_ONLY: [f32; 9] = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];

    /// Large triangle through the origin, facing the default camera.
    fn facing_triangle(name: &str) -> Surface {
        let mut surface = Surface::new(name);
        for (x, y) in [(-5.0, -5.0), (5.0, -5.0), (0.0, 5.0)] {
            surface.push_vertex(Vec3::new(x, y, 0.0), Vec3::Z, [0.5, 0.5]);
        }
        surface.indices = vec![0, 1, 2];
        surface
    }

    fn assert_background_only(frame: &FrameBuffer, stats: RenderStats) {
        assert_eq!(stats, RenderStats::default());
        let background = to_rgba8(DEFAULT_BACKGROUND);
        let (w, h) = frame.dimensions();
        for y in 0..h {
            for x in 0..w {
                assert_eq!(frame.pixel(x, y), background);
            }
        }
    }

    #[test]
    fn test_barycentric_vertices_and_center() {
        let (a, b, c) = (Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(0.0, 4.0));
        assert_eq!(barycentric_coordinates(a, a, b, c), Some(Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(barycentric_coordinates(b, a, b, c), Some(Vec3::new(0.0, 1.0, 0.0)));
        let centroid = (a + b + c) / 3.0;
        let bary = barycentric_coordinates(centroid, a, b, c).unwrap();
        assert!((bary - Vec3::splat(1.0 / 3.0)).abs().max_element() < 1e-5);
    }

    #[test]
    fn test_barycentric_is_winding_independent() {
        let (a, b, c) = (Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(0.0, 4.0));
        let p = Vec2::new(1.0, 1.0);
        let ccw = barycentric_coordinates(p, a, b, c).unwrap();
        let cw = barycentric_coordinates(p, a, c, b).unwrap();
        assert!(ccw.min_element() >= 0.0);
        assert!(cw.min_element() >= 0.0);
    }

    #[test]
    fn test_degenerate_triangle() {
        let a = Vec2::new(1.0, 1.0);
        assert!(barycentric_coordinates(a, a, a, Vec2::new(2.0, 2.0)).is_none());
    }

    #[test]
    fn test_clear_and_resize() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.clear([1.0, 0.0, 0.0]);
        assert_eq!(fb.pixel(3, 1), [255, 0, 0, 255]);
        assert_eq!(fb.depth(0, 0), f32::INFINITY);
        fb.resize(2, 2);
        assert_eq!(fb.pixels().len(), 16);
    }

    #[test]
    fn test_scene_without_surfaces_renders_background() {
        let scene = Scene::new(Rc::new(ShEnvironment::default()));
        let mut frame = FrameBuffer::new(16, 12);
        let stats = render(&scene, &Camera::new(), DEFAULT_BACKGROUND, &mut frame);
        assert_background_only(&frame, stats);
    }

    #[test]
    fn test_empty_surface_is_never_shaded() {
        let mut scene = Scene::new(Rc::new(ShEnvironment::default()));
        scene.add_surface(Surface::new("nothing"));
        let mut frame = FrameBuffer::new(16, 12);
        let stats = render(&scene, &Camera::new(), DEFAULT_BACKGROUND, &mut frame);
        assert_background_only(&frame, stats);
    }

    #[test]
    fn test_surface_missing_uvs_is_skipped() {
        let mut surface = facing_triangle("no-uvs");
        surface.uvs.clear();
        assert!(!surface.has_complete_attributes());

        let mut scene = Scene::new(Rc::new(ShEnvironment::default()));
        scene.add_surface(surface);
        let mut frame = FrameBuffer::new(16, 12);
        let stats = render(&scene, &Camera::new(), DEFAULT_BACKGROUND, &mut frame);
        assert_background_only(&frame, stats);
    }

    #[test]
    fn test_surface_missing_normals_is_skipped() {
        let mut surface = facing_triangle("short-normals");
        surface.normals.truncate(1);

        let mut scene = Scene::new(Rc::new(ShEnvironment::default()));
        scene.add_surface(surface);
        scene.add_surface(Surface::new("nothing"));
        let mut frame = FrameBuffer::new(16, 12);
        let stats = render(&scene, &Camera::new(), DEFAULT_BACKGROUND, &mut frame);
        assert_background_only(&frame, stats);
    }

    #[test]
    fn test_untextured_surface_uses_base_color() {
        let base_color = [0.5, 0.25, 1.0];
        let mut scene = Scene::new(Rc::new(ShEnvironment::new(AMBIENT_ONLY)));
        scene.add_surface(facing_triangle("flat").with_base_color(base_color));
        let mut frame = FrameBuffer::new(16, 12);
        let stats = render(&scene, &Camera::new(), DEFAULT_BACKGROUND, &mut frame);

        assert_eq!(stats.triangles, 1);
        assert!(stats.fragments > 0);
        assert_eq!(frame.pixel(8, 6), to_rgba8(base_color));
    }
}
