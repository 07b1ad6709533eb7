//! Procedural meshes with unit normals and UVs.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::Surface;

/// Latitude/longitude sphere. UV `u` runs around Y, `v` from north pole down.
pub fn uv_sphere(name: &str, center: Vec3, radius: f32, stacks: u32, slices: u32) -> Surface {
    let stacks = stacks.max(2);
    let slices = slices.max(3);
    let mut surface = Surface::new(name);

    for stack in 0..=stacks {
        let v = stack as f32 / stacks as f32;
        let phi = v * PI;
        for slice in 0..=slices {
            let u = slice as f32 / slices as f32;
            let theta = u * TAU;
            let normal = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            surface.push_vertex(center + normal * radius, normal, [u, v]);
        }
    }

    let row = slices + 1;
    for stack in 0..stacks {
        for slice in 0..slices {
            let a = stack * row + slice;
            let b = a + row;
            surface.indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }

    surface
}

/// Torus around the Y axis.
pub fn torus(
    name: &str,
    center: Vec3,
    major_radius: f32,
    minor_radius: f32,
    rings: u32,
    sides: u32,
) -> Surface {
    let rings = rings.max(3);
    let sides = sides.max(3);
    let mut surface = Surface::new(name);

    for ring in 0..=rings {
        let u = ring as f32 / rings as f32;
        let theta = u * TAU;
        let ring_dir = Vec3::new(theta.cos(), 0.0, theta.sin());
        for side in 0..=sides {
            let v = side as f32 / sides as f32;
            let phi = v * TAU;
            let normal = ring_dir * phi.cos() + Vec3::Y * phi.sin();
            let position = center + ring_dir * major_radius + normal * minor_radius;
            surface.push_vertex(position, normal, [u, v]);
        }
    }

    let row = sides + 1;
    for ring in 0..rings {
        for side in 0..sides {
            let a = ring * row + side;
            let b = a + row;
            surface.indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }

    surface
}

/// Horizontal square facing +Y.
pub fn plane(name: &str, height: f32, half_extent: f32, uv_repeat: f32) -> Surface {
    let mut surface = Surface::new(name);
    let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
    for (x, z) in corners {
        surface.push_vertex(
            Vec3::new(x * half_extent, height, z * half_extent),
            Vec3::Y,
            [(x + 1.0) * 0.5 * uv_repeat, (z + 1.0) * 0.5 * uv_repeat],
        );
    }
    surface.indices.extend_from_slice(&[0, 2, 1, 0, 3, 2]);
    surface
}
