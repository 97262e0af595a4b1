//! Procedural meshes for the reference scene.

use std::f32::consts::{PI, TAU};

use crate::mesh::{MeshData, MeshVertex};

/// Quad spanning [-1, 1] in the XY plane, facing +Z.
pub fn quad() -> MeshData {
    let n = [0.0, 0.0, 1.0];
    let vertices = vec![
        MeshVertex::new([-1.0, -1.0, 0.0], n, [0.0, 1.0]),
        MeshVertex::new([1.0, -1.0, 0.0], n, [1.0, 1.0]),
        MeshVertex::new([1.0, 1.0, 0.0], n, [1.0, 0.0]),
        MeshVertex::new([-1.0, 1.0, 0.0], n, [0.0, 0.0]),
    ];
    MeshData::new("quad", vertices, vec![0, 1, 2, 0, 2, 3])
}

/// Unit UV sphere centred on the origin.
///
/// `stacks` rings run pole to pole, `slices` segments around Y; the seam
/// column is duplicated so UVs wrap cleanly. Pole rows emit one triangle per
/// segment instead of a degenerate pair.
pub fn uv_sphere(stacks: u32, slices: u32) -> MeshData {
    let stacks = stacks.max(2);
    let slices = slices.max(3);

    let mut vertices = Vec::with_capacity(((stacks + 1) * (slices + 1)) as usize);
    for i in 0..=stacks {
        let v = i as f32 / stacks as f32;
        let theta = v * PI;
        let (sin_t, cos_t) = theta.sin_cos();
        for j in 0..=slices {
            let u = j as f32 / slices as f32;
            let (sin_p, cos_p) = (u * TAU).sin_cos();
            let p = [sin_t * cos_p, cos_t, sin_t * sin_p];
            vertices.push(MeshVertex::new(p, p, [u, v]));
        }
    }

    let row = slices + 1;
    let mut indices = Vec::with_capacity((stacks * slices * 6) as usize);
    for i in 0..stacks {
        for j in 0..slices {
            let a = i * row + j;
            let b = (i + 1) * row + j;
            let c = (i + 1) * row + j + 1;
            let d = i * row + j + 1;
            if i != 0 {
                indices.extend_from_slice(&[a, d, b]);
            }
            if i != stacks - 1 {
                indices.extend_from_slice(&[d, c, b]);
            }
        }
    }

    MeshData::new("uv_sphere", vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    #[test]
    fn quad_faces_plus_z() {
        let mesh = quad();
        assert!(mesh.is_valid());
        for [p0, p1, p2] in mesh.triangles() {
            let n = cross(sub(p1, p0), sub(p2, p0));
            assert!(n[2] > 0.0);
        }
    }

    #[test]
    fn sphere_vertices_lie_on_unit_sphere() {
        let mesh = uv_sphere(16, 24);
        assert!(mesh.is_valid());
        for v in &mesh.vertices {
            assert!((dot(v.position, v.position).sqrt() - 1.0).abs() < 1e-5);
        }
        assert_eq!(mesh.triangle_count(), (2 * 16 * 24 - 2 * 24) as usize);
    }

    #[test]
    fn sphere_triangles_wind_counter_clockwise_from_outside() {
        let mesh = uv_sphere(8, 12);
        for [p0, p1, p2] in mesh.triangles() {
            let n = cross(sub(p1, p0), sub(p2, p0));
            let centroid = [
                (p0[0] + p1[0] + p2[0]) / 3.0,
                (p0[1] + p1[1] + p2[1]) / 3.0,
                (p0[2] + p1[2] + p2[2]) / 3.0,
            ];
            assert!(dot(n, centroid) > 0.0, "inward triangle {p0:?} {p1:?} {p2:?}");
        }
    }

    #[test]
    fn tiny_sphere_requests_are_raised_to_minimum() {
        let mesh = uv_sphere(0, 0);
        assert!(mesh.is_valid());
    }
}
