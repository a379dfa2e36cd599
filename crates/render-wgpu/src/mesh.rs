use bytemuck::{Pod, Zeroable};
use reactor_kernel::Shape;
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// CPU-side indexed triangle mesh.
#[derive(Debug, Clone, Default)]
pub(crate) struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

pub(crate) const TORUS_RADIAL_SEGMENTS: u32 = 16;
pub(crate) const TORUS_TUBULAR_SEGMENTS: u32 = 100;
pub(crate) const SPHERE_SEGMENTS: u32 = 32;

/// Triangle mesh for a scene shape; `None` for transform-only groups.
pub(crate) fn mesh_for_shape(shape: &Shape) -> Option<MeshData> {
    match *shape {
        Shape::Group => None,
        Shape::Torus { radius, tube } => Some(torus_mesh(
            radius,
            tube,
            TORUS_RADIAL_SEGMENTS,
            TORUS_TUBULAR_SEGMENTS,
        )),
        Shape::Sphere { radius } => Some(sphere_mesh(radius, SPHERE_SEGMENTS, SPHERE_SEGMENTS)),
    }
}

/// Torus in the XY plane around the Z axis.
pub(crate) fn torus_mesh(radius: f32, tube: f32, radial: u32, tubular: u32) -> MeshData {
    let mut vertices = Vec::with_capacity(((radial + 1) * (tubular + 1)) as usize);
    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let ring = radius + tube * v.cos();
            let position = [ring * u.cos(), ring * u.sin(), tube * v.sin()];
            let center = [radius * u.cos(), radius * u.sin(), 0.0];
            vertices.push(Vertex {
                position,
                normal: normalize([
                    position[0] - center[0],
                    position[1] - center[1],
                    position[2] - center[2],
                ]),
            });
        }
    }

    let stride = tubular + 1;
    let mut indices = Vec::with_capacity((radial * tubular * 6) as usize);
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = (stride * j + i - 1) as u16;
            let b = (stride * (j - 1) + i - 1) as u16;
            let c = (stride * (j - 1) + i) as u16;
            let d = (stride * j + i) as u16;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    MeshData { vertices, indices }
}

/// UV sphere centered at the origin.
pub(crate) fn sphere_mesh(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let mut vertices = Vec::with_capacity(((width_segments + 1) * (height_segments + 1)) as usize);
    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let normal = [
                -(u * TAU).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * TAU).sin() * (v * PI).sin(),
            ];
            vertices.push(Vertex {
                position: [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                normal,
            });
        }
    }

    let stride = width_segments + 1;
    let mut indices = Vec::new();
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = (iy * stride + ix + 1) as u16;
            let b = (iy * stride + ix) as u16;
            let c = ((iy + 1) * stride + ix) as u16;
            let d = ((iy + 1) * stride + ix + 1) as u16;
            // Poles collapse to a single triangle per quad.
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    MeshData { vertices, indices }
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len == 0.0 {
        return [0.0, 0.0, 1.0];
    }
    [v[0] / len, v[1] / len, v[2] / len]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn length(v: [f32; 3]) -> f32 {
        (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
    }

    #[test]
    fn torus_counts_and_bounds() {
        let mesh = torus_mesh(5.0, 0.2, 16, 100);
        assert_eq!(mesh.vertices.len(), 17 * 101);
        assert_eq!(mesh.indices.len(), 16 * 100 * 6);
        for v in &mesh.vertices {
            let planar = (v.position[0].powi(2) + v.position[1].powi(2)).sqrt();
            assert!(planar >= 4.8 - 1e-4 && planar <= 5.2 + 1e-4);
            assert!(v.position[2].abs() <= 0.2 + 1e-5);
            assert!((length(v.normal) - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn sphere_vertices_on_surface() {
        let mesh = sphere_mesh(1.5, 32, 32);
        assert_eq!(mesh.vertices.len(), 33 * 33);
        for v in &mesh.vertices {
            assert!((length(v.position) - 1.5).abs() < 1e-4);
        }
        // Two triangles per quad minus one per quad on each pole row.
        assert_eq!(mesh.indices.len(), (32 * 32 * 2 - 2 * 32) * 3);
    }

    #[test]
    fn indices_in_range() {
        for mesh in [torus_mesh(3.0, 0.5, 16, 100), sphere_mesh(1.5, 32, 32)] {
            let n = mesh.vertices.len() as u16;
            assert!(mesh.indices.iter().all(|&i| i < n));
        }
    }

    #[test]
    fn groups_have_no_mesh() {
        assert!(mesh_for_shape(&Shape::Group).is_none());
        assert!(mesh_for_shape(&Shape::Sphere { radius: 1.0 }).is_some());
    }
}
