use std::f32::consts::TAU;

use glam::Vec3;

use super::mesh::MeshData;

/// Axis-aligned box centered at the origin.
///
/// Six faces, four vertices each, so every face gets a flat normal.
pub fn box_mesh(width: f32, height: f32, depth: f32) -> MeshData {
    let (x, y, z) = (width * 0.5, height * 0.5, depth * 0.5);

    // (position, normal) per face corner, counter-clockwise seen from outside.
    #[rustfmt::skip]
    let corners: [([f32; 3], [f32; 3]); 24] = [
        // +Z
        ([-x, -y,  z], [0.0, 0.0, 1.0]),
        ([ x, -y,  z], [0.0, 0.0, 1.0]),
        ([ x,  y,  z], [0.0, 0.0, 1.0]),
        ([-x,  y,  z], [0.0, 0.0, 1.0]),
        // -Z
        ([ x, -y, -z], [0.0, 0.0, -1.0]),
        ([-x, -y, -z], [0.0, 0.0, -1.0]),
        ([-x,  y, -z], [0.0, 0.0, -1.0]),
        ([ x,  y, -z], [0.0, 0.0, -1.0]),
        // +X
        ([ x, -y,  z], [1.0, 0.0, 0.0]),
        ([ x, -y, -z], [1.0, 0.0, 0.0]),
        ([ x,  y, -z], [1.0, 0.0, 0.0]),
        ([ x,  y,  z], [1.0, 0.0, 0.0]),
        // -X
        ([-x, -y, -z], [-1.0, 0.0, 0.0]),
        ([-x, -y,  z], [-1.0, 0.0, 0.0]),
        ([-x,  y,  z], [-1.0, 0.0, 0.0]),
        ([-x,  y, -z], [-1.0, 0.0, 0.0]),
        // +Y
        ([-x,  y,  z], [0.0, 1.0, 0.0]),
        ([ x,  y,  z], [0.0, 1.0, 0.0]),
        ([ x,  y, -z], [0.0, 1.0, 0.0]),
        ([-x,  y, -z], [0.0, 1.0, 0.0]),
        // -Y
        ([-x, -y, -z], [0.0, -1.0, 0.0]),
        ([ x, -y, -z], [0.0, -1.0, 0.0]),
        ([ x, -y,  z], [0.0, -1.0, 0.0]),
        ([-x, -y,  z], [0.0, -1.0, 0.0]),
    ];

    let positions = corners.iter().map(|(p, _)| Vec3::from_array(*p)).collect();
    let normals = corners.iter().map(|(_, n)| Vec3::from_array(*n)).collect();

    let mut indices = Vec::with_capacity(36);
    for face in 0..6u32 {
        let base = face * 4;
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    MeshData::triangles(positions, normals, indices)
}

/// Segmented rectangle in the XY plane, facing +Z, centered at the origin.
pub fn plane(width: f32, height: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let wsegs = width_segments.max(1);
    let hsegs = height_segments.max(1);

    let mut positions = Vec::with_capacity(((wsegs + 1) * (hsegs + 1)) as usize);
    for iy in 0..=hsegs {
        let y = (iy as f32 / hsegs as f32 - 0.5) * height;
        for ix in 0..=wsegs {
            let x = (ix as f32 / wsegs as f32 - 0.5) * width;
            positions.push(Vec3::new(x, -y, 0.0));
        }
    }

    let normals = vec![Vec3::Z; positions.len()];
    let indices = grid_indices(wsegs, hsegs);
    MeshData::triangles(positions, normals, indices)
}

/// Filled disc in the XY plane, facing +Z.
pub fn circle(radius: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);

    let mut positions = Vec::with_capacity(segments as usize + 2);
    positions.push(Vec3::ZERO);
    for i in 0..=segments {
        let theta = i as f32 / segments as f32 * TAU;
        positions.push(Vec3::new(radius * theta.cos(), radius * theta.sin(), 0.0));
    }

    let normals = vec![Vec3::Z; positions.len()];

    let mut indices = Vec::with_capacity(segments as usize * 3);
    for i in 1..=segments {
        indices.extend_from_slice(&[0, i, i + 1]);
    }

    MeshData::triangles(positions, normals, indices)
}

/// Flat annulus in the XY plane, facing +Z.
pub fn ring(inner_radius: f32, outer_radius: f32, theta_segments: u32) -> MeshData {
    let segments = theta_segments.max(3);

    let mut positions = Vec::with_capacity(2 * (segments as usize + 1));
    for &r in &[inner_radius, outer_radius] {
        for i in 0..=segments {
            let theta = i as f32 / segments as f32 * TAU;
            positions.push(Vec3::new(r * theta.cos(), r * theta.sin(), 0.0));
        }
    }

    let normals = vec![Vec3::Z; positions.len()];

    let stride = segments + 1;
    let mut indices = Vec::with_capacity(segments as usize * 6);
    for i in 0..segments {
        let (a, b) = (i, i + 1);
        let (c, d) = (stride + i, stride + i + 1);
        indices.extend_from_slice(&[a, c, d, a, d, b]);
    }

    MeshData::triangles(positions, normals, indices)
}

/// Latitude/longitude sphere with smooth normals.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let wsegs = width_segments.max(3);
    let hsegs = height_segments.max(2);

    let mut positions = Vec::with_capacity(((wsegs + 1) * (hsegs + 1)) as usize);
    let mut normals = Vec::with_capacity(positions.capacity());

    for iy in 0..=hsegs {
        let v = iy as f32 / hsegs as f32;
        let phi = v * std::f32::consts::PI;
        for ix in 0..=wsegs {
            let u = ix as f32 / wsegs as f32;
            let theta = u * TAU;
            let n = Vec3::new(
                -phi.sin() * theta.cos(),
                phi.cos(),
                phi.sin() * theta.sin(),
            );
            positions.push(n * radius);
            normals.push(n);
        }
    }

    // Skip the degenerate triangle at each pole.
    let stride = wsegs + 1;
    let mut indices = Vec::new();
    for iy in 0..hsegs {
        for ix in 0..wsegs {
            let a = iy * stride + ix;
            let b = a + stride;
            let c = b + 1;
            let d = a + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hsegs - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    MeshData::triangles(positions, normals, indices)
}

/// Torus around the Z axis: ring radius `radius`, tube radius `tube_radius`.
pub fn torus(radius: f32, tube_radius: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let rsegs = radial_segments.max(3);
    let tsegs = tubular_segments.max(3);

    let mut positions = Vec::with_capacity(((rsegs + 1) * (tsegs + 1)) as usize);
    let mut normals = Vec::with_capacity(positions.capacity());

    for j in 0..=rsegs {
        let v = j as f32 / rsegs as f32 * TAU;
        for i in 0..=tsegs {
            let u = i as f32 / tsegs as f32 * TAU;
            let ring_center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let p = Vec3::new(
                (radius + tube_radius * v.cos()) * u.cos(),
                (radius + tube_radius * v.cos()) * u.sin(),
                tube_radius * v.sin(),
            );
            positions.push(p);
            normals.push((p - ring_center).normalize());
        }
    }

    let stride = tsegs + 1;
    let mut indices = Vec::with_capacity((rsegs * tsegs * 6) as usize);
    for j in 0..rsegs {
        for i in 0..tsegs {
            let a = j * stride + i;
            let b = (j + 1) * stride + i;
            indices.extend_from_slice(&[a, b, b + 1, a, b + 1, a + 1]);
        }
    }

    MeshData::triangles(positions, normals, indices)
}

/// Quad indices for a `(wsegs + 1) × (hsegs + 1)` vertex grid laid out row by row.
pub(super) fn grid_indices(wsegs: u32, hsegs: u32) -> Vec<u32> {
    let stride = wsegs + 1;
    let mut indices = Vec::with_capacity((wsegs * hsegs * 6) as usize);
    for iy in 0..hsegs {
        for ix in 0..wsegs {
            let a = iy * stride + ix;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_has_six_flat_faces() {
        let mesh = box_mesh(1.0, 2.0, 3.0);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.index_count(), 36);

        let bb = mesh.bounding_box().unwrap();
        assert_eq!(bb.size(), Vec3::new(1.0, 2.0, 3.0));
        assert!(bb.center().length() < 1e-6);
    }

    #[test]
    fn plane_grid_counts() {
        let mesh = plane(9.0, 9.0, 2, 2);
        assert_eq!(mesh.vertex_count(), 9);
        assert_eq!(mesh.index_count(), 2 * 2 * 6);
        assert!(mesh.normals.iter().all(|&n| n == Vec3::Z));
    }

    #[test]
    fn circle_is_a_fan() {
        let mesh = circle(7.0, 24);
        assert_eq!(mesh.vertex_count(), 26);
        assert_eq!(mesh.index_count(), 24 * 3);
    }

    #[test]
    fn ring_radii_are_respected() {
        let mesh = ring(2.0, 7.0, 18);
        let radii: Vec<f32> = mesh.positions.iter().map(|p| p.length()).collect();
        let min = radii.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = radii.iter().cloned().fold(0.0f32, f32::max);
        assert!((min - 2.0).abs() < 1e-4);
        assert!((max - 7.0).abs() < 1e-4);
    }

    #[test]
    fn sphere_vertices_sit_on_the_radius() {
        let mesh = sphere(7.0, 12, 8);
        for p in &mesh.positions {
            assert!((p.length() - 7.0).abs() < 1e-4);
        }
        for n in &mesh.normals {
            assert!((n.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn sphere_indices_are_in_bounds() {
        let mesh = sphere(1.0, 12, 8);
        let max = *mesh.indices.iter().max().unwrap() as usize;
        assert!(max < mesh.vertex_count());
    }

    #[test]
    fn torus_distance_from_ring_equals_tube_radius() {
        let mesh = torus(5.0, 2.0, 8, 24);
        for p in &mesh.positions {
            let ring = Vec3::new(p.x, p.y, 0.0).normalize_or_zero() * 5.0;
            assert!((((*p) - ring).length() - 2.0).abs() < 1e-3);
        }
    }
}
