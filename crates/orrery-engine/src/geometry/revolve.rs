use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use super::mesh::MeshData;
use super::primitives::grid_indices;

/// Settings for [`lathe`].
#[derive(Debug, Clone, Copy)]
pub struct LatheConfig {
    /// Number of steps around the Y axis. Default: 12.
    pub segments: u32,
    /// Sweep start angle in radians. Default: 0.
    pub phi_start: f32,
    /// Sweep length in radians. Default: a full turn.
    pub phi_length: f32,
}

impl Default for LatheConfig {
    fn default() -> Self {
        Self {
            segments: 12,
            phi_start: 0.0,
            phi_length: TAU,
        }
    }
}

/// Revolves a 2D profile around the Y axis.
///
/// Profile points are `(radial distance, height)` pairs; normals are
/// computed from the resulting surface.
pub fn lathe(points: &[Vec2], config: &LatheConfig) -> MeshData {
    assert!(points.len() >= 2, "lathe profile needs at least two points");
    let segments = config.segments.max(3);

    let mut positions = Vec::with_capacity(points.len() * (segments as usize + 1));
    for point in points {
        for i in 0..=segments {
            let phi = config.phi_start + i as f32 / segments as f32 * config.phi_length;
            positions.push(Vec3::new(
                point.x * phi.sin(),
                point.y,
                point.x * phi.cos(),
            ));
        }
    }

    let mut mesh = MeshData {
        positions,
        normals: Vec::new(),
        indices: grid_indices(segments, points.len() as u32 - 1),
        topology: super::Topology::TriangleList,
    };
    mesh.normals = vec![Vec3::ZERO; mesh.positions.len()];
    mesh.compute_vertex_normals();
    mesh
}

/// Capped cylinder (or truncated cone) along the Y axis, centered at the origin.
pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> MeshData {
    let segments = radial_segments.max(3);
    let half = height * 0.5;
    // Wall normals lean by the radius change per unit height.
    let slope = (radius_bottom - radius_top) / height;

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    // Wall: two rings, smooth normals.
    for &(r, y) in &[(radius_top, half), (radius_bottom, -half)] {
        for i in 0..=segments {
            let theta = i as f32 / segments as f32 * TAU;
            positions.push(Vec3::new(r * theta.sin(), y, r * theta.cos()));
            normals.push(Vec3::new(theta.sin(), slope, theta.cos()).normalize());
        }
    }
    let stride = segments + 1;
    for i in 0..segments {
        let (a, b) = (i, i + 1);
        let (c, d) = (stride + i, stride + i + 1);
        indices.extend_from_slice(&[a, c, d, a, d, b]);
    }

    // Caps: a fan per non-degenerate radius.
    for &(r, y, up) in &[(radius_top, half, 1.0f32), (radius_bottom, -half, -1.0)] {
        if r <= 0.0 {
            continue;
        }
        let n = Vec3::new(0.0, up, 0.0);
        let center = positions.len() as u32;
        positions.push(Vec3::new(0.0, y, 0.0));
        normals.push(n);
        for i in 0..=segments {
            let theta = i as f32 / segments as f32 * TAU;
            positions.push(Vec3::new(r * theta.sin(), y, r * theta.cos()));
            normals.push(n);
        }
        for i in 0..segments {
            // Winding flips between the top and bottom cap.
            if up > 0.0 {
                indices.extend_from_slice(&[center, center + 1 + i + 1, center + 1 + i]);
            } else {
                indices.extend_from_slice(&[center, center + 1 + i, center + 1 + i + 1]);
            }
        }
    }

    MeshData::triangles(positions, normals, indices)
}

/// Cone along the Y axis: a cylinder whose top radius is zero.
pub fn cone(radius: f32, height: f32, radial_segments: u32) -> MeshData {
    cylinder(0.0, radius, height, radial_segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine_profile() -> Vec<Vec2> {
        (0..10)
            .map(|i| Vec2::new((i as f32 * 0.2).sin() * 3.0 + 3.0, (i as f32 - 5.0) * 0.8))
            .collect()
    }

    #[test]
    fn lathe_grid_counts() {
        let profile = sine_profile();
        let mesh = lathe(&profile, &LatheConfig::default());
        assert_eq!(mesh.vertex_count(), profile.len() * 13);
        assert_eq!(mesh.index_count(), (profile.len() - 1) * 12 * 6);
    }

    #[test]
    fn lathe_preserves_profile_radii() {
        let profile = sine_profile();
        let mesh = lathe(&profile, &LatheConfig::default());
        // First revolved ring corresponds to the first profile point.
        for p in &mesh.positions[..13] {
            let radial = (p.x * p.x + p.z * p.z).sqrt();
            assert!((radial - profile[0].x).abs() < 1e-4);
            assert!((p.y - profile[0].y).abs() < 1e-4);
        }
    }

    #[test]
    fn lathe_normals_are_unit_length() {
        let mesh = lathe(&sine_profile(), &LatheConfig::default());
        for n in &mesh.normals {
            assert!((n.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn partial_sweep_spans_requested_angle() {
        let config = LatheConfig {
            phi_length: TAU / 2.0,
            ..LatheConfig::default()
        };
        let mesh = lathe(&[Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)], &config);
        // A half sweep never reaches negative Z.
        assert!(mesh.positions.iter().all(|p| p.z >= -1e-4));
    }

    #[test]
    fn cylinder_has_two_caps() {
        let mesh = cylinder(4.0, 4.0, 8.0, 12);
        let bb = mesh.bounding_box().unwrap();
        assert!((bb.min.y + 4.0).abs() < 1e-4);
        assert!((bb.max.y - 4.0).abs() < 1e-4);

        // wall: 2 rings × 13; caps: 2 × (1 center + 13 rim)
        assert_eq!(mesh.vertex_count(), 2 * 13 + 2 * 14);
    }

    #[test]
    fn cone_has_single_cap() {
        let mesh = cone(6.0, 8.0, 16);
        // wall: 2 rings × 17; one bottom cap: 1 + 17
        assert_eq!(mesh.vertex_count(), 2 * 17 + 18);
    }
}
