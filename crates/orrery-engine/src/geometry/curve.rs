use std::f32::consts::TAU;

use glam::Vec3;

use super::mesh::MeshData;

/// A 3D curve parameterized over `t ∈ [0, 1]`.
///
/// The one required operation is [`point_at`](Curve::point_at); tangents
/// default to a central difference so implementations stay one-liners.
pub trait Curve {
    fn point_at(&self, t: f32) -> Vec3;

    fn tangent_at(&self, t: f32) -> Vec3 {
        const EPS: f32 = 1e-4;
        let d = self.point_at(t + EPS) - self.point_at(t - EPS);
        d.normalize_or_zero()
    }
}

/// Settings for [`tube`].
#[derive(Debug, Clone, Copy)]
pub struct TubeConfig {
    /// Rings along the curve. Default: 64.
    pub tubular_segments: u32,
    /// Tube radius. Default: 1.
    pub radius: f32,
    /// Vertices per ring. Default: 8.
    pub radial_segments: u32,
    /// Whether the curve returns to its start (`point_at(1) == point_at(0)`).
    /// Closed tubes share the seam ring instead of duplicating it.
    /// Default: false.
    pub closed: bool,
}

impl Default for TubeConfig {
    fn default() -> Self {
        Self {
            tubular_segments: 64,
            radius: 1.0,
            radial_segments: 8,
            closed: false,
        }
    }
}

/// Sweeps a circular cross-section along `curve`.
///
/// Ring orientation uses transported frames: the first ring picks an
/// arbitrary normal perpendicular to the tangent, each following ring reuses
/// the previous normal projected off its own tangent. This keeps the tube
/// from twisting at inflection points.
pub fn tube(curve: &dyn Curve, config: &TubeConfig) -> MeshData {
    let tsegs = config.tubular_segments.max(2);
    let rsegs = config.radial_segments.max(3);
    let ring_count = if config.closed { tsegs } else { tsegs + 1 };

    let mut centers = Vec::with_capacity(ring_count as usize);
    let mut tangents = Vec::with_capacity(ring_count as usize);
    for i in 0..ring_count {
        let t = i as f32 / tsegs as f32;
        centers.push(curve.point_at(t));
        tangents.push(curve.tangent_at(t));
    }

    // Transported frames.
    let mut frames = Vec::with_capacity(tangents.len());
    let mut normal = perpendicular(tangents[0]);
    for &tangent in &tangents {
        let projected = normal - tangent * tangent.dot(normal);
        normal = projected.normalize_or_zero();
        if normal == Vec3::ZERO {
            normal = perpendicular(tangent);
        }
        frames.push((normal, tangent.cross(normal)));
    }

    let stride = rsegs + 1;
    let mut positions = Vec::with_capacity((ring_count * stride) as usize);
    let mut normals = Vec::with_capacity(positions.capacity());
    for i in 0..ring_count as usize {
        let (n, b) = frames[i];
        for j in 0..=rsegs {
            let theta = j as f32 / rsegs as f32 * TAU;
            let dir = n * theta.cos() + b * theta.sin();
            positions.push(centers[i] + dir * config.radius);
            normals.push(dir);
        }
    }

    let mut indices = Vec::with_capacity((tsegs * rsegs * 6) as usize);
    for i in 0..tsegs {
        let ring = i * stride;
        let next_ring = ((i + 1) % ring_count) * stride;
        for j in 0..rsegs {
            let a = ring + j;
            let b = next_ring + j;
            indices.extend_from_slice(&[a, b, b + 1, a, b + 1, a + 1]);
        }
    }

    MeshData::triangles(positions, normals, indices)
}

fn perpendicular(v: Vec3) -> Vec3 {
    // Cross with the axis the vector is least aligned with.
    let axis = if v.x.abs() <= v.y.abs() && v.x.abs() <= v.z.abs() {
        Vec3::X
    } else if v.y.abs() <= v.z.abs() {
        Vec3::Y
    } else {
        Vec3::Z
    };
    v.cross(axis).normalize_or_zero()
}

/// The (p, q) torus knot path.
#[derive(Debug, Clone, Copy)]
pub struct TorusKnotCurve {
    pub radius: f32,
    pub p: u32,
    pub q: u32,
}

impl Curve for TorusKnotCurve {
    fn point_at(&self, t: f32) -> Vec3 {
        let u = t * self.p as f32 * TAU;
        let qu_over_p = self.q as f32 / self.p as f32 * u;
        let cs = qu_over_p.cos();

        Vec3::new(
            self.radius * (2.0 + cs) * 0.5 * u.cos(),
            self.radius * (2.0 + cs) * 0.5 * u.sin(),
            self.radius * qu_over_p.sin() * 0.5,
        )
    }
}

/// Torus knot surface: a tube swept along [`TorusKnotCurve`].
pub fn torus_knot(
    radius: f32,
    tube_radius: f32,
    tubular_segments: u32,
    radial_segments: u32,
    p: u32,
    q: u32,
) -> MeshData {
    let curve = TorusKnotCurve { radius, p, q };
    tube(
        &curve,
        &TubeConfig {
            tubular_segments,
            radius: tube_radius,
            radial_segments,
            closed: true,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Line;

    impl Curve for Line {
        fn point_at(&self, t: f32) -> Vec3 {
            Vec3::new(t * 10.0, 0.0, 0.0)
        }
    }

    #[test]
    fn default_tangent_matches_direction() {
        let t = Line.tangent_at(0.5);
        assert!((t - Vec3::X).length() < 1e-3);
    }

    #[test]
    fn open_tube_ring_counts() {
        let mesh = tube(&Line, &TubeConfig {
            tubular_segments: 20,
            radius: 1.0,
            radial_segments: 8,
            closed: false,
        });
        assert_eq!(mesh.vertex_count(), 21 * 9);
        assert_eq!(mesh.index_count(), 20 * 8 * 6);
    }

    #[test]
    fn tube_vertices_keep_the_radius() {
        let mesh = tube(&Line, &TubeConfig {
            radius: 2.0,
            ..TubeConfig::default()
        });
        for p in &mesh.positions {
            // Distance from the X axis equals the tube radius.
            let d = (p.y * p.y + p.z * p.z).sqrt();
            assert!((d - 2.0).abs() < 1e-3);
        }
    }

    #[test]
    fn torus_knot_curve_closes() {
        let curve = TorusKnotCurve { radius: 3.5, p: 2, q: 3 };
        let d = (curve.point_at(0.0) - curve.point_at(1.0)).length();
        assert!(d < 1e-3);
    }

    #[test]
    fn closed_tube_shares_the_seam_ring() {
        let mesh = torus_knot(3.5, 1.5, 64, 8, 2, 3);
        assert_eq!(mesh.vertex_count(), 64 * 9);
        assert_eq!(mesh.index_count(), 64 * 8 * 6);

        let max = *mesh.indices.iter().max().unwrap() as usize;
        assert!(max < mesh.vertex_count());
    }
}
