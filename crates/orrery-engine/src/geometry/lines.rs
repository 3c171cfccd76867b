use std::collections::HashMap;

use glam::Vec3;

use super::mesh::{MeshData, Topology};

/// Every triangle edge of `mesh` as a line list, shared edges emitted once.
///
/// Face-diagonal edges are included; use [`edges`] for a silhouette-style
/// extraction that skips coplanar interiors.
pub fn wireframe(mesh: &MeshData) -> MeshData {
    debug_assert_eq!(mesh.topology, Topology::TriangleList);

    let mut seen = std::collections::HashSet::new();
    let mut indices = Vec::new();

    for tri in mesh.indices.chunks_exact(3) {
        for &(a, b) in &[(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            let key = (a.min(b), a.max(b));
            if seen.insert(key) {
                indices.extend_from_slice(&[a, b]);
            }
        }
    }

    MeshData::lines(mesh.positions.clone(), indices)
}

/// Edges whose adjacent faces meet at more than `threshold_degrees`, plus
/// all boundary edges, as a line list.
///
/// Vertices are matched by position (not index), so seams introduced by
/// per-face normals — a box stores each corner three times — do not turn
/// interior edges into boundaries.
pub fn edges(mesh: &MeshData, threshold_degrees: f32) -> MeshData {
    debug_assert_eq!(mesh.topology, Topology::TriangleList);

    let threshold_cos = threshold_degrees.to_radians().cos();

    // Canonical vertex id per quantized position.
    let mut canonical: HashMap<[i64; 3], u32> = HashMap::new();
    let mut canonical_of = Vec::with_capacity(mesh.positions.len());
    for p in &mesh.positions {
        let key = quantize(*p);
        let next = canonical.len() as u32;
        canonical_of.push(*canonical.entry(key).or_insert(next));
    }

    struct EdgeInfo {
        endpoints: (Vec3, Vec3),
        first_normal: Vec3,
        keep: bool,
        faces: u32,
    }

    let mut edge_map: HashMap<(u32, u32), EdgeInfo> = HashMap::new();

    for tri in mesh.indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let face_normal = (mesh.positions[i1] - mesh.positions[i0])
            .cross(mesh.positions[i2] - mesh.positions[i0])
            .normalize_or_zero();

        for &(a, b) in &[(i0, i1), (i1, i2), (i2, i0)] {
            let (ca, cb) = (canonical_of[a], canonical_of[b]);
            let key = (ca.min(cb), ca.max(cb));

            match edge_map.get_mut(&key) {
                None => {
                    edge_map.insert(key, EdgeInfo {
                        endpoints: (mesh.positions[a], mesh.positions[b]),
                        first_normal: face_normal,
                        keep: false,
                        faces: 1,
                    });
                }
                Some(info) => {
                    info.faces += 1;
                    if info.first_normal.dot(face_normal) < threshold_cos {
                        info.keep = true;
                    }
                }
            }
        }
    }

    let mut positions = Vec::new();
    let mut indices = Vec::new();
    for info in edge_map.values() {
        // Boundary edges (single face) are always kept.
        if info.faces == 1 || info.keep {
            let base = positions.len() as u32;
            positions.push(info.endpoints.0);
            positions.push(info.endpoints.1);
            indices.extend_from_slice(&[base, base + 1]);
        }
    }

    MeshData::lines(positions, indices)
}

fn quantize(p: Vec3) -> [i64; 3] {
    const PRECISION: f32 = 1e4;
    [
        (p.x * PRECISION).round() as i64,
        (p.y * PRECISION).round() as i64,
        (p.z * PRECISION).round() as i64,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::box_mesh;

    #[test]
    fn box_wireframe_keeps_all_triangle_edges() {
        let wf = wireframe(&box_mesh(8.0, 8.0, 8.0));
        assert_eq!(wf.topology, Topology::LineList);
        // 6 faces × (4 sides + 1 diagonal); faces do not share indices.
        assert_eq!(wf.index_count(), 30 * 2);
    }

    #[test]
    fn box_edges_keep_the_twelve_physical_edges() {
        let e = edges(&box_mesh(8.0, 8.0, 8.0), 15.0);
        assert_eq!(e.index_count(), 12 * 2);
        assert_eq!(e.vertex_count(), 12 * 2);
    }

    #[test]
    fn coplanar_diagonals_are_dropped() {
        // A flat quad: the shared diagonal sits between coplanar triangles,
        // the four outer edges are boundaries.
        let quad = MeshData::triangles(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![Vec3::Z; 4],
            vec![0, 1, 2, 0, 2, 3],
        );
        let e = edges(&quad, 15.0);
        assert_eq!(e.index_count(), 4 * 2);
    }

    #[test]
    fn line_indices_pair_up() {
        let e = edges(&box_mesh(1.0, 1.0, 1.0), 15.0);
        assert_eq!(e.index_count() % 2, 0);
        let max = *e.indices.iter().max().unwrap() as usize;
        assert!(max < e.vertex_count());
    }
}
