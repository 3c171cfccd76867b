use glam::Vec3;

use super::mesh::MeshData;

/// Builds a sphere-projected polyhedron from seed vertices and triangles.
///
/// Each seed triangle is midpoint-subdivided `detail` times, then every
/// vertex is pushed out to `radius`. Vertices are not shared between
/// triangles; normals are the normalized positions, giving the rounded look
/// the seed solids are usually displayed with.
pub fn polyhedron(vertices: &[Vec3], indices: &[u32], radius: f32, detail: u32) -> MeshData {
    assert_eq!(indices.len() % 3, 0, "seed indices must form triangles");

    let mut positions = Vec::new();
    for tri in indices.chunks_exact(3) {
        subdivide(
            vertices[tri[0] as usize],
            vertices[tri[1] as usize],
            vertices[tri[2] as usize],
            detail,
            &mut positions,
        );
    }

    let mut normals = Vec::with_capacity(positions.len());
    for p in &mut positions {
        let n = p.normalize();
        *p = n * radius;
        normals.push(n);
    }

    let indices = (0..positions.len() as u32).collect();
    MeshData::triangles(positions, normals, indices)
}

fn subdivide(a: Vec3, b: Vec3, c: Vec3, detail: u32, out: &mut Vec<Vec3>) {
    if detail == 0 {
        out.extend_from_slice(&[a, b, c]);
        return;
    }

    let ab = (a + b) * 0.5;
    let bc = (b + c) * 0.5;
    let ca = (c + a) * 0.5;

    subdivide(a, ab, ca, detail - 1, out);
    subdivide(ab, b, bc, detail - 1, out);
    subdivide(ca, bc, c, detail - 1, out);
    subdivide(ab, bc, ca, detail - 1, out);
}

pub fn tetrahedron(radius: f32) -> MeshData {
    let vertices = [
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
    ];
    #[rustfmt::skip]
    let indices = [2, 1, 0,  0, 3, 2,  1, 3, 0,  2, 3, 1];
    polyhedron(&vertices, &indices, radius, 0)
}

pub fn octahedron(radius: f32) -> MeshData {
    let vertices = [
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(-1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(0.0, 0.0, -1.0),
    ];
    #[rustfmt::skip]
    let indices = [
        0, 2, 4,  0, 4, 3,  0, 3, 5,  0, 5, 2,
        1, 2, 5,  1, 5, 3,  1, 3, 4,  1, 4, 2,
    ];
    polyhedron(&vertices, &indices, radius, 0)
}

pub fn icosahedron(radius: f32) -> MeshData {
    // Golden-ratio rectangles.
    let t = (1.0 + 5.0f32.sqrt()) / 2.0;
    let vertices = [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ];
    #[rustfmt::skip]
    let indices = [
        0, 11, 5,  0, 5, 1,   0, 1, 7,   0, 7, 10,  0, 10, 11,
        1, 5, 9,   5, 11, 4,  11, 10, 2, 10, 7, 6,  7, 1, 8,
        3, 9, 4,   3, 4, 2,   3, 2, 6,   3, 6, 8,   3, 8, 9,
        4, 9, 5,   2, 4, 11,  6, 2, 10,  8, 6, 7,   9, 8, 1,
    ];
    polyhedron(&vertices, &indices, radius, 0)
}

pub fn dodecahedron(radius: f32) -> MeshData {
    let t = (1.0 + 5.0f32.sqrt()) / 2.0;
    let r = 1.0 / t;

    #[rustfmt::skip]
    let vertices = [
        // (±1, ±1, ±1)
        Vec3::new(-1.0, -1.0, -1.0), Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(-1.0, 1.0, -1.0),  Vec3::new(-1.0, 1.0, 1.0),
        Vec3::new(1.0, -1.0, -1.0),  Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(1.0, 1.0, -1.0),   Vec3::new(1.0, 1.0, 1.0),
        // (0, ±1/t, ±t)
        Vec3::new(0.0, -r, -t), Vec3::new(0.0, -r, t),
        Vec3::new(0.0, r, -t),  Vec3::new(0.0, r, t),
        // (±1/t, ±t, 0)
        Vec3::new(-r, -t, 0.0), Vec3::new(-r, t, 0.0),
        Vec3::new(r, -t, 0.0),  Vec3::new(r, t, 0.0),
        // (±t, 0, ±1/t)
        Vec3::new(-t, 0.0, -r), Vec3::new(t, 0.0, -r),
        Vec3::new(-t, 0.0, r),  Vec3::new(t, 0.0, r),
    ];
    #[rustfmt::skip]
    let indices = [
        3, 11, 7,   3, 7, 15,   3, 15, 13,
        7, 19, 17,  7, 17, 6,   7, 6, 15,
        17, 4, 8,   17, 8, 10,  17, 10, 6,
        8, 0, 16,   8, 16, 2,   8, 2, 10,
        0, 12, 1,   0, 1, 18,   0, 18, 16,
        6, 10, 2,   6, 2, 13,   6, 13, 15,
        2, 16, 18,  2, 18, 3,   2, 3, 13,
        18, 1, 9,   18, 9, 11,  18, 11, 3,
        4, 14, 12,  4, 12, 0,   4, 0, 8,
        11, 9, 5,   11, 5, 19,  11, 19, 7,
        19, 5, 14,  19, 14, 4,  19, 4, 17,
        1, 12, 14,  1, 14, 5,   1, 5, 9,
    ];
    polyhedron(&vertices, &indices, radius, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_vertices_are_projected_to_the_radius() {
        for mesh in [
            tetrahedron(7.0),
            octahedron(7.0),
            icosahedron(7.0),
            dodecahedron(7.0),
        ] {
            for p in &mesh.positions {
                assert!((p.length() - 7.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn seed_triangle_counts() {
        assert_eq!(tetrahedron(1.0).index_count(), 4 * 3);
        assert_eq!(octahedron(1.0).index_count(), 8 * 3);
        assert_eq!(icosahedron(1.0).index_count(), 20 * 3);
        // 12 pentagons, 3 triangles each
        assert_eq!(dodecahedron(1.0).index_count(), 36 * 3);
    }

    #[test]
    fn subdivision_quadruples_triangles() {
        let seed = [Vec3::X, Vec3::Y, Vec3::Z];
        let base = polyhedron(&seed, &[0, 1, 2], 1.0, 0);
        let detailed = polyhedron(&seed, &[0, 1, 2], 1.0, 2);
        assert_eq!(detailed.index_count(), base.index_count() * 16);
    }

    #[test]
    fn normals_point_outward() {
        let mesh = icosahedron(3.0);
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            assert!(p.normalize().dot(*n) > 0.99);
        }
    }
}
