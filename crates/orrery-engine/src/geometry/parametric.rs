use glam::Vec3;

use super::mesh::MeshData;
use super::primitives::grid_indices;

/// Samples a parametric surface `f(u, v)` on a regular grid.
///
/// `u` and `v` both run over `[0, 1]`; `slices` counts steps along `u`,
/// `stacks` along `v`. Normals are computed from the sampled surface, so the
/// function only has to produce positions.
pub fn parametric<F>(f: F, slices: u32, stacks: u32) -> MeshData
where
    F: Fn(f32, f32) -> Vec3,
{
    let slices = slices.max(1);
    let stacks = stacks.max(1);

    let mut positions = Vec::with_capacity(((slices + 1) * (stacks + 1)) as usize);
    for iv in 0..=stacks {
        let v = iv as f32 / stacks as f32;
        for iu in 0..=slices {
            let u = iu as f32 / slices as f32;
            positions.push(f(u, v));
        }
    }

    let mut mesh = MeshData {
        positions,
        normals: Vec::new(),
        indices: grid_indices(slices, stacks),
        topology: super::Topology::TriangleList,
    };
    mesh.compute_vertex_normals();
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_counts() {
        let mesh = parametric(|u, v| Vec3::new(u, v, 0.0), 25, 25);
        assert_eq!(mesh.vertex_count(), 26 * 26);
        assert_eq!(mesh.index_count(), 25 * 25 * 6);
    }

    #[test]
    fn samples_cover_the_unit_domain() {
        let mesh = parametric(|u, v| Vec3::new(u, v, 0.0), 4, 4);
        let bb = mesh.bounding_box().unwrap();
        assert_eq!(bb.min, Vec3::ZERO);
        assert_eq!(bb.max, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn flat_surface_gets_flat_normals() {
        let mesh = parametric(|u, v| Vec3::new(u, v, 0.0), 3, 3);
        for n in &mesh.normals {
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!((n.z.abs() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn indices_stay_in_bounds() {
        let mesh = parametric(|u, v| Vec3::new(u.sin(), v.cos(), u * v), 7, 3);
        let max = *mesh.indices.iter().max().unwrap() as usize;
        assert!(max < mesh.vertex_count());
    }
}
