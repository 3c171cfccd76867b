use glam::Vec3;

/// Primitive interpretation of the index buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Topology {
    TriangleList,
    LineList,
}

/// Axis-aligned bounding box.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// CPU-side mesh: positions, per-vertex normals, indices, topology.
///
/// Immutable once handed to a scene object; the renderer uploads it on first
/// sight and caches the GPU buffers. Line meshes carry zeroed normals so a
/// single vertex layout serves both pipelines.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub topology: Topology,
}

impl Default for Topology {
    fn default() -> Self {
        Topology::TriangleList
    }
}

impl MeshData {
    pub fn triangles(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Self {
        debug_assert_eq!(positions.len(), normals.len());
        debug_assert_eq!(indices.len() % 3, 0);
        Self {
            positions,
            normals,
            indices,
            topology: Topology::TriangleList,
        }
    }

    pub fn lines(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        debug_assert_eq!(indices.len() % 2, 0);
        let normals = vec![Vec3::ZERO; positions.len()];
        Self {
            positions,
            normals,
            indices,
            topology: Topology::LineList,
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn bounding_box(&self) -> Option<Aabb> {
        let first = *self.positions.first()?;
        let mut bb = Aabb { min: first, max: first };
        for &p in &self.positions[1..] {
            bb.min = bb.min.min(p);
            bb.max = bb.max.max(p);
        }
        Some(bb)
    }

    pub fn translate(&mut self, delta: Vec3) {
        for p in &mut self.positions {
            *p += delta;
        }
    }

    /// Moves the mesh so its bounding-box center sits at the origin.
    ///
    /// Used for text meshes, whose natural origin is the first baseline.
    pub fn recenter(&mut self) {
        if let Some(bb) = self.bounding_box() {
            self.translate(-bb.center());
        }
    }

    /// Replaces normals with area-weighted averages of adjacent face normals.
    ///
    /// Builders without a closed-form normal (lathe profiles, parametric
    /// grids) call this after filling positions and indices.
    pub fn compute_vertex_normals(&mut self) {
        debug_assert_eq!(self.topology, Topology::TriangleList);

        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let face = (self.positions[b] - self.positions[a])
                .cross(self.positions[c] - self.positions[a]);
            // Cross product length is proportional to area; no normalization
            // here so larger faces weigh more.
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }

        for n in &mut normals {
            *n = n.normalize_or_zero();
            if *n == Vec3::ZERO {
                *n = Vec3::Z;
            }
        }

        self.normals = normals;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> MeshData {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 2.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
        ];
        let normals = vec![Vec3::Z; 4];
        MeshData::triangles(positions, normals, vec![0, 1, 2, 0, 2, 3])
    }

    #[test]
    fn bounding_box_spans_positions() {
        let bb = quad().bounding_box().unwrap();
        assert_eq!(bb.min, Vec3::ZERO);
        assert_eq!(bb.max, Vec3::new(2.0, 2.0, 0.0));
        assert_eq!(bb.center(), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn empty_mesh_has_no_bounds() {
        assert!(MeshData::default().bounding_box().is_none());
    }

    #[test]
    fn recenter_moves_center_to_origin() {
        let mut mesh = quad();
        mesh.recenter();
        let bb = mesh.bounding_box().unwrap();
        assert!(bb.center().length() < 1e-6);
    }

    #[test]
    fn computed_normals_face_out_of_the_plane() {
        let mut mesh = quad();
        mesh.normals.clear();
        mesh.normals.resize(4, Vec3::ZERO);
        mesh.compute_vertex_normals();
        for n in &mesh.normals {
            assert!((*n - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn line_mesh_normals_are_zeroed() {
        let mesh = MeshData::lines(vec![Vec3::ZERO, Vec3::X], vec![0, 1]);
        assert_eq!(mesh.topology, Topology::LineList);
        assert_eq!(mesh.normals, vec![Vec3::ZERO; 2]);
    }
}
