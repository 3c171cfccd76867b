use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};
use glam::Vec3;

use crate::geometry::MeshData;

use super::Font;

/// Settings for [`text_mesh`].
#[derive(Debug, Clone, Copy)]
pub struct TextConfig {
    /// World-unit height of one em. Default: 1.
    pub size: f32,
    /// Extrusion depth along +Z in world units. Default: 0.2.
    pub depth: f32,
    /// Raster resolution in pixels per em used to sample glyph coverage.
    /// Higher values give smoother letterforms and more geometry. Default: 32.
    pub resolution: u32,
    /// Coverage cutoff (0–255) above which a sample counts as inside the
    /// glyph. Default: 128.
    pub threshold: u8,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            size: 1.0,
            depth: 0.2,
            resolution: 32,
            threshold: 128,
        }
    }
}

/// Builds an extruded 3D mesh for `text`.
///
/// Glyphs are laid out and rasterized by `fontdue`; each horizontal run of
/// covered samples becomes one block spanning the configured depth. The mesh
/// origin is the first baseline; callers wanting centered text should follow
/// with [`MeshData::recenter`].
pub fn text_mesh(font: &Font, text: &str, config: &TextConfig) -> MeshData {
    let px = config.resolution.max(4) as f32;
    let scale = config.size / px;

    let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
    layout.reset(&LayoutSettings::default());
    layout.append(&[font.raw()], &TextStyle::new(text, px, 0));

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    for glyph in layout.glyphs() {
        let (metrics, coverage) = font.raw().rasterize_indexed(glyph.key.glyph_index, px);
        if metrics.width == 0 || metrics.height == 0 {
            continue;
        }

        for row in 0..metrics.height {
            let samples = &coverage[row * metrics.width..(row + 1) * metrics.width];
            for (start, end) in coverage_runs(samples, config.threshold) {
                let left = (glyph.x + start as f32) * scale;
                let right = (glyph.x + end as f32) * scale;
                // Layout is Y-down; the mesh is Y-up.
                let top = -(glyph.y + row as f32) * scale;
                let bottom = -(glyph.y + (row + 1) as f32) * scale;

                push_block(
                    &mut positions,
                    &mut normals,
                    &mut indices,
                    Vec3::new(left, bottom, 0.0),
                    Vec3::new(right, top, config.depth),
                );
            }
        }
    }

    MeshData::triangles(positions, normals, indices)
}

/// Maximal runs of samples at or above `threshold`, as `(start, end)` with
/// `end` exclusive.
fn coverage_runs(samples: &[u8], threshold: u8) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;

    for (i, &s) in samples.iter().enumerate() {
        match (start, s >= threshold) {
            (None, true) => start = Some(i),
            (Some(s0), false) => {
                runs.push((s0, i));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s0) = start {
        runs.push((s0, samples.len()));
    }

    runs
}

/// Appends an axis-aligned block spanning `min`..`max`, one flat-shaded quad
/// per face.
fn push_block(
    positions: &mut Vec<Vec3>,
    normals: &mut Vec<Vec3>,
    indices: &mut Vec<u32>,
    min: Vec3,
    max: Vec3,
) {
    #[rustfmt::skip]
    let faces: [([Vec3; 4], Vec3); 6] = [
        // +Z
        ([
            Vec3::new(min.x, min.y, max.z), Vec3::new(max.x, min.y, max.z),
            Vec3::new(max.x, max.y, max.z), Vec3::new(min.x, max.y, max.z),
        ], Vec3::Z),
        // -Z
        ([
            Vec3::new(max.x, min.y, min.z), Vec3::new(min.x, min.y, min.z),
            Vec3::new(min.x, max.y, min.z), Vec3::new(max.x, max.y, min.z),
        ], Vec3::NEG_Z),
        // +X
        ([
            Vec3::new(max.x, min.y, max.z), Vec3::new(max.x, min.y, min.z),
            Vec3::new(max.x, max.y, min.z), Vec3::new(max.x, max.y, max.z),
        ], Vec3::X),
        // -X
        ([
            Vec3::new(min.x, min.y, min.z), Vec3::new(min.x, min.y, max.z),
            Vec3::new(min.x, max.y, max.z), Vec3::new(min.x, max.y, min.z),
        ], Vec3::NEG_X),
        // +Y
        ([
            Vec3::new(min.x, max.y, max.z), Vec3::new(max.x, max.y, max.z),
            Vec3::new(max.x, max.y, min.z), Vec3::new(min.x, max.y, min.z),
        ], Vec3::Y),
        // -Y
        ([
            Vec3::new(min.x, min.y, min.z), Vec3::new(max.x, min.y, min.z),
            Vec3::new(max.x, min.y, max.z), Vec3::new(min.x, min.y, max.z),
        ], Vec3::NEG_Y),
    ];

    for (corners, normal) in faces {
        let base = positions.len() as u32;
        positions.extend_from_slice(&corners);
        normals.extend_from_slice(&[normal; 4]);
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── coverage runs ─────────────────────────────────────────────────────

    #[test]
    fn empty_row_has_no_runs() {
        assert!(coverage_runs(&[0, 10, 127], 128).is_empty());
    }

    #[test]
    fn single_run_in_the_middle() {
        assert_eq!(coverage_runs(&[0, 200, 255, 0], 128), vec![(1, 3)]);
    }

    #[test]
    fn run_reaching_the_end_is_closed() {
        assert_eq!(coverage_runs(&[0, 0, 255, 255], 128), vec![(2, 4)]);
    }

    #[test]
    fn multiple_runs_split_on_gaps() {
        assert_eq!(
            coverage_runs(&[255, 0, 255, 0, 255], 128),
            vec![(0, 1), (2, 3), (4, 5)]
        );
    }

    #[test]
    fn threshold_is_inclusive() {
        assert_eq!(coverage_runs(&[128], 128), vec![(0, 1)]);
    }

    // ── block emission ────────────────────────────────────────────────────

    #[test]
    fn block_spans_its_corners() {
        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut indices = Vec::new();
        push_block(
            &mut positions,
            &mut normals,
            &mut indices,
            Vec3::ZERO,
            Vec3::new(2.0, 1.0, 0.2),
        );

        assert_eq!(positions.len(), 24);
        assert_eq!(indices.len(), 36);

        let mesh = MeshData::triangles(positions, normals, indices);
        let bb = mesh.bounding_box().unwrap();
        assert_eq!(bb.min, Vec3::ZERO);
        assert_eq!(bb.max, Vec3::new(2.0, 1.0, 0.2));
    }

    #[test]
    fn config_defaults_match_docs() {
        let cfg = TextConfig::default();
        assert_eq!(cfg.size, 1.0);
        assert_eq!(cfg.depth, 0.2);
        assert_eq!(cfg.resolution, 32);
        assert_eq!(cfg.threshold, 128);
    }
}
