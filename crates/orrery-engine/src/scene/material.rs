use super::Color;

/// Surface appearance of a scene object.
///
/// Small by design: a solid color plus two pipeline-selecting flags. The
/// renderer picks a back-face-culled, double-sided or unlit pipeline from
/// these without inspecting mesh data.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub color: Color,
    /// Render both faces. Needed for open surfaces (planes, rings, lathes
    /// with partial sweeps) whose back side is visible while spinning.
    pub double_sided: bool,
    /// Skip lighting entirely; the mesh is drawn in its flat color.
    /// Line meshes are always drawn this way.
    pub unlit: bool,
}

impl Material {
    /// Lit, back-face-culled solid color.
    pub fn lit(color: Color) -> Self {
        Self {
            color,
            double_sided: false,
            unlit: false,
        }
    }

    /// Lit solid color with both faces rendered.
    pub fn lit_double_sided(color: Color) -> Self {
        Self {
            color,
            double_sided: true,
            unlit: false,
        }
    }

    /// Unlit color for line meshes (wireframes, edge overlays).
    pub fn line(color: Color) -> Self {
        Self {
            color,
            double_sided: true,
            unlit: true,
        }
    }
}
