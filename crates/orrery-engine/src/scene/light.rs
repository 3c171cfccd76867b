use glam::Vec3;

use super::Color;

/// Upper bound on directional lights a frame is shaded with.
///
/// The renderer's frame uniform carries a fixed-size light array; lights
/// beyond this count are ignored (with a one-time warning).
pub const MAX_LIGHTS: usize = 2;

/// Directional light shining from `position` toward the origin.
///
/// Only the direction derived from `position` matters; there is no falloff.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
}

impl DirectionalLight {
    pub fn new(color: Color, intensity: f32, position: Vec3) -> Self {
        Self {
            color,
            intensity,
            position,
        }
    }

    /// Unit vector from a lit surface toward the light.
    ///
    /// Degenerate positions (at the origin) light from +Y.
    pub fn direction_to_light(&self) -> Vec3 {
        let d = self.position.normalize_or_zero();
        if d == Vec3::ZERO { Vec3::Y } else { d }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_is_unit_length() {
        let l = DirectionalLight::new(Color::WHITE, 3.0, Vec3::new(-1.0, 2.0, 4.0));
        assert!((l.direction_to_light().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn origin_position_falls_back_to_up() {
        let l = DirectionalLight::new(Color::WHITE, 1.0, Vec3::ZERO);
        assert_eq!(l.direction_to_light(), Vec3::Y);
    }
}
