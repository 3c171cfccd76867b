use glam::{Mat4, Quat, Vec3};

use crate::geometry::MeshData;

use super::Material;

/// Stable handle to an object inside a [`Scene`](super::Scene).
///
/// Ids are insertion indices; objects are never removed, so a handle stays
/// valid for the life of the scene.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ObjectId(pub(crate) usize);

impl ObjectId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Position / rotation / scale of a scene object.
///
/// Rotation is XYZ Euler angles in radians, matching how the demo scripts
/// drive spin (absolute per-axis angles recomputed every frame).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            glam::EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

/// A renderable object: mesh data, material, transform, optional spin.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub mesh: MeshData,
    pub material: Material,
    pub transform: Transform,
    /// Spin speed in radians per second. When set, the render loop assigns
    /// `rotation.x = rotation.y = elapsed × speed` once per frame.
    pub spin_speed: Option<f32>,
}

impl SceneObject {
    pub fn new(mesh: MeshData, material: Material) -> Self {
        Self {
            mesh,
            material,
            transform: Transform::default(),
            spin_speed: None,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn spinning(mut self, speed: f32) -> Self {
        self.spin_speed = Some(speed);
        self
    }
}
