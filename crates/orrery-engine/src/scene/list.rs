use super::{Color, DirectionalLight, MAX_LIGHTS, ObjectId, SceneObject};

/// Flat container of everything one frame renders.
///
/// Deliberately not a graph: objects are stored in insertion order and have
/// no parent links. Draw order follows insertion order.
#[derive(Debug, Default)]
pub struct Scene {
    pub background: Color,
    lights: Vec<DirectionalLight>,
    objects: Vec<SceneObject>,
    warned_light_overflow: bool,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an object and returns its handle.
    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        let id = ObjectId(self.objects.len());
        self.objects.push(object);
        id
    }

    /// Appends a light. Lights beyond [`MAX_LIGHTS`] are kept in the list but
    /// never reach the shader.
    pub fn add_light(&mut self, light: DirectionalLight) {
        self.lights.push(light);
        if self.lights.len() > MAX_LIGHTS && !self.warned_light_overflow {
            log::warn!(
                "scene has {} lights; only the first {MAX_LIGHTS} are rendered",
                self.lights.len()
            );
            self.warned_light_overflow = true;
        }
    }

    #[inline]
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    #[inline]
    pub fn objects_mut(&mut self) -> &mut [SceneObject] {
        &mut self.objects
    }

    #[inline]
    pub fn object_mut(&mut self, id: ObjectId) -> &mut SceneObject {
        &mut self.objects[id.0]
    }

    #[inline]
    pub fn lights(&self) -> &[DirectionalLight] {
        &self.lights
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Applies spin animation: every object with a spin speed gets
    /// `rotation.x = rotation.y = elapsed × speed`.
    ///
    /// The angle is an absolute function of elapsed time, so replaying the
    /// same timestamps reproduces identical transforms.
    pub fn apply_spin(&mut self, elapsed: f32) {
        for object in &mut self.objects {
            if let Some(speed) = object.spin_speed {
                let angle = elapsed * speed;
                object.transform.rotation.x = angle;
                object.transform.rotation.y = angle;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::geometry;
    use crate::scene::Material;

    use super::*;

    fn cube_object() -> SceneObject {
        SceneObject::new(
            geometry::box_mesh(1.0, 1.0, 1.0),
            Material::lit(Color::from_hex(0x44aa88)),
        )
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut scene = Scene::new();
        let a = scene.add_object(cube_object().at(Vec3::new(-2.0, 0.0, 0.0)));
        let b = scene.add_object(cube_object().at(Vec3::new(2.0, 0.0, 0.0)));

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(scene.objects()[0].transform.position.x, -2.0);
        assert_eq!(scene.objects()[1].transform.position.x, 2.0);
    }

    #[test]
    fn spin_is_absolute_in_elapsed_time() {
        let mut scene = Scene::new();
        scene.add_object(cube_object().spinning(1.0));
        scene.add_object(cube_object().spinning(1.1));

        scene.apply_spin(2.0);

        assert!((scene.objects()[0].transform.rotation.x - 2.0).abs() < 1e-6);
        assert!((scene.objects()[1].transform.rotation.y - 2.2).abs() < 1e-6);
    }

    #[test]
    fn spin_replay_is_deterministic() {
        let timestamps = [0.0f32, 0.016, 0.12, 0.5, 2.0, 2.0, 7.25];

        let run = || {
            let mut scene = Scene::new();
            scene.add_object(cube_object().spinning(0.1));
            scene.add_object(cube_object().spinning(0.15));

            let mut trace = Vec::new();
            for &t in &timestamps {
                scene.apply_spin(t);
                for o in scene.objects() {
                    trace.push(o.transform.rotation);
                }
            }
            trace
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn objects_without_spin_are_untouched() {
        let mut scene = Scene::new();
        let id = scene.add_object(cube_object());
        scene.apply_spin(5.0);
        assert_eq!(scene.object_mut(id).transform.rotation, Vec3::ZERO);
    }
}
