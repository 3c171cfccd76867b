//! Scene types.
//!
//! Responsibilities:
//! - store renderable objects in a flat, insertion-ordered list (not a graph)
//! - hold the lights and background color a frame is shaded with
//! - apply time-based spin animation to object transforms
//!
//! Mesh data and materials are plain values owned by the objects; the
//! renderer reads them, it never mutates them.

mod color;
mod light;
mod list;
mod material;
mod object;

pub use color::Color;
pub use light::{DirectionalLight, MAX_LIGHTS};
pub use list::Scene;
pub use material::Material;
pub use object::{ObjectId, SceneObject, Transform};
