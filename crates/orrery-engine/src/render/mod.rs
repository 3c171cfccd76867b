//! GPU rendering subsystem.
//!
//! The mesh renderer consumes a `scene::Scene` + `camera::PerspectiveCamera`
//! pair and issues wgpu commands. It owns its GPU resources (pipelines,
//! uniform buffers, cached mesh buffers); scenes stay plain data.

mod ctx;
mod mesh;

pub use ctx::{RenderCtx, RenderTarget};
pub use mesh::MeshRenderer;
