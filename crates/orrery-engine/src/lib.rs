//! Orrery engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the demo
//! binaries: windowing, frame timing, surface-size reconciliation, scene and
//! geometry construction, and a wgpu mesh renderer.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod camera;
pub mod scene;
pub mod geometry;
pub mod text;
pub mod assets;
pub mod render;
