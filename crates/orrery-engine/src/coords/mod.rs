//! Surface coordinate types.
//!
//! Distinguishes the two sizes every output surface has:
//! - the *display* size, in logical pixels, controlled by the window system
//! - the *drawing buffer* size, in physical pixels, owned by the GPU surface
//!
//! The two are allowed to drift apart between frames; the render loop
//! reconciles them once per frame using [`Viewport::needs_resize`].

mod viewport;

pub use viewport::{BufferSize, Viewport};
