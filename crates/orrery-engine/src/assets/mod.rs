//! Asynchronous asset loading.
//!
//! Loading is a two-stage pipeline:
//! 1. a worker thread reads and parses the asset, producing a
//!    `Result<T, AssetError>`
//! 2. the render loop polls the returned [`Pending`] handle once per frame
//!    and runs the synchronous build step only on success
//!
//! The scene is never touched from the worker; results cross a single-shot
//! channel. Dropping a [`Pending`] handle cancels interest — the worker's
//! result is discarded on send and no build step runs.

mod loader;

pub use loader::{AssetError, Pending, PendingFont, load_font};
