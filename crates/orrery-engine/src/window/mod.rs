//! Platform window + event loop runtime.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
