//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, queues translated input, and drives
//! one dispatch-then-render iteration per redraw.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
