//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Runtime code translates platform events into `InputEvent`s and queues them
//! for the application.

pub(crate) mod platform;
mod queue;
mod types;

pub use queue::EventQueue;
pub use types::{InputEvent, Key, KeyState, Modifiers};
