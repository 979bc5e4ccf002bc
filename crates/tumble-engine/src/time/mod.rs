//! Time subsystem.
//!
//! Provides testable frame timing utilities without coupling to the runtime.
//! One `FrameClock` per window; call `tick()` once per rendered frame.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
