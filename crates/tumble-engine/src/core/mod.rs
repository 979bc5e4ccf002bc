//! Core engine-facing contracts.
//!
//! Defines the interface between the runtime (platform loop) and the
//! application, without leaking runtime internals into user code.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
