//! Tumble engine crate.
//!
//! Platform + GPU runtime pieces for the tumble demo: window loop, input queue,
//! frame clock, a small column-major matrix module and a single-program shape
//! renderer driven by recorded frame lists.

pub mod core;
pub mod device;
pub mod input;
pub mod math;
pub mod render;
pub mod time;
pub mod window;

pub mod logging;
