use crate::input::InputEvent;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// Per loop iteration the runtime first delivers every queued input event
/// through [`App::on_input`], in arrival order, then renders one frame through
/// [`App::on_frame`]. Returning [`AppControl::Exit`] from either stops the loop
/// before any further frame is rendered.
pub trait App {
    /// Called once per queued input event, before the frame.
    fn on_input(&mut self, event: &InputEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called once when the loop ends, while the GPU context is still alive.
    ///
    /// Release GPU resources here so they go before the context and window.
    fn on_exit(&mut self) {}
}
