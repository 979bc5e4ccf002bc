use tumble_engine::core::{App, AppControl, FrameCtx};
use tumble_engine::input::InputEvent;
use tumble_engine::render::{ProgramSource, ShapeRenderer};

use crate::composer::{compose_frame, SceneIds};
use crate::mode::{self, DemoState, Dispatch};
use crate::scene;

/// GPU-side resources, created on the first frame once a device exists.
struct GpuScene {
    renderer: ShapeRenderer,
    ids: SceneIds,
}

/// The demo application: mode state plus the shape renderer.
#[derive(Default)]
pub struct TumbleApp {
    state: DemoState,
    scene: Option<GpuScene>,
}

impl TumbleApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DemoState {
        &self.state
    }
}

impl App for TumbleApp {
    fn on_input(&mut self, event: &InputEvent) -> AppControl {
        match self.state.dispatch(event) {
            Dispatch::Exit => AppControl::Exit,
            Dispatch::ModeChanged(_) | Dispatch::Ignored => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.state.should_close() {
            return AppControl::Exit;
        }

        let scene = self.scene.get_or_insert_with(|| {
            let rctx = ctx.render_ctx();
            let mut renderer = ShapeRenderer::new(&rctx, &ProgramSource::shape());
            let ids = SceneIds {
                triangle: renderer.upload(&rctx, &scene::triangle()),
                rectangle: renderer.upload(&rctx, &scene::rectangle()),
            };

            // Window and GPU are up; only now is the demo usable.
            mode::log_controls();
            GpuScene { renderer, ids }
        });

        let list = compose_frame(self.state.mode(), ctx.elapsed(), &scene.ids);
        let renderer = &mut scene.renderer;

        ctx.present(|rctx, target| renderer.render(rctx, target, &list))
    }

    fn on_exit(&mut self) {
        log::debug!("exiting in {}", self.state().mode());

        // Geometry buffers and program go before the GPU context.
        if self.scene.take().is_some() {
            log::debug!("scene resources released");
        }
    }
}
