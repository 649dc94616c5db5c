use crate::core::assets::CancelToken;
use crate::core::camera::FrameClock;
use crate::core::update::update_frame;
use crate::core::AppState;
use crate::overlay::UiOverlayFade;
use crate::render;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub state: Rc<RefCell<AppState>>,
    pub gpu: Option<render::GpuState<'a>>,
    pub canvas: web::HtmlCanvasElement,
    pub overlay: UiOverlayFade,
    pub clock: FrameClock,
    pub rng: StdRng,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        state: Rc<RefCell<AppState>>,
        gpu: Option<render::GpuState<'a>>,
        canvas: web::HtmlCanvasElement,
        overlay: UiOverlayFade,
    ) -> Self {
        Self {
            state,
            gpu,
            canvas,
            overlay,
            clock: FrameClock::new(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn frame(&mut self) {
        let t = self.clock.tick();
        let mut st = self.state.borrow_mut();
        let out = update_frame(&mut st, t.elapsed, &mut self.rng);
        self.overlay.apply(out.overlay_opacity);

        let Some(g) = &mut self.gpu else {
            return;
        };
        for (handle, data) in st.textures.drain_pending() {
            g.upload_texture(handle, &data);
        }
        for key in st.scene.take_pending() {
            if let Some(object) = st.scene.get(key) {
                g.prepare(key, object);
            }
        }
        g.resize_if_needed(self.canvas.width(), self.canvas.height());
        match g.render(&st, out.clear_color) {
            Ok(()) => {}
            // reconfigured on the next resize check; skip this frame
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {}
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Drive `frame_ctx` from requestAnimationFrame until `cancel` fires.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>, cancel: CancelToken) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if cancel.is_cancelled() {
            log::info!("frame loop stopped");
            return;
        }
        frame_ctx.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
