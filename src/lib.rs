#![cfg(target_arch = "wasm32")]
use crate::assets::LoaderContext;
use crate::constants::{CANVAS_ID, SCROLL_EXTENDER_HEIGHT};
use crate::core::assets::CancelToken;
use crate::core::scene::{background_material, build_background_plane, SceneKey};
use crate::core::sound::ToggleView;
use crate::core::{AppState, FRACTURE_PROGRAM};
use crate::events::{InputWiring, SharedAudio};
use crate::overlay::UiOverlayFade;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod audio;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;

thread_local! {
    static TEARDOWN: RefCell<Option<CancelToken>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("fracture starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Stop the frame loop and drop the results of loads still in flight.
#[wasm_bindgen]
pub fn teardown() {
    TEARDOWN.with(|t| {
        if let Some(cancel) = t.borrow_mut().take() {
            cancel.cancel();
        }
    });
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    // Nothing to draw into: give up here.
    let canvas = dom::render_canvas(&document, CANVAS_ID)?;
    if let Err(e) = dom::extend_scroll_height(&document, SCROLL_EXTENDER_HEIGHT) {
        log::warn!("{}", e);
    }

    let state = Rc::new(RefCell::new(AppState::new(
        dom::viewport_size(),
        events::load_preference(),
    )));
    events::wire_canvas_resize(&window, &canvas, state.clone());

    let background = background_material(FRACTURE_PROGRAM);
    state.borrow_mut().scene.merge(
        SceneKey::BackgroundPlane,
        build_background_plane(background.clone()),
    );

    let audio: SharedAudio = Rc::new(RefCell::new(None));
    events::wire_scroll(&window, state.clone());
    events::wire_input_handlers(InputWiring {
        window: window.clone(),
        state: state.clone(),
        audio: audio.clone(),
    });
    events::wire_sound_toggle(&document, state.clone(), audio.clone());
    let enabled = state.borrow().sound.enabled();
    overlay::show_sound_state(&document, ToggleView::for_enabled(enabled));

    let cancel = CancelToken::new();
    TEARDOWN.with(|t| *t.borrow_mut() = Some(cancel.clone()));

    let on_complete: Rc<dyn Fn()> = {
        let document = document.clone();
        let state = state.clone();
        let audio = audio.clone();
        Rc::new(move || {
            overlay::finish_loading(&document);
            events::wire_unlock(&document, state.clone(), audio.clone());
            events::wire_visibility(&document, audio.clone());
            spawn_local(events::init_audio(audio.clone()));
        })
    };
    assets::spawn_loads(
        LoaderContext {
            state: state.clone(),
            document: document.clone(),
            cancel: cancel.clone(),
            on_complete,
        },
        background,
    );

    let gpu = frame::init_gpu(&canvas).await;
    let frame_ctx = frame::FrameContext::new(state, gpu, canvas, UiOverlayFade::new(&document));
    frame::start_loop(Rc::new(RefCell::new(frame_ctx)), cancel);

    // pick up a restored scroll position
    dom::dispatch_scroll();
    Ok(())
}
