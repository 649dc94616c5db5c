use crate::core::FractureError;
use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Optional element lookup; a miss is logged and reported as `None`.
pub fn optional_element(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    let el = document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<web::HtmlElement>().ok());
    if el.is_none() {
        log::warn!("{}", FractureError::missing(id, false));
    }
    el
}

pub fn render_canvas(
    document: &web::Document,
    id: &str,
) -> Result<web::HtmlCanvasElement, FractureError> {
    document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<web::HtmlCanvasElement>().ok())
        .ok_or_else(|| FractureError::missing(id, true))
}

/// Window inner size in CSS pixels.
pub fn viewport_size() -> Vec2 {
    let Some(w) = web::window() else {
        return Vec2::ONE;
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    Vec2::new(width as f32, height as f32)
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Attach a listener that lives for the rest of the page.
pub fn listen<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Attach a listener the browser drops after its first call.
pub fn listen_once(target: &web::EventTarget, event: &str, handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
    let opts = web::AddEventListenerOptions::new();
    opts.set_once(true);
    _ = target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &opts,
    );
    closure.forget();
}

pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        listen(&el, "click", move |_: web::Event| handler());
    }
}

/// Tall invisible spacer so the page has something to scroll through.
pub fn extend_scroll_height(document: &web::Document, height: &str) -> Result<(), FractureError> {
    let body = document
        .body()
        .ok_or_else(|| FractureError::missing("body", false))?;
    let spacer = document
        .create_element("div")
        .map_err(|e| FractureError::missing(format!("scroll extender ({:?})", e), false))?;
    _ = spacer.set_attribute(
        "style",
        &format!("height:{height};width:1px;position:absolute;top:0;left:0;z-index:0"),
    );
    _ = body.append_child(&spacer);
    Ok(())
}

/// Fire a synthetic window `scroll` so handlers see the initial position.
pub fn dispatch_scroll() {
    if let Some(w) = web::window() {
        if let Ok(ev) = web::Event::new("scroll") {
            _ = w.dispatch_event(&ev);
        }
    }
}
