use crate::core::input::scroll_progress;
use crate::core::AppState;
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Track the document scroll position as normalized progress.
pub fn wire_scroll(window: &web::Window, state: Rc<RefCell<AppState>>) {
    let win = window.clone();
    dom::listen(window, "scroll", move |_: web::Event| {
        let Some(root) = win.document().and_then(|d| d.document_element()) else {
            return;
        };
        let top = win.scroll_y().unwrap_or(0.0) as f32;
        let viewport_h = win
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32;
        let p = scroll_progress(top, root.scroll_height() as f32, viewport_h);
        state.borrow_mut().input.set_scroll_progress(p);
    });
}

/// Keep the canvas backing store and camera aspect in step with the window.
pub fn wire_canvas_resize(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    state: Rc<RefCell<AppState>>,
) {
    dom::sync_canvas_backing_size(canvas);
    let canvas = canvas.clone();
    dom::listen(window, "resize", move |_: web::Event| {
        dom::sync_canvas_backing_size(&canvas);
        let size = dom::viewport_size();
        state.borrow_mut().resize(size.x, size.y);
    });
}
