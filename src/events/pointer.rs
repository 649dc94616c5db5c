use super::sound::{run_commands, SharedAudio};
use crate::core::input::cursor_ndc;
use crate::core::AppState;
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub window: web::Window,
    pub state: Rc<RefCell<AppState>>,
    pub audio: SharedAudio,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
}

fn wire_pointermove(w: &InputWiring) {
    let state = w.state.clone();
    dom::listen(&w.window, "pointermove", move |ev: web::PointerEvent| {
        let size = dom::viewport_size();
        let ndc = cursor_ndc(ev.client_x() as f32, ev.client_y() as f32, size.x, size.y);
        state.borrow_mut().input.set_cursor(ndc);
    });
}

fn wire_pointerdown(w: &InputWiring) {
    let state = w.state.clone();
    let audio = w.audio.clone();
    dom::listen(&w.window, "pointerdown", move |_: web::PointerEvent| {
        let cmd = {
            let mut st = state.borrow_mut();
            let now = st.time;
            st.glitch_pulse.trigger(now);
            st.sound.pointer_down()
        };
        run_commands(&audio, cmd);
    });
}
