use crate::constants::{
    HIDDEN_CLASS, LOADING_OVERLAY_ID, PROGRESS_PERCENT_ID, SOUND_ICON_SELECTOR,
    SOUND_STATUS_SELECTOR, SOUND_TOGGLE_ID, UI_OVERLAY_ID,
};
use crate::core::sound::ToggleView;
use web_sys as web;

#[inline]
pub fn set_progress(document: &web::Document, percent: u32) {
    if let Some(el) = document.get_element_by_id(PROGRESS_PERCENT_ID) {
        el.set_text_content(Some(&format!("{}%", percent)));
    }
}

/// Loading finished: drop the loading screen and bring the UI in.
pub fn finish_loading(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(LOADING_OVERLAY_ID) {
        _ = el.class_list().add_1(HIDDEN_CLASS);
    }
    if let Some(el) = document.get_element_by_id(UI_OVERLAY_ID) {
        _ = el.class_list().remove_1(HIDDEN_CLASS);
    }
}

/// Scroll fade of the UI overlay. Only touches the DOM when the value moves.
pub struct UiOverlayFade {
    element: Option<web::HtmlElement>,
    last: Option<f32>,
}

impl UiOverlayFade {
    pub fn new(document: &web::Document) -> Self {
        Self {
            element: crate::dom::optional_element(document, UI_OVERLAY_ID),
            last: None,
        }
    }

    pub fn apply(&mut self, opacity: f32) {
        let Some(el) = &self.element else {
            return;
        };
        if self.last.is_some_and(|prev| (prev - opacity).abs() < 1e-4) {
            return;
        }
        _ = el.style().set_property("opacity", &format!("{:.4}", opacity));
        self.last = Some(opacity);
    }
}

/// Sync the sound toggle's status text and icon with `view`.
pub fn show_sound_state(document: &web::Document, view: ToggleView) {
    let Some(toggle) = document.get_element_by_id(SOUND_TOGGLE_ID) else {
        return;
    };
    if let Ok(Some(status)) = toggle.query_selector(SOUND_STATUS_SELECTOR) {
        status.set_text_content(Some(view.status));
    }
    if let Ok(Some(icon)) = toggle.query_selector(SOUND_ICON_SELECTOR) {
        let cl = icon.class_list();
        _ = cl.remove_1(view.icon_remove);
        _ = cl.add_1(view.icon_add);
    }
}
