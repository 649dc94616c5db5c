use crate::audio::{self, AudioEngine};
use crate::constants::SOUND_TOGGLE_ID;
use crate::core::assets::{AMBIENT_AUDIO_PATH, GLITCH_AUDIO_PATH};
use crate::core::sound::{parse_stored_flag, stored_value, AudioCommand, ToggleView, SOUND_ENABLED_KEY};
use crate::core::AppState;
use crate::{dom, overlay};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// `None` until the audio backend is up, and for good if it never comes up.
pub type SharedAudio = Rc<RefCell<Option<AudioEngine>>>;

fn storage() -> Option<web::Storage> {
    web::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Stored sound preference; missing or unreadable storage means enabled.
pub fn load_preference() -> bool {
    let stored = storage().and_then(|s| s.get_item(SOUND_ENABLED_KEY).ok().flatten());
    parse_stored_flag(stored.as_deref())
}

fn persist_preference(enabled: bool) {
    match storage() {
        Some(s) => {
            if let Err(e) = s.set_item(SOUND_ENABLED_KEY, stored_value(enabled)) {
                log::warn!("[sound] could not persist preference: {:?}", e);
            }
        }
        None => log::warn!("[sound] localStorage unavailable"),
    }
}

pub fn run_commands(audio: &SharedAudio, cmds: impl IntoIterator<Item = AudioCommand>) {
    for cmd in cmds {
        if let AudioCommand::Persist(enabled) = cmd {
            persist_preference(enabled);
            continue;
        }
        if let Some(engine) = audio.borrow_mut().as_mut() {
            engine.execute(cmd);
        }
    }
}

pub fn wire_sound_toggle(document: &web::Document, state: Rc<RefCell<AppState>>, audio: SharedAudio) {
    let doc = document.clone();
    dom::add_click_listener(document, SOUND_TOGGLE_ID, move || {
        let (cmds, enabled) = {
            let mut st = state.borrow_mut();
            let cmds = st.sound.toggle();
            (cmds, st.sound.enabled())
        };
        log::info!("[sound] toggled {}", if enabled { "on" } else { "off" });
        run_commands(&audio, cmds);
        overlay::show_sound_state(&doc, ToggleView::for_enabled(enabled));
    });
}

/// Browsers keep audio locked until a user gesture; the first click or touch
/// anywhere unlocks it.
pub fn wire_unlock(document: &web::Document, state: Rc<RefCell<AppState>>, audio: SharedAudio) {
    for event in ["click", "touchstart"] {
        let state = state.clone();
        let audio = audio.clone();
        dom::listen_once(document, event, move || {
            if let Some(engine) = audio.borrow().as_ref() {
                engine.resume();
            }
            let cmds = state.borrow_mut().sound.unlock();
            run_commands(&audio, cmds);
        });
    }
}

/// Suspend the audio context while the tab is hidden.
pub fn wire_visibility(document: &web::Document, audio: SharedAudio) {
    let doc = document.clone();
    dom::listen(document, "visibilitychange", move |_: web::Event| {
        let guard = audio.borrow();
        let Some(engine) = guard.as_ref() else {
            return;
        };
        match doc.visibility_state() {
            web::VisibilityState::Hidden => engine.suspend(),
            _ => engine.resume(),
        }
    });
}

/// Create the audio backend and decode both clips. Failures leave the piece
/// silent; nothing else depends on audio.
pub async fn init_audio(audio: SharedAudio) {
    let engine = match AudioEngine::new() {
        Ok(e) => e,
        Err(e) => {
            log::warn!("[sound] {}", e);
            return;
        }
    };
    let ctx = engine.context().clone();
    *audio.borrow_mut() = Some(engine);

    match audio::decode(&ctx, AMBIENT_AUDIO_PATH).await {
        Ok(buf) => {
            if let Some(engine) = audio.borrow_mut().as_mut() {
                engine.set_ambient_buffer(buf);
            }
        }
        Err(e) => log::warn!("[sound] {}", e),
    }
    match audio::decode(&ctx, GLITCH_AUDIO_PATH).await {
        Ok(buf) => {
            if let Some(engine) = audio.borrow_mut().as_mut() {
                engine.set_glitch_buffer(buf);
            }
        }
        Err(e) => log::warn!("[sound] {}", e),
    }
}
