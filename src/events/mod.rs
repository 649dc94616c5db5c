pub mod pointer;
pub mod scroll;
pub mod sound;

pub use pointer::{wire_input_handlers, InputWiring};
pub use scroll::{wire_canvas_resize, wire_scroll};
pub use sound::{
    init_audio, load_preference, run_commands, wire_sound_toggle, wire_unlock, wire_visibility,
    SharedAudio,
};
