// Browser-side constants. Scene motion constants live in `core/constants.rs`
// so the host tests can reach them.

// DOM elements
pub const CANVAS_ID: &str = "fractureCanvas";
pub const LOADING_OVERLAY_ID: &str = "loading-overlay";
pub const PROGRESS_PERCENT_ID: &str = "progress-percent";
pub const UI_OVERLAY_ID: &str = "ui-overlay";
pub const SOUND_TOGGLE_ID: &str = "soundToggle";
pub const SOUND_STATUS_SELECTOR: &str = ".sound-status";
pub const SOUND_ICON_SELECTOR: &str = "i";
pub const HIDDEN_CLASS: &str = "hidden";

// Invisible spacer that gives the page its scroll length
pub const SCROLL_EXTENDER_HEIGHT: &str = "500vh";

// Rendering
pub const MSAA_SAMPLES: u32 = 4;
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

// Audio levels
pub const AMBIENT_VOLUME: f32 = 0.5;
pub const GLITCH_VOLUME: f32 = 0.8;
