use glam::Vec3;

// Scene motion and layout constants shared by the updater and the builders.

// Camera
pub const CAMERA_FOV_Y_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_START_Z: f32 = 5.0;
pub const CAMERA_DOLLY_SPAN: f32 = 10.0; // z = START_Z - progress * SPAN
pub const CAMERA_YAW_SPAN: f32 = 0.5; // radians at full scroll

// UI overlay fades twice as fast as the scroll
pub const OVERLAY_FADE_RATE: f32 = 2.0;

// Colours
pub const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
pub const BLACK: Vec3 = Vec3::ZERO;
pub const BUILDING_BASE_COLOR: Vec3 = Vec3::new(0xAA as f32 / 255.0, 0xAA as f32 / 255.0, 0xAA as f32 / 255.0);
pub const BACKGROUND_RED_SHIFT: f32 = 0.9; // background lerps black -> red by progress * this
pub const BUILDING_TINT_RATE: f32 = 0.9; // per-frame lerp toward red by progress * this

// Background plane
pub const BACKGROUND_SIZE: f32 = 20.0;
pub const BACKGROUND_Z: f32 = -10.0;

// Building
pub const BUILDING_BASE_SCALE: f32 = 0.1;
pub const BUILDING_SHRINK: f32 = 0.5; // scale factor 1 - progress * SHRINK
pub const BUILDING_JITTER: f32 = 0.2; // jitter range +/- progress * JITTER
pub const BUILDING_START: Vec3 = Vec3::new(0.0, -2.0, -5.0);
pub const BUILDING_RISE: f32 = 5.0;
// Fallback box when the model cannot be loaded
pub const FALLBACK_BUILDING_SIZE: Vec3 = Vec3::new(1.0, 4.0, 1.0);

// Floating text plane
pub const TEXT_WIDTH: f32 = 5.0;
pub const TEXT_HEIGHT: f32 = 1.0;
pub const TEXT_START: Vec3 = Vec3::new(3.0, 2.0, -2.0);
pub const TEXT_SLIDE: f32 = 6.0; // x = START.x - progress * SLIDE
pub const TEXT_FADE: f32 = 0.8;
pub const TEXT_ALPHA_TEST: f32 = 0.5;

// Shader formula
pub const PULSE_FREQ: f32 = 0.5;
pub const PULSE_DEPTH: f32 = 0.1;
pub const GLITCH_GAIN: f32 = 2.0; // glitch intensity = progress * GAIN
pub const GLITCH_WAVE_FREQ: f32 = 10.0;
pub const GLITCH_WAVE_SPEED: f32 = 5.0;
pub const GLITCH_OFFSET_SCALE: f32 = 0.1;
pub const GLITCH_BLEND: f32 = 0.5;
pub const RED_BLEED: f32 = 0.8;

// Pointer-down glitch burst: up then back down (yoyo)
pub const GLITCH_PULSE_PEAK: f32 = 0.5;
pub const GLITCH_PULSE_HALF_SEC: f32 = 0.1;
