use crate::core::assets::{LoadProgress, TextureHandle, TextureStore};
use crate::core::camera::Camera;
use crate::core::input::NormalizedInputState;
use crate::core::material::GlitchPulse;
use crate::core::scene::SceneRegistry;
use crate::core::sound::SoundController;
use glam::Vec2;

/// Everything the handlers and the frame loop share. One instance per page,
/// handed around as `Rc<RefCell<AppState>>`.
#[derive(Debug)]
pub struct AppState {
    pub input: NormalizedInputState,
    pub camera: Camera,
    pub scene: SceneRegistry,
    pub textures: TextureStore,
    pub glitch_texture: Option<TextureHandle>,
    /// Loaded for the documented overlay slot; no shader samples it yet.
    pub red_overlay_texture: Option<TextureHandle>,
    pub glitch_pulse: GlitchPulse,
    pub sound: SoundController,
    pub progress: LoadProgress,
    /// Viewport size in CSS pixels.
    pub viewport: Vec2,
    /// Elapsed time of the most recent frame, in seconds.
    pub time: f32,
}

impl AppState {
    pub fn new(viewport: Vec2, sound_enabled: bool) -> Self {
        let mut camera = Camera::new(1.0);
        camera.set_viewport(viewport.x, viewport.y);
        Self {
            input: NormalizedInputState::default(),
            camera,
            scene: SceneRegistry::default(),
            textures: TextureStore::default(),
            glitch_texture: None,
            red_overlay_texture: None,
            glitch_pulse: GlitchPulse::default(),
            sound: SoundController::new(sound_enabled),
            progress: LoadProgress::default(),
            viewport,
            time: 0.0,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.viewport = Vec2::new(width, height);
            self.camera.set_viewport(width, height);
        }
    }
}
