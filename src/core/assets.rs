use crate::core::error::FractureError;
use std::cell::Cell;
use std::rc::Rc;

// Fixed asset paths, relative to the page.
pub const BUILDING_MODEL_PATH: &str = "src/models/building_fragment.gltf";
pub const TEXT_TEXTURE_PATH: &str = "assets/textures/utopian_lie_text.png";
pub const GLITCH_TEXTURE_PATH: &str = "assets/textures/glitch_pattern.jpg";
pub const RED_OVERLAY_TEXTURE_PATH: &str = "assets/textures/red_overlay.png";
pub const AMBIENT_AUDIO_PATH: &str = "assets/audio/ambient_drone.mp3";
pub const GLITCH_AUDIO_PATH: &str = "assets/audio/static_burst.mp3";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Texture,
    Model,
    Audio,
}

/// An asset the page fetches, and whether it counts toward the loading screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssetEntry {
    pub path: &'static str,
    pub kind: AssetKind,
    pub tracked: bool,
}

/// Everything the experience loads. Audio is fetched after the visuals settle
/// and does not hold up the loading screen.
pub const ASSET_MANIFEST: [AssetEntry; 6] = [
    AssetEntry { path: GLITCH_TEXTURE_PATH, kind: AssetKind::Texture, tracked: true },
    AssetEntry { path: RED_OVERLAY_TEXTURE_PATH, kind: AssetKind::Texture, tracked: true },
    AssetEntry { path: TEXT_TEXTURE_PATH, kind: AssetKind::Texture, tracked: true },
    AssetEntry { path: BUILDING_MODEL_PATH, kind: AssetKind::Model, tracked: true },
    AssetEntry { path: AMBIENT_AUDIO_PATH, kind: AssetKind::Audio, tracked: false },
    AssetEntry { path: GLITCH_AUDIO_PATH, kind: AssetKind::Audio, tracked: false },
];

pub fn tracked_asset_count() -> usize {
    ASSET_MANIFEST.iter().filter(|a| a.tracked).count()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureWrap {
    Clamp,
    Repeat,
}

/// Decoded RGBA8 pixels plus the sampler wrap mode.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
    pub wrap: TextureWrap,
}

impl TextureData {
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: rgba.to_vec(),
            wrap: TextureWrap::Clamp,
        }
    }

    /// Tile instead of clamping when sampled outside [0, 1].
    pub fn repeating(mut self) -> Self {
        self.wrap = TextureWrap::Repeat;
        self
    }
}

pub fn decode_texture(path: &str, bytes: &[u8]) -> Result<TextureData, FractureError> {
    let img = image::load_from_memory(bytes).map_err(|e| FractureError::decode(path, e))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(FractureError::decode(path, "empty image"));
    }
    Ok(TextureData {
        width,
        height,
        rgba: rgba.into_raw(),
        wrap: TextureWrap::Clamp,
    })
}

/// Owns decoded textures until the GPU picks them up.
#[derive(Debug, Default)]
pub struct TextureStore {
    next: u32,
    pending: Vec<(TextureHandle, TextureData)>,
}

impl TextureStore {
    pub fn insert(&mut self, data: TextureData) -> TextureHandle {
        let handle = TextureHandle(self.next);
        self.next += 1;
        self.pending.push((handle, data));
        handle
    }

    pub fn drain_pending(&mut self) -> Vec<(TextureHandle, TextureData)> {
        std::mem::take(&mut self.pending)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressEvent {
    pub percent: u32,
    /// Set on the one event after which every registered item has settled.
    pub complete: bool,
}

/// Aggregate progress over every tracked load.
///
/// Failed items still count as settled so the page can continue in a
/// degraded state instead of stalling behind the loading screen.
#[derive(Debug, Default)]
pub struct LoadProgress {
    total: u32,
    loaded: u32,
    failures: Vec<FractureError>,
    completed: bool,
}

impl LoadProgress {
    pub fn register(&mut self) {
        self.total += 1;
    }

    pub fn register_many(&mut self, n: u32) {
        self.total += n;
    }

    pub fn item_loaded(&mut self) -> ProgressEvent {
        self.loaded += 1;
        self.event()
    }

    pub fn item_failed(&mut self, err: FractureError) -> ProgressEvent {
        self.failures.push(err);
        self.event()
    }

    pub fn settled(&self) -> u32 {
        self.loaded + self.failures.len() as u32
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn failures(&self) -> &[FractureError] {
        &self.failures
    }

    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        ((self.settled() as f32 / self.total as f32) * 100.0).round() as u32
    }

    fn event(&mut self) -> ProgressEvent {
        let complete = !self.completed && self.total > 0 && self.settled() >= self.total;
        if complete {
            self.completed = true;
        }
        ProgressEvent {
            percent: self.percent(),
            complete,
        }
    }
}

/// Shared cancellation flag for loader tasks and the frame loop.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}
