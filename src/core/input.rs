use crate::core::constants::{
    BACKGROUND_RED_SHIFT, BLACK, CAMERA_DOLLY_SPAN, CAMERA_START_Z, CAMERA_YAW_SPAN,
    OVERLAY_FADE_RATE, RED,
};
use glam::{Vec2, Vec3};

/// Scroll depth and pointer position, normalized.
///
/// Written by the scroll/pointer handlers, read by everything else.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NormalizedInputState {
    pub scroll_progress: f32,
    pub cursor: Vec2,
}

impl NormalizedInputState {
    pub fn set_scroll_progress(&mut self, progress: f32) {
        self.scroll_progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    pub fn set_cursor(&mut self, ndc: Vec2) {
        if ndc.is_finite() {
            self.cursor = ndc.clamp(Vec2::splat(-1.0), Vec2::ONE);
        }
    }
}

/// Progress of the page scroll from "top at top" to "bottom at bottom".
#[inline]
pub fn scroll_progress(scroll_top: f32, scroll_height: f32, viewport_height: f32) -> f32 {
    let scrollable = scroll_height - viewport_height;
    if scrollable <= 0.0 || !scrollable.is_finite() {
        return 0.0;
    }
    (scroll_top / scrollable).clamp(0.0, 1.0)
}

/// Pixel position to normalized device coordinates, y pointing up.
#[inline]
pub fn cursor_ndc(px: f32, py: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new((px / width) * 2.0 - 1.0, -(py / height) * 2.0 + 1.0)
}

/// Effects that follow the scroll position directly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollEffects {
    pub camera_z: f32,
    pub camera_yaw: f32,
    pub overlay_opacity: f32,
    pub background_color: Vec3,
}

impl ScrollEffects {
    pub fn at(progress: f32) -> Self {
        Self {
            camera_z: CAMERA_START_Z - progress * CAMERA_DOLLY_SPAN,
            camera_yaw: progress * CAMERA_YAW_SPAN,
            overlay_opacity: (1.0 - progress * OVERLAY_FADE_RATE).max(0.0),
            // always from black, so this never accumulates
            background_color: BLACK.lerp(RED, progress * BACKGROUND_RED_SHIFT),
        }
    }
}
