use crate::core::constants::{
    BUILDING_BASE_SCALE, BUILDING_JITTER, BUILDING_RISE, BUILDING_SHRINK, BUILDING_START,
    BUILDING_TINT_RATE, RED, TEXT_FADE, TEXT_SLIDE, TEXT_START,
};
use crate::core::input::ScrollEffects;
use crate::core::material::{
    fracture_color, update_uniforms, FrameUniforms, UniformValue, U_COLOR, U_GLITCH_PULSE,
    U_GLITCH_TEXTURE, U_RED_OVERLAY_TEXTURE,
};
use crate::core::scene::SceneKey;
use crate::core::state::AppState;
use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildingPose {
    pub rotation_y: f32,
    pub position_y: f32,
    /// Uniform scale before jitter.
    pub base_scale: f32,
}

pub fn building_pose(progress: f32) -> BuildingPose {
    BuildingPose {
        rotation_y: progress * TAU,
        position_y: BUILDING_START.y + progress * BUILDING_RISE,
        base_scale: BUILDING_BASE_SCALE * (1.0 - progress * BUILDING_SHRINK),
    }
}

/// Base scale plus an independent random offset per axis in
/// `[-0.2p, 0.2p]`. Deliberately noisy; only the bounds are stable.
pub fn building_scale_jitter(progress: f32, rng: &mut impl Rng) -> Vec3 {
    let base = building_pose(progress).base_scale;
    let range = (progress * BUILDING_JITTER).abs();
    let mut axis = || base + rng.gen_range(-range..=range);
    Vec3::new(axis(), axis(), axis())
}

/// One frame of the building's tint drift. Relative to the current colour,
/// so holding a scroll position keeps pulling toward red.
#[inline]
pub fn tint_toward_red(color: Vec3, progress: f32) -> Vec3 {
    color.lerp(RED, (progress * BUILDING_TINT_RATE).clamp(0.0, 1.0))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextPose {
    pub position_x: f32,
    pub rotation_z: f32,
    pub opacity: f32,
}

pub fn text_pose(progress: f32) -> TextPose {
    TextPose {
        position_x: TEXT_START.x - progress * TEXT_SLIDE,
        rotation_z: progress * PI,
        opacity: (1.0 - progress * TEXT_FADE).clamp(0.0, 1.0),
    }
}

/// What the browser layer applies outside the scene graph after a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameOutput {
    pub overlay_opacity: f32,
    /// Colour behind the background plane, matching its centre.
    pub clear_color: Vec3,
}

/// Apply one frame of scroll/cursor/time driven changes from a single
/// snapshot of the input state. Absent scene objects are skipped.
pub fn update_frame(state: &mut AppState, time: f32, rng: &mut impl Rng) -> FrameOutput {
    state.time = time;
    let input = state.input;
    let progress = input.scroll_progress;
    let fx = ScrollEffects::at(progress);

    state.camera.position.z = fx.camera_z;
    state.camera.yaw = fx.camera_yaw;

    let frame = FrameUniforms {
        time,
        scroll_progress: progress,
        mouse: input.cursor,
        resolution: state.viewport,
    };
    let pulse = state.glitch_pulse.value(time);
    let glitch = state.glitch_texture;
    let red_overlay = state.red_overlay_texture;

    if let Some(bg) = state.scene.get_mut(SceneKey::BackgroundPlane) {
        for m in bg.shader_materials_mut() {
            update_uniforms(m, &frame);
            m.uniforms
                .set_if_present(U_COLOR, UniformValue::Color(fx.background_color));
            m.uniforms
                .set_if_present(U_GLITCH_PULSE, UniformValue::Float(pulse));
            if let Some(h) = glitch {
                m.uniforms.attach_texture_once(U_GLITCH_TEXTURE, h);
            }
            if let Some(h) = red_overlay {
                m.uniforms.attach_texture_once(U_RED_OVERLAY_TEXTURE, h);
            }
        }
    }

    if let Some(building) = state.scene.get_mut(SceneKey::Building) {
        let pose = building_pose(progress);
        building.transform.rotation.y = pose.rotation_y;
        building.transform.position.y = pose.position_y;
        building.transform.scale = building_scale_jitter(progress, rng);
        for m in building.shader_materials_mut() {
            update_uniforms(m, &frame);
            if let Some(c) = m.uniforms.color(U_COLOR) {
                m.uniforms
                    .set(U_COLOR, UniformValue::Color(tint_toward_red(c, progress)));
            }
            if let Some(h) = glitch {
                m.uniforms.attach_texture_once(U_GLITCH_TEXTURE, h);
            }
        }
    }

    if let Some(text) = state.scene.get_mut(SceneKey::UtopianText) {
        let pose = text_pose(progress);
        text.transform.position.x = pose.position_x;
        text.transform.rotation.z = pose.rotation_z;
        for m in text.basic_materials_mut() {
            m.opacity = pose.opacity;
        }
    }

    let center = fracture_color(
        fx.background_color,
        time,
        progress,
        pulse,
        Vec2::splat(0.5),
        |_| Vec3::ZERO,
    );
    FrameOutput {
        overlay_opacity: fx.overlay_opacity,
        clear_color: center.truncate(),
    }
}
