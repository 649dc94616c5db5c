// Host-side tests for the per-frame updater.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code, unused_imports)]
mod core {
    pub mod assets {
        include!("../src/core/assets.rs");
    }
    pub mod camera {
        include!("../src/core/camera.rs");
    }
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod error {
        include!("../src/core/error.rs");
    }
    pub mod geometry {
        include!("../src/core/geometry.rs");
    }
    pub mod input {
        include!("../src/core/input.rs");
    }
    pub mod material {
        include!("../src/core/material.rs");
    }
    pub mod model {
        include!("../src/core/model.rs");
    }
    pub mod scene {
        include!("../src/core/scene.rs");
    }
    pub mod sound {
        include!("../src/core/sound.rs");
    }
    pub mod state {
        include!("../src/core/state.rs");
    }
    pub mod update {
        include!("../src/core/update.rs");
    }
}

use crate::core::assets::{TextureData, TextureHandle};
use crate::core::constants::*;
use crate::core::material::*;
use crate::core::scene::*;
use crate::core::update::*;
use crate::core::state::AppState;
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::PI;

const PROGRAM: ShaderProgram = ShaderProgram {
    label: "test",
    source: "",
    vertex_entry: "vs_main",
    fragment_entry: "fs_main",
};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

fn full_state(progress: f32) -> AppState {
    let mut st = AppState::new(Vec2::new(1280.0, 720.0), true);
    let bg = background_material(PROGRAM);
    st.scene
        .merge(SceneKey::BackgroundPlane, build_background_plane(bg.clone()));
    st.scene
        .merge(SceneKey::Building, build_fallback_building(&bg));
    st.scene
        .merge(SceneKey::UtopianText, build_text_plane(TextureHandle(0)));
    st.input.set_scroll_progress(progress);
    st
}

fn building_color(st: &AppState) -> Vec3 {
    st.scene
        .get(SceneKey::Building)
        .and_then(|b| b.nodes[0].material.as_shader())
        .and_then(|m| m.uniforms.color(U_COLOR))
        .expect("building colour")
}

#[test]
fn half_scroll_scenario() {
    let mut st = full_state(0.5);
    let mut rng = StdRng::seed_from_u64(7);
    let out = update_frame(&mut st, 1.0, &mut rng);

    let pose = building_pose(0.5);
    assert!(approx(pose.rotation_y, PI));
    assert!(approx(pose.position_y, 0.5));
    assert!(approx(pose.base_scale, 0.075));

    let b = st.scene.get(SceneKey::Building).expect("building");
    assert!(approx(b.transform.rotation.y, PI));
    assert!(approx(b.transform.position.y, 0.5));
    for s in b.transform.scale.to_array() {
        assert!((0.075 - 0.1 - 1e-6..=0.075 + 0.1 + 1e-6).contains(&s), "scale {s}");
    }
    // one frame of tint: lerp by 0.45
    let expected = BUILDING_BASE_COLOR.lerp(RED, 0.45);
    assert!(building_color(&st).abs_diff_eq(expected, 1e-6));

    assert!(approx(st.camera.position.z, 0.0));
    assert!(approx(st.camera.yaw, 0.25));
    assert_eq!(out.overlay_opacity, 0.0);

    let t = st.scene.get(SceneKey::UtopianText).expect("text");
    assert!(approx(t.transform.position.x, 0.0));
    assert!(approx(t.transform.rotation.z, PI / 2.0));
    assert!(matches!(
        t.nodes[0].material,
        ObjectMaterial::Basic(m) if approx(m.opacity, 0.6)
    ));
}

#[test]
fn building_scale_jitter_stays_in_bounds() {
    let mut rng = StdRng::seed_from_u64(42);
    for step in 0..=20 {
        let p = step as f32 / 20.0;
        let base = building_pose(p).base_scale;
        let range = 0.2 * p;
        for _ in 0..50 {
            let s = building_scale_jitter(p, &mut rng);
            for axis in s.to_array() {
                assert!(axis >= base - range - 1e-6 && axis <= base + range + 1e-6);
            }
        }
    }
}

#[test]
fn no_jitter_at_top_of_page() {
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(building_scale_jitter(0.0, &mut rng), Vec3::splat(0.1));
}

#[test]
fn tint_ratchets_toward_red_without_overshooting() {
    let mut st = full_state(0.3);
    let mut rng = StdRng::seed_from_u64(3);
    let mut prev = building_color(&st);
    for frame in 0..30 {
        update_frame(&mut st, frame as f32 / 60.0, &mut rng);
        let c = building_color(&st);
        let d_prev = prev.distance(RED);
        let d_now = c.distance(RED);
        assert!(d_now < d_prev || d_prev < 1e-6, "frame {frame}: not closer to red");
        assert!(c.x <= 1.0 + 1e-6 && c.y >= -1e-6 && c.z >= -1e-6);
        prev = c;
    }
    assert!(prev.distance(RED) < 0.01);
}

#[test]
fn tint_does_not_move_at_zero_progress() {
    let mut st = full_state(0.0);
    let mut rng = StdRng::seed_from_u64(3);
    update_frame(&mut st, 0.5, &mut rng);
    update_frame(&mut st, 0.6, &mut rng);
    assert_eq!(building_color(&st), BUILDING_BASE_COLOR);
}

#[test]
fn scrolling_back_up_does_not_undo_tint() {
    let mut st = full_state(1.0);
    let mut rng = StdRng::seed_from_u64(5);
    update_frame(&mut st, 0.0, &mut rng);
    let reddened = building_color(&st);
    st.input.set_scroll_progress(0.0);
    update_frame(&mut st, 0.1, &mut rng);
    assert_eq!(building_color(&st), reddened);
}

#[test]
fn text_opacity_is_clamped() {
    assert!(approx(text_pose(0.0).opacity, 1.0));
    assert!(approx(text_pose(1.0).opacity, 0.2));
    assert_eq!(text_pose(2.0).opacity, 0.0);
    assert!(approx(text_pose(1.0).position_x, -3.0));
}

#[test]
fn background_tracks_scroll_and_time() {
    let mut st = full_state(0.5);
    let mut rng = StdRng::seed_from_u64(9);
    st.input.set_cursor(Vec2::new(0.25, -0.75));
    update_frame(&mut st, 2.5, &mut rng);
    let bg = st
        .scene
        .get(SceneKey::BackgroundPlane)
        .and_then(|o| o.nodes[0].material.as_shader())
        .expect("background");
    assert_eq!(bg.uniforms.float(U_TIME), Some(2.5));
    assert_eq!(bg.uniforms.float(U_SCROLL_PROGRESS), Some(0.5));
    assert_eq!(bg.uniforms.vec2(U_MOUSE), Some(Vec2::new(0.25, -0.75)));
    assert_eq!(bg.uniforms.vec2(U_RESOLUTION), Some(Vec2::new(1280.0, 720.0)));
    let c = bg.uniforms.color(U_COLOR).expect("colour");
    assert!(c.abs_diff_eq(Vec3::new(0.45, 0.0, 0.0), 1e-6));
}

#[test]
fn missing_objects_are_skipped() {
    let mut st = AppState::new(Vec2::new(800.0, 600.0), true);
    st.input.set_scroll_progress(0.75);
    let mut rng = StdRng::seed_from_u64(11);
    let out = update_frame(&mut st, 1.0, &mut rng);
    assert!(st.scene.is_empty());
    assert!(approx(st.camera.position.z, -2.5));
    assert_eq!(out.overlay_opacity, 0.0);
}

#[test]
fn glitch_texture_attaches_once_it_arrives() {
    let mut st = full_state(0.1);
    let mut rng = StdRng::seed_from_u64(13);
    update_frame(&mut st, 0.0, &mut rng);
    let bg_tex = |st: &AppState| {
        st.scene
            .get(SceneKey::BackgroundPlane)
            .and_then(|o| o.nodes[0].material.as_shader())
            .and_then(|m| m.uniforms.texture(U_GLITCH_TEXTURE))
    };
    assert_eq!(bg_tex(&st), Some(None));

    let handle = st.textures.insert(TextureData::solid([0, 255, 0, 255]));
    st.glitch_texture = Some(handle);
    update_frame(&mut st, 0.016, &mut rng);
    assert_eq!(bg_tex(&st), Some(Some(handle)));

    let building_tex = st
        .scene
        .get(SceneKey::Building)
        .and_then(|o| o.nodes[0].material.as_shader())
        .and_then(|m| m.uniforms.texture(U_GLITCH_TEXTURE));
    assert_eq!(building_tex, Some(Some(handle)));
}

#[test]
fn pointer_glitch_pulse_reaches_background_uniform() {
    let mut st = full_state(0.0);
    let mut rng = StdRng::seed_from_u64(17);
    st.glitch_pulse.trigger(1.0);
    update_frame(&mut st, 1.1, &mut rng);
    let pulse = st
        .scene
        .get(SceneKey::BackgroundPlane)
        .and_then(|o| o.nodes[0].material.as_shader())
        .and_then(|m| m.uniforms.float(U_GLITCH_PULSE))
        .expect("pulse");
    assert!((pulse - 0.5).abs() < 1e-4);
}

#[test]
fn clear_colour_follows_background() {
    let mut st = full_state(0.0);
    let mut rng = StdRng::seed_from_u64(19);
    let out = update_frame(&mut st, 0.0, &mut rng);
    assert_eq!(out.clear_color, Vec3::ZERO);
}
