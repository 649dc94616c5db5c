// Host-side tests for shader materials, uniform updates and the fracture colour formula.
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

use crate::core::assets::TextureHandle;
use crate::core::constants::RED;
use crate::core::material::*;
use glam::{Mat4, Vec2, Vec3, Vec4};

const PROGRAM: ShaderProgram = ShaderProgram {
    label: "test",
    source: "",
    vertex_entry: "vs_main",
    fragment_entry: "fs_main",
};

fn frame(time: f32, p: f32) -> FrameUniforms {
    FrameUniforms {
        time,
        scroll_progress: p,
        mouse: Vec2::new(0.5, -0.5),
        resolution: Vec2::new(1280.0, 720.0),
    }
}

#[test]
fn new_material_has_baseline_uniforms() {
    let m = create_shader_material(PROGRAM, Vec3::new(0.2, 0.3, 0.4), [], None);
    let u = &m.uniforms;
    assert_eq!(u.len(), 7);
    assert_eq!(u.float(U_TIME), Some(0.0));
    assert_eq!(u.float(U_SCROLL_PROGRESS), Some(0.0));
    assert_eq!(u.color(U_COLOR), Some(Vec3::new(0.2, 0.3, 0.4)));
    assert_eq!(u.vec2(U_RESOLUTION), Some(Vec2::ONE));
    assert_eq!(u.vec2(U_MOUSE), Some(Vec2::ZERO));
    assert_eq!(u.texture(U_GLITCH_TEXTURE), Some(None));
    assert_eq!(u.texture(U_RED_OVERLAY_TEXTURE), Some(None));
    assert!(!u.contains(U_TEXTURE));
    assert!(m.flags.transparent && m.flags.double_sided && m.flags.depth_write);
}

#[test]
fn extras_override_baseline_and_texture_is_added() {
    let m = create_shader_material(
        PROGRAM,
        Vec3::ZERO,
        [
            (U_TIME, UniformValue::Float(3.0)),
            (U_GLITCH_PULSE, UniformValue::Float(0.0)),
        ],
        Some(TextureHandle(7)),
    );
    assert_eq!(m.uniforms.float(U_TIME), Some(3.0));
    assert_eq!(m.uniforms.float(U_GLITCH_PULSE), Some(0.0));
    assert_eq!(m.uniforms.texture(U_TEXTURE), Some(Some(TextureHandle(7))));
    assert_eq!(m.uniforms.len(), 9);
}

#[test]
fn update_uniforms_writes_frame_values() {
    let mut m = create_shader_material(PROGRAM, Vec3::ONE, [], None);
    let written = update_uniforms(&mut m, &frame(1.5, 0.25));
    assert_eq!(written, 4);
    assert_eq!(m.uniforms.float(U_TIME), Some(1.5));
    assert_eq!(m.uniforms.float(U_SCROLL_PROGRESS), Some(0.25));
    assert_eq!(m.uniforms.vec2(U_MOUSE), Some(Vec2::new(0.5, -0.5)));
    assert_eq!(m.uniforms.vec2(U_RESOLUTION), Some(Vec2::new(1280.0, 720.0)));
    // colour is not a per-frame uniform
    assert_eq!(m.uniforms.color(U_COLOR), Some(Vec3::ONE));
}

#[test]
fn update_uniforms_is_idempotent_for_same_frame() {
    let mut m = create_shader_material(PROGRAM, Vec3::ONE, [], None);
    update_uniforms(&mut m, &frame(2.0, 0.5));
    let once = m.clone();
    update_uniforms(&mut m, &frame(2.0, 0.5));
    assert_eq!(m, once);
}

#[test]
fn update_uniforms_skips_undeclared_names() {
    let mut m = create_shader_material(PROGRAM, Vec3::ONE, [], None);
    m.uniforms = UniformSet::default();
    m.uniforms.set(U_TIME, UniformValue::Float(0.0));
    m.uniforms.set(U_SCROLL_PROGRESS, UniformValue::Float(0.0));
    assert_eq!(update_uniforms(&mut m, &frame(1.0, 0.1)), 2);
    assert!(!m.uniforms.contains(U_MOUSE));
    assert!(!m.uniforms.contains(U_RESOLUTION));
}

#[test]
fn set_if_present_requires_matching_kind() {
    let mut u = UniformSet::default();
    u.set(U_TIME, UniformValue::Float(0.0));
    assert!(!u.set_if_present(U_TIME, UniformValue::Vec2(Vec2::ONE)));
    assert!(!u.set_if_present(U_MOUSE, UniformValue::Vec2(Vec2::ONE)));
    assert!(u.set_if_present(U_TIME, UniformValue::Float(4.0)));
    assert_eq!(u.float(U_TIME), Some(4.0));
}

#[test]
fn texture_slot_fills_only_once() {
    let mut m = create_shader_material(PROGRAM, Vec3::ONE, [], None);
    assert!(m.uniforms.attach_texture_once(U_GLITCH_TEXTURE, TextureHandle(1)));
    assert!(!m.uniforms.attach_texture_once(U_GLITCH_TEXTURE, TextureHandle(2)));
    assert_eq!(m.uniforms.texture(U_GLITCH_TEXTURE), Some(Some(TextureHandle(1))));
    // undeclared slot stays undeclared
    assert!(!m.uniforms.attach_texture_once(U_TEXTURE, TextureHandle(3)));
    assert!(!m.uniforms.contains(U_TEXTURE));
}

#[test]
fn fracture_colour_without_scroll_is_pulsed_base() {
    let base = Vec3::new(0.5, 0.5, 0.5);
    let c = fracture_color(base, 0.0, 0.0, 0.0, Vec2::splat(0.5), |_| Vec3::ONE);
    // sin(0) = 0, so the pulse factor is 0.9 and no glitch is sampled
    assert!(c.abs_diff_eq(Vec4::new(0.45, 0.45, 0.45, 1.0), 1e-6));
}

#[test]
fn fracture_colour_pulse_stays_within_band() {
    let base = Vec3::ONE;
    for i in 0..200 {
        let t = i as f32 * 0.1;
        let c = fracture_color(base, t, 0.0, 0.0, Vec2::ZERO, |_| Vec3::ZERO);
        assert!(c.x >= 0.8 - 1e-6 && c.x <= 1.0 + 1e-6, "t={t} r={}", c.x);
    }
}

#[test]
fn fracture_colour_at_full_scroll_is_mostly_red() {
    let c = fracture_color(Vec3::ZERO, 0.0, 1.0, 0.0, Vec2::ZERO, |_| Vec3::ZERO);
    assert!(c.abs_diff_eq(RED.lerp(Vec3::ZERO, 0.2).extend(1.0), 1e-6));
    assert_eq!(c.w, 1.0);
}

#[test]
fn fracture_colour_adds_glitch_sample_scaled_by_intensity() {
    // p = 0.25 -> glitch = 0.5; sample adds 0.5 * 0.5 = 0.25 before the red blend
    let p = 0.25;
    let c = fracture_color(Vec3::ZERO, 0.0, p, 0.0, Vec2::ZERO, |_| Vec3::new(0.0, 1.0, 0.0));
    let expected = Vec3::new(0.0, 0.25, 0.0).lerp(RED, p * 0.8);
    assert!(c.truncate().abs_diff_eq(expected, 1e-6));
}

#[test]
fn fracture_colour_offsets_glitch_lookup_along_x() {
    let uv = Vec2::new(0.3, 0.05);
    let seen = std::cell::Cell::new(Vec2::ZERO);
    fracture_color(Vec3::ZERO, 0.0, 0.5, 0.0, uv, |at| {
        seen.set(at);
        Vec3::ZERO
    });
    let expected_offset = (uv.y * 10.0).sin() * 1.0 * 0.1;
    assert!((seen.get().x - (uv.x + expected_offset)).abs() < 1e-6);
    assert_eq!(seen.get().y, uv.y);
}

#[test]
fn fracture_shader_samples_glitch_at_unscaled_offset() {
    let src = include_str!("../shaders/fracture.wgsl");
    assert!(src.contains("let glitch_uv = uv + vec2<f32>(offset, 0.0);"));
    assert!(!src.contains("repeat"));
}

#[test]
fn glitch_pulse_rises_then_falls_within_window() {
    let mut g = GlitchPulse::default();
    assert_eq!(g.value(0.0), 0.0);
    g.trigger(1.0);
    assert_eq!(g.value(1.0), 0.0);
    assert!((g.value(1.1) - 0.5).abs() < 1e-5);
    let rising = g.value(1.05);
    let falling = g.value(1.15);
    assert!(rising > 0.0 && rising < 0.5);
    assert!(falling > 0.0 && falling < 0.5);
    assert!(g.value(1.19) > 0.0);
    assert_eq!(g.value(1.3), 0.0);
    // before the trigger
    assert_eq!(g.value(0.9), 0.0);
}

#[test]
fn text_alpha_test_discards_faint_fragments() {
    assert_eq!(text_fragment_alpha(1.0, 1.0, 0.5), Some(1.0));
    assert_eq!(text_fragment_alpha(1.0, 0.4, 0.5), None);
    assert_eq!(text_fragment_alpha(0.6, 1.0, 0.5), Some(0.6));
    assert_eq!(text_fragment_alpha(0.0, 1.0, 0.5), None);
}

#[test]
fn packed_uniforms_match_wgsl_layout() {
    assert_eq!(std::mem::size_of::<FractureUniforms>(), 112);
    assert_eq!(std::mem::size_of::<TextUniforms>(), 80);
}

#[test]
fn fracture_uniforms_reflect_material_state() {
    let mut m = create_shader_material(
        PROGRAM,
        Vec3::new(1.0, 0.5, 0.0),
        [(U_GLITCH_PULSE, UniformValue::Float(0.25))],
        None,
    );
    update_uniforms(&mut m, &frame(2.0, 0.75));
    let packed = FractureUniforms::pack(&m, Mat4::IDENTITY);
    assert_eq!(packed.color, [1.0, 0.5, 0.0, 1.0]);
    assert_eq!(packed.time, 2.0);
    assert_eq!(packed.scroll_progress, 0.75);
    assert_eq!(packed.glitch_pulse, 0.25);
    assert_eq!(packed.has_glitch, 0.0);

    m.uniforms.attach_texture_once(U_GLITCH_TEXTURE, TextureHandle(0));
    assert_eq!(FractureUniforms::pack(&m, Mat4::IDENTITY).has_glitch, 1.0);
}

#[test]
fn text_uniforms_clamp_opacity() {
    let mut m = BasicMaterial::textured(TextureHandle(0), 0.5);
    m.opacity = 1.7;
    assert_eq!(TextUniforms::pack(&m, Mat4::IDENTITY).opacity, 1.0);
    m.opacity = -0.3;
    assert_eq!(TextUniforms::pack(&m, Mat4::IDENTITY).opacity, 0.0);
}
