use crate::core::assets::TextureHandle;
use crate::core::constants::{
    GLITCH_BLEND, GLITCH_GAIN, GLITCH_OFFSET_SCALE, GLITCH_PULSE_HALF_SEC, GLITCH_PULSE_PEAK,
    GLITCH_WAVE_FREQ, GLITCH_WAVE_SPEED, PULSE_DEPTH, PULSE_FREQ, RED, RED_BLEED,
};
use fnv::FnvHashMap;
use glam::{Mat4, Vec2, Vec3, Vec4};

// Baseline uniform names every shader material starts with.
pub const U_TIME: &str = "time";
pub const U_SCROLL_PROGRESS: &str = "scroll_progress";
pub const U_COLOR: &str = "color";
pub const U_RESOLUTION: &str = "resolution";
pub const U_GLITCH_TEXTURE: &str = "glitch_texture";
pub const U_RED_OVERLAY_TEXTURE: &str = "red_overlay_texture";
pub const U_MOUSE: &str = "mouse";
// Optional extras
pub const U_TEXTURE: &str = "texture";
pub const U_GLITCH_PULSE: &str = "glitch_pulse";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Color(Vec3),
    Vec2(Vec2),
    Texture(Option<TextureHandle>),
}

impl UniformValue {
    #[inline]
    fn same_kind(&self, other: &UniformValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Uniform name to value. Writers that only touch declared names use
/// `set_if_present`, so a material missing part of the baseline is left alone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UniformSet {
    values: FnvHashMap<&'static str, UniformValue>,
}

impl UniformSet {
    pub fn set(&mut self, name: &'static str, value: UniformValue) {
        self.values.insert(name, value);
    }

    /// Write `value` only if `name` is declared with the same kind of value.
    pub fn set_if_present(&mut self, name: &str, value: UniformValue) -> bool {
        match self.values.get_mut(name) {
            Some(slot) if slot.same_kind(&value) => {
                *slot = value;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match self.values.get(name) {
            Some(UniformValue::Float(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn color(&self, name: &str) -> Option<Vec3> {
        match self.values.get(name) {
            Some(UniformValue::Color(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn vec2(&self, name: &str) -> Option<Vec2> {
        match self.values.get(name) {
            Some(UniformValue::Vec2(v)) => Some(*v),
            _ => None,
        }
    }

    /// `Some(None)` is a declared but empty texture slot.
    pub fn texture(&self, name: &str) -> Option<Option<TextureHandle>> {
        match self.values.get(name) {
            Some(UniformValue::Texture(t)) => Some(*t),
            _ => None,
        }
    }

    /// Fill a declared, still empty texture slot. Later calls are no-ops.
    pub fn attach_texture_once(&mut self, name: &str, handle: TextureHandle) -> bool {
        match self.values.get_mut(name) {
            Some(slot @ UniformValue::Texture(None)) => {
                *slot = UniformValue::Texture(Some(handle));
                true
            }
            _ => false,
        }
    }
}

/// WGSL program a material draws with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShaderProgram {
    pub label: &'static str,
    pub source: &'static str,
    pub vertex_entry: &'static str,
    pub fragment_entry: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaterialFlags {
    pub transparent: bool,
    pub double_sided: bool,
    pub depth_write: bool,
}

impl Default for MaterialFlags {
    fn default() -> Self {
        Self {
            transparent: true,
            double_sided: true,
            depth_write: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShaderMaterial {
    pub program: ShaderProgram,
    pub uniforms: UniformSet,
    pub flags: MaterialFlags,
}

impl ShaderMaterial {
    pub fn with_depth_write(mut self, depth_write: bool) -> Self {
        self.flags.depth_write = depth_write;
        self
    }
}

/// Build a shader material with the baseline uniform set, then apply
/// `extra` on top (later names win).
pub fn create_shader_material(
    program: ShaderProgram,
    base_color: Vec3,
    extra: impl IntoIterator<Item = (&'static str, UniformValue)>,
    texture: Option<TextureHandle>,
) -> ShaderMaterial {
    let mut uniforms = UniformSet::default();
    uniforms.set(U_TIME, UniformValue::Float(0.0));
    uniforms.set(U_SCROLL_PROGRESS, UniformValue::Float(0.0));
    uniforms.set(U_COLOR, UniformValue::Color(base_color));
    uniforms.set(U_RESOLUTION, UniformValue::Vec2(Vec2::ONE));
    uniforms.set(U_GLITCH_TEXTURE, UniformValue::Texture(None));
    uniforms.set(U_RED_OVERLAY_TEXTURE, UniformValue::Texture(None));
    uniforms.set(U_MOUSE, UniformValue::Vec2(Vec2::ZERO));
    for (name, value) in extra {
        uniforms.set(name, value);
    }
    if let Some(t) = texture {
        uniforms.set(U_TEXTURE, UniformValue::Texture(Some(t)));
    }
    ShaderMaterial {
        program,
        uniforms,
        flags: MaterialFlags::default(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameUniforms {
    pub time: f32,
    pub scroll_progress: f32,
    pub mouse: Vec2,
    pub resolution: Vec2,
}

/// Push per-frame values into whichever of them the material declares.
/// Returns how many uniforms were written.
pub fn update_uniforms(material: &mut ShaderMaterial, frame: &FrameUniforms) -> usize {
    let u = &mut material.uniforms;
    [
        u.set_if_present(U_TIME, UniformValue::Float(frame.time)),
        u.set_if_present(U_SCROLL_PROGRESS, UniformValue::Float(frame.scroll_progress)),
        u.set_if_present(U_RESOLUTION, UniformValue::Vec2(frame.resolution)),
        u.set_if_present(U_MOUSE, UniformValue::Vec2(frame.mouse)),
    ]
    .into_iter()
    .filter(|written| *written)
    .count()
}

/// CPU reference of the fracture fragment shader (`shaders/fracture.wgsl`).
pub fn fracture_color(
    base: Vec3,
    time: f32,
    scroll_progress: f32,
    glitch_pulse: f32,
    uv: Vec2,
    glitch_sample: impl Fn(Vec2) -> Vec3,
) -> Vec4 {
    let mut color = base * ((PULSE_FREQ * time).sin() * PULSE_DEPTH + (1.0 - PULSE_DEPTH));
    let glitch = scroll_progress * GLITCH_GAIN + glitch_pulse;
    if glitch > 0.0 {
        let offset = (uv.y * GLITCH_WAVE_FREQ + time * GLITCH_WAVE_SPEED).sin()
            * glitch
            * GLITCH_OFFSET_SCALE;
        let sample = glitch_sample(uv + Vec2::new(offset, 0.0));
        color += sample * glitch * GLITCH_BLEND;
    }
    color = color.lerp(RED, scroll_progress * RED_BLEED);
    color.extend(1.0)
}

#[inline]
fn power2_out(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv
}

/// Short glitch burst fired on pointer-down: eases up to the peak, then
/// plays back down.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlitchPulse {
    started_at: Option<f32>,
}

impl GlitchPulse {
    pub fn trigger(&mut self, now: f32) {
        self.started_at = Some(now);
    }

    pub fn value(&self, now: f32) -> f32 {
        let Some(t0) = self.started_at else {
            return 0.0;
        };
        let t = now - t0;
        if !(0.0..2.0 * GLITCH_PULSE_HALF_SEC).contains(&t) {
            return 0.0;
        }
        let phase = if t < GLITCH_PULSE_HALF_SEC {
            t / GLITCH_PULSE_HALF_SEC
        } else {
            1.0 - (t - GLITCH_PULSE_HALF_SEC) / GLITCH_PULSE_HALF_SEC
        };
        GLITCH_PULSE_PEAK * power2_out(phase)
    }
}

/// Unlit textured material used for the floating text planes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BasicMaterial {
    pub texture: Option<TextureHandle>,
    pub opacity: f32,
    pub alpha_test: f32,
    pub transparent: bool,
}

impl BasicMaterial {
    pub fn textured(texture: TextureHandle, alpha_test: f32) -> Self {
        Self {
            texture: Some(texture),
            opacity: 1.0,
            alpha_test,
            transparent: true,
        }
    }
}

/// Alpha of a text fragment after the opacity multiply, or `None` when
/// the alpha test discards it.
#[inline]
pub fn text_fragment_alpha(texel_alpha: f32, opacity: f32, alpha_test: f32) -> Option<f32> {
    let a = texel_alpha * opacity;
    (a >= alpha_test).then_some(a)
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FractureUniforms {
    pub mvp: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub resolution: [f32; 2],
    pub mouse: [f32; 2],
    pub time: f32,
    pub scroll_progress: f32,
    pub glitch_pulse: f32,
    pub has_glitch: f32,
}

impl FractureUniforms {
    pub fn pack(material: &ShaderMaterial, mvp: Mat4) -> Self {
        let u = &material.uniforms;
        let has_glitch = matches!(u.texture(U_GLITCH_TEXTURE), Some(Some(_)));
        Self {
            mvp: mvp.to_cols_array_2d(),
            color: u.color(U_COLOR).unwrap_or(Vec3::ONE).extend(1.0).to_array(),
            resolution: u.vec2(U_RESOLUTION).unwrap_or(Vec2::ONE).to_array(),
            mouse: u.vec2(U_MOUSE).unwrap_or(Vec2::ZERO).to_array(),
            time: u.float(U_TIME).unwrap_or(0.0),
            scroll_progress: u.float(U_SCROLL_PROGRESS).unwrap_or(0.0),
            glitch_pulse: u.float(U_GLITCH_PULSE).unwrap_or(0.0),
            has_glitch: if has_glitch { 1.0 } else { 0.0 },
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TextUniforms {
    pub mvp: [[f32; 4]; 4],
    pub opacity: f32,
    pub alpha_test: f32,
    pub _pad: [f32; 2],
}

impl TextUniforms {
    pub fn pack(material: &BasicMaterial, mvp: Mat4) -> Self {
        Self {
            mvp: mvp.to_cols_array_2d(),
            opacity: material.opacity.clamp(0.0, 1.0),
            alpha_test: material.alpha_test,
            _pad: [0.0; 2],
        }
    }
}
