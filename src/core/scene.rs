use crate::core::assets::TextureHandle;
use crate::core::constants::{
    BACKGROUND_SIZE, BACKGROUND_Z, BLACK, BUILDING_BASE_COLOR, BUILDING_BASE_SCALE, BUILDING_START,
    FALLBACK_BUILDING_SIZE, TEXT_ALPHA_TEST, TEXT_HEIGHT, TEXT_START, TEXT_WIDTH,
};
use crate::core::geometry::{cuboid, plane, MeshData};
use crate::core::material::{
    create_shader_material, BasicMaterial, ShaderMaterial, ShaderProgram, UniformValue, U_COLOR,
    U_GLITCH_PULSE,
};
use crate::core::model::ModelScene;
use glam::{EulerRot, Mat4, Quat, Vec3};

/// Symbolic names the scene objects are registered under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SceneKey {
    BackgroundPlane,
    Building,
    UtopianText,
}

impl SceneKey {
    pub const ALL: [SceneKey; 3] = [
        SceneKey::BackgroundPlane,
        SceneKey::Building,
        SceneKey::UtopianText,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SceneKey::BackgroundPlane => "backgroundPlane",
            SceneKey::Building => "building",
            SceneKey::UtopianText => "utopianText",
        }
    }
}

/// Position, XYZ Euler rotation and scale, composed as T * R * S.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let rot = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rot, self.position)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ObjectMaterial {
    Shader(ShaderMaterial),
    Basic(BasicMaterial),
}

impl ObjectMaterial {
    pub fn as_shader_mut(&mut self) -> Option<&mut ShaderMaterial> {
        match self {
            ObjectMaterial::Shader(m) => Some(m),
            ObjectMaterial::Basic(_) => None,
        }
    }

    pub fn as_shader(&self) -> Option<&ShaderMaterial> {
        match self {
            ObjectMaterial::Shader(m) => Some(m),
            ObjectMaterial::Basic(_) => None,
        }
    }

    pub fn as_basic_mut(&mut self) -> Option<&mut BasicMaterial> {
        match self {
            ObjectMaterial::Basic(m) => Some(m),
            ObjectMaterial::Shader(_) => None,
        }
    }
}

/// A drawable mesh within an object, positioned relative to the object.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub mesh: MeshData,
    pub local: Mat4,
    pub material: ObjectMaterial,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    pub transform: Transform,
    pub nodes: Vec<SceneNode>,
}

impl SceneObject {
    pub fn shader_materials_mut(&mut self) -> impl Iterator<Item = &mut ShaderMaterial> {
        self.nodes.iter_mut().filter_map(|n| n.material.as_shader_mut())
    }

    pub fn basic_materials_mut(&mut self) -> impl Iterator<Item = &mut BasicMaterial> {
        self.nodes.iter_mut().filter_map(|n| n.material.as_basic_mut())
    }
}

/// Background material: fracture shader, black, with a glitch-pulse slot.
pub fn background_material(program: ShaderProgram) -> ShaderMaterial {
    create_shader_material(
        program,
        BLACK,
        [(U_GLITCH_PULSE, UniformValue::Float(0.0))],
        None,
    )
    .with_depth_write(false)
}

pub fn build_background_plane(material: ShaderMaterial) -> SceneObject {
    SceneObject {
        transform: Transform::at(Vec3::new(0.0, 0.0, BACKGROUND_Z)),
        nodes: vec![SceneNode {
            mesh: plane(BACKGROUND_SIZE, BACKGROUND_SIZE),
            local: Mat4::IDENTITY,
            material: ObjectMaterial::Shader(material),
        }],
    }
}

fn building_material(template: &ShaderMaterial) -> ObjectMaterial {
    let mut m = template.clone();
    m.uniforms.set(U_COLOR, UniformValue::Color(BUILDING_BASE_COLOR));
    // the template is the background material, which has depth writes off
    m.flags.depth_write = true;
    ObjectMaterial::Shader(m)
}

fn building_transform() -> Transform {
    Transform {
        position: BUILDING_START,
        rotation: Vec3::ZERO,
        scale: Vec3::splat(BUILDING_BASE_SCALE),
    }
}

/// Every mesh of the model gets its own copy of `template` so each one can
/// distort independently.
pub fn build_building(model: ModelScene, template: &ShaderMaterial) -> SceneObject {
    SceneObject {
        transform: building_transform(),
        nodes: model
            .meshes
            .into_iter()
            .map(|m| SceneNode {
                mesh: m.data,
                local: m.local,
                material: building_material(template),
            })
            .collect(),
    }
}

/// Stand-in box used when the building model cannot be loaded.
pub fn build_fallback_building(template: &ShaderMaterial) -> SceneObject {
    SceneObject {
        transform: building_transform(),
        nodes: vec![SceneNode {
            mesh: cuboid(FALLBACK_BUILDING_SIZE),
            local: Mat4::IDENTITY,
            material: building_material(template),
        }],
    }
}

/// Pre-rendered text on a transparent, alpha-tested plane.
pub fn build_text_plane(texture: TextureHandle) -> SceneObject {
    SceneObject {
        transform: Transform::at(TEXT_START),
        nodes: vec![SceneNode {
            mesh: plane(TEXT_WIDTH, TEXT_HEIGHT),
            local: Mat4::IDENTITY,
            material: ObjectMaterial::Basic(BasicMaterial::textured(texture, TEXT_ALPHA_TEST)),
        }],
    }
}

/// Scene objects by symbolic key. Keys fill in as assets arrive, so every
/// reader must treat a missing key as "skip".
#[derive(Debug, Default)]
pub struct SceneRegistry {
    objects: Vec<(SceneKey, SceneObject)>,
    pending: Vec<SceneKey>,
}

impl SceneRegistry {
    pub fn get(&self, key: SceneKey) -> Option<&SceneObject> {
        self.objects.iter().find(|(k, _)| *k == key).map(|(_, o)| o)
    }

    pub fn get_mut(&mut self, key: SceneKey) -> Option<&mut SceneObject> {
        self.objects
            .iter_mut()
            .find(|(k, _)| *k == key)
            .map(|(_, o)| o)
    }

    pub fn contains(&self, key: SceneKey) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Register `object` under `key`. Returns true if it replaced an entry.
    pub fn merge(&mut self, key: SceneKey, object: SceneObject) -> bool {
        if !self.pending.contains(&key) {
            self.pending.push(key);
        }
        match self.objects.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => {
                *slot = object;
                true
            }
            None => {
                self.objects.push((key, object));
                false
            }
        }
    }

    /// Keys merged since the last call, in merge order.
    pub fn take_pending(&mut self) -> Vec<SceneKey> {
        std::mem::take(&mut self.pending)
    }

    /// Keys sorted farthest-first from `eye`, for blending transparent objects.
    pub fn draw_order(&self, eye: Vec3) -> Vec<SceneKey> {
        let mut keyed: Vec<(SceneKey, f32)> = self
            .objects
            .iter()
            .map(|(k, o)| (*k, o.transform.position.distance_squared(eye)))
            .collect();
        keyed.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        keyed.into_iter().map(|(k, _)| k).collect()
    }
}
