pub mod assets;
pub mod camera;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod input;
pub mod material;
pub mod model;
pub mod scene;
pub mod sound;
pub mod state;
pub mod update;

pub use error::FractureError;
pub use state::AppState;

use material::ShaderProgram;

// Shaders bundled as string constants
pub const FRACTURE_WGSL: &str = include_str!("../../shaders/fracture.wgsl");
pub const TEXT_WGSL: &str = include_str!("../../shaders/text.wgsl");

pub const FRACTURE_PROGRAM: ShaderProgram = ShaderProgram {
    label: "fracture",
    source: FRACTURE_WGSL,
    vertex_entry: "vs_main",
    fragment_entry: "fs_fracture",
};

pub const TEXT_PROGRAM: ShaderProgram = ShaderProgram {
    label: "text",
    source: TEXT_WGSL,
    vertex_entry: "vs_main",
    fragment_entry: "fs_text",
};
