use glam::Vec3;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const fn new(position: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, uv }
    }
}

/// Indexed triangle list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Single-quad plane in the XY plane facing +Z, centred on the origin.
pub fn plane(width: f32, height: f32) -> MeshData {
    let hw = width * 0.5;
    let hh = height * 0.5;
    MeshData {
        vertices: vec![
            Vertex::new([-hw, hh, 0.0], [0.0, 1.0]),
            Vertex::new([hw, hh, 0.0], [1.0, 1.0]),
            Vertex::new([-hw, -hh, 0.0], [0.0, 0.0]),
            Vertex::new([hw, -hh, 0.0], [1.0, 0.0]),
        ],
        indices: vec![0, 2, 1, 2, 3, 1],
    }
}

/// Axis-aligned box centred on the origin; each face carries its own UVs.
pub fn cuboid(size: Vec3) -> MeshData {
    let h = size * 0.5;
    // (normal axis, u axis, v axis) per face
    let faces: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    let mut mesh = MeshData::default();
    for (n, u, v) in faces {
        let base = mesh.vertices.len() as u32;
        let center = n * h;
        let du = u * h;
        let dv = v * h;
        for (su, sv, uv) in [
            (-1.0, 1.0, [0.0, 1.0]),
            (1.0, 1.0, [1.0, 1.0]),
            (-1.0, -1.0, [0.0, 0.0]),
            (1.0, -1.0, [1.0, 0.0]),
        ] {
            let p = center + du * su + dv * sv;
            mesh.vertices.push(Vertex::new(p.to_array(), uv));
        }
        mesh.indices
            .extend_from_slice(&[base, base + 2, base + 1, base + 2, base + 3, base + 1]);
    }
    mesh
}
