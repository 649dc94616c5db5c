use crate::core::error::FractureError;
use crate::core::geometry::{MeshData, Vertex};
use glam::Mat4;

/// One triangle primitive with its accumulated node transform.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelMesh {
    pub data: MeshData,
    pub local: Mat4,
}

/// Flattened mesh list of a glTF scene.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModelScene {
    pub meshes: Vec<ModelMesh>,
}

/// URIs of the document's buffers in order; `None` marks the GLB blob.
pub fn external_buffer_uris(doc: &gltf::Gltf) -> Vec<Option<String>> {
    doc.buffers()
        .map(|b| match b.source() {
            gltf::buffer::Source::Bin => None,
            gltf::buffer::Source::Uri(uri) => Some(uri.to_string()),
        })
        .collect()
}

/// Resolve a buffer URI against the model's own path. Data and absolute
/// URIs pass through unchanged.
pub fn resolve_uri(model_path: &str, uri: &str) -> String {
    if uri.starts_with("data:") || uri.contains("://") || uri.starts_with('/') {
        return uri.to_string();
    }
    match model_path.rfind('/') {
        Some(i) => format!("{}/{}", &model_path[..i], uri),
        None => uri.to_string(),
    }
}

impl ModelScene {
    pub fn parse(path: &str, bytes: &[u8]) -> Result<gltf::Gltf, FractureError> {
        gltf::Gltf::from_slice(bytes).map_err(|e| FractureError::decode(path, e))
    }

    /// Build the mesh list from a parsed document and its buffers, ordered as
    /// in `external_buffer_uris` (the GLB blob slot may be left empty).
    pub fn from_gltf(
        path: &str,
        doc: &gltf::Gltf,
        buffers: &[Vec<u8>],
    ) -> Result<Self, FractureError> {
        let blob = doc.blob.as_deref();

        let scene = doc
            .default_scene()
            .or_else(|| doc.scenes().next())
            .ok_or_else(|| FractureError::decode(path, "document has no scene"))?;

        let mut out = ModelScene::default();
        let mut stack: Vec<(gltf::Node<'_>, Mat4)> =
            scene.nodes().map(|n| (n, Mat4::IDENTITY)).collect();
        while let Some((node, parent)) = stack.pop() {
            let local = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
            if let Some(mesh) = node.mesh() {
                for prim in mesh.primitives() {
                    if prim.mode() != gltf::mesh::Mode::Triangles {
                        log::warn!("[model] skipping non-triangle primitive in {}", path);
                        continue;
                    }
                    let reader = prim.reader(|buffer| match buffer.source() {
                        gltf::buffer::Source::Bin => blob,
                        gltf::buffer::Source::Uri(_) => {
                            buffers.get(buffer.index()).map(|b| b.as_slice())
                        }
                    });
                    let positions: Vec<[f32; 3]> = match reader.read_positions() {
                        Some(p) => p.collect(),
                        None => continue,
                    };
                    let uvs: Vec<[f32; 2]> = reader
                        .read_tex_coords(0)
                        .map(|t| t.into_f32().collect())
                        .unwrap_or_default();
                    let vertices: Vec<Vertex> = positions
                        .iter()
                        .enumerate()
                        .map(|(i, p)| Vertex::new(*p, uvs.get(i).copied().unwrap_or([0.0, 0.0])))
                        .collect();
                    let indices: Vec<u32> = match reader.read_indices() {
                        Some(ix) => ix.into_u32().collect(),
                        None => (0..vertices.len() as u32).collect(),
                    };
                    if indices.iter().any(|&i| i as usize >= vertices.len()) {
                        return Err(FractureError::decode(path, "index out of range"));
                    }
                    out.meshes.push(ModelMesh {
                        data: MeshData { vertices, indices },
                        local,
                    });
                }
            }
            for child in node.children() {
                stack.push((child, local));
            }
        }

        if out.meshes.is_empty() {
            return Err(FractureError::decode(path, "model contains no triangle meshes"));
        }
        Ok(out)
    }
}
