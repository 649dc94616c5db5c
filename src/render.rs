use crate::core::assets::{TextureData, TextureHandle};
use crate::core::material::{FractureUniforms, TextUniforms, U_GLITCH_TEXTURE};
use crate::core::scene::{ObjectMaterial, SceneKey, SceneNode, SceneObject};
use crate::core::AppState;
use fnv::FnvHashMap;
use glam::Vec3;
use web_sys as web;

mod helpers;
mod mesh;
mod pipelines;
mod targets;
use mesh::{GpuMesh, GpuTexture};
use pipelines::{create_mesh_pipelines, MeshPipelines};
use targets::RenderTargets;

/// GPU side of one scene node. The bind group is rebuilt once the texture
/// the material wants has been uploaded.
struct GpuNode {
    node_index: usize,
    mesh: GpuMesh,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    bound_texture: Option<TextureHandle>,
}

fn wanted_texture(node: &SceneNode) -> Option<TextureHandle> {
    match &node.material {
        ObjectMaterial::Shader(m) => m.uniforms.texture(U_GLITCH_TEXTURE).flatten(),
        ObjectMaterial::Basic(m) => m.texture,
    }
}

fn make_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    uniforms: &wgpu::Buffer,
    texture: &GpuTexture,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("mesh_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(&texture.sampler),
            },
        ],
    })
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    pipelines: MeshPipelines,
    // bound wherever a material's texture has not arrived yet
    placeholder: GpuTexture,
    textures: FnvHashMap<TextureHandle, GpuTexture>,
    objects: FnvHashMap<SceneKey, Vec<GpuNode>>,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, format, width, height);
        let pipelines = create_mesh_pipelines(&device, format);
        let placeholder =
            GpuTexture::upload(&device, &queue, "placeholder", &TextureData::solid([255; 4]));
        log::info!("[gpu] surface {}x{} {:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            pipelines,
            placeholder,
            textures: FnvHashMap::default(),
            objects: FnvHashMap::default(),
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets
                .recreate(&self.device, self.config.format, width, height);
        }
    }

    pub fn upload_texture(&mut self, handle: TextureHandle, data: &TextureData) {
        let tex = GpuTexture::upload(
            &self.device,
            &self.queue,
            &format!("texture_{}", handle.0),
            data,
        );
        self.textures.insert(handle, tex);
    }

    /// (Re)create GPU buffers for an object that was added or replaced.
    pub fn prepare(&mut self, key: SceneKey, object: &SceneObject) {
        let mut nodes = Vec::with_capacity(object.nodes.len());
        for (i, node) in object.nodes.iter().enumerate() {
            if node.mesh.is_empty() {
                continue;
            }
            let uniform_size = match node.material {
                ObjectMaterial::Shader(_) => std::mem::size_of::<FractureUniforms>(),
                ObjectMaterial::Basic(_) => std::mem::size_of::<TextUniforms>(),
            };
            let uniform_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(key.name()),
                size: uniform_size as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bound_texture = wanted_texture(node).filter(|h| self.textures.contains_key(h));
            let texture = bound_texture
                .and_then(|h| self.textures.get(&h))
                .unwrap_or(&self.placeholder);
            let bind_group =
                make_bind_group(&self.device, &self.pipelines.bgl, &uniform_buffer, texture);
            nodes.push(GpuNode {
                node_index: i,
                mesh: GpuMesh::upload(&self.device, key.name(), &node.mesh),
                uniform_buffer,
                bind_group,
                bound_texture,
            });
        }
        let triangles: usize = object.nodes.iter().map(|n| n.mesh.triangle_count()).sum();
        log::info!(
            "[gpu] prepared {} ({} meshes, {} triangles)",
            key.name(),
            nodes.len(),
            triangles
        );
        self.objects.insert(key, nodes);
    }

    pub fn render(&mut self, state: &AppState, clear: Vec3) -> Result<(), wgpu::SurfaceError> {
        let view_proj = state.camera.view_projection();
        let order = state.scene.draw_order(state.camera.position);

        // Uniform writes and late texture binds happen before the pass opens.
        for key in &order {
            let (Some(object), Some(gpu_nodes)) =
                (state.scene.get(*key), self.objects.get_mut(key))
            else {
                continue;
            };
            let model = object.transform.matrix();
            for gpu in gpu_nodes.iter_mut() {
                let Some(node) = object.nodes.get(gpu.node_index) else {
                    continue;
                };
                let wanted = wanted_texture(node);
                if wanted != gpu.bound_texture {
                    if let Some(tex) = wanted.and_then(|h| self.textures.get(&h)) {
                        gpu.bind_group = make_bind_group(
                            &self.device,
                            &self.pipelines.bgl,
                            &gpu.uniform_buffer,
                            tex,
                        );
                        gpu.bound_texture = wanted;
                    }
                }
                let mvp = view_proj * model * node.local;
                match &node.material {
                    ObjectMaterial::Shader(m) => {
                        let u = FractureUniforms::pack(m, mvp);
                        self.queue
                            .write_buffer(&gpu.uniform_buffer, 0, bytemuck::bytes_of(&u));
                    }
                    ObjectMaterial::Basic(m) => {
                        let u = TextUniforms::pack(m, mvp);
                        self.queue
                            .write_buffer(&gpu.uniform_buffer, 0, bytemuck::bytes_of(&u));
                    }
                }
            }
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.msaa_view,
                    resolve_target: Some(&view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.x as f64,
                            g: clear.y as f64,
                            b: clear.z as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Discard,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            for key in &order {
                let (Some(object), Some(gpu_nodes)) =
                    (state.scene.get(*key), self.objects.get(key))
                else {
                    continue;
                };
                for gpu in gpu_nodes {
                    let Some(node) = object.nodes.get(gpu.node_index) else {
                        continue;
                    };
                    let pipeline = match &node.material {
                        ObjectMaterial::Shader(m) => {
                            self.pipelines.fracture_for(m.flags.depth_write)
                        }
                        ObjectMaterial::Basic(_) => &self.pipelines.text,
                    };
                    rpass.set_pipeline(pipeline);
                    rpass.set_bind_group(0, &gpu.bind_group, &[]);
                    rpass.set_vertex_buffer(0, gpu.mesh.vertex_buffer.slice(..));
                    rpass.set_index_buffer(gpu.mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..gpu.mesh.index_count, 0, 0..1);
                }
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
