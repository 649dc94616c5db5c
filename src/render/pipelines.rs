use super::helpers::make_mesh_pipeline;
use crate::constants::{DEPTH_FORMAT, MSAA_SAMPLES};
use crate::core::material::ShaderProgram;
use crate::core::{FRACTURE_PROGRAM, TEXT_PROGRAM};

pub(crate) struct MeshPipelines {
    /// uniform + texture + sampler, shared by every mesh material
    pub(crate) bgl: wgpu::BindGroupLayout,
    pub(crate) fracture: wgpu::RenderPipeline,
    pub(crate) fracture_no_depth: wgpu::RenderPipeline,
    pub(crate) text: wgpu::RenderPipeline,
}

impl MeshPipelines {
    pub(crate) fn fracture_for(&self, depth_write: bool) -> &wgpu::RenderPipeline {
        if depth_write {
            &self.fracture
        } else {
            &self.fracture_no_depth
        }
    }
}

pub(crate) fn create_mesh_pipelines(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
) -> MeshPipelines {
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("mesh_bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("mesh_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });

    let fracture_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("fracture_shader"),
        source: wgpu::ShaderSource::Wgsl(FRACTURE_PROGRAM.source.into()),
    });
    let text_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("text_shader"),
        source: wgpu::ShaderSource::Wgsl(TEXT_PROGRAM.source.into()),
    });

    let make = |shader: &wgpu::ShaderModule, program: &ShaderProgram, depth_write: bool| {
        make_mesh_pipeline(
            device,
            &pl,
            shader,
            program,
            color_format,
            DEPTH_FORMAT,
            depth_write,
            MSAA_SAMPLES,
        )
    };
    let fracture = make(&fracture_shader, &FRACTURE_PROGRAM, true);
    let fracture_no_depth = make(&fracture_shader, &FRACTURE_PROGRAM, false);
    let text = make(&text_shader, &TEXT_PROGRAM, true);

    MeshPipelines {
        bgl,
        fracture,
        fracture_no_depth,
        text,
    }
}
