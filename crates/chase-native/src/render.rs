use std::sync::Arc;

use chase_core::builder::{Geometry, Landscape, Model, Part};
use chase_core::{Actor, Disposable, FrameView, SceneResult, BACKGROUND_RGB, DUST_COLOR};
use chase_core::{DUST_POINT_SIZE, FOG_FAR, FOG_NEAR};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

pub const MAX_INSTANCES: usize = 4096;
const AMBIENT: f32 = 0.45;
const DUST_GLOW: f32 = 0.4;

// Two triangles, corners in [-0.5, 0.5]
const QUAD: [[f32; 2]; 6] = [
    [-0.5, -0.5],
    [0.5, -0.5],
    [0.5, 0.5],
    [-0.5, -0.5],
    [0.5, 0.5],
    [-0.5, 0.5],
];

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    cam_right: [f32; 4],
    cam_up: [f32; 4],
    cam_pos: [f32; 4],
    fog_color: [f32; 4],
    fog_range: [f32; 4],
    /// xyz toward the sun, w ambient floor.
    light: [f32; 4],
}

impl Uniforms {
    fn for_frame(frame: &FrameView<'_>) -> Self {
        let view = frame.camera.view_matrix();
        let [fr, fg, fb] = BACKGROUND_RGB;
        Self {
            view_proj: (frame.lens.projection_matrix() * view).to_cols_array_2d(),
            cam_right: view.row(0).truncate().extend(0.0).to_array(),
            cam_up: view.row(1).truncate().extend(0.0).to_array(),
            cam_pos: frame.camera.position.extend(1.0).to_array(),
            fog_color: [fr, fg, fb, 1.0],
            fog_range: [FOG_NEAR, FOG_FAR, 0.0, 0.0],
            light: frame.sun.to_light().extend(AMBIENT).to_array(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pos: [f32; 3],
    scale: f32,
    color: [f32; 4],
    glow: f32,
}

impl InstanceData {
    const ATTRIBUTES: [wgpu::VertexAttribute; 4] =
        wgpu::vertex_attr_array![1 => Float32x3, 2 => Float32, 3 => Float32x4, 4 => Float32];

    fn for_part(part: &Part, root: Mat4, wheel_angle: f32) -> Self {
        let (centre, radius) = part.world_bounds(root, wheel_angle);
        let [r, g, b] = part.material.flat_color();
        Self {
            pos: centre.to_array(),
            scale: radius * 2.0,
            color: [r, g, b, part.material.opacity],
            glow: part.material.emissive_intensity,
        }
    }

    fn dust(position: Vec3, opacity: f32) -> Self {
        let [r, g, b] = DUST_COLOR;
        Self {
            pos: position.to_array(),
            scale: DUST_POINT_SIZE,
            color: [r, g, b, opacity],
            glow: DUST_GLOW,
        }
    }
}

/// GPU buffer handed to the scene's teardown registry.
pub struct GpuBuffer {
    label: &'static str,
    buffer: Arc<wgpu::Buffer>,
    destroyed: bool,
}

impl GpuBuffer {
    pub fn new(label: &'static str, buffer: Arc<wgpu::Buffer>) -> Self {
        Self {
            label,
            buffer,
            destroyed: false,
        }
    }
}

impl Disposable for GpuBuffer {
    fn label(&self) -> &str {
        self.label
    }

    fn dispose(&mut self) -> SceneResult<()> {
        if !self.destroyed {
            self.buffer.destroy();
            self.destroyed = true;
        }
        Ok(())
    }
}

/// Flatten the landscape into billboards once; it never moves. The road plane
/// is painted onto the terrain samples it covers.
pub fn landscape_instances(landscape: &Landscape) -> Vec<InstanceData> {
    let ground = landscape.ground.flat_color();
    let road = landscape.props.iter().find_map(|p| match *p.geometry {
        Geometry::Plane { height, .. } if p.name == "road" => {
            Some((0.5 * height, p.material.flat_color()))
        }
        _ => None,
    });
    let size = landscape.terrain.cell_size() * 1.6;
    let mut out: Vec<InstanceData> = landscape
        .terrain
        .vertices()
        .map(|v| {
            let [r, g, b] = match road {
                Some((half_width, color)) if v.z.abs() <= half_width => color,
                _ => ground,
            };
            InstanceData {
                pos: v.to_array(),
                scale: size,
                color: [r, g, b, 1.0],
                glow: 0.0,
            }
        })
        .collect();
    out.extend(
        landscape
            .props
            .iter()
            .filter(|p| p.name != "road")
            .map(|p| InstanceData::for_part(p, Mat4::IDENTITY, 0.0)),
    );
    out
}

/// Everything needed to draw instanced billboards with one uniform block.
struct Billboards {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniforms: Arc<wgpu::Buffer>,
    quad: Arc<wgpu::Buffer>,
    instances: Arc<wgpu::Buffer>,
}

impl Billboards {
    fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let uniforms = Arc::new(device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("billboard uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        let quad = Arc::new(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("billboard quad"),
            contents: bytemuck::cast_slice(&QUAD),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        let instances = Arc::new(device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("billboard instances"),
            size: (std::mem::size_of::<InstanceData>() * MAX_INSTANCES) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("billboard uniforms"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("billboard uniforms"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            }],
        });
        let pipeline = Self::pipeline(device, format, &layout);

        Self {
            pipeline,
            bind_group,
            uniforms,
            quad,
            instances,
        }
    }

    fn pipeline(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        layout: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene shader"),
            source: wgpu::ShaderSource::Wgsl(chase_core::SCENE_WGSL.into()),
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("billboards"),
            bind_group_layouts: &[layout],
            push_constant_ranges: &[],
        });
        let corner = wgpu::vertex_attr_array![0 => Float32x2];
        let buffers = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &corner,
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<InstanceData>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &InstanceData::ATTRIBUTES,
            },
        ];
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("billboards"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &buffers,
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            cache: None,
            multiview: None,
        })
    }

    fn draw(&self, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView, count: u32) {
        let [r, g, b] = BACKGROUND_RGB.map(f64::from);
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("billboards"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a: 1.0 }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.quad.slice(..));
        pass.set_vertex_buffer(1, self.instances.slice(..));
        pass.draw(0..QUAD.len() as u32, 0..count);
    }
}

pub struct GpuState<'w> {
    pub window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    billboards: Billboards,
    static_instances: Vec<InstanceData>,
    instances: Vec<InstanceData>,
}

impl<'w> GpuState<'w> {
    pub async fn new(
        window: &'w winit::window::Window,
        static_instances: Vec<InstanceData>,
    ) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("no GPU adapter for this window"))?;
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default(), None)
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let size = window.inner_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);
        let billboards = Billboards::new(&device, format);

        log::info!(
            "[gpu] {} on {:?}, surface {}x{} {format:?}, {} static billboards",
            adapter.get_info().name,
            adapter.get_info().backend,
            config.width,
            config.height,
            static_instances.len()
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            billboards,
            static_instances,
            instances: Vec::with_capacity(MAX_INSTANCES),
        })
    }

    /// Buffers the scene's teardown registry should own the release of.
    pub fn buffers(&self) -> [(&'static str, Arc<wgpu::Buffer>); 3] {
        [
            ("uniforms", Arc::clone(&self.billboards.uniforms)),
            ("quad", Arc::clone(&self.billboards.quad)),
            ("instances", Arc::clone(&self.billboards.instances)),
        ]
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn push_model(&mut self, model: &Model, actor: &Actor) {
        let root = actor.transform();
        self.instances.extend(
            model
                .parts
                .iter()
                .map(|part| InstanceData::for_part(part, root, actor.wheel_angle)),
        );
    }

    pub fn render(
        &mut self,
        frame: &FrameView<'_>,
        jax: &Model,
        nino: &Model,
    ) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let target = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.billboards.uniforms,
            0,
            bytemuck::bytes_of(&Uniforms::for_frame(frame)),
        );

        // Rebuilt every frame into the same allocation
        self.instances.clear();
        self.instances.extend_from_slice(&self.static_instances);
        self.push_model(jax, frame.jax);
        self.push_model(nino, frame.nino);
        self.instances.extend(
            frame
                .dust
                .world_positions(frame.dust_transform)
                .map(|p| InstanceData::dust(p, frame.dust_opacity)),
        );
        self.instances.truncate(MAX_INSTANCES);
        self.queue.write_buffer(
            &self.billboards.instances,
            0,
            bytemuck::cast_slice(&self.instances),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame"),
            });
        self.billboards.draw(&mut encoder, &target, self.instances.len() as u32);
        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}
