//! Voyager - voxel chunk viewer

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use rand::Rng;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowId},
};

use voyager::core::{
    camera::Camera,
    camera_controller::FlyCameraController,
    input::InputState,
    logging,
    time::FrameTimer,
    types::{Mat4, Vec3},
};
use voyager::lattice::{build_lattice_mesh, build_occupancy_texels};
use voyager::render::{
    buffer::FrameUniformBuffer,
    context::GpuContext,
    pipeline::{LatticePipeline, MeshPipeline},
    shader,
    texture::ChunkTexture,
    GpuMesh, MeshVertex,
};
use voyager::voxel::{Chunk, OccupancyBitmask, Voxel, CHUNK_DIM};

const WINDOW_TITLE: &str = "Voyager";
const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;

const LATTICE_SHADER_PATH: &str = "shaders/lattice.wgsl";
const MESH_SHADER_PATH: &str = "shaders/mesh.wgsl";

/// World-space edge length of one voxel cell
const VOXEL_SCALE: f32 = 0.1;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.1,
    b: 0.1,
    a: 1.0,
};

/// Which render path draws this frame (M toggles)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RenderMode {
    Lattice,
    Mesh,
}

struct RenderResources {
    frame_uniforms: FrameUniformBuffer,
    lattice_pipeline: LatticePipeline,
    mesh_pipeline: MeshPipeline,
    /// Kept alive for whole-texture re-upload on occupancy change
    #[allow(dead_code)]
    chunk_texture: ChunkTexture,
    texture_bind_group: wgpu::BindGroup,
    lattice_mesh: GpuMesh,
    quad_mesh: GpuMesh,
}

impl RenderResources {
    fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
    ) -> voyager::core::types::Result<Self> {
        // Random chunk population, then the whole generation pipeline:
        // chunk -> bitmask -> texel image -> 3-D texture
        let mut rng = rand::thread_rng();
        let chunk = Chunk::from_fn(|_| Voxel::new(rng.gen_range(0..2)));
        let mask = OccupancyBitmask::encode(&chunk);
        log::info!("Chunk: {} of {} voxels solid", mask.solid_count(), mask.len());

        let texels = build_occupancy_texels(&mask, CHUNK_DIM);
        let chunk_texture = ChunkTexture::new(device, CHUNK_DIM as u32);
        chunk_texture.upload(queue, &texels);

        // The lattice mesh depends only on size, never on occupancy
        let vertices = build_lattice_mesh(CHUNK_DIM as u32, VOXEL_SCALE)?;
        log::info!("Lattice: {} vertices", vertices.len());
        let mut lattice_mesh = GpuMesh::new(
            device,
            queue,
            "lattice_vertices",
            bytemuck::cast_slice(&vertices),
            vertices.len() as u32,
        );
        lattice_mesh.transform = Mat4::from_translation(Vec3::new(0.0, 0.0, 1.0));

        let quad = quad_vertices();
        let mut quad_mesh = GpuMesh::new(
            device,
            queue,
            "quad_vertices",
            bytemuck::cast_slice(&quad),
            quad.len() as u32,
        );
        quad_mesh.transform = Mat4::from_translation(Vec3::new(0.0, 0.0, 1.0));

        let frame_uniforms = FrameUniformBuffer::new(device);

        // Shader files are required; a file that fails validation only
        // disables its pipeline
        let lattice_shader = shader::load_shader(device, Path::new(LATTICE_SHADER_PATH))?;
        let mesh_shader = shader::load_shader(device, Path::new(MESH_SHADER_PATH))?;

        let lattice_pipeline = LatticePipeline::new(
            device,
            surface_format,
            frame_uniforms.bind_group_layout(),
            lattice_shader.as_ref(),
        );
        let mesh_pipeline = MeshPipeline::new(
            device,
            surface_format,
            frame_uniforms.bind_group_layout(),
            mesh_shader.as_ref(),
        );

        let texture_bind_group = lattice_pipeline.create_texture_bind_group(device, &chunk_texture);

        Ok(Self {
            frame_uniforms,
            lattice_pipeline,
            mesh_pipeline,
            chunk_texture,
            texture_bind_group,
            lattice_mesh,
            quad_mesh,
        })
    }
}

/// Unit quad in the z = 1 plane for the plain mesh path
fn quad_vertices() -> [MeshVertex; 6] {
    const POSITIONS: [[f32; 3]; 6] = [
        [1.0, 1.0, 1.0],
        [-1.0, 1.0, 1.0],
        [-1.0, -1.0, 1.0],
        [-1.0, -1.0, 1.0],
        [1.0, -1.0, 1.0],
        [1.0, 1.0, 1.0],
    ];
    POSITIONS.map(|position| MeshVertex { position })
}

struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    resources: Option<RenderResources>,
    camera: Camera,
    controller: FlyCameraController,
    input: InputState,
    timer: FrameTimer,
    cursor_grabbed: bool,
    mode: RenderMode,
    init_failed: bool,
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            gpu: None,
            resources: None,
            camera: Camera::default(),
            controller: FlyCameraController::default(),
            input: InputState::new(),
            timer: FrameTimer::new(),
            cursor_grabbed: false,
            mode: RenderMode::Lattice,
            init_failed: false,
        }
    }

    fn toggle_cursor_grab(&mut self) {
        if let Some(window) = &self.window {
            self.cursor_grabbed = !self.cursor_grabbed;

            if self.cursor_grabbed {
                window
                    .set_cursor_grab(CursorGrabMode::Confined)
                    .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
                    .ok();
                window.set_cursor_visible(false);
            } else {
                window.set_cursor_grab(CursorGrabMode::None).ok();
                window.set_cursor_visible(true);
            }

            self.input.set_mouse_captured(self.cursor_grabbed);
        }
    }

    fn render(&mut self) {
        let Some(gpu) = &self.gpu else { return };
        let Some(resources) = &self.resources else { return };

        let output = match gpu.get_current_texture() {
            Ok(t) => t,
            Err(e) => {
                log::error!("Failed to get surface texture: {}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mesh = match self.mode {
            RenderMode::Lattice => &resources.lattice_mesh,
            RenderMode::Mesh => &resources.quad_mesh,
        };
        resources
            .frame_uniforms
            .update(&gpu.queue, &self.camera, mesh.transform);

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        match self.mode {
            RenderMode::Lattice => {
                resources.lattice_pipeline.render(
                    &mut encoder,
                    &view,
                    resources.frame_uniforms.bind_group(),
                    &resources.texture_bind_group,
                    mesh,
                    CLEAR_COLOR,
                );
            }
            RenderMode::Mesh => {
                resources.mesh_pipeline.render(
                    &mut encoder,
                    &view,
                    resources.frame_uniforms.bind_group(),
                    mesh,
                    CLEAR_COLOR,
                );
            }
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                self.init_failed = true;
                event_loop.exit();
                return;
            }
        };

        let gpu = match pollster::block_on(GpuContext::new(window.clone())) {
            Ok(gpu) => gpu,
            Err(e) => {
                log::error!("Failed to create GPU context: {}", e);
                self.init_failed = true;
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.camera.set_aspect(size.width as f32, size.height as f32);
        log::info!("Window created: {}x{}", size.width, size.height);

        let resources = match RenderResources::new(&gpu.device, &gpu.queue, gpu.format()) {
            Ok(resources) => resources,
            Err(e) => {
                log::error!("Failed to create render resources: {}", e);
                self.init_failed = true;
                event_loop.exit();
                return;
            }
        };

        self.window = Some(window);
        self.resources = Some(resources);
        self.gpu = Some(gpu);

        // Start with the cursor captured, like a fly-through
        self.toggle_cursor_grab();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.process_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let Some(gpu) = &mut self.gpu {
                        gpu.resize(size.width, size.height);
                        self.camera.set_aspect(size.width as f32, size.height as f32);
                    }
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() {
                    match event.physical_key {
                        PhysicalKey::Code(KeyCode::Escape) => {
                            if self.cursor_grabbed {
                                self.toggle_cursor_grab();
                            } else {
                                event_loop.exit();
                            }
                        }
                        PhysicalKey::Code(KeyCode::Tab) => {
                            self.toggle_cursor_grab();
                        }
                        PhysicalKey::Code(KeyCode::KeyM) => {
                            self.mode = match self.mode {
                                RenderMode::Lattice => RenderMode::Mesh,
                                RenderMode::Mesh => RenderMode::Lattice,
                            };
                            log::info!("Render mode: {:?}", self.mode);
                        }
                        _ => {}
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if state.is_pressed() && button == MouseButton::Left && !self.cursor_grabbed {
                    self.toggle_cursor_grab();
                }
            }
            WindowEvent::RedrawRequested => {
                self.timer.tick();
                let dt = self.timer.delta_secs();

                self.controller.update(&mut self.camera, &self.input, dt);

                self.render();

                if let Some(window) = &self.window {
                    window.set_title(&format!(
                        "{} - {:.1} FPS | Tab=mouse, WASD=move, M=mode",
                        WINDOW_TITLE,
                        self.timer.fps()
                    ));
                }

                self.input.end_frame();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.input.process_mouse_motion(delta);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> ExitCode {
    logging::init();
    log::info!("Voyager starting...");

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut app = App::new();
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        return ExitCode::FAILURE;
    }

    if app.init_failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
