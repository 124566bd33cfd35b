use stagehand_render::{CameraRig, DrawCall, FrameTarget, Light, ShaderHandle};
use tracing::{error, info, warn};

use crate::gpu::{InstanceData, Uniforms, WgpuRenderer};

/// Errors from bringing up the GPU for a window surface.
#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("no compatible GPU adapter")]
    NoAdapter,
    #[error("device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no texture formats")]
    NoSurfaceFormat,
}

/// A window surface plus the device that draws into it.
///
/// Draw calls are batched until [`present`](FrameTarget::present), which
/// acquires the swapchain texture, renders the batch and presents it. Surface
/// loss is handled there by reconfiguring and dropping the frame.
pub struct SurfaceTarget {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    unlit: Vec<ShaderHandle>,
    clear_color: [f32; 4],
    uniforms: Uniforms,
    instances: Vec<InstanceData>,
}

impl SurfaceTarget {
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
    ) -> Result<Self, GpuError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("stagehand_device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or(GpuError::NoSurfaceFormat)?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, format, config.width, config.height);
        info!(
            backend = adapter.get_info().backend.to_str(),
            ?format,
            "GPU initialized"
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            renderer,
            unlit: Vec::new(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            uniforms: Uniforms::new(&CameraRig::default(), &[]),
            instances: Vec::new(),
        })
    }

    /// Draw calls using `shader` are drawn in flat colour.
    pub fn with_unlit(mut self, shader: ShaderHandle) -> Self {
        self.unlit.push(shader);
        self
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }
}

impl FrameTarget for SurfaceTarget {
    fn clear(&mut self, color: [f32; 4]) {
        self.clear_color = color;
        self.instances.clear();
    }

    fn draw_mesh(&mut self, call: &DrawCall<'_>, camera: &CameraRig, lights: &[Light]) {
        if self.instances.len() >= self.renderer.max_instances() {
            warn!(label = call.label, "instance buffer full, draw dropped");
            return;
        }
        self.uniforms = Uniforms::new(camera, lights);
        let unlit = self.unlit.contains(&call.shader);
        self.instances.push(InstanceData::from_call(call, unlit));
    }

    fn present(&mut self) {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(e) => {
                error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer.render(
            &self.device,
            &self.queue,
            &view,
            &self.uniforms,
            &self.instances,
            self.clear_color,
        );
        output.present();
    }
}
