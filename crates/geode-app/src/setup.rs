//! Startup: configuration to scene, texture source selection and the fatal
//! error type reported before the render loop runs.

use std::path::Path;

use geode_config::{CameraConfig, Config, ConfigError, LightingConfig, RenderConfig, TextureConfig};
use geode_lighting::{Light, LightingProducts, Material};
use geode_math::OrthoVolume;
use geode_mesh::{MeshBuffer, ObjExportError, SeedTetrahedron, build_sphere, export_obj};
use geode_render::{Checkerboard, RenderContextError, RendererError, TextureError, TextureImage};
use geode_scene::{OrbitCamera, SceneState, SubdivisionDepth};
use glam::{Vec3, Vec4};
use tracing::info;

/// Anything that stops the viewer before the first frame.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("graphics context unavailable: {0}")]
    Graphics(#[from] RenderContextError),

    #[error("renderer setup failed: {0}")]
    Renderer(#[from] RendererError),

    #[error("OBJ export failed: {0}")]
    Export(#[from] ObjExportError),
}

pub fn orbit_camera(camera: &CameraConfig) -> OrbitCamera {
    OrbitCamera {
        radius: camera.radius,
        theta: camera.theta_degrees.to_radians(),
        phi: camera.phi_degrees.to_radians(),
        target: Vec3::from_array(camera.target),
        up: Vec3::from_array(camera.up),
        volume: OrthoVolume {
            left: camera.left,
            right: camera.right,
            bottom: camera.bottom,
            top: camera.top,
            near: camera.near,
            far: camera.far,
        },
    }
}

/// Orbit step per key press, in radians.
pub fn orbit_step(camera: &CameraConfig) -> f32 {
    camera.step_degrees.to_radians()
}

pub fn lighting_products(lighting: &LightingConfig) -> LightingProducts {
    let light = Light {
        position: Vec4::from_array(lighting.light_position),
        ambient: Vec4::from_array(lighting.light_ambient),
        diffuse: Vec4::from_array(lighting.light_diffuse),
        specular: Vec4::from_array(lighting.light_specular),
    };
    let material = Material {
        ambient: Vec4::from_array(lighting.material_ambient),
        diffuse: Vec4::from_array(lighting.material_diffuse),
        specular: Vec4::from_array(lighting.material_specular),
        shininess: lighting.shininess,
    };
    LightingProducts::new(&light, &material)
}

pub fn subdivision_depth(render: &RenderConfig) -> SubdivisionDepth {
    SubdivisionDepth::new(render.initial_depth, render.max_depth)
}

/// Scene at its configured starting point, mesh already built.
pub fn scene_from_config(config: &Config) -> SceneState {
    SceneState::new(
        orbit_camera(&config.camera),
        subdivision_depth(&config.render),
        lighting_products(&config.lighting),
    )
}

pub fn clear_color(render: &RenderConfig) -> wgpu::Color {
    let [r, g, b, a] = render.clear_color;
    wgpu::Color { r, g, b, a }
}

/// The configured image, or the procedural checkerboard when none is set.
pub fn load_texture(texture: &TextureConfig) -> Result<TextureImage, TextureError> {
    match &texture.image_path {
        Some(path) => TextureImage::from_path(path),
        None => Checkerboard::new(texture.checkerboard_size).to_image(),
    }
}

/// Build the mesh at the configured starting depth and write it to `path`.
pub fn export_mesh(config: &Config, path: &Path) -> Result<MeshBuffer, SetupError> {
    let depth = subdivision_depth(&config.render).get();
    let mesh = build_sphere(&SeedTetrahedron::default(), depth);
    export_obj(&mesh, path)?;
    info!(
        path = %path.display(),
        depth,
        triangles = mesh.triangle_count(),
        "Exported sphere mesh"
    );
    Ok(mesh)
}
