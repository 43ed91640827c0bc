pub mod context;
pub mod depth;
pub mod frame;
pub mod pass;
pub mod renderer;
pub mod shader;
pub mod texture;
pub mod transform;

pub use context::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use depth::DepthBuffer;
pub use frame::{FrameReport, GraphicsDevice, render_frame};
pub use pass::{BLACK, RenderPassBuilder};
pub use renderer::{GpuFrame, RendererError, SphereRenderer};
pub use shader::{SPHERE_SHADER_SOURCE, ShaderError, create_shader};
pub use texture::{
    Checkerboard, MAX_TEXTURE_DIMENSION, SamplingPolicy, SphereTexture, TextureError, TextureImage,
};
pub use transform::TransformUniform;
