//! Shader module creation with compile-error reporting.

use log::{debug, info};
use thiserror::Error;

pub const SPHERE_SHADER_SOURCE: &str = include_str!("sphere.wgsl");

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("shader '{name}' failed to compile: {message}")]
    CompilationFailed { name: String, message: String },
}

/// Compile WGSL `source` and surface any compiler errors as [`ShaderError`].
///
/// Creation runs inside a validation error scope, so a parse failure is
/// returned instead of reaching the device's uncaptured-error handler.
/// Warnings are logged at `debug`.
pub fn create_shader(
    device: &wgpu::Device,
    name: &str,
    source: &str,
) -> Result<wgpu::ShaderModule, ShaderError> {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(name),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    if let Some(error) = pollster::block_on(scope.pop()) {
        return Err(ShaderError::CompilationFailed {
            name: name.to_string(),
            message: error.to_string(),
        });
    }

    let compilation = pollster::block_on(module.get_compilation_info());
    let mut errors = Vec::new();
    for message in compilation.messages {
        match message.message_type {
            wgpu::CompilationMessageType::Error => errors.push(message.message),
            _ => debug!("Shader '{}': {}", name, message.message),
        }
    }

    if !errors.is_empty() {
        return Err(ShaderError::CompilationFailed {
            name: name.to_string(),
            message: errors.join("\n"),
        });
    }

    info!("Compiled shader '{}'", name);
    Ok(module)
}
