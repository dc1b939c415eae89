//! Runtime shader loading with fail-closed validation
//!
//! Shader source lives on disk and is read at startup. A missing file is
//! a fatal IO error; a file that fails WGSL validation is logged with the
//! backend's diagnostic and yields `None`, and any pipeline built from a
//! missing module skips its draw instead of issuing one with an invalid
//! program.

use std::path::Path;

use crate::core::types::Result;

/// Read whole-file shader source from disk
pub fn read_shader_source(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}

/// Compile WGSL source, capturing validation errors instead of panicking
///
/// Returns `None` when validation fails; the error text is logged.
pub fn create_validated_module(
    device: &wgpu::Device,
    label: &str,
    source: &str,
) -> Option<wgpu::ShaderModule> {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    match pollster::block_on(scope.pop()) {
        Some(error) => {
            log::error!("Shader validation failed for {}: {}", label, error);
            None
        }
        None => Some(module),
    }
}

/// Load and compile a shader file
pub fn load_shader(device: &wgpu::Device, path: &Path) -> Result<Option<wgpu::ShaderModule>> {
    let source = read_shader_source(path)?;
    let label = path.display().to_string();
    Ok(create_validated_module(device, &label, &source))
}
