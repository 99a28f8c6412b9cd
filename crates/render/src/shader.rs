//! Validated shader and pipeline construction. WGSL is run through naga
//! before module creation so a broken shader surfaces as a startup error
//! carrying the full diagnostic log, not a later device loss.

use crate::RenderError;

/// Parse and validate a WGSL source. Returns the naga module on success;
/// on failure the error carries naga's annotated diagnostic.
pub fn validate_wgsl(stage: &str, source: &str) -> Result<naga::Module, RenderError> {
    let module =
        naga::front::wgsl::parse_str(source).map_err(|e| RenderError::ShaderCompile {
            stage: stage.to_string(),
            log: e.emit_to_string(source),
        })?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::default(),
    )
    .validate(&module)
    .map_err(|e| RenderError::ShaderCompile {
        stage: stage.to_string(),
        log: e.emit_to_string(source),
    })?;

    Ok(module)
}

/// Validate a WGSL source and create the shader module from it.
pub fn build_shader(
    device: &wgpu::Device,
    stage: &str,
    source: &str,
) -> Result<wgpu::ShaderModule, RenderError> {
    let _ = validate_wgsl(stage, source)?;
    tracing::debug!("shader '{stage}' compiled");
    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(stage),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    }))
}

/// Create a render pipeline inside a validation error scope, so interface
/// mismatches report as a link failure with the driver's log instead of
/// panicking the device.
pub fn build_pipeline(
    device: &wgpu::Device,
    descriptor: &wgpu::RenderPipelineDescriptor<'_>,
) -> Result<wgpu::RenderPipeline, RenderError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let pipeline = device.create_render_pipeline(descriptor);
    if let Some(error) = pollster::block_on(device.pop_error_scope()) {
        return Err(RenderError::PipelineLink {
            log: error.to_string(),
        });
    }
    Ok(pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_wgsl_passes() {
        let source = r#"
            @fragment
            fn fs_main() -> @location(0) vec4<f32> {
                return vec4<f32>(1.0, 0.0, 0.0, 1.0);
            }
        "#;
        assert!(validate_wgsl("test", source).is_ok());
    }

    #[test]
    fn parse_error_carries_stage_and_log() {
        let err = validate_wgsl("broken", "fn oops( {").unwrap_err();
        match err {
            RenderError::ShaderCompile { stage, log } => {
                assert_eq!(stage, "broken");
                assert!(!log.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn type_error_is_caught_by_validation_or_parse() {
        let source = r#"
            @fragment
            fn fs_main() -> @location(0) vec4<f32> {
                let x: f32 = vec3<f32>(1.0, 1.0, 1.0);
                return vec4<f32>(x);
            }
        "#;
        assert!(matches!(
            validate_wgsl("typed", source),
            Err(RenderError::ShaderCompile { .. })
        ));
    }
}
