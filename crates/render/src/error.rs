/// Errors from GPU setup. All are detected once during startup and are
/// fatal to the process; there is no retry path.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create rendering surface: {0}")]
    SurfaceCreate(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible graphics adapter found")]
    AdapterNotFound,
    #[error("failed to acquire graphics device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),
    #[error("shader '{stage}' failed to compile:\n{log}")]
    ShaderCompile { stage: String, log: String },
    #[error("pipeline failed to link:\n{log}")]
    PipelineLink { log: String },
}
