//! Rendering error types.

use thiserror::Error;

/// Errors that can occur during rendering operations.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Failed to create wgpu adapter.
    #[error("failed to create graphics adapter")]
    AdapterCreationFailed,

    /// Failed to create wgpu device.
    #[error("failed to create graphics device: {0}")]
    DeviceCreationFailed(#[from] wgpu::RequestDeviceError),

    /// Failed to create surface.
    #[error("failed to create surface: {0}")]
    SurfaceCreationFailed(#[from] wgpu::CreateSurfaceError),

    /// Surface configuration failed.
    #[error("surface configuration failed")]
    SurfaceConfigurationFailed,

    /// Position and color buffers disagree in length.
    #[error("buffer length mismatch: {positions} position floats, {colors} color floats")]
    BufferMismatch { positions: usize, colors: usize },

    /// Reading back a captured frame failed.
    #[error("GPU buffer mapping failed")]
    BufferMapFailed,

    /// Captured pixels do not match the image size.
    #[error("invalid image data")]
    InvalidImageData,

    /// The surface format cannot be converted to RGBA8.
    #[error("cannot capture surface format {0:?}")]
    UnsupportedCaptureFormat(wgpu::TextureFormat),

    /// Image encoding error.
    #[error("image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    /// Out of memory.
    #[error("out of memory")]
    OutOfMemory,
}

/// A specialized Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;

impl From<RenderError> for eitview_core::EitViewError {
    fn from(err: RenderError) -> Self {
        eitview_core::EitViewError::RenderError(err.to_string())
    }
}
