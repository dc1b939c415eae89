//! GPU buffer management

pub mod frame_uniforms;

pub use frame_uniforms::{FrameUniformBuffer, FrameUniforms};
