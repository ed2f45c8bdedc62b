//! Prism Engine: a pinhole-camera software rasterizer
//!
//! Renders interleaved vertex buffers on the CPU, no GPU involved:
//! - Physically-based camera (film aperture + focal length, overscan/fill)
//! - Triangle lists, strips, fans, quads and quad strips
//! - Perspective-correct interpolation and f32 depth testing
//! - Pluggable per-pixel shading

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod raster;
pub mod settings;
