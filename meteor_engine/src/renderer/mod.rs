/// Renderer module - the opaque render backend seam
///
/// The host never talks to a graphics API directly; it goes through the
/// [`RenderBackend`] trait. Backend crates (Vulkan, ...) provide the
/// concrete implementations.

// Module declarations
pub mod backend;

#[cfg(test)]
pub mod mock_backend;

// Re-export everything from backend.rs
pub use backend::*;
