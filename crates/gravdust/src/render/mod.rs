//! Rendering module: CPU canvas and its wgpu presenter

mod canvas;
mod renderer;

pub use canvas::Canvas;
pub use renderer::Renderer;
