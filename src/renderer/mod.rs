//! WebGPU rendering module
//!
//! Scenes are built as flat-colored triangle lists in field coordinates and
//! mapped to the surface with aspect-preserving letterboxing.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState, field_to_ndc};
pub use scene::build_scene;
pub use vertex::Vertex;
