//! WebGPU rendering module
//!
//! Flat-colored triangle lists rebuilt from a read-only [`crate::sim::GameState`]
//! every frame. The simulation never depends on anything in here.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, world_to_ndc};
pub use shapes::scene;
pub use vertex::Vertex;
