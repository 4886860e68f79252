//! Rendering
//!
//! `scene` builds a plain draw list from the world; `pipeline` pushes it
//! through WebGPU as flat-colored triangles.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{Frame, Quad, build_frame};
