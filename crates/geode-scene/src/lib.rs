//! Mutable scene state: orbit camera, subdivision depth, current mesh and
//! lighting products.
//!
//! All mutation goes through [`SceneState::apply`] (or the named methods it
//! forwards to). Depth changes rebuild the mesh before returning, so the next
//! frame always sees geometry matching the current depth.

mod camera;
mod depth;
mod state;

pub use camera::OrbitCamera;
pub use depth::SubdivisionDepth;
pub use state::{SceneChange, SceneCommand, SceneState};
