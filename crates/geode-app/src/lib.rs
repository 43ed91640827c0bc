//! The geode viewer application.
//!
//! Wires configuration, input and the wgpu renderer together around a
//! [`RenderLoop`](render_loop::RenderLoop) driven by winit redraw requests.

pub mod render_loop;
pub mod setup;
pub mod window;
