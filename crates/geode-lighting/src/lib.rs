//! Single-light, single-material Phong lighting parameters.
//!
//! A [`Light`] and a [`Material`] are combined once into
//! [`LightingProducts`]; shading only ever sees the products. The GPU copy
//! is [`PhongUniform`], and [`shade_cpu`] mirrors the fragment shader for
//! tests.

mod phong;
mod source;

pub use phong::{LightingProducts, PhongUniform, shade_cpu};
pub use source::{Light, Material};
