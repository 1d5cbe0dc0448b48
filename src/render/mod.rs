//! Deterministic CPU compositing.
//!
//! Layers are rasterized with `vello_cpu` into canvas-sized pixmaps and blended onto the
//! canvas in premultiplied RGBA8.

/// Premultiplied RGBA8 blend primitives.
pub mod composite;
/// Layer-by-layer thumbnail painting.
pub mod compositor;
/// Background placement and title metrics.
pub mod geometry;
