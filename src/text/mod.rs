//! Title text: font discovery, shaping, and line wrapping.

/// Title font loading and system font resolution.
pub mod font;
/// Parley-backed line shaping and measurement.
pub mod layout;
/// Title block placement on the canvas.
pub mod title;
/// Greedy word wrapping against a width budget.
pub mod wrap;
