//! Font resolution and text rasterization.
//!
//! Text is rasterized into canvas-sized coverage masks which the renderers stamp in any color
//! and at any offset (shadow and outline passes reuse one mask).

pub(crate) mod bitmap;
/// Font candidate chain and resolved typefaces.
pub mod fonts;
pub(crate) mod mask;
