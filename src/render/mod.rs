//! Raster output: placeholder synthesis, meme composition and slideshow transitions.

/// Meme layout: image viewport plus outlined title and caption.
pub mod compose;
/// Gradient stand-in image for characters with no search result.
pub mod placeholder;
/// Frame sinks consumed by transitions.
pub mod sink;
/// Cross-fade between consecutive slides.
pub mod transition;
