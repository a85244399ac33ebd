//! hearmeout turns party-game submissions into captioned memes and plays them back.
//!
//! - Resolve an image for a character name through a fallback chain ([`fetch_image`])
//! - Lay it out under a "HEAR ME OUT" title and caption ([`compose`])
//! - Persist it crash-safely and list it back in creation order ([`EntryStore`])
//! - Cross-fade between slides into any [`FrameSink`] ([`fade`], [`SlideCursor`])
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Meme composition, placeholders and transitions.
pub mod render;
/// Image search and the fetch fallback chain.
pub mod search;
/// Slide navigation and playback.
pub mod slideshow;
/// On-disk entry storage.
pub mod store;
/// Font discovery and text rasterization.
pub mod text;

pub use crate::foundation::core::{
    ACCENT, BLACK, CANVAS_BG, Canvas, Placement, Rect, Rgb8, WHITE,
};
pub use crate::foundation::error::{PartyError, PartyResult};
pub use crate::foundation::ids::{EntryId, SLUG_FALLBACK, SLUG_MAX_CHARS, slugify};

pub use crate::render::compose::{ComposeOpts, DEFAULT_TITLE, compose, fit_within};
pub use crate::render::placeholder::{PlaceholderOpts, render_placeholder};
pub use crate::render::sink::{CapturedFrame, FrameSink, InMemorySink, PngDirSink, SinkConfig};
pub use crate::render::transition::{FadeOpts, crossfade_rgb, fade, pad_to};
pub use crate::search::client::{
    DEFAULT_ENDPOINT, FALLBACK_SOURCE, FoundImage, ImageSearch, SearchOpts, SearchOutcome,
    SerpApiClient,
};
pub use crate::search::fetch::{
    FetchTier, FetchedImage, PLACEHOLDER_SOURCE, fetch_character_image, fetch_image,
};
pub use crate::slideshow::{SlideCursor, play};
pub use crate::store::disk::{ClearReport, ENTRIES_DIR, EntryStore, IMAGES_DIR};
pub use crate::store::entry::{ANONYMOUS_GUEST, Entry, normalize_guest};
pub use crate::text::fonts::{FontCandidates, FontSet, Typeface};
