use image::DynamicImage;

use crate::render::placeholder::{PlaceholderOpts, render_placeholder};
use crate::search::client::{
    FALLBACK_SOURCE, FoundImage, ImageSearch, SearchOpts, SearchOutcome, SerpApiClient,
};
use crate::text::fonts::FontSet;

/// Provenance label of synthesized images.
pub const PLACEHOLDER_SOURCE: &str = "Placeholder";

/// Which step of the fallback chain produced the image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchTier {
    /// Search on the name as entered.
    Primary,
    /// Search on `"<name> character"`.
    Broadened,
    /// Synthesized locally.
    Placeholder,
}

/// Image for a character plus its provenance. Always present.
#[derive(Clone, Debug)]
pub struct FetchedImage {
    /// The image to compose.
    pub image: DynamicImage,
    /// Non-empty provenance label.
    pub source: String,
    /// Fallback step that produced it.
    pub tier: FetchTier,
}

/// Resolve an image for `name` through the fallback chain.
///
/// Tries `search` on the raw name, then on `"<name> character"`, then renders a placeholder
/// captioned with the raw name. Without a search backend, or for a blank name, the placeholder is
/// returned directly. Never fails.
#[tracing::instrument(skip(search, fonts), fields(backend = search.is_some()))]
pub fn fetch_image(name: &str, search: Option<&dyn ImageSearch>, fonts: &FontSet) -> FetchedImage {
    let search = match search {
        Some(s) if !name.trim().is_empty() => s,
        Some(_) => {
            tracing::debug!("blank name, skipping search");
            return placeholder(name, fonts);
        }
        None => {
            tracing::warn!("no search backend configured, using placeholder");
            return placeholder(name, fonts);
        }
    };

    if let SearchOutcome::Found(hit) = search.search(name) {
        return found(hit, FetchTier::Primary);
    }
    let broadened = format!("{name} character");
    if let SearchOutcome::Found(hit) = search.search(&broadened) {
        return found(hit, FetchTier::Broadened);
    }

    tracing::info!("no image found, using placeholder");
    placeholder(name, fonts)
}

/// [`fetch_image`] backed by SerpAPI when `api_key` is present and non-blank.
pub fn fetch_character_image(name: &str, api_key: Option<&str>, fonts: &FontSet) -> FetchedImage {
    let Some(key) = api_key.map(str::trim).filter(|k| !k.is_empty()) else {
        return fetch_image(name, None, fonts);
    };
    match SerpApiClient::new(SearchOpts::new(key)) {
        Ok(client) => fetch_image(name, Some(&client), fonts),
        Err(e) => {
            tracing::warn!(error = %e, "search client unavailable");
            fetch_image(name, None, fonts)
        }
    }
}

fn found(hit: FoundImage, tier: FetchTier) -> FetchedImage {
    let source = if hit.source.trim().is_empty() {
        FALLBACK_SOURCE.to_string()
    } else {
        hit.source
    };
    tracing::info!(source = source.as_str(), ?tier, "image resolved");
    FetchedImage {
        image: hit.image,
        source,
        tier,
    }
}

fn placeholder(name: &str, fonts: &FontSet) -> FetchedImage {
    let image = render_placeholder(name, fonts, &PlaceholderOpts::default());
    FetchedImage {
        image: DynamicImage::ImageRgb8(image),
        source: PLACEHOLDER_SOURCE.to_string(),
        tier: FetchTier::Placeholder,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/search/fetch.rs"]
mod tests;
