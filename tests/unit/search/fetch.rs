use super::*;
use std::cell::RefCell;

use image::{Rgb, RgbImage};

fn hit(source: &str) -> SearchOutcome {
    SearchOutcome::Found(FoundImage {
        image: DynamicImage::ImageRgb8(RgbImage::from_pixel(9, 4, Rgb([0, 200, 0]))),
        source: source.to_string(),
    })
}

/// Records every query and answers from a fixed script.
struct Scripted {
    answer: fn(&str) -> SearchOutcome,
    queries: RefCell<Vec<String>>,
}

impl Scripted {
    fn new(answer: fn(&str) -> SearchOutcome) -> Self {
        Self {
            answer,
            queries: RefCell::new(Vec::new()),
        }
    }

    fn queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }
}

impl ImageSearch for Scripted {
    fn search(&self, query: &str) -> SearchOutcome {
        self.queries.borrow_mut().push(query.to_string());
        (self.answer)(query)
    }
}

#[test]
fn primary_hit_stops_the_chain() {
    let search = Scripted::new(|_| hit("dreamworks.example"));
    let out = fetch_image("Shrek", Some(&search), &FontSet::bitmap());
    assert_eq!(out.tier, FetchTier::Primary);
    assert_eq!(out.source, "dreamworks.example");
    assert_eq!(search.queries(), ["Shrek"]);
}

#[test]
fn broadened_query_is_second_attempt() {
    let search = Scripted::new(|q| {
        if q.ends_with(" character") {
            hit("fandom.example")
        } else {
            SearchOutcome::NotFound
        }
    });
    let out = fetch_image("Megamind", Some(&search), &FontSet::bitmap());
    assert_eq!(out.tier, FetchTier::Broadened);
    assert_eq!(out.source, "fandom.example");
    assert_eq!(search.queries(), ["Megamind", "Megamind character"]);
}

#[test]
fn exhausted_chain_renders_placeholder() {
    let search = Scripted::new(|_| SearchOutcome::NotFound);
    let out = fetch_image("Pikachu", Some(&search), &FontSet::bitmap());
    assert_eq!(out.tier, FetchTier::Placeholder);
    assert_eq!(out.source, PLACEHOLDER_SOURCE);
    assert_eq!((out.image.width(), out.image.height()), (1200, 675));
    assert_eq!(search.queries().len(), 2);
}

#[test]
fn no_backend_goes_straight_to_placeholder() {
    let out = fetch_image("Shrek", None, &FontSet::bitmap());
    assert_eq!(out.tier, FetchTier::Placeholder);
    assert_eq!(out.source, PLACEHOLDER_SOURCE);
}

#[test]
fn blank_name_never_searches() {
    let search = Scripted::new(|_| hit("x"));
    let out = fetch_image("  ", Some(&search), &FontSet::bitmap());
    assert_eq!(out.tier, FetchTier::Placeholder);
    assert!(search.queries().is_empty());
}

#[test]
fn blank_source_is_relabelled() {
    let search = Scripted::new(|_| hit("   "));
    let out = fetch_image("Shrek", Some(&search), &FontSet::bitmap());
    assert_eq!(out.source, FALLBACK_SOURCE);
}

#[test]
fn missing_or_blank_key_uses_placeholder() {
    let fonts = FontSet::bitmap();
    for key in [None, Some(""), Some("   ")] {
        let out = fetch_character_image("Shrek", key, &fonts);
        assert_eq!(out.tier, FetchTier::Placeholder);
        assert!(!out.source.is_empty());
    }
}
