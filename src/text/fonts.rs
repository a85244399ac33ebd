use std::path::{Path, PathBuf};
use std::sync::Arc;

use usvg::fontdb;

/// Ordered font file candidates, tried first to last.
///
/// The first file that loads wins. When none do, installed system fonts are consulted (if
/// enabled) and finally the built-in bitmap font is used, so resolution never fails.
#[derive(Clone, Debug)]
pub struct FontCandidates {
    /// Candidates for heavy text (titles, captions).
    pub bold: Vec<PathBuf>,
    /// Candidates for secondary text.
    pub regular: Vec<PathBuf>,
    /// Query installed system fonts when no candidate file loads.
    pub use_system_fonts: bool,
}

impl Default for FontCandidates {
    fn default() -> Self {
        let bold = [
            "arialbd.ttf",
            "arial.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
            "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
            "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
            "C:\\Windows\\Fonts\\arialbd.ttf",
        ];
        let regular = [
            "arial.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
        ];
        Self {
            bold: bold.iter().map(PathBuf::from).collect(),
            regular: regular.iter().map(PathBuf::from).collect(),
            use_system_fonts: true,
        }
    }
}

impl FontCandidates {
    /// Candidates that resolve straight to the built-in bitmap font.
    pub fn none() -> Self {
        Self {
            bold: Vec::new(),
            regular: Vec::new(),
            use_system_fonts: false,
        }
    }

    /// Put `path` in front of both chains.
    pub fn prefer(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.bold.insert(0, path.clone());
        self.regular.insert(0, path);
        self
    }
}

/// A resolved typeface: an outline font loaded into a font database, or the bitmap fallback.
#[derive(Clone, Debug)]
pub enum Typeface {
    /// Outline font rendered through `usvg`/`resvg`.
    Outline(OutlineFace),
    /// Built-in 5x7 bitmap font; always available.
    Bitmap,
}

/// An outline font resolved from the candidate chain.
#[derive(Clone)]
pub struct OutlineFace {
    pub(crate) db: Arc<fontdb::Database>,
    pub(crate) family: String,
    pub(crate) weight: u16,
}

impl std::fmt::Debug for OutlineFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineFace")
            .field("family", &self.family)
            .field("weight", &self.weight)
            .field("faces", &self.db.len())
            .finish()
    }
}

impl Typeface {
    /// Walk `candidates` in order; see [`FontCandidates`].
    pub fn resolve(candidates: &[PathBuf], use_system_fonts: bool, bold: bool) -> Self {
        let weight = if bold { 700 } else { 400 };

        for path in candidates {
            if let Some(face) = load_candidate(path, weight) {
                tracing::debug!(path = %path.display(), family = %face.family, "font resolved");
                return Typeface::Outline(face);
            }
        }

        if use_system_fonts {
            if let Some(face) = system_face(weight) {
                tracing::debug!(family = %face.family, "font resolved from system fonts");
                return Typeface::Outline(face);
            }
        }

        tracing::warn!("no usable font found, falling back to built-in bitmap font");
        Typeface::Bitmap
    }

    /// Return `true` for the degraded bitmap fallback.
    pub fn is_bitmap(&self) -> bool {
        matches!(self, Typeface::Bitmap)
    }
}

fn load_candidate(path: &Path, weight: u16) -> Option<OutlineFace> {
    if !path.is_file() {
        return None;
    }
    let mut db = fontdb::Database::new();
    if let Err(e) = db.load_font_file(path) {
        tracing::debug!(path = %path.display(), error = %e, "font candidate rejected");
        return None;
    }
    let family = db
        .faces()
        .next()
        .and_then(|f| f.families.first())
        .map(|(name, _)| name.clone())?;
    Some(OutlineFace {
        db: Arc::new(db),
        family,
        weight,
    })
}

fn system_face(weight: u16) -> Option<OutlineFace> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let families = [fontdb::Family::SansSerif, fontdb::Family::Serif];
    let query = fontdb::Query {
        families: &families,
        weight: fontdb::Weight(weight),
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };
    let id = db.query(&query).or_else(|| db.faces().next().map(|f| f.id))?;
    let family = db
        .face(id)
        .and_then(|f| f.families.first())
        .map(|(name, _)| name.clone())?;
    Some(OutlineFace {
        db: Arc::new(db),
        family,
        weight,
    })
}

/// Resolver that honors the requested family when present and otherwise takes any loaded face.
pub(crate) fn make_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, db| {
            let mut families = Vec::<fontdb::Family<'_>>::new();
            for family in font.families() {
                if let usvg::FontFamily::Named(s) = family {
                    families.push(fontdb::Family::Name(s));
                }
            }
            families.push(fontdb::Family::SansSerif);

            let query = fontdb::Query {
                families: &families,
                weight: fontdb::Weight(font.weight()),
                stretch: fontdb::Stretch::Normal,
                style: fontdb::Style::Normal,
            };

            if let Some(id) = db.query(&query) {
                return Some(id);
            }
            db.faces().next().map(|f| f.id)
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

/// Typefaces used by the renderers: heavy for titles/captions, regular for secondary lines.
#[derive(Clone, Debug)]
pub struct FontSet {
    /// Heavy face.
    pub bold: Typeface,
    /// Regular face.
    pub regular: Typeface,
}

impl FontSet {
    /// Resolve both faces from `candidates`. Never fails.
    pub fn discover(candidates: &FontCandidates) -> Self {
        Self {
            bold: Typeface::resolve(&candidates.bold, candidates.use_system_fonts, true),
            regular: Typeface::resolve(&candidates.regular, candidates.use_system_fonts, false),
        }
    }

    /// Bitmap-only font set; rendering is then fully independent of installed fonts.
    pub fn bitmap() -> Self {
        Self {
            bold: Typeface::Bitmap,
            regular: Typeface::Bitmap,
        }
    }
}

impl Default for FontSet {
    fn default() -> Self {
        Self::discover(&FontCandidates::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
