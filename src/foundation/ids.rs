//! Filesystem-safe slugs and entry identifiers.

use chrono::NaiveDateTime;

/// Maximum slug length, in characters.
pub const SLUG_MAX_CHARS: usize = 40;
/// Slug returned when nothing usable survives sanitization.
pub const SLUG_FALLBACK: &str = "item";

/// Derive a filesystem-safe token from free text.
///
/// Characters outside {word characters, whitespace, `-`} are dropped, runs of whitespace and
/// hyphens collapse to a single `_`, leading/trailing underscores are trimmed and the result is cut
/// to [`SLUG_MAX_CHARS`] characters. Empty results become [`SLUG_FALLBACK`].
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_gap = false;
    for ch in text.chars() {
        if ch.is_whitespace() || ch == '-' {
            in_gap = true;
        } else if is_word_char(ch) {
            if in_gap {
                out.push('_');
                in_gap = false;
            }
            out.push(ch);
        }
        // anything else is removed without closing a gap
    }
    if in_gap {
        out.push('_');
    }

    let cut: String = out
        .trim_matches('_')
        .chars()
        .take(SLUG_MAX_CHARS)
        .collect();
    // a cut can land right after a separator
    let trimmed = cut.trim_end_matches('_');
    if trimmed.is_empty() {
        SLUG_FALLBACK.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Unicode word character: letters, digits and `_`.
fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Identifier allocated for one entry: compact local timestamp plus a random suffix.
///
/// The same pair names the image (`<ts>_<uid>_<slug>.png`) and the metadata record
/// (`<ts>_<uid>.json`) so related files are discoverable by prefix.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntryId {
    stamp: String,
    uid: String,
}

impl EntryId {
    /// Allocate a new id for an entry created at `now`.
    pub fn generate(now: NaiveDateTime) -> Self {
        Self::from_parts(now, rand::random::<u32>())
    }

    pub(crate) fn from_parts(now: NaiveDateTime, suffix: u32) -> Self {
        Self {
            stamp: now.format("%Y%m%d-%H%M%S").to_string(),
            uid: format!("{suffix:08x}"),
        }
    }

    /// Logical id, `<ts>-<uid>`.
    pub fn id(&self) -> String {
        format!("{}-{}", self.stamp, self.uid)
    }

    /// Shared filename prefix, `<ts>_<uid>`.
    pub fn file_stem(&self) -> String {
        format!("{}_{}", self.stamp, self.uid)
    }

    /// Image artifact name for this id.
    pub fn image_file_name(&self, slug: &str) -> String {
        format!("{}_{}.png", self.file_stem(), slug)
    }

    /// Metadata record name for this id.
    pub fn meta_file_name(&self) -> String {
        format!("{}.json", self.file_stem())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/ids.rs"]
mod tests;
