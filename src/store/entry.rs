use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDateTime;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::foundation::error::PartyResult;
use crate::store::disk::IMAGES_DIR;

/// Guest name recorded when the submitter left it blank.
pub const ANONYMOUS_GUEST: &str = "Anônimo";

/// One persisted submission: a composed meme plus its metadata.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Entry {
    /// `"<YYYYmmdd-HHMMSS>-<8 hex>"`.
    pub id: String,
    /// Character name as submitted.
    pub character: String,
    /// Submitter name, or [`ANONYMOUS_GUEST`].
    pub guest: String,
    /// Local time of day, `HH:MM:SS`.
    pub timestamp: String,
    /// Local creation instant; the collection's sort key.
    pub created_at: NaiveDateTime,
    /// Provenance label of the underlying image.
    pub source: String,
    /// Existing path of the paired PNG.
    pub image_path: PathBuf,
}

impl Entry {
    /// Decode the paired image.
    pub fn load_image(&self) -> PartyResult<DynamicImage> {
        let img = image::open(&self.image_path)
            .with_context(|| format!("open entry image {}", self.image_path.display()))?;
        Ok(img)
    }
}

/// Blank or whitespace-only names become [`ANONYMOUS_GUEST`].
pub fn normalize_guest(guest: &str) -> String {
    let trimmed = guest.trim();
    if trimmed.is_empty() {
        ANONYMOUS_GUEST.to_string()
    } else {
        trimmed.to_string()
    }
}

/// On-disk shape of an entry record.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct EntryRecord {
    pub(crate) id: String,
    pub(crate) character: String,
    #[serde(default)]
    pub(crate) guest: String,
    #[serde(default)]
    pub(crate) timestamp: String,
    #[serde(default)]
    pub(crate) source: String,
    pub(crate) image_path: String,
    pub(crate) created_at: NaiveDateTime,
}

impl EntryRecord {
    /// Materialize against the store `root`; `None` when the image no longer exists.
    pub(crate) fn into_entry(self, root: &Path) -> Option<Entry> {
        let image_path = resolve_image_path(root, &self.image_path)?;
        Some(Entry {
            id: self.id,
            character: self.character,
            guest: normalize_guest(&self.guest),
            timestamp: self.timestamp,
            created_at: self.created_at,
            source: self.source,
            image_path,
        })
    }
}

/// First existing location for a recorded image path.
///
/// Relative paths are tried under `root`, then as given (records written relative to the working
/// directory), then by file name under `root/images`. Absolute paths are used verbatim.
pub(crate) fn resolve_image_path(root: &Path, recorded: &str) -> Option<PathBuf> {
    if recorded.trim().is_empty() {
        return None;
    }
    let recorded = Path::new(recorded);
    if recorded.is_absolute() {
        return recorded.is_file().then(|| recorded.to_path_buf());
    }
    let mut candidates = vec![root.join(recorded), recorded.to_path_buf()];
    if let Some(name) = recorded.file_name() {
        candidates.push(root.join(IMAGES_DIR).join(name));
    }
    candidates.into_iter().find(|p| p.is_file())
}
