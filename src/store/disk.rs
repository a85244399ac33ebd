use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use image::{ImageFormat, RgbImage};

use crate::foundation::error::{PartyError, PartyResult};
use crate::foundation::ids::{EntryId, slugify};
use crate::store::entry::{Entry, EntryRecord, normalize_guest};

/// Sub-directory holding composed PNGs.
pub const IMAGES_DIR: &str = "images";
/// Sub-directory holding JSON metadata records.
pub const ENTRIES_DIR: &str = "entries";

/// Outcome of [`EntryStore::clear_all`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClearReport {
    /// Files deleted.
    pub removed: usize,
    /// Files that could not be deleted.
    pub failed: usize,
}

/// Durable entry collection rooted at a directory.
///
/// Layout: `<root>/images/<ts>_<uid>_<slug>.png` and `<root>/entries/<ts>_<uid>.json`. The
/// collection is rebuilt from disk on every [`load_all`](Self::load_all); nothing is cached.
///
/// Concurrent `save`s are safe (distinct ids), and a reader never sees a record before its
/// image. `clear_all` is not coordinated with concurrent writers.
#[derive(Clone, Debug)]
pub struct EntryStore {
    root: PathBuf,
}

impl EntryStore {
    /// Store rooted at `root`. Directories are created lazily.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the composed PNGs.
    pub fn images_dir(&self) -> PathBuf {
        self.root.join(IMAGES_DIR)
    }

    /// Directory holding the JSON entry records.
    pub fn entries_dir(&self) -> PathBuf {
        self.root.join(ENTRIES_DIR)
    }

    fn ensure_dirs(&self) -> PartyResult<()> {
        for dir in [self.images_dir(), self.entries_dir()] {
            fs::create_dir_all(&dir).map_err(|e| {
                PartyError::storage(format!("create {}: {e}", dir.display()))
            })?;
        }
        Ok(())
    }

    /// Persist a composed meme and its metadata, returning the new entry.
    ///
    /// The PNG is written first, then the record is written atomically (temp file, fsync,
    /// rename), so a visible record always has its image.
    #[tracing::instrument(skip(self, image), fields(root = %self.root.display()))]
    pub fn save(
        &self,
        character: &str,
        guest: &str,
        image: &RgbImage,
        source: &str,
    ) -> PartyResult<Entry> {
        let now = Local::now().naive_local();
        self.save_at(EntryId::generate(now), now, character, guest, image, source)
    }

    pub(crate) fn save_at(
        &self,
        id: EntryId,
        now: NaiveDateTime,
        character: &str,
        guest: &str,
        image: &RgbImage,
        source: &str,
    ) -> PartyResult<Entry> {
        self.ensure_dirs()?;

        let image_name = id.image_file_name(&slugify(character));
        let image_path = self.images_dir().join(&image_name);
        image
            .save_with_format(&image_path, ImageFormat::Png)
            .map_err(|e| {
                PartyError::storage(format!("write image {}: {e}", image_path.display()))
            })?;

        let record = EntryRecord {
            id: id.id(),
            character: character.to_string(),
            guest: normalize_guest(guest),
            timestamp: now.format("%H:%M:%S").to_string(),
            source: source.to_string(),
            image_path: format!("{IMAGES_DIR}/{image_name}"),
            created_at: now,
        };
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| PartyError::serde(format!("encode entry {}: {e}", record.id)))?;

        let meta_path = self.entries_dir().join(id.meta_file_name());
        write_atomic(&meta_path, json.as_bytes()).map_err(|e| {
            PartyError::storage(format!("write record {}: {e}", meta_path.display()))
        })?;

        tracing::info!(id = record.id.as_str(), "entry saved");
        Ok(Entry {
            id: record.id,
            character: record.character,
            guest: record.guest,
            timestamp: record.timestamp,
            created_at: now,
            source: record.source,
            image_path,
        })
    }

    /// Every valid entry, oldest first.
    ///
    /// Non-`.json` files, unreadable or malformed records and records whose image is missing are
    /// skipped. Storage that cannot be created or listed yields an empty collection.
    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    pub fn load_all(&self) -> Vec<Entry> {
        if let Err(e) = self.ensure_dirs() {
            tracing::warn!(error = %e, "entry storage unavailable");
            return Vec::new();
        }
        let dir = self.entries_dir();
        let listing = match fs::read_dir(&dir) {
            Ok(listing) => listing,
            Err(e) => {
                tracing::warn!(error = %e, dir = %dir.display(), "cannot list entries");
                return Vec::new();
            }
        };

        let mut out = Vec::new();
        for item in listing.flatten() {
            let path = item.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") || !path.is_file() {
                continue;
            }
            match read_record(&path) {
                Ok(record) => match record.into_entry(&self.root) {
                    Some(entry) => out.push(entry),
                    None => tracing::debug!(path = %path.display(), "image missing, record skipped"),
                },
                Err(e) => tracing::debug!(path = %path.display(), error = %e, "record skipped"),
            }
        }

        out.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        out
    }

    /// Look up one entry by id.
    pub fn get(&self, id: &str) -> Option<Entry> {
        self.load_all().into_iter().find(|e| e.id == id)
    }

    /// Delete every file in both storage areas, best effort. The directories remain.
    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    pub fn clear_all(&self) -> ClearReport {
        let mut report = ClearReport::default();
        for dir in [self.images_dir(), self.entries_dir()] {
            let Ok(listing) = fs::read_dir(&dir) else {
                continue;
            };
            for item in listing.flatten() {
                let path = item.path();
                match fs::remove_file(&path) {
                    Ok(()) => report.removed += 1,
                    Err(e) => {
                        report.failed += 1;
                        tracing::warn!(path = %path.display(), error = %e, "cannot remove");
                    }
                }
            }
        }
        if let Err(e) = self.ensure_dirs() {
            tracing::warn!(error = %e, "cannot recreate storage");
        }
        tracing::info!(removed = report.removed, failed = report.failed, "storage cleared");
        report
    }
}

fn read_record(path: &Path) -> anyhow::Result<EntryRecord> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Write `bytes` to `<path>.tmp`, fsync, then rename over `path`.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let written = File::create(&tmp).and_then(|mut f| {
        f.write_all(bytes)?;
        f.sync_all()
    });
    if let Err(e) = written.and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/store/disk.rs"]
mod tests;
