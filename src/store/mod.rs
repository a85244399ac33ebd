//! Crash-safe on-disk persistence of party entries.

/// `EntryStore` and the atomic record writer.
pub mod disk;
/// `Entry` and its on-disk record shape.
pub mod entry;
