//! Shared value types, the error taxonomy and small pixel helpers.

/// Colors, canvas and placement types.
pub mod core;
/// `PartyError` and `PartyResult`.
pub mod error;
/// Slugs and entry identifiers.
pub mod ids;
pub(crate) mod math;
