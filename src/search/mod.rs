//! Image lookup: the SerpAPI client and the fallback chain around it.

/// `ImageSearch` seam and the SerpAPI implementation.
pub mod client;
/// Primary, broadened and placeholder fallback chain.
pub mod fetch;
