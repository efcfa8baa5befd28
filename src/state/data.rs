//! Shared data structures for the application state
//!
//! These structs represent the data model that flows between
//! the provider layer, the stores, and the UI layer.

use serde::{Deserialize, Serialize};

/// A single photo as displayed in the grid, viewer and favorites.
///
/// Built once from a provider response and never mutated afterwards.
/// Identity is `id`; a result page or the favorites collection never
/// holds two records with the same `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Provider-assigned identifier
    pub id: String,
    /// Display URL (large rendition)
    pub url: String,
    /// Alt text; falls back to an attribution line when the provider sends none
    pub alt: String,
    /// Photographer name, when the provider supplies attribution
    pub photographer: Option<String>,
    /// Pixel width of the original photo
    pub width: u32,
    /// Pixel height of the original photo
    pub height: u32,
}

impl ImageRecord {
    /// Width/height ratio, used by the grid to size cards.
    /// Degenerate dimensions fall back to square.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// One batch of results from the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage {
    /// Photos in provider order
    pub images: Vec<ImageRecord>,
    /// Whether the provider has further pages after this one
    pub has_more: bool,
}
