use std::fmt;

use crate::models::card::{format_name, CardRecord};

// ---------------------------------------------------------------------------
// ArtVersion — one catalogued illustration on MTGPICS
// ---------------------------------------------------------------------------

/// One distinct art version of a card as catalogued by MTGPICS.
///
/// A gallery page may hold several versions of a single printing; each gets
/// its own image id and, when a page holds multiple images for one printing,
/// an alternate-image suffix. The artist can differ per version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtVersion {
    pub name: String,
    pub artist: String,
    pub set: String,
    pub image_id: String,
    pub alt: Option<String>,
}

impl ArtVersion {
    pub fn new(
        name: impl Into<String>,
        artist: impl Into<String>,
        set: impl Into<String>,
        image_id: impl Into<String>,
        alt: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            artist: artist.into(),
            set: set.into(),
            image_id: image_id.into(),
            alt,
        }
    }

    /// Version reachable by direct URL guess: the card's own set code and
    /// zero-padded collector number stand in for a scraped image id.
    pub fn direct(card: &CardRecord) -> Self {
        Self {
            name: card.name.clone(),
            artist: card.artist.clone().unwrap_or_else(|| "Unknown".into()),
            set: card.set.clone(),
            image_id: format!("{:0>3}", card.collector_number),
            alt: None,
        }
    }

    /// Site-relative identifier: `{set}/{image_id}` plus `_{alt}` when present.
    pub fn uri(&self) -> String {
        match &self.alt {
            Some(alt) => format!("{}/{}_{}", self.set, self.image_id, alt),
            None => format!("{}/{}", self.set, self.image_id),
        }
    }

    /// Image path under the gallery's `pics/art/` root.
    pub fn image_subpath(&self) -> String {
        format!("{}.jpg", self.uri())
    }

    /// Output file name: the display label with path separators stripped.
    pub fn file_name(&self) -> String {
        format!("{}.jpg", self.to_string().replace('/', ""))
    }
}

impl fmt::Display for ArtVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = format_name(&self.name, &self.artist, &self.set);
        match &self.alt {
            Some(alt) => write!(f, "{} ({})", base, alt),
            None => write!(f, "{}", base),
        }
    }
}
