use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::{AutoproxyError, Result};

// ---------------------------------------------------------------------------
// CardRecord — one printing as returned by the Scryfall API
// ---------------------------------------------------------------------------

/// A card printing fetched from Scryfall.
///
/// Field names match the Scryfall card object
/// (<https://scryfall.com/docs/api/cards>); fields the API omits deserialize
/// to `None`. Construct via [`CardRecord::from_value`] so the name invariant
/// holds: `name` (and every face name) is diacritic-stripped before the
/// record is used in any request or file name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardRecord {
    pub name: String,
    pub set: String,
    pub collector_number: String,
    pub artist: Option<String>,
    #[serde(default)]
    pub color_identity: Vec<String>,
    pub frame: Option<String>,
    pub full_art: Option<bool>,
    pub id: Option<String>,
    pub image_uris: Option<ImageUris>,
    pub layout: Option<String>,
    pub oracle_id: Option<String>,
    pub rarity: Option<String>,
    pub released_at: Option<String>,
    pub scryfall_uri: Option<String>,
    pub set_name: Option<String>,
    pub type_line: Option<String>,
    pub card_faces: Option<Vec<CardFace>>,
}

/// One face of a multi-faced card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardFace {
    pub name: String,
    pub artist: Option<String>,
    pub type_line: Option<String>,
    pub image_uris: Option<ImageUris>,
}

/// Card image URLs by size, plus the bare art crop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUris {
    pub small: Option<String>,
    pub normal: Option<String>,
    pub large: Option<String>,
    pub art_crop: Option<String>,
}

impl CardRecord {
    /// Deserialize a Scryfall card object and normalize its names.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let mut card: CardRecord = serde_json::from_value(value)?;
        card.name = strip_accents(&card.name);
        if let Some(faces) = card.card_faces.as_mut() {
            for face in faces {
                face.name = strip_accents(&face.name);
            }
        }
        Ok(card)
    }

    /// Display label: `{name} ({artist}) [{SET}]`.
    pub fn display_name(&self) -> String {
        format_name(&self.name, self.artist.as_deref().unwrap_or("Unknown"), &self.set)
    }

    /// One `(label, art crop URL)` pair per illustrated face.
    ///
    /// Multi-faced cards yield one pair per face carrying its own image;
    /// single-faced cards yield the card-level crop. Faces without an art
    /// crop are skipped.
    pub fn art_urls(&self) -> Vec<(String, String)> {
        if let Some(faces) = &self.card_faces {
            return faces
                .iter()
                .filter_map(|face| {
                    let url = face.image_uris.as_ref()?.art_crop.clone()?;
                    let label = format_name(
                        &face.name,
                        face.artist.as_deref().unwrap_or("Unknown"),
                        &self.set,
                    );
                    Some((label, url))
                })
                .collect();
        }

        match self.image_uris.as_ref().and_then(|uris| uris.art_crop.clone()) {
            Some(url) => vec![(self.display_name(), url)],
            None => Vec::new(),
        }
    }

    /// Color bucket derived from the color identity list.
    pub fn color_name(&self) -> &'static str {
        match self.color_identity.len() {
            0 => "Colorless",
            1 => match self.color_identity[0].as_str() {
                "W" => "White",
                "U" => "Blue",
                "B" => "Black",
                "R" => "Red",
                "G" => "Green",
                _ => "Colorless",
            },
            _ => "Multi",
        }
    }

    /// True for the 1993/1997 frame generations.
    pub fn is_classic(&self) -> bool {
        matches!(self.frame.as_deref(), Some("1993") | Some("1997"))
    }

    pub fn is_mdfc(&self) -> bool {
        self.card_faces.as_ref().is_some_and(|faces| !faces.is_empty())
    }

    /// Name of the front face. Errors on single-faced cards.
    pub fn mdfc_front_face_name(&self) -> Result<&str> {
        self.front_face()
            .map(|face| face.name.as_str())
            .ok_or_else(|| AutoproxyError::InvalidArgument("card has no faces".into()))
    }

    /// Type line of the front face. Errors on single-faced cards.
    pub fn mdfc_front_face_type(&self) -> Result<&str> {
        self.front_face()
            .and_then(|face| face.type_line.as_deref())
            .ok_or_else(|| AutoproxyError::InvalidArgument("card has no faces".into()))
    }

    fn front_face(&self) -> Option<&CardFace> {
        self.card_faces.as_ref().and_then(|faces| faces.first())
    }

    /// First primary card type found in the type line.
    pub fn simple_type(&self) -> Option<&'static str> {
        const SIMPLE_TYPES: [&str; 7] = [
            "Artifact",
            "Creature",
            "Enchantment",
            "Instant",
            "Land",
            "Sorcery",
            "Planeswalker",
        ];
        let type_line = self.type_line.as_deref()?;
        SIMPLE_TYPES.iter().copied().find(|t| type_line.contains(t))
    }
}

impl std::fmt::Display for CardRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Format the canonical `{name} ({artist}) [{SET}]` label.
pub fn format_name(name: &str, artist: &str, set: &str) -> String {
    format!("{} ({}) [{}]", name, artist, set.to_uppercase())
}

/// Replace accented characters with their ASCII base form.
///
/// NFD-decomposes and drops every non-ASCII scalar, so combining marks fall
/// away and already-plain text passes through unchanged (idempotent).
pub fn strip_accents(text: &str) -> String {
    text.nfd().filter(|c| c.is_ascii()).collect()
}
