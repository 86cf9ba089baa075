//! Scryfall card search client.
//!
//! Thin wrappers over the `/cards/search` and `/cards/named` endpoints
//! (<https://scryfall.com/docs/api/cards>). A body that is not JSON is a hard
//! error -- it means the API contract changed -- while "no results" and
//! "not found" payloads are ordinary empty outcomes.

use crate::config;
use crate::error::{AutoproxyError, Result};
use crate::models::CardRecord;
use crate::session::Session;

// ---------------------------------------------------------------------------
// Search parameter enums
// ---------------------------------------------------------------------------

/// Strategy Scryfall uses to omit similar cards from search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unique {
    /// One result per card name.
    Cards,
    /// One result per distinct illustration.
    Art,
    /// Every printing.
    Prints,
}

impl Unique {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unique::Cards => "cards",
            Unique::Art => "art",
            Unique::Prints => "prints",
        }
    }
}

/// Field search results are sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Name,
    Released,
    Set,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Name => "name",
            SortOrder::Released => "released",
            SortOrder::Set => "set",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

// ---------------------------------------------------------------------------
// ScryfallClient
// ---------------------------------------------------------------------------

/// Client for the Scryfall card API, bound to a shared [`Session`].
pub struct ScryfallClient<'a> {
    session: &'a Session,
}

impl<'a> ScryfallClient<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Fetch all cards matching a Scryfall-syntax query.
    ///
    /// A response without a `data` array is zero results, not an error.
    pub fn search(
        &self,
        query: &str,
        unique: Unique,
        order: SortOrder,
        dir: SortDirection,
    ) -> Result<Vec<CardRecord>> {
        log::info!("Searching Scryfall for {:?} [unique {}]", query, unique.as_str());

        let url = format!("{}/cards/search", config::SCRYFALL_BASE);
        let params = [
            ("q", query),
            ("unique", unique.as_str()),
            ("order", order.as_str()),
            ("dir", dir.as_str()),
        ];
        let body = self
            .session
            .get_text(&url, &params, config::SCRYFALL_WAIT_S)?;
        let value: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            AutoproxyError::Malformed(format!("Scryfall search response is not JSON: {}", e))
        })?;

        let Some(data) = value.get("data").and_then(|d| d.as_array()) else {
            log::info!("Found 0 cards");
            return Ok(Vec::new());
        };

        let cards = data
            .iter()
            .cloned()
            .map(CardRecord::from_value)
            .collect::<Result<Vec<_>>>()?;
        log::info!("Found {} result(s)", cards.len());
        Ok(cards)
    }

    /// Fetch a single card by exact name, optionally limited to a set.
    ///
    /// Returns `Ok(None)` when Scryfall reports no unique match.
    pub fn named(&self, name: &str, set_code: Option<&str>) -> Result<Option<CardRecord>> {
        log::info!(
            "Searching Scryfall for {:?}{}",
            name,
            set_code.map(|s| format!(" [{}]", s)).unwrap_or_default()
        );

        let url = format!("{}/cards/named", config::SCRYFALL_BASE);
        let mut params = vec![("exact", name)];
        if let Some(set) = set_code {
            params.push(("set", set));
        }
        let body = self
            .session
            .get_text(&url, &params, config::SCRYFALL_WAIT_S)?;
        let value: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            AutoproxyError::Malformed(format!("Scryfall named response is not JSON: {}", e))
        })?;

        if value.get("object").and_then(|o| o.as_str()) == Some("error") {
            log::info!("Unable to find unique result for {:?}", name);
            return Ok(None);
        }

        let card = CardRecord::from_value(value)?;
        log::info!("Found: {}", card);
        Ok(Some(card))
    }
}
