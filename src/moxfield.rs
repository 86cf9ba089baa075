//! Moxfield deck client for token extraction.
//!
//! Reads the authorized user's deck list (bearer token pass-through) and the
//! token section of individual decks, formatting one printable line per
//! token for the proxy order.

use crate::config;
use crate::error::{AutoproxyError, Result};
use crate::session::Session;

/// Moxfield rejects the default reqwest user agent.
const USER_AGENT: (&str, &str) = ("User-Agent", "insomnia");

/// Client for the Moxfield deck API, bound to a shared [`Session`].
pub struct MoxfieldClient<'a> {
    session: &'a Session,
}

impl<'a> MoxfieldClient<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Public deck ids belonging to the authorized user.
    pub fn deck_ids(&self, bearer_token: &str) -> Result<Vec<String>> {
        let url = format!("{}/decks", config::MOXFIELD_BASE);
        let body = self.session.get_text_with_headers(
            &url,
            &[],
            &[USER_AGENT, ("authorization", bearer_token)],
            config::SCRYFALL_WAIT_S,
        )?;
        let value: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            AutoproxyError::Malformed(format!("Moxfield decks response is not JSON: {}", e))
        })?;

        let decks = value
            .get("decks")
            .and_then(|d| d.as_array())
            .ok_or_else(|| {
                AutoproxyError::Malformed("Moxfield decks response has no `decks` field".into())
            })?;

        Ok(decks
            .iter()
            .filter(|deck| deck.get("visibility").and_then(|v| v.as_str()) == Some("public"))
            .filter_map(|deck| deck.get("publicId").and_then(|id| id.as_str()))
            .map(str::to_string)
            .collect())
    }

    /// Formatted token lines for one deck, in deck order.
    ///
    /// Tokens missing a name or artist are skipped with a warning.
    pub fn deck_tokens(&self, deck_id: &str) -> Result<Vec<String>> {
        let url = format!("{}/decks/all/{}", config::MOXFIELD_BASE, deck_id);
        let body = self.session.get_text_with_headers(
            &url,
            &[],
            &[USER_AGENT],
            config::SCRYFALL_WAIT_S,
        )?;
        let value: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            AutoproxyError::Malformed(format!("Moxfield deck response is not JSON: {}", e))
        })?;

        let tokens = value
            .get("tokens")
            .and_then(|t| t.as_array())
            .ok_or_else(|| {
                AutoproxyError::Malformed("Moxfield deck response has no `tokens` field".into())
            })?;

        Ok(tokens
            .iter()
            .filter_map(|token| {
                let line = format_token_line(token);
                if line.is_none() {
                    log::warn!("Skipping malformed token entry: {}", token);
                }
                line
            })
            .collect())
    }
}

/// Format a token object as `{name} ({artist}) [{color}]`, with a
/// `, {power}/{toughness}` clause inside the brackets for creature tokens.
pub fn format_token_line(token: &serde_json::Value) -> Option<String> {
    let name = token.get("name")?.as_str()?;
    let artist = token.get("artist")?.as_str()?;

    let colors = token.get("colors").and_then(|c| c.as_array());
    let color = match colors.map(|c| c.len()).unwrap_or(0) {
        0 => "Colorless",
        1 => match colors.unwrap()[0].as_str() {
            Some("W") => "White",
            Some("U") => "Blue",
            Some("B") => "Black",
            Some("R") => "Red",
            Some("G") => "Green",
            _ => "Colorless",
        },
        _ => "Multi",
    };

    let power = token.get("power").and_then(|p| p.as_str());
    let toughness = token.get("toughness").and_then(|t| t.as_str());
    if power.is_some() || toughness.is_some() {
        Some(format!(
            "{} ({}) [{}, {}/{}]",
            name,
            artist,
            color,
            power.unwrap_or("0"),
            toughness.unwrap_or("0")
        ))
    } else {
        Some(format!("{} ({}) [{}]", name, artist, color))
    }
}
