//! MTGPICS gallery client: identifier resolution, version scraping, and
//! asset download.
//!
//! MTGPICS indexes each printing under an opaque `gamerid`. The id is not
//! published anywhere, so it is recovered by guessing the landing-page `ref`
//! (translated set code + zero-padded collector number) for every printing
//! of a card and scraping the thumbnail of each page that actually matches.

pub mod parse;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config;
use crate::error::{AutoproxyError, Result};
use crate::models::{ArtVersion, CardRecord};
use crate::scryfall::{ScryfallClient, SortDirection, SortOrder, Unique};
use crate::session::Session;

/// Translate a Scryfall set code to the gallery's spelling.
///
/// Identity for every code outside the override table.
pub fn translate_set_code(set_code: &str) -> String {
    config::set_code_overrides()
        .get(set_code)
        .map(|s| s.to_string())
        .unwrap_or_else(|| set_code.to_string())
}

/// Landing-page `ref` for a printing: translated set code plus the collector
/// number left-padded with zeros to three digits.
pub fn gallery_ref(card: &CardRecord) -> String {
    format!(
        "{}{:0>3}",
        translate_set_code(&card.set),
        card.collector_number
    )
}

/// All printings in a resolver result must share one card name; anything
/// else means the query was under-constrained.
pub fn ensure_single_name(cards: &[CardRecord]) -> Result<&str> {
    let first = match cards.first() {
        Some(card) => &card.name,
        None => {
            return Err(AutoproxyError::InvalidArgument(
                "Card list is empty".into(),
            ))
        }
    };
    if cards.iter().any(|card| &card.name != first) {
        return Err(AutoproxyError::Ambiguous(
            "Multiple cards returned, query should match a single card".into(),
        ));
    }
    Ok(first)
}

// ---------------------------------------------------------------------------
// GalleryClient
// ---------------------------------------------------------------------------

/// Client for the MTGPICS gallery, bound to a shared [`Session`].
pub struct GalleryClient<'a> {
    session: &'a Session,
}

impl<'a> GalleryClient<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Resolve the `gamerid` believed to represent a card's main gallery page.
    ///
    /// Exactly one of `cards`/`query` must be supplied. The query path first
    /// fetches every printing (release order, ascending) and requires them
    /// all to share one name. Each printing's `ref` is then tried against
    /// the landing page; mismatched or structureless pages are expected
    /// noise and skipped. With several distinct candidate ids, each is
    /// probed through the version scraper in discovery order and the first
    /// that yields any art wins.
    ///
    /// Returns `Ok(None)` when nothing could be resolved -- a normal outcome
    /// the caller handles with its fallback path.
    pub fn resolve(
        &self,
        cards: Option<&[CardRecord]>,
        query: Option<&str>,
    ) -> Result<Option<(String, String)>> {
        let fetched;
        let cards: &[CardRecord] = match (cards, query) {
            (Some(_), Some(_)) | (None, None) => {
                return Err(AutoproxyError::InvalidArgument(
                    "Exactly one of `cards` or `query` must be set".into(),
                ));
            }
            (Some(cards), None) => cards,
            (None, Some(query)) => {
                log::info!("Finding gamerid for query: {:?}", query);
                fetched = ScryfallClient::new(self.session).search(
                    query,
                    Unique::Prints,
                    SortOrder::Released,
                    SortDirection::Asc,
                )?;
                if fetched.is_empty() {
                    log::info!("No cards were found");
                    return Ok(None);
                }
                ensure_single_name(&fetched)?;
                &fetched
            }
        };

        // Track every candidate in case some ref guesses misfire
        let mut found: Vec<(String, String)> = Vec::new();
        for card in cards {
            let card_ref = gallery_ref(card);
            log::info!("Looking for gamerid with ref {:?}...", card_ref);

            let url = format!("{}/card", config::MTGPICS_BASE);
            let html =
                self.session
                    .get_text(&url, &[("ref", card_ref.as_str())], config::MTGPICS_WAIT_S)?;

            if let Some(gamerid) = parse::landing_page_gamerid(&html, &card.name) {
                log::info!("Found gamerid [{}]", gamerid);
                if !found.iter().any(|(_, id)| *id == gamerid) {
                    found.push((card.name.clone(), gamerid));
                }
            }
        }

        match found.len() {
            0 => {
                log::info!("No gamerid detected");
                Ok(None)
            }
            1 => {
                let pair = found.remove(0);
                log::info!("Found unique gamerid: {:?}", pair.1);
                Ok(Some(pair))
            }
            _ => {
                log::info!(
                    "Multiple gamerid candidates found ({:?}), probing in discovery order",
                    found.iter().map(|(_, id)| id.as_str()).collect::<Vec<_>>()
                );
                for (name, gamerid) in found {
                    if !self.versions(&name, &gamerid)?.is_empty() {
                        log::info!("Candidate {:?} yields art, using it", gamerid);
                        return Ok(Some((name, gamerid)));
                    }
                }
                log::info!("No candidate yields art");
                Ok(None)
            }
        }
    }

    /// Scrape every art version the gallery advertises for a `gamerid`.
    ///
    /// An identifier without an art page is an empty list, not an error.
    pub fn versions(&self, card_name: &str, gamerid: &str) -> Result<Vec<ArtVersion>> {
        let url = format!("{}/art", config::MTGPICS_BASE);
        let html = self
            .session
            .get_text(&url, &[("gamerid", gamerid)], config::MTGPICS_WAIT_S)?;
        Ok(parse::art_versions(&html, card_name))
    }

    /// Download one art version into `out_dir`.
    ///
    /// Returns the written path, or `Ok(None)` when the gallery serves its
    /// "nothing here" placeholder (or an empty body) for the guessed URL.
    pub fn save_version(&self, version: &ArtVersion, out_dir: &Path) -> Result<Option<PathBuf>> {
        let subpath = version.image_subpath();
        log::info!("Finding {:?} on MTGPICS...", subpath);

        let url = format!("{}/pics/art/{}", config::MTGPICS_BASE, subpath);
        let body = self.session.get_bytes(&url, config::MTGPICS_WAIT_S)?;
        if parse::is_missing_asset(&body) {
            log::info!("Not found");
            return Ok(None);
        }

        fs::create_dir_all(out_dir)?;
        let path = out_dir.join(version.file_name());
        log::info!("Saving as {:?}", path);
        fs::write(&path, &body)?;
        Ok(Some(path))
    }

    /// Fallback download by direct URL guess from set and collector number.
    ///
    /// Some printings never surface through the `gamerid` flow but are
    /// reachable at the guessed path; tried only after the per-identifier
    /// flow yields nothing.
    pub fn save_direct(&self, card: &CardRecord, out_dir: &Path) -> Result<Option<PathBuf>> {
        self.save_version(&ArtVersion::direct(card), out_dir)
    }
}
