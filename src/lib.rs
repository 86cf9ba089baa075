//! Card art fetcher for Magic: The Gathering proxy printing.
//!
//! Looks cards up on Scryfall, cross-references the MTGPICS fan gallery for
//! high-resolution art scans, and falls back to the Scryfall art crop
//! (optionally upscaled through DeepAI) when the gallery has nothing.
//! Auxiliary modules manage a spreadsheet-backed proxy order inventory,
//! duplicate proxy files for print runs, and pull token lists from Moxfield.
//!
//! # Quick start
//!
//! ```no_run
//! use autoproxy::{Autoproxy, QueryOptions};
//!
//! let sdk = Autoproxy::builder().build();
//!
//! // Download every art version MTGPICS has for a card
//! let written = sdk.process_query("arbor elf set:wwk", &QueryOptions::default()).unwrap();
//! println!("{} image(s) written", written);
//! ```

pub mod config;
pub mod error;
pub mod gallery;
pub mod models;
pub mod moxfield;
pub mod proxies;
pub mod scryfall;
pub mod session;
pub mod upscale;

pub use error::{AutoproxyError, Result};
pub use gallery::GalleryClient;
pub use models::{ArtVersion, CardKind, CardRecord, Inventory, InventoryCard, OrderCard};
pub use moxfield::MoxfieldClient;
pub use scryfall::ScryfallClient;
pub use session::Session;
pub use upscale::UpscaleClient;

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::scryfall::{SortDirection, SortOrder, Unique};

// ---------------------------------------------------------------------------
// AutoproxyBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`Autoproxy`] instance.
///
/// Use [`Autoproxy::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](AutoproxyBuilder::build).
pub struct AutoproxyBuilder {
    out_dir: PathBuf,
    deepai_key: Option<String>,
    timeout: Duration,
}

impl Default for AutoproxyBuilder {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(config::DEFAULT_ART_DIR),
            deepai_key: None,
            timeout: Duration::from_secs(120),
        }
    }
}

impl AutoproxyBuilder {
    /// Set the directory downloaded art is written to. Defaults to `art/`.
    pub fn out_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.out_dir = path.as_ref().to_path_buf();
        self
    }

    /// Set the DeepAI API key explicitly.
    ///
    /// If not set, the `DEEPAI_KEY` environment variable is consulted at
    /// build time; without either, upscale requests are skipped.
    pub fn deepai_key(mut self, key: impl Into<String>) -> Self {
        self.deepai_key = Some(key.into());
        self
    }

    /// Set the HTTP request timeout. Defaults to 120 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the SDK with a fresh HTTP session.
    pub fn build(self) -> Autoproxy {
        let deepai_key = self
            .deepai_key
            .or_else(|| env::var("DEEPAI_KEY").ok())
            // Keys pasted from Windows editors drag a stray CR along
            .map(|key| key.replace('\r', ""));

        Autoproxy {
            session: Session::new(self.timeout),
            out_dir: self.out_dir,
            deepai_key,
        }
    }
}

// ---------------------------------------------------------------------------
// QueryOptions
// ---------------------------------------------------------------------------

/// Flags controlling [`Autoproxy::process_query`].
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Skip the MTGPICS flow entirely.
    pub skip_gallery: bool,
    /// Never fall back to the Scryfall art crop.
    pub skip_metadata_fallback: bool,
    /// Upscale fallback art through DeepAI.
    pub upscale: bool,
    /// Fetch the Scryfall art crop even when the gallery produced images.
    pub force_metadata: bool,
}

// ---------------------------------------------------------------------------
// Autoproxy
// ---------------------------------------------------------------------------

/// The main entry point: owns the shared HTTP [`Session`] and hands out
/// borrowing client wrappers for each upstream service.
///
/// Created via [`Autoproxy::builder()`].
pub struct Autoproxy {
    session: Session,
    out_dir: PathBuf,
    deepai_key: Option<String>,
}

impl Autoproxy {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> AutoproxyBuilder {
        AutoproxyBuilder::default()
    }

    // -- Client accessors --------------------------------------------------

    /// Access the Scryfall metadata client.
    pub fn scryfall(&self) -> ScryfallClient<'_> {
        ScryfallClient::new(&self.session)
    }

    /// Access the MTGPICS gallery client.
    pub fn gallery(&self) -> GalleryClient<'_> {
        GalleryClient::new(&self.session)
    }

    /// Access the DeepAI upscale client.
    pub fn upscaler(&self) -> UpscaleClient<'_> {
        UpscaleClient::new(&self.session, self.deepai_key.as_deref())
    }

    /// Access the Moxfield deck client.
    pub fn moxfield(&self) -> MoxfieldClient<'_> {
        MoxfieldClient::new(&self.session)
    }

    /// Return a reference to the underlying [`Session`] for advanced usage.
    pub fn session(&self) -> &Session {
        &self.session
    }

    // -- Orchestration -----------------------------------------------------

    /// Process one Scryfall-syntax query end to end.
    ///
    /// Resolves the gallery identifier, scrapes its art versions, and
    /// downloads each one. When the primary flow finds no versions at all,
    /// the direct-URL guess is tried once per printing; when nothing has
    /// been written (or `force_metadata` is set), each card's Scryfall art
    /// crop is fetched, optionally upscaled.
    ///
    /// Returns the number of files written.
    pub fn process_query(&self, query: &str, options: &QueryOptions) -> Result<usize> {
        let gallery = self.gallery();
        let mut written = 0;
        let mut version_count = 0;

        if !options.skip_gallery {
            if let Some((name, gamerid)) = gallery.resolve(None, Some(query))? {
                let versions = gallery.versions(&name, &gamerid)?;
                version_count = versions.len();
                for version in &versions {
                    if gallery.save_version(version, &self.out_dir)?.is_some() {
                        written += 1;
                    }
                }
            } else {
                log::info!("No gamerid found for query {:?}", query);
            }
        }

        let mut cards = None;

        // Some printings never surface through the gamerid index but sit at
        // the guessed direct URL; one attempt per printing.
        if !options.skip_gallery && version_count == 0 {
            let fetched = self.scryfall().search(
                query,
                Unique::Art,
                SortOrder::Released,
                SortDirection::Desc,
            )?;
            for card in &fetched {
                if gallery.save_direct(card, &self.out_dir)?.is_some() {
                    written += 1;
                }
            }
            cards = Some(fetched);
        }

        if (written == 0 || options.force_metadata) && !options.skip_metadata_fallback {
            if cards.is_none() {
                cards = Some(self.scryfall().search(
                    query,
                    Unique::Art,
                    SortOrder::Released,
                    SortDirection::Desc,
                )?);
            }
            let upscaler = self.upscaler();
            for card in cards.as_deref().unwrap_or_default() {
                written += upscaler
                    .save_card_art(card, &self.out_dir, config::DEEPAI_MODEL, options.upscale)?
                    .len();
            }
        }

        Ok(written)
    }
}
