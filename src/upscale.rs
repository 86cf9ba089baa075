//! DeepAI image upscaling client.
//!
//! Used on the fallback path: when the gallery has no art for a card, the
//! Scryfall art crop is downloaded instead and optionally run through a
//! DeepAI super-resolution model first.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config;
use crate::error::{AutoproxyError, Result};
use crate::models::CardRecord;
use crate::session::Session;

/// Client for the DeepAI upscaling API, bound to a shared [`Session`].
///
/// The API key is a plain pass-through header. A client without a key still
/// works for downloads; upscale calls just report failure and the caller
/// keeps the original image.
pub struct UpscaleClient<'a> {
    session: &'a Session,
    api_key: Option<&'a str>,
}

impl<'a> UpscaleClient<'a> {
    pub fn new(session: &'a Session, api_key: Option<&'a str>) -> Self {
        Self { session, api_key }
    }

    /// Submit an image URL to an upscaling model.
    ///
    /// Returns the output image URL, or `Ok(None)` when the response carries
    /// no `output_url` -- a recoverable per-image failure, logged and skipped.
    pub fn upscale(&self, image_url: &str, model: &str) -> Result<Option<String>> {
        let Some(api_key) = self.api_key else {
            log::warn!("No DeepAI API key configured, skipping upscale");
            return Ok(None);
        };

        let url = format!("{}/{}", config::DEEPAI_BASE, model);
        let body = self.session.post_form(
            &url,
            &[("image", image_url)],
            &[("api-key", api_key)],
            config::DEEPAI_WAIT_S,
        )?;
        let value: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            AutoproxyError::Malformed(format!("DeepAI response is not JSON: {}", e))
        })?;

        match value.get("output_url").and_then(|u| u.as_str()) {
            Some(output_url) => Ok(Some(output_url.to_string())),
            None => {
                log::warn!("No output URL specified in DeepAI response: {}", value);
                Ok(None)
            }
        }
    }

    /// Download a card's art crops, one file per illustrated face.
    ///
    /// With `do_upscale` set, each crop is first run through `model`; a crop
    /// that fails to upscale is downloaded as-is. Returns the written paths.
    pub fn save_card_art(
        &self,
        card: &CardRecord,
        out_dir: &Path,
        model: &str,
        do_upscale: bool,
    ) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        for (label, mut art_url) in card.art_urls() {
            let mut file_name = format!("{}.jpg", label).replace('/', "");

            if do_upscale {
                log::info!("Using [{}] to upscale art for: {}", model, label);
                if let Some(output_url) = self.upscale(&art_url, model)? {
                    art_url = output_url;
                    file_name = format!("{} - {}.jpg", label, model).replace('/', "");
                }
            }

            let bytes = self.session.get_bytes(&art_url, config::SCRYFALL_WAIT_S)?;
            fs::create_dir_all(out_dir)?;
            let path = out_dir.join(file_name);
            log::info!("Saving {:?}", path);
            fs::write(&path, &bytes)?;
            written.push(path);
        }

        Ok(written)
    }
}
