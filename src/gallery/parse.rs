//! HTML/CSS extraction for MTGPICS pages.
//!
//! The gallery has no API; everything is recovered from page structure that
//! the site has kept stable for years: a thumbnail with a fixed inline style
//! on the card landing page, and a positioned container of image tiles on
//! the art listing page whose background-image URLs encode the identifiers.
//! The positional parsing below mirrors that page structure exactly, so a
//! future format change only touches this module.

use scraper::{ElementRef, Html, Selector};

use crate::config;
use crate::models::ArtVersion;

/// Inline style of the landing-page thumbnail that carries the `gamerid`.
const THUMBNAIL_STYLE: &str = "display:block;border:4px black solid;cursor:pointer;";

/// Inline style of the art-page container holding one tile per version.
const CONTAINER_STYLE: &str = "position:relative;";

// ---------------------------------------------------------------------------
// Landing page
// ---------------------------------------------------------------------------

/// Extract the `gamerid` from a card landing page.
///
/// The page is accepted only when its `<title>` prefix (before `" - "`)
/// exactly equals `card_name`; a missing or mismatched title means the `ref`
/// guess hit a different card and the page is skipped. The identifier is the
/// last two path segments of the thumbnail image source, concatenated
/// (e.g. `pics/reg/lea/161.jpg` -> `lea161`).
pub fn landing_page_gamerid(html: &str, card_name: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let title_sel = Selector::parse("title").unwrap();
    let title = match document.select(&title_sel).next() {
        Some(el) => el.text().collect::<String>(),
        None => {
            log::debug!("No title element found");
            return None;
        }
    };
    let found_name = title.split(" - ").next().unwrap_or_default();
    if found_name != card_name {
        log::debug!("Found card does not match. Found: {:?}", found_name);
        return None;
    }

    let img_sel = Selector::parse("img").unwrap();
    let thumbnail = document
        .select(&img_sel)
        .find(|img| img.value().attr("style") == Some(THUMBNAIL_STYLE));
    let Some(thumbnail) = thumbnail else {
        log::debug!("No thumbnail found");
        return None;
    };

    let src = thumbnail.value().attr("src")?;
    let tokens: Vec<&str> = src.split(['/', '.']).collect();
    if tokens.len() < 3 {
        log::debug!("Unable to find gamerid in {:?}", src);
        return None;
    }
    Some(format!("{}{}", tokens[tokens.len() - 3], tokens[tokens.len() - 2]))
}

// ---------------------------------------------------------------------------
// Art listing page
// ---------------------------------------------------------------------------

/// Extract every art version advertised on an art listing page.
///
/// Tiles are the container's child elements that carry an inline style whose
/// second-to-last CSS component value is the tile's background-image URL
/// (e.g. `pics/art_th_big/dci/106_1.jpg`). Children without a style are
/// decorative; children whose style or artist block does not parse are
/// skipped, never fatal.
pub fn art_versions(html: &str, card_name: &str) -> Vec<ArtVersion> {
    let document = Html::parse_document(html);

    let div_sel = Selector::parse("div").unwrap();
    let container = document
        .select(&div_sel)
        .find(|div| div.value().attr("style") == Some(CONTAINER_STYLE));
    let Some(container) = container else {
        log::info!("No images found");
        return Vec::new();
    };

    let children: Vec<ElementRef> = container
        .children()
        .filter_map(ElementRef::wrap)
        .collect();
    log::info!("Verifying {} potential images...", children.len());

    let mut versions = Vec::new();
    for element in children {
        let Some(style) = element.value().attr("style") else {
            continue; // decorative spacer, not an image tile
        };
        let Some(url) = second_to_last_url(style) else {
            continue;
        };

        let tokens: Vec<&str> = url.split(['/', '.']).collect();
        if tokens.len() < 3 {
            continue;
        }
        let set = tokens[tokens.len() - 3];
        let mut image_id = tokens[tokens.len() - 2];

        // A single underscore marks an alternate image of the same printing
        let mut alt = None;
        let parts: Vec<&str> = image_id.split('_').collect();
        if parts.len() == 2 {
            image_id = parts[0];
            alt = Some(parts[1].to_string());
        }

        let Some(artist) = tile_artist(element) else {
            continue;
        };

        versions.push(ArtVersion::new(card_name, artist, set, image_id, alt));
    }

    log::info!("{} unique version(s) found", versions.len());
    versions
}

/// Artist credit inside a tile: the anchor under the `S10` class block.
fn tile_artist(element: ElementRef) -> Option<String> {
    let artist_sel = Selector::parse(r#"div[class="S10"] a"#).unwrap();
    let anchor = element.select(&artist_sel).next()?;
    Some(anchor.text().collect::<String>())
}

// ---------------------------------------------------------------------------
// Asset body classification
// ---------------------------------------------------------------------------

/// True when a download body is the gallery's way of saying "no such image":
/// either empty or the literal placeholder page.
pub fn is_missing_asset(body: &[u8]) -> bool {
    body.is_empty() || String::from_utf8_lossy(body).contains(config::MTGPICS_PLACEHOLDER)
}

// ---------------------------------------------------------------------------
// Inline-style CSS component values
// ---------------------------------------------------------------------------

/// Minimal CSS component value for inline-style parsing.
#[derive(Debug)]
enum CssToken {
    Url(String),
    Ident(String),
    Delim(char),
    Whitespace,
}

/// Return the second-to-last component value of an inline style when it is a
/// `url(...)` value, as the tile contract requires.
fn second_to_last_url(style: &str) -> Option<String> {
    let tokens = css_component_values(style);
    if tokens.len() < 2 {
        return None;
    }
    match &tokens[tokens.len() - 2] {
        CssToken::Url(url) => Some(url.clone()),
        _ => None,
    }
}

/// Tokenize an inline style declaration list into component values:
/// identifiers, `:` `;` `,` delimiters, whitespace runs, and `url(...)`
/// functions (quotes stripped).
fn css_component_values(style: &str) -> Vec<CssToken> {
    let bytes = style.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    // Boundary decisions only ever look at ASCII bytes, so slicing below
    // always lands on UTF-8 char boundaries.
    while i < bytes.len() {
        let c = bytes[i];
        if c.is_ascii_whitespace() {
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            tokens.push(CssToken::Whitespace);
        } else if c == b':' || c == b';' || c == b',' {
            tokens.push(CssToken::Delim(c as char));
            i += 1;
        } else {
            let start = i;
            while i < bytes.len() {
                let c = bytes[i];
                if c.is_ascii_whitespace() || matches!(c, b':' | b';' | b',' | b'(') {
                    break;
                }
                i += 1;
            }
            let word = &style[start..i];
            if i < bytes.len() && bytes[i] == b'(' && word.eq_ignore_ascii_case("url") {
                i += 1;
                let inner_start = i;
                while i < bytes.len() && bytes[i] != b')' {
                    i += 1;
                }
                let inner = style[inner_start..i].trim().trim_matches(&['"', '\''][..]);
                tokens.push(CssToken::Url(inner.to_string()));
                if i < bytes.len() {
                    i += 1; // closing paren
                }
            } else {
                tokens.push(CssToken::Ident(word.to_string()));
            }
        }
    }

    tokens
}
