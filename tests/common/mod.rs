//! Shared fixtures for the autoproxy integration tests.
//!
//! Provides sample Scryfall card payloads and MTGPICS HTML fragments shaped
//! like the live pages: a card landing page with the styled thumbnail, and
//! an art listing page with one positioned container of image tiles.

#![allow(dead_code)]

use autoproxy::CardRecord;

/// Minimal Scryfall card object with the fields the resolver relies on.
pub fn sample_card_value(
    name: &str,
    set: &str,
    collector_number: &str,
    artist: &str,
) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "set": set,
        "collector_number": collector_number,
        "artist": artist,
        "color_identity": ["R"],
        "frame": "1993",
        "full_art": false,
        "id": "xxxx-id",
        "rarity": "common",
        "released_at": "1993-08-05",
        "type_line": "Instant",
        "image_uris": {
            "small": "https://cards.scryfall.io/small/x.jpg",
            "normal": "https://cards.scryfall.io/normal/x.jpg",
            "large": "https://cards.scryfall.io/large/x.jpg",
            "art_crop": "https://cards.scryfall.io/art_crop/x.jpg"
        }
    })
}

pub fn sample_card(name: &str, set: &str, collector_number: &str, artist: &str) -> CardRecord {
    CardRecord::from_value(sample_card_value(name, set, collector_number, artist)).unwrap()
}

pub fn lightning_bolt() -> CardRecord {
    sample_card("Lightning Bolt", "lea", "161", "Christopher Rush")
}

// ---------------------------------------------------------------------------
// MTGPICS page fixtures
// ---------------------------------------------------------------------------

/// Card landing page with the styled thumbnail carrying the gamerid.
pub fn landing_page(title: &str, thumbnail_src: &str) -> String {
    format!(
        r#"<html><head><title>{}</title></head>
<body>
<div><img src="graph/banner.png"></div>
<img style="display:block;border:4px black solid;cursor:pointer;" src="{}">
<div><a href="reprints?gid=lea161">See all prints of this card</a></div>
</body></html>"#,
        title, thumbnail_src
    )
}

/// Landing page whose thumbnail is absent (title still present).
pub fn landing_page_without_thumbnail(title: &str) -> String {
    format!(
        r#"<html><head><title>{}</title></head><body><img src="graph/banner.png"></body></html>"#,
        title
    )
}

/// One image tile on the art listing page.
pub fn art_tile(image_path: &str, artist: &str) -> String {
    format!(
        r#"<div style="position:absolute;width:229px;height:173px;background:url({});"><div class="S10"><a href="art?artiste={}">{}</a></div></div>"#,
        image_path, artist, artist
    )
}

/// Art listing page: one positioned container wrapping the given children.
pub fn art_page(children: &[String]) -> String {
    format!(
        r#"<html><body><div style="position:relative;">{}</div></body></html>"#,
        children.join("\n")
    )
}
