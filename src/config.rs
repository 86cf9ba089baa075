use std::collections::HashMap;

pub const SCRYFALL_BASE: &str = "https://api.scryfall.com";
pub const MTGPICS_BASE: &str = "https://mtgpics.com";
pub const DEEPAI_BASE: &str = "https://api.deepai.org/api";
pub const MOXFIELD_BASE: &str = "https://api2.moxfield.com/v3";

/// Default DeepAI model used for upscaling.
pub const DEEPAI_MODEL: &str = "torch-srgan";

/// Body text MTGPICS serves in place of a missing image.
pub const MTGPICS_PLACEHOLDER: &str = "There's nothing here";

/// Politeness delay bounds (seconds) before each MTGPICS request.
pub const MTGPICS_WAIT_S: (f64, f64) = (1.0, 3.0);
/// Politeness delay bounds (seconds) before each Scryfall request.
pub const SCRYFALL_WAIT_S: (f64, f64) = (0.05, 0.1);
/// Politeness delay bounds (seconds) before each DeepAI request.
pub const DEEPAI_WAIT_S: (f64, f64) = (1.0, 3.0);

/// Default directory that downloaded art is written to.
pub const DEFAULT_ART_DIR: &str = "art";

/// Scryfall set codes whose MTGPICS spelling differs.
///
/// Keyed by the Scryfall code; the value is the code MTGPICS uses in its
/// `ref` query parameters and image paths. Codes absent from this table are
/// identical on both sites.
pub fn set_code_overrides() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        // Early core sets kept their Oracle-era two-letter codes
        ("2ed", "un"),
        ("3ed", "rv"),
        ("4ed", "4e"),
        ("5ed", "5e"),
        ("6ed", "6e"),
        ("7ed", "7e"),
        // Conflux is "cfx" on Gatherer-derived indexes
        ("con", "cfx"),
        // Promo and supplemental buckets
        ("pdci", "dci"),
        ("ppro", "pro"),
        ("dd1", "evg"),
    ])
}
