//! Proxy file distribution: locate source images and duplicate them for
//! print-ready output.
//!
//! Print services deduplicate uploads by content hash, so copy `i` of a file
//! is padded with `i` trailing NUL bytes to keep every copy's hash unique.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AutoproxyError, Result};
use crate::models::InventoryCard;

/// Duplicate `source` into `dest_dir` `count` times.
///
/// Copies are named `{stem} [{n}].{ext}` with n starting at 1; copy n-1
/// carries n-1 bytes of NUL padding. Returns the written paths.
pub fn duplicate_file(source: &Path, dest_dir: &Path, count: u32) -> Result<Vec<PathBuf>> {
    let contents = fs::read(source)?;
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            AutoproxyError::InvalidArgument(format!("Source has no file name: {:?}", source))
        })?;
    let ext = source
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("jpg");

    fs::create_dir_all(dest_dir)?;
    let mut written = Vec::new();
    for i in 0..count {
        let path = dest_dir.join(format!("{} [{}].{}", stem, i + 1, ext));
        let mut padded = contents.clone();
        padded.extend(std::iter::repeat(0u8).take(i as usize));
        fs::write(&path, &padded)?;
        written.push(path);
    }
    Ok(written)
}

/// Locate each card's proxy image under `{proxy_dir}/{kind}/` and duplicate
/// it into `dest_dir` order-count times (once each when `duplicate` is off).
///
/// A card matches files in its kind folder whose names start with
/// `{name}.`; cards with no match or more than one are collected and
/// returned as `(missing, duplicates)` rather than aborting the run.
pub fn create_unique_proxies(
    cards: &[InventoryCard],
    proxy_dir: &Path,
    dest_dir: &Path,
    duplicate: bool,
) -> Result<(Vec<InventoryCard>, Vec<InventoryCard>)> {
    let mut missing = Vec::new();
    let mut duplicates = Vec::new();

    for card in cards {
        let search_dir = proxy_dir.join(card.kind.as_str());
        let prefix = format!("{}.", card.name);

        let mut matches = Vec::new();
        for entry in fs::read_dir(&search_dir)? {
            let entry = entry?;
            if entry.file_name().to_string_lossy().starts_with(&prefix) {
                matches.push(entry.path());
            }
        }

        match matches.len() {
            0 => {
                log::warn!("No proxy file found for {:?}", card.name);
                missing.push(card.clone());
            }
            1 => {
                let count = if duplicate { card.order_count } else { 1 };
                duplicate_file(&matches[0], dest_dir, count)?;
            }
            _ => {
                log::warn!("Multiple proxy files found for {:?}", card.name);
                duplicates.push(card.clone());
            }
        }
    }

    Ok((missing, duplicates))
}

/// Names with no file in `dir` containing them as a substring.
pub fn find_missing_files(dir: &Path, names: &[String]) -> Result<Vec<String>> {
    let files: Vec<String> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();

    Ok(names
        .iter()
        .filter(|name| !files.iter().any(|file| file.contains(name.as_str())))
        .cloned()
        .collect())
}
