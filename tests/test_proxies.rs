//! Proxy file duplication tests against temporary directories.

use std::fs;

use autoproxy::proxies::{create_unique_proxies, duplicate_file, find_missing_files};
use autoproxy::{CardKind, Inventory};

/// Inventory with one card of each name/kind pair, order count 2.
fn inventory_rows(names: &[(&str, &str)]) -> Inventory {
    let row = |cells: &[&str]| cells.iter().map(|c| c.to_string()).collect::<Vec<_>>();
    let mut grid = vec![
        row(&[""]),
        row(&[""]),
        row(&[""]),
        row(&["Name", "Type", "Modified", "Alice", "On Hand", "Order"]),
    ];
    for (name, kind) in names {
        grid.push(row(&[name, kind, "2023-01-01", "2", "0", "2"]));
    }
    Inventory::from_grid(&grid).unwrap()
}

// ---------------------------------------------------------------------------
// duplicate_file
// ---------------------------------------------------------------------------

#[test]
fn copies_are_numbered_and_uniquely_padded() {
    let src_dir = tempfile::tempdir().unwrap();
    let dest_dir = tempfile::tempdir().unwrap();
    let source = src_dir.path().join("Lightning Bolt.jpg");
    fs::write(&source, b"jpegdata").unwrap();

    let written = duplicate_file(&source, dest_dir.path(), 3).unwrap();
    assert_eq!(written.len(), 3);

    for (i, path) in written.iter().enumerate() {
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            format!("Lightning Bolt [{}].jpg", i + 1)
        );
        // Copy i carries i bytes of NUL padding for a unique content hash
        let contents = fs::read(path).unwrap();
        assert_eq!(contents.len(), b"jpegdata".len() + i);
        assert!(contents.starts_with(b"jpegdata"));
    }
}

#[test]
fn zero_count_writes_nothing() {
    let src_dir = tempfile::tempdir().unwrap();
    let dest_dir = tempfile::tempdir().unwrap();
    let source = src_dir.path().join("Counterspell.jpg");
    fs::write(&source, b"jpegdata").unwrap();

    let written = duplicate_file(&source, dest_dir.path(), 0).unwrap();
    assert!(written.is_empty());
}

// ---------------------------------------------------------------------------
// create_unique_proxies
// ---------------------------------------------------------------------------

#[test]
fn proxies_are_found_in_their_kind_folder_and_duplicated() {
    let proxy_dir = tempfile::tempdir().unwrap();
    let dest_dir = tempfile::tempdir().unwrap();
    for kind in CardKind::ALL {
        fs::create_dir(proxy_dir.path().join(kind.as_str())).unwrap();
    }
    fs::write(proxy_dir.path().join("Red").join("Lightning Bolt.jpg"), b"art").unwrap();

    let inventory = inventory_rows(&[("Lightning Bolt", "Red")]);
    let (missing, duplicates) =
        create_unique_proxies(&inventory.cards, proxy_dir.path(), dest_dir.path(), true).unwrap();

    assert!(missing.is_empty());
    assert!(duplicates.is_empty());
    assert!(dest_dir.path().join("Lightning Bolt [1].jpg").exists());
    assert!(dest_dir.path().join("Lightning Bolt [2].jpg").exists());
}

#[test]
fn missing_and_multiply_matched_cards_are_reported() {
    let proxy_dir = tempfile::tempdir().unwrap();
    let dest_dir = tempfile::tempdir().unwrap();
    for kind in CardKind::ALL {
        fs::create_dir(proxy_dir.path().join(kind.as_str())).unwrap();
    }
    // Two files match the "Counterspell." prefix
    fs::write(proxy_dir.path().join("Blue").join("Counterspell.jpg"), b"a").unwrap();
    fs::write(proxy_dir.path().join("Blue").join("Counterspell.png"), b"b").unwrap();

    let inventory = inventory_rows(&[("Counterspell", "Blue"), ("Black Lotus", "Colorless")]);
    let (missing, duplicates) =
        create_unique_proxies(&inventory.cards, proxy_dir.path(), dest_dir.path(), true).unwrap();

    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].name, "Black Lotus");
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].name, "Counterspell");
}

#[test]
fn duplicate_flag_off_writes_one_copy() {
    let proxy_dir = tempfile::tempdir().unwrap();
    let dest_dir = tempfile::tempdir().unwrap();
    fs::create_dir(proxy_dir.path().join("Red")).unwrap();
    fs::write(proxy_dir.path().join("Red").join("Lightning Bolt.jpg"), b"art").unwrap();

    let inventory = inventory_rows(&[("Lightning Bolt", "Red")]);
    create_unique_proxies(&inventory.cards, proxy_dir.path(), dest_dir.path(), false).unwrap();

    assert!(dest_dir.path().join("Lightning Bolt [1].jpg").exists());
    assert!(!dest_dir.path().join("Lightning Bolt [2].jpg").exists());
}

#[test]
fn prefix_match_does_not_cross_card_names() {
    let proxy_dir = tempfile::tempdir().unwrap();
    let dest_dir = tempfile::tempdir().unwrap();
    fs::create_dir(proxy_dir.path().join("Red")).unwrap();
    // "Bolt of Keranos.jpg" must not match the card "Bolt"
    fs::write(proxy_dir.path().join("Red").join("Bolt of Keranos.jpg"), b"art").unwrap();

    let inventory = inventory_rows(&[("Bolt", "Red")]);
    let (missing, _) =
        create_unique_proxies(&inventory.cards, proxy_dir.path(), dest_dir.path(), true).unwrap();

    assert_eq!(missing.len(), 1);
}

// ---------------------------------------------------------------------------
// find_missing_files
// ---------------------------------------------------------------------------

#[test]
fn names_without_a_matching_file_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Lightning Bolt (Christopher Rush) [LEA].jpg"), b"x").unwrap();

    let names = vec!["Lightning Bolt".to_string(), "Black Lotus".to_string()];
    let missing = find_missing_files(dir.path(), &names).unwrap();
    assert_eq!(missing, vec!["Black Lotus".to_string()]);
}
