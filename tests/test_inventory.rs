//! Inventory grid parsing and order bookkeeping tests.

mod common;

use autoproxy::{AutoproxyError, CardKind, Inventory, OrderCard};

/// Grid shaped like the spreadsheet export: three calculated-field rows, the
/// user header at row 3, then one row per card.
fn sample_grid() -> Vec<Vec<String>> {
    let row = |cells: &[&str]| cells.iter().map(|c| c.to_string()).collect::<Vec<_>>();
    vec![
        row(&["Totals", "", "", "12", "7", "", ""]),
        row(&["Last sync", "2023-04-01", "", "", "", "", ""]),
        row(&["", "", "", "", "", "", ""]),
        row(&["Name", "Type", "Modified", "Alice", "Bob", "On Hand", "Order"]),
        row(&["Lightning Bolt", "Red", "2023-03-14", "2", "1", "4", "3"]),
        row(&["Counterspell", "Blue", "2023-02-02", "", "3", "0", "3"]),
        row(&["Bolt of Keranos", "Red", "2023-01-20", "1", "", "2", "1"]),
    ]
}

// ---------------------------------------------------------------------------
// Grid parsing
// ---------------------------------------------------------------------------

#[test]
fn header_row_supplies_users_and_noise_rows_are_skipped() {
    let inventory = Inventory::from_grid(&sample_grid()).unwrap();

    assert_eq!(inventory.users, vec!["Alice", "Bob"]);
    assert_eq!(inventory.cards.len(), 3);
    assert_eq!(inventory.cards[0].name, "Lightning Bolt");
}

#[test]
fn counts_and_trailing_columns_are_parsed() {
    let inventory = Inventory::from_grid(&sample_grid()).unwrap();

    let bolt = &inventory.cards[0];
    assert_eq!(bolt.kind, CardKind::Red);
    assert_eq!(bolt.modified, "2023-03-14");
    assert_eq!(bolt.counts, vec![2, 1]);
    assert_eq!(bolt.on_hand, 4);
    assert_eq!(bolt.order_count, 3);
}

#[test]
fn empty_count_cells_coerce_to_zero() {
    let inventory = Inventory::from_grid(&sample_grid()).unwrap();
    assert_eq!(inventory.cards[1].counts, vec![0, 3]);
}

#[test]
fn grid_shorter_than_header_offset_is_structural_error() {
    let grid = vec![vec!["only".to_string()], vec!["two".to_string()]];
    assert!(matches!(
        Inventory::from_grid(&grid),
        Err(AutoproxyError::InvalidArgument(_))
    ));
}

#[test]
fn short_card_row_is_structural_error() {
    let mut grid = sample_grid();
    grid.push(vec!["Stub".to_string(), "Red".to_string()]);
    assert!(matches!(
        Inventory::from_grid(&grid),
        Err(AutoproxyError::InvalidArgument(_))
    ));
}

#[test]
fn non_numeric_count_cell_is_structural_error() {
    let mut grid = sample_grid();
    grid[4][3] = "two".to_string();
    assert!(matches!(
        Inventory::from_grid(&grid),
        Err(AutoproxyError::InvalidArgument(_))
    ));
}

#[test]
fn unknown_kind_fails_construction() {
    let mut grid = sample_grid();
    grid[4][1] = "Purple".to_string();
    assert!(matches!(
        Inventory::from_grid(&grid),
        Err(AutoproxyError::InvalidArgument(_))
    ));
}

// ---------------------------------------------------------------------------
// CardKind
// ---------------------------------------------------------------------------

#[test]
fn kinds_parse_from_their_names() {
    for kind in CardKind::ALL {
        assert_eq!(kind.as_str().parse::<CardKind>().unwrap(), kind);
    }
    assert!("Artifact".parse::<CardKind>().is_err());
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

#[test]
fn order_is_added_to_the_matching_user_column() {
    let mut inventory = Inventory::from_grid(&sample_grid()).unwrap();
    let order = OrderCard::new(common::sample_card("Counterspell", "lea", "55", "Mark Poole"), "Bob", 2);

    inventory.add_to_order(&order).unwrap();
    assert_eq!(inventory.cards[1].counts, vec![0, 5]);
}

#[test]
fn substring_match_picks_the_last_row() {
    let mut inventory = Inventory::from_grid(&sample_grid()).unwrap();
    // "Bolt" is a substring of both "Lightning Bolt" and "Bolt of Keranos"
    let order = OrderCard::new(common::sample_card("Bolt", "lea", "161", "Christopher Rush"), "Alice", 1);

    inventory.add_to_order(&order).unwrap();
    assert_eq!(inventory.cards[0].counts, vec![2, 1]);
    assert_eq!(inventory.cards[2].counts, vec![2, 0]);
}

#[test]
fn order_with_no_matching_row_fails() {
    let mut inventory = Inventory::from_grid(&sample_grid()).unwrap();
    let order = OrderCard::new(common::sample_card("Black Lotus", "lea", "232", "Christopher Rush"), "Alice", 1);

    assert!(matches!(
        inventory.add_to_order(&order),
        Err(AutoproxyError::InvalidArgument(_))
    ));
}

#[test]
fn order_for_unknown_user_fails() {
    let mut inventory = Inventory::from_grid(&sample_grid()).unwrap();
    let order = OrderCard::new(common::lightning_bolt(), "Mallory", 1);

    assert!(matches!(
        inventory.add_to_order(&order),
        Err(AutoproxyError::InvalidArgument(_))
    ));
}

#[test]
fn inventory_display_summarizes_contents() {
    let inventory = Inventory::from_grid(&sample_grid()).unwrap();
    assert_eq!(
        inventory.to_string(),
        "Inventory: 3 cards for 2 users (Alice, Bob)"
    );
}
