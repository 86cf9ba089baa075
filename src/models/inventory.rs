//! Spreadsheet-backed proxy order inventory.
//!
//! The inventory is exported as CSV from a shared spreadsheet. The first
//! rows hold calculated fields, then a header row names the users whose
//! order counts occupy the middle columns, and every later row is one card.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{AutoproxyError, Result};
use crate::models::card::CardRecord;

/// Index of the header row (earlier rows are calculated-field noise).
const HEADER_ROW: usize = 3;

/// Fixed leading columns: name, kind, last-modified.
const COL_NAME: usize = 0;
const COL_KIND: usize = 1;
const COL_MODIFIED: usize = 2;
/// Per-user count columns start here and run to the last two columns,
/// which hold the on-hand count and the order total.
const COUNTS_START: usize = 3;
const TRAILING_COLS: usize = 2;

// ---------------------------------------------------------------------------
// CardKind
// ---------------------------------------------------------------------------

/// Inventory category, doubling as the proxy folder name for a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    White,
    Blue,
    Black,
    Red,
    Green,
    Land,
    Multi,
    Colorless,
    Token,
}

impl CardKind {
    pub const ALL: [CardKind; 9] = [
        CardKind::White,
        CardKind::Blue,
        CardKind::Black,
        CardKind::Red,
        CardKind::Green,
        CardKind::Land,
        CardKind::Multi,
        CardKind::Colorless,
        CardKind::Token,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardKind::White => "White",
            CardKind::Blue => "Blue",
            CardKind::Black => "Black",
            CardKind::Red => "Red",
            CardKind::Green => "Green",
            CardKind::Land => "Land",
            CardKind::Multi => "Multi",
            CardKind::Colorless => "Colorless",
            CardKind::Token => "Token",
        }
    }
}

impl FromStr for CardKind {
    type Err = AutoproxyError;

    fn from_str(s: &str) -> Result<Self> {
        CardKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                AutoproxyError::InvalidArgument(format!("Unknown inventory card kind: {:?}", s))
            })
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// InventoryCard
// ---------------------------------------------------------------------------

/// One inventory row: a card with per-user order counts.
#[derive(Debug, Clone)]
pub struct InventoryCard {
    pub name: String,
    pub kind: CardKind,
    pub modified: String,
    pub counts: Vec<u32>,
    pub on_hand: u32,
    pub order_count: u32,
}

impl InventoryCard {
    /// Parse a spreadsheet row using the fixed column map.
    fn from_row(row: &[String]) -> Result<Self> {
        if row.len() < COUNTS_START + TRAILING_COLS {
            return Err(AutoproxyError::InvalidArgument(format!(
                "Inventory row has {} columns, expected at least {}: {:?}",
                row.len(),
                COUNTS_START + TRAILING_COLS,
                row
            )));
        }

        let counts = row[COUNTS_START..row.len() - TRAILING_COLS]
            .iter()
            .map(|cell| parse_count(cell))
            .collect::<Result<Vec<u32>>>()?;

        Ok(Self {
            name: row[COL_NAME].clone(),
            kind: row[COL_KIND].parse()?,
            modified: row[COL_MODIFIED].clone(),
            counts,
            on_hand: parse_count(&row[row.len() - 2])?,
            order_count: parse_count(&row[row.len() - 1])?,
        })
    }

    fn add_to_order(&mut self, column: usize, to_add: u32) -> Result<()> {
        let slot = self.counts.get_mut(column).ok_or_else(|| {
            AutoproxyError::InvalidArgument(format!(
                "Row {:?} has no count column {}",
                self.name, column
            ))
        })?;
        *slot += to_add;
        Ok(())
    }
}

/// Numeric cell coercion; an empty cell counts as zero.
fn parse_count(cell: &str) -> Result<u32> {
    if cell.is_empty() {
        return Ok(0);
    }
    cell.parse().map_err(|_| {
        AutoproxyError::InvalidArgument(format!("Invalid count value: {:?}", cell))
    })
}

// ---------------------------------------------------------------------------
// OrderCard
// ---------------------------------------------------------------------------

/// A resolved card a user wants added to the order.
#[derive(Debug, Clone)]
pub struct OrderCard {
    pub card: CardRecord,
    pub user: String,
    pub count: u32,
}

impl OrderCard {
    pub fn new(card: CardRecord, user: impl Into<String>, count: u32) -> Self {
        Self {
            card,
            user: user.into(),
            count,
        }
    }

    pub fn name(&self) -> &str {
        &self.card.name
    }
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// Parsed inventory: one `InventoryCard` per data row plus the user list
/// taken from the header's count columns.
#[derive(Debug, Clone)]
pub struct Inventory {
    pub cards: Vec<InventoryCard>,
    pub users: Vec<String>,
}

impl Inventory {
    /// Parse a rectangular grid of cells exported from the spreadsheet.
    ///
    /// Rows before [`HEADER_ROW`] are calculated fields and ignored; the
    /// header row supplies user names for the count columns. A row that is
    /// too short, or a cell that fails numeric coercion, is a structural
    /// error.
    pub fn from_grid(rows: &[Vec<String>]) -> Result<Self> {
        let header = rows.get(HEADER_ROW).ok_or_else(|| {
            AutoproxyError::InvalidArgument(format!(
                "Inventory grid has {} rows, header expected at row {}",
                rows.len(),
                HEADER_ROW
            ))
        })?;
        if header.len() < COUNTS_START + TRAILING_COLS {
            return Err(AutoproxyError::InvalidArgument(format!(
                "Inventory header has {} columns, expected at least {}",
                header.len(),
                COUNTS_START + TRAILING_COLS
            )));
        }

        let users = header[COUNTS_START..header.len() - TRAILING_COLS].to_vec();
        let cards = rows[HEADER_ROW + 1..]
            .iter()
            .map(|row| InventoryCard::from_row(row))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { cards, users })
    }

    /// Read a CSV export into the grid shape and parse it.
    pub fn from_csv_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path.as_ref())?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Inventory::from_grid(&rows)
    }

    /// Add an order against the matching row.
    ///
    /// Rows match when the ordered name is a substring of the row name;
    /// with several matches the last one wins. No match is an error.
    pub fn add_to_order(&mut self, order: &OrderCard) -> Result<()> {
        let column = self
            .users
            .iter()
            .position(|user| user == &order.user)
            .ok_or_else(|| {
                AutoproxyError::InvalidArgument(format!("Unknown user: {:?}", order.user))
            })?;

        let row = self
            .cards
            .iter_mut()
            .filter(|card| card.name.contains(order.name()))
            .last()
            .ok_or_else(|| {
                AutoproxyError::InvalidArgument(format!(
                    "No cards found named {:?}",
                    order.name()
                ))
            })?;

        row.add_to_order(column, order.count)
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Inventory: {} cards for {} users ({})",
            self.cards.len(),
            self.users.len(),
            self.users.join(", ")
        )
    }
}
