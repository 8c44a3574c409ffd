use crate::card::Card;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid quantity for '{card}': must be at least 1")]
    InvalidQuantity { card: String },
    #[error("Conflicting board flags for '{card}': {reason}")]
    ConflictingBoards { card: String, reason: String },
}

/// Game format of a deck
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Standard,
    Pioneer,
    Modern,
    Legacy,
    Vintage,
    Pauper,
    Commander,
    Brawl,
    #[default]
    #[serde(other)]
    Other,
}

impl Format {
    /// Formats built around a designated commander
    pub fn uses_commander(&self) -> bool {
        matches!(self, Format::Commander | Format::Brawl)
    }
}

/// Board segment an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Board {
    Mainboard,
    Commander,
    Sideboard,
    Maybeboard,
}

/// Which segment of the deck a statistics view folds over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardView {
    /// Mainboard plus commanders
    #[default]
    Main,
    Sideboard,
    Maybeboard,
    All,
}

impl BoardView {
    pub fn includes(&self, board: Board) -> bool {
        match self {
            BoardView::Main => matches!(board, Board::Mainboard | Board::Commander),
            BoardView::Sideboard => board == Board::Sideboard,
            BoardView::Maybeboard => board == Board::Maybeboard,
            BoardView::All => true,
        }
    }
}

/// One line of a deck list
#[derive(Debug, Clone, PartialEq, Hash, Serialize, Deserialize)]
pub struct DeckEntry {
    pub card: Card,
    pub quantity: u32,
    #[serde(default)]
    pub is_commander: bool,
    #[serde(default)]
    pub is_sideboard: bool,
    #[serde(default)]
    pub is_maybeboard: bool,
}

impl DeckEntry {
    pub fn new(card: Card, quantity: u32) -> Self {
        DeckEntry {
            card,
            quantity,
            is_commander: false,
            is_sideboard: false,
            is_maybeboard: false,
        }
    }

    pub fn commander(card: Card) -> Self {
        DeckEntry {
            is_commander: true,
            ..DeckEntry::new(card, 1)
        }
    }

    pub fn sideboard(card: Card, quantity: u32) -> Self {
        DeckEntry {
            is_sideboard: true,
            ..DeckEntry::new(card, quantity)
        }
    }

    pub fn maybeboard(card: Card, quantity: u32) -> Self {
        DeckEntry {
            is_maybeboard: true,
            ..DeckEntry::new(card, quantity)
        }
    }

    pub fn board(&self) -> Board {
        if self.is_commander {
            Board::Commander
        } else if self.is_sideboard {
            Board::Sideboard
        } else if self.is_maybeboard {
            Board::Maybeboard
        } else {
            Board::Mainboard
        }
    }

    fn validate(&self) -> Result<(), DeckError> {
        if self.quantity == 0 {
            return Err(DeckError::InvalidQuantity {
                card: self.card.name.clone(),
            });
        }
        let conflict = if self.is_sideboard && self.is_maybeboard {
            Some("sideboard and maybeboard")
        } else if self.is_commander && (self.is_sideboard || self.is_maybeboard) {
            Some("a commander must be in the mainboard")
        } else {
            None
        };
        match conflict {
            Some(reason) => Err(DeckError::ConflictingBoards {
                card: self.card.name.clone(),
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// A fully resolved deck snapshot
#[derive(Debug, Clone, Default, PartialEq, Hash, Serialize, Deserialize)]
pub struct Deck {
    #[serde(default)]
    pub format: Format,
    pub entries: Vec<DeckEntry>,
}

impl Deck {
    pub fn new(format: Format, entries: Vec<DeckEntry>) -> Self {
        Deck { format, entries }
    }

    /// Load a deck snapshot from a JSON file
    pub fn from_file(path: &str) -> Result<Self, DeckError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse and validate a deck snapshot
    pub fn from_json(json: &str) -> Result<Self, DeckError> {
        let deck: Deck = serde_json::from_str(json)?;
        deck.validate()?;
        Ok(deck)
    }

    /// Check quantities and board flags on every entry
    pub fn validate(&self) -> Result<(), DeckError> {
        self.entries.iter().try_for_each(DeckEntry::validate)
    }

    /// Entries that fall inside a board view
    pub fn entries_in(&self, view: BoardView) -> impl Iterator<Item = &DeckEntry> {
        self.entries.iter().filter(move |e| view.includes(e.board()))
    }

    /// Physical copies in the mainboard and commander segment
    pub fn len(&self) -> usize {
        self.entries_in(BoardView::Main)
            .map(|e| e.quantity as usize)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hash over every field of every entry, used to key cached views
    pub fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}
