use crate::card::{mana_value, primary_type, Card, TypeCategory};
use crate::deck::{BoardView, Deck};
use serde::{Deserialize, Serialize};

/// Bins 0 through 9 plus a 10+ overflow bin
pub const CURVE_BINS: usize = 11;

/// Non-land copies bucketed by mana value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManaCurve {
    pub bins: [u32; CURVE_BINS],
}

impl ManaCurve {
    pub fn total(&self) -> u32 {
        self.bins.iter().sum()
    }

    /// Label for a bin index ("0".."9", "10+")
    pub fn label(index: usize) -> String {
        if index + 1 >= CURVE_BINS {
            format!("{}+", CURVE_BINS - 1)
        } else {
            index.to_string()
        }
    }
}

/// Bin for a mana value; fractional values floor, anything past 9 overflows
pub fn curve_bin(value: f64) -> usize {
    if !value.is_finite() || value < 0.0 {
        return 0;
    }
    (value.floor() as usize).min(CURVE_BINS - 1)
}

pub(crate) fn is_land(card: &Card) -> bool {
    primary_type(card) == TypeCategory::Land
}

/// Mana curve of the mainboard (commanders included)
pub fn mana_curve(deck: &Deck) -> ManaCurve {
    mana_curve_for(deck, BoardView::Main)
}

pub fn mana_curve_for(deck: &Deck, view: BoardView) -> ManaCurve {
    let mut curve = ManaCurve::default();
    for entry in deck.entries_in(view).filter(|e| !is_land(&e.card)) {
        let bin = &mut curve.bins[curve_bin(mana_value(&entry.card))];
        *bin = bin.saturating_add(entry.quantity);
    }
    curve
}
