//! Deck-wide statistics.
//!
//! A pure fold over one board view of a deck snapshot: the same snapshot
//! always yields the same `DeckStatistics`.

use crate::analysis::curve::{is_land, mana_curve_for, ManaCurve};
use crate::card::{
    mana_pips, mana_sources, mana_value, primary_type, Card, Color, ManaPipVector,
    ManaSourceVector, Rarity, TypeCategory,
};
use crate::deck::{Board, BoardView, Deck};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Color identity bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ColorBucket {
    Colorless,
    White,
    Blue,
    Black,
    Red,
    Green,
    Multicolor,
}

impl ColorBucket {
    /// Bucket by color identity cardinality
    pub fn of(card: &Card) -> ColorBucket {
        let mut identity = card.color_identity.clone();
        identity.sort();
        identity.dedup();
        match identity.as_slice() {
            [] => ColorBucket::Colorless,
            [Color::White] => ColorBucket::White,
            [Color::Blue] => ColorBucket::Blue,
            [Color::Black] => ColorBucket::Black,
            [Color::Red] => ColorBucket::Red,
            [Color::Green] => ColorBucket::Green,
            _ => ColorBucket::Multicolor,
        }
    }
}

impl fmt::Display for ColorBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Colorless => write!(f, "Colorless"),
            Self::White => write!(f, "White"),
            Self::Blue => write!(f, "Blue"),
            Self::Black => write!(f, "Black"),
            Self::Red => write!(f, "Red"),
            Self::Green => write!(f, "Green"),
            Self::Multicolor => write!(f, "Multicolor"),
        }
    }
}

/// Aggregates for one board view of a deck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckStatistics {
    pub view: BoardView,
    pub total_cards: u32,
    pub type_distribution: BTreeMap<TypeCategory, u32>,
    /// Every card in the view
    pub color_distribution: BTreeMap<ColorBucket, u32>,
    /// Non-land cards only
    pub spell_color_distribution: BTreeMap<ColorBucket, u32>,
    pub rarity_distribution: BTreeMap<Rarity, u32>,
    pub mana_sources: ManaSourceVector,
    /// Pips of non-land cards
    pub mana_symbols: ManaPipVector,
    pub mana_curve: ManaCurve,
    pub land_count: u32,
    pub average_spell_cmc: f64,
    pub median_spell_cmc: f64,
    pub land_ratio: f64,
    /// Share of non-land copies with two or more identity colors
    pub multicolor_ratio: f64,
    /// Copies whose text mentions "draw", "search" or "tutor"
    pub card_advantage: u32,
    pub commanders: Vec<String>,
    /// Copies per board across the whole deck
    pub board_counts: BTreeMap<Board, u32>,
}

const CARD_ADVANTAGE_WORDS: [&str; 3] = ["draw", "search", "tutor"];

fn is_card_advantage(card: &Card) -> bool {
    let text = card.oracle_scan_text();
    CARD_ADVANTAGE_WORDS.iter().any(|w| text.contains(w))
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

fn tally<K: Ord>(map: &mut BTreeMap<K, u32>, key: K, qty: u32) {
    let count = map.entry(key).or_insert(0);
    *count = count.saturating_add(qty);
}

/// Value at `index` of the multiset expanded from sorted (value, copies) pairs
fn value_at(sorted: &[(f64, u32)], index: u64) -> f64 {
    let mut seen = 0u64;
    for &(value, copies) in sorted {
        seen += u64::from(copies);
        if index < seen {
            return value;
        }
    }
    0.0
}

fn median(sorted: &[(f64, u32)]) -> f64 {
    let n: u64 = sorted.iter().map(|&(_, copies)| u64::from(copies)).sum();
    match n {
        0 => 0.0,
        n if n % 2 == 1 => value_at(sorted, n / 2),
        n => (value_at(sorted, n / 2 - 1) + value_at(sorted, n / 2)) / 2.0,
    }
}

/// Statistics for the mainboard and commanders
pub fn analyze_deck(deck: &Deck) -> DeckStatistics {
    analyze_board(deck, BoardView::Main)
}

/// Statistics for a specific board view
pub fn analyze_board(deck: &Deck, view: BoardView) -> DeckStatistics {
    let mut total_cards = 0u32;
    let mut land_count = 0u32;
    let mut multicolor_spells = 0u32;
    let mut card_advantage = 0u32;
    let mut type_distribution = BTreeMap::new();
    let mut color_distribution = BTreeMap::new();
    let mut spell_color_distribution = BTreeMap::new();
    let mut rarity_distribution = BTreeMap::new();
    let mut sources = ManaSourceVector::default();
    let mut symbols = ManaPipVector::default();
    // (mana value, copies) per non-land entry
    let mut spell_values: Vec<(f64, u32)> = Vec::new();
    let mut commanders = Vec::new();

    for entry in deck.entries_in(view) {
        let card = &entry.card;
        let qty = entry.quantity;
        let bucket = ColorBucket::of(card);

        total_cards = total_cards.saturating_add(qty);
        tally(&mut type_distribution, primary_type(card), qty);
        tally(&mut color_distribution, bucket, qty);
        tally(&mut rarity_distribution, card.rarity, qty);
        sources += mana_sources(card).scaled(qty);

        if entry.is_commander {
            commanders.push(card.name.clone());
        }
        if is_card_advantage(card) {
            card_advantage = card_advantage.saturating_add(qty);
        }

        if is_land(card) {
            land_count = land_count.saturating_add(qty);
            continue;
        }

        tally(&mut spell_color_distribution, bucket, qty);
        symbols += mana_pips(card).scaled(qty);
        if bucket == ColorBucket::Multicolor {
            multicolor_spells = multicolor_spells.saturating_add(qty);
        }
        spell_values.push((mana_value(card), qty));
    }

    spell_values.sort_by(|a, b| a.0.total_cmp(&b.0));
    let spell_count: u64 = spell_values.iter().map(|&(_, q)| u64::from(q)).sum();
    let average_spell_cmc = if spell_count == 0 {
        0.0
    } else {
        spell_values
            .iter()
            .map(|&(value, q)| value * f64::from(q))
            .sum::<f64>()
            / spell_count as f64
    };

    let mut board_counts = BTreeMap::new();
    for entry in &deck.entries {
        tally(&mut board_counts, entry.board(), entry.quantity);
    }

    let stats = DeckStatistics {
        view,
        total_cards,
        type_distribution,
        color_distribution,
        spell_color_distribution,
        rarity_distribution,
        mana_sources: sources,
        mana_symbols: symbols,
        mana_curve: mana_curve_for(deck, view),
        land_count,
        average_spell_cmc,
        median_spell_cmc: median(&spell_values),
        land_ratio: ratio(land_count.into(), total_cards.into()),
        multicolor_ratio: ratio(multicolor_spells.into(), spell_count),
        card_advantage,
        commanders,
        board_counts,
    };

    debug!(
        ?view,
        total_cards = stats.total_cards,
        lands = stats.land_count,
        "computed deck statistics"
    );

    stats
}
