//! Mana symbol parsing for printed costs.

use crate::card::types::{Card, Color};
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Count of symbol occurrences across printed mana costs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManaPipVector {
    #[serde(rename = "W")]
    pub white: u32,
    #[serde(rename = "U")]
    pub blue: u32,
    #[serde(rename = "B")]
    pub black: u32,
    #[serde(rename = "R")]
    pub red: u32,
    #[serde(rename = "G")]
    pub green: u32,
    pub colorless: u32,
    pub phyrexian: u32,
    pub generic: u32,
}

impl ManaPipVector {
    pub fn color(&self, color: Color) -> u32 {
        match color {
            Color::White => self.white,
            Color::Blue => self.blue,
            Color::Black => self.black,
            Color::Red => self.red,
            Color::Green => self.green,
        }
    }

    fn color_mut(&mut self, color: Color) -> &mut u32 {
        match color {
            Color::White => &mut self.white,
            Color::Blue => &mut self.blue,
            Color::Black => &mut self.black,
            Color::Red => &mut self.red,
            Color::Green => &mut self.green,
        }
    }

    /// Every bucket multiplied by `quantity`
    pub fn scaled(&self, quantity: u32) -> Self {
        ManaPipVector {
            white: self.white.saturating_mul(quantity),
            blue: self.blue.saturating_mul(quantity),
            black: self.black.saturating_mul(quantity),
            red: self.red.saturating_mul(quantity),
            green: self.green.saturating_mul(quantity),
            colorless: self.colorless.saturating_mul(quantity),
            phyrexian: self.phyrexian.saturating_mul(quantity),
            generic: self.generic.saturating_mul(quantity),
        }
    }

    pub fn total_colored(&self) -> u32 {
        [self.blue, self.black, self.red, self.green]
            .into_iter()
            .fold(self.white, u32::saturating_add)
    }
}

impl AddAssign for ManaPipVector {
    fn add_assign(&mut self, other: Self) {
        self.white = self.white.saturating_add(other.white);
        self.blue = self.blue.saturating_add(other.blue);
        self.black = self.black.saturating_add(other.black);
        self.red = self.red.saturating_add(other.red);
        self.green = self.green.saturating_add(other.green);
        self.colorless = self.colorless.saturating_add(other.colorless);
        self.phyrexian = self.phyrexian.saturating_add(other.phyrexian);
        self.generic = self.generic.saturating_add(other.generic);
    }
}

/// Contents of each `{...}` token in a symbol string, in order.
/// An unterminated brace ends the scan.
pub fn symbols(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        let open = rest.find('{')?;
        let close = rest[open..].find('}')? + open;
        let symbol = &rest[open + 1..close];
        rest = &rest[close + 1..];
        Some(symbol)
    })
}

/// Fold one cost string into a pip vector
fn count_cost(cost: &str, pips: &mut ManaPipVector) {
    for symbol in symbols(cost) {
        let symbol = symbol.trim().to_uppercase();
        if symbol.contains("/P") {
            pips.phyrexian += 1;
        } else if let Some(color) = Color::from_symbol(&symbol) {
            *pips.color_mut(color) += 1;
        } else if symbol == "C" {
            pips.colorless += 1;
        } else if let Ok(n) = symbol.parse::<u32>() {
            pips.generic = pips.generic.saturating_add(n);
        }
    }
}

/// Pips across the card's own cost and all face costs
pub fn mana_pips(card: &Card) -> ManaPipVector {
    let mut pips = ManaPipVector::default();
    for cost in card.mana_costs() {
        count_cost(cost, &mut pips);
    }
    pips
}

/// Mana value of a single cost string. Numbers add their value, X/Y/Z add
/// nothing, every other symbol adds one.
pub fn cost_total(cost: &str) -> f64 {
    symbols(cost)
        .map(|symbol| {
            let symbol = symbol.trim();
            if let Ok(n) = symbol.parse::<u32>() {
                n as f64
            } else if matches!(symbol, "X" | "Y" | "Z" | "x" | "y" | "z" | "") {
                0.0
            } else {
                1.0
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::types::CardFace;

    fn costed(cost: &str) -> Card {
        let mut card = Card::new("Test");
        card.mana_cost = Some(cost.to_string());
        card
    }

    #[test]
    fn test_symbols_iterator() {
        let syms: Vec<_> = symbols("{2}{W/P}{G}").collect();
        assert_eq!(syms, vec!["2", "W/P", "G"]);
        assert_eq!(symbols("{1}{G").count(), 1);
        assert_eq!(symbols("").count(), 0);
    }

    #[test]
    fn test_colored_and_generic() {
        let pips = mana_pips(&costed("{1}{W}"));
        assert_eq!(pips.white, 1);
        assert_eq!(pips.generic, 1);
        assert_eq!(pips.total_colored(), 1);
    }

    #[test]
    fn test_phyrexian_counts_once() {
        let pips = mana_pips(&costed("{1}{G/P}{G/P}"));
        assert_eq!(pips.phyrexian, 2);
        assert_eq!(pips.green, 0);
        assert_eq!(pips.generic, 1);
    }

    #[test]
    fn test_colorless_and_ignored_tokens() {
        let pips = mana_pips(&costed("{X}{C}{C}{W/U}{2/B}{S}{10}"));
        assert_eq!(pips.colorless, 2);
        assert_eq!(pips.generic, 10);
        assert_eq!(pips.total_colored(), 0);
        assert_eq!(pips.phyrexian, 0);
    }

    #[test]
    fn test_face_costs_included() {
        let mut card = Card::new("Fire // Ice");
        card.faces = vec![
            CardFace {
                name: "Fire".to_string(),
                mana_cost: Some("{1}{R}".to_string()),
                ..CardFace::default()
            },
            CardFace {
                name: "Ice".to_string(),
                mana_cost: Some("{1}{U}".to_string()),
                ..CardFace::default()
            },
        ];
        let pips = mana_pips(&card);
        assert_eq!(pips.red, 1);
        assert_eq!(pips.blue, 1);
        assert_eq!(pips.generic, 2);
    }

    #[test]
    fn test_scaled() {
        let pips = mana_pips(&costed("{2}{B}{B}")).scaled(3);
        assert_eq!(pips.black, 6);
        assert_eq!(pips.generic, 6);
    }

    #[test]
    fn test_oversized_generic_saturates() {
        let pips = mana_pips(&costed("{4294967295}{1}{G}"));
        assert_eq!(pips.generic, u32::MAX);
        assert_eq!(pips.green, 1);

        // too large for a count at all: ignored like any unrecognized token
        let pips = mana_pips(&costed("{99999999999}{2}"));
        assert_eq!(pips.generic, 2);

        let mut total = mana_pips(&costed("{4294967295}")).scaled(4);
        assert_eq!(total.generic, u32::MAX);
        total += mana_pips(&costed("{5}"));
        assert_eq!(total.generic, u32::MAX);

        let mut colored = mana_pips(&costed("{W}{U}")).scaled(u32::MAX);
        colored += mana_pips(&costed("{G}"));
        assert_eq!(colored.total_colored(), u32::MAX);
    }

    #[test]
    fn test_cost_total() {
        assert_eq!(cost_total("{X}{X}{R}"), 1.0);
        assert_eq!(cost_total("{3}{U/P}{W/B}"), 5.0);
        assert_eq!(cost_total("not a cost"), 0.0);
    }
}
