//! Text-driven mana source estimation.
//!
//! Decides which colors of mana a permanent can produce by reading its type
//! line and rules text. This is a heuristic and it misreads some cards on
//! purpose: results must match the existing deckbuilder, so keep changes to
//! the matching rules out of this module unless the expected outputs change
//! with them.

use crate::card::classify::{is_permanent, type_words};
use crate::card::pips::symbols;
use crate::card::types::{Card, Color};
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Number of permanents able to produce each kind of mana
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManaSourceVector {
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
    pub any_color: u32,
}

impl ManaSourceVector {
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

    pub fn scaled(&self, quantity: u32) -> Self {
        ManaSourceVector {
            white: self.white.saturating_mul(quantity),
            blue: self.blue.saturating_mul(quantity),
            black: self.black.saturating_mul(quantity),
            red: self.red.saturating_mul(quantity),
            green: self.green.saturating_mul(quantity),
            colorless: self.colorless.saturating_mul(quantity),
            any_color: self.any_color.saturating_mul(quantity),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == ManaSourceVector::default()
    }
}

impl AddAssign for ManaSourceVector {
    fn add_assign(&mut self, other: Self) {
        self.white = self.white.saturating_add(other.white);
        self.blue = self.blue.saturating_add(other.blue);
        self.black = self.black.saturating_add(other.black);
        self.red = self.red.saturating_add(other.red);
        self.green = self.green.saturating_add(other.green);
        self.colorless = self.colorless.saturating_add(other.colorless);
        self.any_color = self.any_color.saturating_add(other.any_color);
    }
}

const ANY_COLOR_PHRASES: [&str; 2] = [
    "add one mana of any color",
    "any color in your commander's color identity",
];

const FETCH_PREFIX: &str = "search your library for a";

/// Produced mana kinds in an add clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Produced {
    Color(Color),
    Colorless,
}

impl Produced {
    fn from_symbol(symbol: &str) -> Option<Produced> {
        let symbol = symbol.trim();
        if symbol.eq_ignore_ascii_case("c") {
            return Some(Produced::Colorless);
        }
        Color::from_symbol(symbol).map(Produced::Color)
    }
}

/// Sources contributed by a single copy of `card`
pub fn mana_sources(card: &Card) -> ManaSourceVector {
    let mut sources = ManaSourceVector::default();

    if !is_permanent(card) {
        return sources;
    }

    if let Some(color) = basic_land_color(card) {
        *sources.color_mut(color) += 1;
        return sources;
    }

    let text = card.oracle_scan_text();

    if ANY_COLOR_PHRASES.iter().any(|phrase| text.contains(phrase)) {
        sources.any_color += 1;
    }

    for phrase in fetch_phrases(&text) {
        for color in Color::ALL {
            if phrase.contains(color.basic_land_type()) {
                *sources.color_mut(color) += 1;
            }
        }
    }

    for clause in add_clauses(&text) {
        if clause.is_choice {
            let mut seen: Vec<Produced> = Vec::new();
            for produced in clause.produced {
                if !seen.contains(&produced) {
                    seen.push(produced);
                    add_produced(&mut sources, produced);
                }
            }
        } else {
            for produced in clause.produced {
                add_produced(&mut sources, produced);
            }
        }
    }

    sources
}

fn add_produced(sources: &mut ManaSourceVector, produced: Produced) {
    match produced {
        Produced::Color(color) => *sources.color_mut(color) += 1,
        Produced::Colorless => sources.colorless += 1,
    }
}

/// Color of a basic land naming exactly one basic land type
fn basic_land_color(card: &Card) -> Option<Color> {
    let words = type_words(card.effective_type_line()?);
    if !words.iter().any(|w| w == "basic") || !words.iter().any(|w| w == "land") {
        return None;
    }
    let named: Vec<Color> = Color::ALL
        .into_iter()
        .filter(|c| words.iter().any(|w| w == c.basic_land_type()))
        .collect();
    match named.as_slice() {
        [color] => Some(*color),
        _ => None,
    }
}

/// Land-type phrases captured from "search your library for a/an <...> card".
/// A capture stops at the first word "card" and never crosses a sentence end.
fn fetch_phrases(text: &str) -> Vec<&str> {
    let mut phrases = Vec::new();
    let mut rest = text;

    while let Some(pos) = rest.find(FETCH_PREFIX) {
        let after = &rest[pos + FETCH_PREFIX.len()..];
        rest = after;

        let body = if let Some(b) = after.strip_prefix(' ') {
            b
        } else if let Some(b) = after.strip_prefix("n ") {
            b
        } else {
            continue;
        };

        let sentence_end = body.find(|c| c == '.' || c == '\n').unwrap_or(body.len());
        let sentence = &body[..sentence_end];
        let card_pos = sentence
            .match_indices("card")
            .map(|(i, _)| i)
            .find(|&i| i == 0 || sentence[..i].ends_with(' '));

        if let Some(i) = card_pos {
            phrases.push(sentence[..i].trim_end());
        }
    }

    phrases
}

#[derive(Debug)]
struct AddClause {
    produced: Vec<Produced>,
    is_choice: bool,
}

/// Parse every "add {X}..." clause. Symbols may be adjacent or joined by
/// ", ", " or " and ", or "; any "or" makes the clause a choice.
fn add_clauses(text: &str) -> Vec<AddClause> {
    let mut clauses = Vec::new();

    for (pos, _) in text.match_indices("add ") {
        let at_word_start = text[..pos]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        if !at_word_start {
            continue;
        }

        let mut rest = &text[pos + "add ".len()..];
        let mut tokens: Vec<&str> = Vec::new();
        let mut is_choice = false;

        loop {
            let Some(token) = leading_symbol(rest) else {
                break;
            };
            tokens.push(token);
            rest = &rest[token.len() + 2..];

            let next = [("", false), (", or ", true), (" or ", true), (", ", false)]
                .into_iter()
                .find(|&(sep, _)| rest.starts_with(sep) && rest[sep.len()..].starts_with('{'));
            match next {
                Some((sep, choice)) => {
                    is_choice |= choice;
                    rest = &rest[sep.len()..];
                }
                None => break,
            }
        }

        if !tokens.is_empty() {
            clauses.push(AddClause {
                produced: tokens.into_iter().filter_map(Produced::from_symbol).collect(),
                is_choice,
            });
        }
    }

    clauses
}

/// Inner text of a `{...}` token at the very start of `text`
fn leading_symbol(text: &str) -> Option<&str> {
    if !text.starts_with('{') {
        return None;
    }
    symbols(text).next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::types::CardFace;

    fn permanent(type_line: &str, text: &str) -> Card {
        let mut card = Card::new("Test");
        card.type_line = Some(type_line.to_string());
        card.oracle_text = Some(text.to_string());
        card
    }

    #[test]
    fn test_single_add_symbol() {
        let sources = mana_sources(&permanent("Creature — Elf Druid", "{T}: Add {W}."));
        assert_eq!(
            sources,
            ManaSourceVector {
                white: 1,
                ..ManaSourceVector::default()
            }
        );
    }

    #[test]
    fn test_repeated_symbols_accumulate() {
        let sources = mana_sources(&permanent("Artifact", "{T}: Add {W}{W}."));
        assert_eq!(sources.white, 2);
    }

    #[test]
    fn test_choice_counts_each_color_once() {
        let sources = mana_sources(&permanent("Land", "{T}: Add {G} or {W}."));
        assert_eq!(sources.green, 1);
        assert_eq!(sources.white, 1);

        let sources = mana_sources(&permanent("Land", "{T}: Add {G}{G}, {G}{W}, or {W}{W}."));
        assert_eq!(sources.green, 1);
        assert_eq!(sources.white, 1);

        let sources = mana_sources(&permanent("Land", "{T}: Add {R}, {G}, or {W}."));
        assert_eq!((sources.red, sources.green, sources.white), (1, 1, 1));
    }

    #[test]
    fn test_separate_clauses_add_up() {
        let sources = mana_sources(&permanent("Land", "{T}: Add {C}.\n{T}, Pay 1 life: Add {U}."));
        assert_eq!(sources.colorless, 1);
        assert_eq!(sources.blue, 1);
    }

    #[test]
    fn test_basic_land_short_circuits() {
        let mut forest = permanent("Basic Land — Forest", "({T}: Add {G}.)");
        forest.name = "Forest".to_string();
        let sources = mana_sources(&forest);
        assert_eq!(
            sources,
            ManaSourceVector {
                green: 1,
                ..ManaSourceVector::default()
            }
        );
    }

    #[test]
    fn test_snow_basic_still_basic() {
        let sources = mana_sources(&permanent("Basic Snow Land — Island", ""));
        assert_eq!(sources.blue, 1);
    }

    #[test]
    fn test_fetch_with_two_types() {
        let sources = mana_sources(&permanent(
            "Land",
            "{T}, Pay 1 life, Sacrifice this land: Search your library for a Plains or Island \
             card, put it onto the battlefield, then shuffle.",
        ));
        assert_eq!(sources.white, 1);
        assert_eq!(sources.blue, 1);
        assert_eq!((sources.black, sources.red, sources.green), (0, 0, 0));
    }

    #[test]
    fn test_fetch_with_an_article_and_list() {
        let phrases = fetch_phrases("search your library for an island, swamp, or mountain card");
        assert_eq!(phrases, vec!["island, swamp, or mountain"]);
    }

    #[test]
    fn test_fetch_basic_land_card_names_no_color() {
        let sources = mana_sources(&permanent(
            "Land",
            "{T}, Sacrifice this land: Search your library for a basic land card, put it onto \
             the battlefield tapped, then shuffle.",
        ));
        assert!(sources.is_empty());
    }

    #[test]
    fn test_fetch_does_not_cross_sentence() {
        assert!(fetch_phrases("search your library for a forest. draw a card").is_empty());
    }

    #[test]
    fn test_any_color() {
        let sources = mana_sources(&permanent(
            "Legendary Artifact",
            "{T}: Add one mana of any color in your commander's color identity.",
        ));
        assert_eq!(sources.any_color, 1);
        assert_eq!(sources.white, 0);
    }

    #[test]
    fn test_non_permanent_contributes_nothing() {
        let sources = mana_sources(&permanent("Instant", "Add {R}{R}{R}."));
        assert!(sources.is_empty());
        let sources = mana_sources(&permanent("Sorcery", "Search your library for a Forest card."));
        assert!(sources.is_empty());
    }

    #[test]
    fn test_add_must_start_word() {
        let sources = mana_sources(&permanent("Enchantment", "Madd {G}."));
        assert!(sources.is_empty());
    }

    #[test]
    fn test_face_text_scanned() {
        let mut card = permanent("Creature — Elf // Land", "");
        card.faces = vec![
            CardFace {
                name: "Front".to_string(),
                oracle_text: Some("Trample".to_string()),
                ..CardFace::default()
            },
            CardFace {
                name: "Back".to_string(),
                oracle_text: Some("{T}: Add {G}.".to_string()),
                ..CardFace::default()
            },
        ];
        assert_eq!(mana_sources(&card).green, 1);
    }

    #[test]
    fn test_scaled_saturates() {
        let mut sources = mana_sources(&permanent("Land", "{T}: Add {G}{G}.")).scaled(u32::MAX);
        assert_eq!(sources.green, u32::MAX);
        sources += mana_sources(&permanent("Land", "{T}: Add {G}."));
        assert_eq!(sources.green, u32::MAX);
    }

    #[test]
    fn test_scaled() {
        let sources = mana_sources(&permanent("Land", "{T}: Add {B} or {R}.")).scaled(4);
        assert_eq!(sources.black, 4);
        assert_eq!(sources.red, 4);
    }
}
