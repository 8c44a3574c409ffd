//! Type-line and mana-value classification.

use crate::card::pips::cost_total;
use crate::card::types::Card;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary category of a card, in the priority order used to break ties
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TypeCategory {
    Creature,
    Planeswalker,
    Instant,
    Sorcery,
    Artifact,
    Enchantment,
    Battle,
    Land,
    Other,
    Unknown,
}

impl TypeCategory {
    /// Categories checked against the type line, first match wins
    const PRIORITY: [(TypeCategory, &'static str); 8] = [
        (TypeCategory::Creature, "creature"),
        (TypeCategory::Planeswalker, "planeswalker"),
        (TypeCategory::Instant, "instant"),
        (TypeCategory::Sorcery, "sorcery"),
        (TypeCategory::Artifact, "artifact"),
        (TypeCategory::Enchantment, "enchantment"),
        (TypeCategory::Battle, "battle"),
        (TypeCategory::Land, "land"),
    ];
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Creature => "Creature",
            Self::Planeswalker => "Planeswalker",
            Self::Instant => "Instant",
            Self::Sorcery => "Sorcery",
            Self::Artifact => "Artifact",
            Self::Enchantment => "Enchantment",
            Self::Battle => "Battle",
            Self::Land => "Land",
            Self::Other => "Other",
            Self::Unknown => "Unknown",
        };
        write!(f, "{}", name)
    }
}

/// Lowercased words of a type line. Splitting on words keeps "Island" from
/// reading as "land".
pub(crate) fn type_words(type_line: &str) -> Vec<String> {
    type_line
        .split(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-')
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Resolve the card's primary category from its type line
pub fn primary_type(card: &Card) -> TypeCategory {
    let type_line = match card.effective_type_line() {
        Some(t) => t,
        None => return TypeCategory::Unknown,
    };
    let words = type_words(type_line);

    TypeCategory::PRIORITY
        .iter()
        .find(|(_, word)| words.iter().any(|w| w == word))
        .map(|(category, _)| *category)
        .unwrap_or(TypeCategory::Other)
}

/// True if the type line names any permanent type
pub fn is_permanent(card: &Card) -> bool {
    const PERMANENT_TYPES: [&str; 6] = [
        "land",
        "creature",
        "artifact",
        "enchantment",
        "planeswalker",
        "battle",
    ];
    card.effective_type_line()
        .map(type_words)
        .map(|words| words.iter().any(|w| PERMANENT_TYPES.contains(&w.as_str())))
        .unwrap_or(false)
}

/// Converted mana cost of the card.
///
/// Uses `cmc` when the record carries it. Otherwise parses the root cost, and
/// for multi-faced cards without one, the first face's cost. Missing cost is 0.
pub fn mana_value(card: &Card) -> f64 {
    if let Some(cmc) = card.cmc {
        return cmc;
    }
    if let Some(cost) = card.root_mana_cost() {
        return cost_total(cost);
    }
    card.faces
        .first()
        .and_then(|face| face.mana_cost.as_deref())
        .map(cost_total)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::types::CardFace;

    fn typed(type_line: &str) -> Card {
        let mut card = Card::new("Test");
        card.type_line = Some(type_line.to_string());
        card
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(primary_type(&typed("Artifact Creature — Golem")), TypeCategory::Creature);
        assert_eq!(primary_type(&typed("Artifact Land")), TypeCategory::Artifact);
        assert_eq!(
            primary_type(&typed("Enchantment Land — Urza's Saga")),
            TypeCategory::Enchantment
        );
        assert_eq!(
            primary_type(&typed("Legendary Planeswalker — Jace")),
            TypeCategory::Planeswalker
        );
        assert_eq!(primary_type(&typed("Kindred Instant — Elf")), TypeCategory::Instant);
        assert_eq!(primary_type(&typed("Basic Land — Island")), TypeCategory::Land);
        assert_eq!(primary_type(&typed("Battle — Siege")), TypeCategory::Battle);
    }

    #[test]
    fn test_other_and_unknown() {
        assert_eq!(primary_type(&typed("Conspiracy")), TypeCategory::Other);
        assert_eq!(primary_type(&typed("Creature — Island Serpent")), TypeCategory::Creature);
        assert_eq!(primary_type(&Card::new("No Type")), TypeCategory::Unknown);
    }

    #[test]
    fn test_is_permanent() {
        assert!(is_permanent(&typed("Basic Land — Forest")));
        assert!(is_permanent(&typed("Legendary Artifact")));
        assert!(!is_permanent(&typed("Instant")));
        assert!(!is_permanent(&typed("Sorcery — Lesson")));
        assert!(!is_permanent(&Card::new("No Type")));
    }

    #[test]
    fn test_mana_value_prefers_cmc() {
        let mut card = typed("Creature — Elf");
        card.cmc = Some(1.0);
        card.mana_cost = Some("{5}{G}".to_string());
        assert_eq!(mana_value(&card), 1.0);
    }

    #[test]
    fn test_mana_value_falls_back_to_first_face() {
        let mut card = typed("Instant // Instant");
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
        assert_eq!(mana_value(&card), 2.0);
    }

    #[test]
    fn test_mana_value_missing_cost_is_zero() {
        assert_eq!(mana_value(&typed("Basic Land — Forest")), 0.0);
    }
}
