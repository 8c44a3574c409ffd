use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// The five colors of Magic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "W")]
    White,
    #[serde(rename = "U")]
    Blue,
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "G")]
    Green,
}

impl Color {
    pub const ALL: [Color; 5] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
    ];

    /// Convert to the single character representation
    pub fn to_char(&self) -> char {
        match self {
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
        }
    }

    /// Parse a mana symbol letter (case-insensitive)
    pub fn from_symbol(symbol: &str) -> Option<Color> {
        match symbol {
            "W" | "w" => Some(Color::White),
            "U" | "u" => Some(Color::Blue),
            "B" | "b" => Some(Color::Black),
            "R" | "r" => Some(Color::Red),
            "G" | "g" => Some(Color::Green),
            _ => None,
        }
    }

    /// The basic land type that taps for this color
    pub fn basic_land_type(&self) -> &'static str {
        match self {
            Color::White => "plains",
            Color::Blue => "island",
            Color::Black => "swamp",
            Color::Red => "mountain",
            Color::Green => "forest",
        }
    }
}

/// Printing rarity
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Mythic,
    Special,
    Bonus,
    #[default]
    #[serde(other)]
    Unknown,
}

/// One face of a multi-faced card (split, adventure, modal double-faced...)
#[derive(Debug, Clone, Default, PartialEq, Hash, Serialize, Deserialize)]
pub struct CardFace {
    pub name: String,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub colors: Option<Vec<Color>>,
}

/// A resolved card record as supplied by the card catalog.
///
/// Every field except `name` is optional on the wire; missing text and costs
/// are treated as empty rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub cmc: Option<f64>,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub colors: Option<Vec<Color>>,
    #[serde(default)]
    pub color_identity: Vec<Color>,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default, alias = "card_faces")]
    pub faces: Vec<CardFace>,
}

fn non_blank(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl Card {
    pub fn new(name: &str) -> Self {
        Card {
            name: name.to_string(),
            ..Card::default()
        }
    }

    /// Type line of the card, falling back to the first face's
    pub fn effective_type_line(&self) -> Option<&str> {
        non_blank(&self.type_line)
            .or_else(|| self.faces.first().and_then(|f| non_blank(&f.type_line)))
    }

    /// Non-blank root mana cost
    pub fn root_mana_cost(&self) -> Option<&str> {
        non_blank(&self.mana_cost)
    }

    /// Root cost followed by every face cost, blanks skipped
    pub fn mana_costs(&self) -> impl Iterator<Item = &str> {
        non_blank(&self.mana_cost)
            .into_iter()
            .chain(self.faces.iter().filter_map(|f| non_blank(&f.mana_cost)))
    }

    /// Root and face oracle text joined into one lowercase buffer
    pub fn oracle_scan_text(&self) -> String {
        let mut parts = vec![self.oracle_text.as_deref().unwrap_or("")];
        parts.extend(self.faces.iter().map(|f| f.oracle_text.as_deref().unwrap_or("")));
        parts.join("\n").to_lowercase()
    }
}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.mana_cost.hash(state);
        self.cmc.map(f64::to_bits).hash(state);
        self.type_line.hash(state);
        self.oracle_text.hash(state);
        self.colors.hash(state);
        self.color_identity.hash(state);
        self.rarity.hash(state);
        self.faces.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scryfall_shape_deserializes() {
        let json = r#"{
            "name": "Bonecrusher Giant // Stomp",
            "cmc": 3.0,
            "type_line": "Creature — Giant // Instant — Adventure",
            "color_identity": ["R"],
            "rarity": "rare",
            "card_faces": [
                {
                    "name": "Bonecrusher Giant",
                    "mana_cost": "{2}{R}",
                    "type_line": "Creature — Giant",
                    "oracle_text": "Deals 2 damage to that spell's controller."
                },
                {
                    "name": "Stomp",
                    "mana_cost": "{1}{R}",
                    "type_line": "Instant — Adventure",
                    "oracle_text": "Stomp deals 2 damage to any target."
                }
            ]
        }"#;
        let card: Card = serde_json::from_str(json).expect("card should parse");
        assert_eq!(card.faces.len(), 2);
        assert_eq!(card.rarity, Rarity::Rare);
        assert_eq!(card.color_identity, vec![Color::Red]);
        assert!(card.root_mana_cost().is_none());
        assert_eq!(card.mana_costs().collect::<Vec<_>>(), vec!["{2}{R}", "{1}{R}"]);
    }

    #[test]
    fn test_unknown_rarity_falls_back() {
        let card: Card = serde_json::from_str(r#"{"name": "X", "rarity": "timeshifted"}"#)
            .expect("card should parse");
        assert_eq!(card.rarity, Rarity::Unknown);
    }

    #[test]
    fn test_scan_text_concatenates_faces() {
        let mut card = Card::new("Split");
        card.oracle_text = Some("Draw a card.".to_string());
        card.faces.push(CardFace {
            name: "Half".to_string(),
            oracle_text: Some("Add {G}.".to_string()),
            ..CardFace::default()
        });
        card.faces.push(CardFace::default());

        let text = card.oracle_scan_text();
        assert!(text.contains("draw a card."));
        assert!(text.contains("add {g}."));
    }

    #[test]
    fn test_effective_type_line_uses_first_face() {
        let mut card = Card::new("Face Only");
        card.type_line = Some("   ".to_string());
        card.faces.push(CardFace {
            name: "Front".to_string(),
            type_line: Some("Legendary Creature — Elf".to_string()),
            ..CardFace::default()
        });
        assert_eq!(card.effective_type_line(), Some("Legendary Creature — Elf"));
        assert_eq!(Card::new("Bare").effective_type_line(), None);
    }
}
