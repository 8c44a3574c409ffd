pub mod classify;
pub mod pips;
pub mod sources;
pub mod types;

pub use classify::{is_permanent, mana_value, primary_type, TypeCategory};
pub use pips::{mana_pips, ManaPipVector};
pub use sources::{mana_sources, ManaSourceVector};
pub use types::{Card, CardFace, Color, Rarity};
