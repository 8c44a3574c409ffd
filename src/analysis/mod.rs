pub mod cache;
pub mod curve;
pub mod stats;

pub use cache::StatsCache;
pub use curve::{mana_curve, mana_curve_for, ManaCurve, CURVE_BINS};
pub use stats::{analyze_board, analyze_deck, ColorBucket, DeckStatistics};
