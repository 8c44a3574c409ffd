use crate::analysis::stats::{analyze_board, DeckStatistics};
use crate::deck::{BoardView, Deck};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Memoized statistics keyed by deck content hash and board view.
///
/// Each entry keeps the snapshot it was computed from, and a hit only counts
/// when that snapshot equals the requested deck. A hash collision recomputes
/// and replaces the entry. Stale entries sit there until `clear`.
#[derive(Debug, Default)]
pub struct StatsCache {
    entries: HashMap<(u64, BoardView), (Deck, DeckStatistics)>,
    hits: u64,
    misses: u64,
}

impl StatsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics for `deck`, computed on first request
    pub fn get(&mut self, deck: &Deck, view: BoardView) -> &DeckStatistics {
        let key = (deck.content_hash(), view);
        match self.entries.entry(key) {
            Entry::Occupied(e) => {
                let slot = e.into_mut();
                if slot.0 == *deck {
                    self.hits += 1;
                } else {
                    self.misses += 1;
                    *slot = (deck.clone(), analyze_board(deck, view));
                }
                &slot.1
            }
            Entry::Vacant(e) => {
                self.misses += 1;
                &e.insert((deck.clone(), analyze_board(deck, view))).1
            }
        }
    }

    /// Store `stats` for `deck` without computing them
    #[cfg(test)]
    fn insert_raw(&mut self, key: (u64, BoardView), deck: Deck, stats: DeckStatistics) {
        self.entries.insert(key, (deck, stats));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;
    use crate::deck::{DeckEntry, Format};

    fn deck(quantity: u32) -> Deck {
        let mut forest = Card::new("Forest");
        forest.type_line = Some("Basic Land — Forest".to_string());
        Deck::new(Format::Modern, vec![DeckEntry::new(forest, quantity)])
    }

    #[test]
    fn test_hit_on_same_snapshot() {
        let mut cache = StatsCache::new();
        let d = deck(20);
        let first = cache.get(&d, BoardView::Main).clone();
        let second = cache.get(&d.clone(), BoardView::Main).clone();
        assert_eq!(first, second);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_miss_after_edit() {
        let mut cache = StatsCache::new();
        assert_eq!(cache.get(&deck(20), BoardView::Main).total_cards, 20);
        assert_eq!(cache.get(&deck(21), BoardView::Main).total_cards, 21);
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn test_colliding_hash_is_not_served() {
        let mut cache = StatsCache::new();
        let wanted = deck(20);
        let other = deck(7);
        // plant another deck's statistics under the wanted deck's key
        cache.insert_raw(
            (wanted.content_hash(), BoardView::Main),
            other.clone(),
            analyze_board(&other, BoardView::Main),
        );

        assert_eq!(cache.get(&wanted, BoardView::Main).total_cards, 20);
        assert_eq!(cache.hits(), 0);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.len(), 1);

        assert_eq!(cache.get(&wanted, BoardView::Main).total_cards, 20);
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn test_views_cached_separately() {
        let mut cache = StatsCache::new();
        let d = deck(20);
        cache.get(&d, BoardView::Main);
        cache.get(&d, BoardView::Sideboard);
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
    }
}
