use crate::card::Card;
use crate::deck::{Board, Deck};
use crate::rng::RandomSource;
use serde::Serialize;
use std::hash::{Hash, Hasher};

/// One physical copy of a card in the draw pool.
///
/// Two pool cards are the same card only if they come from the same deck
/// entry and copy slot; equal card records are not enough.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PoolCard<'d> {
    pub card: &'d Card,
    pub entry_index: usize,
    pub copy: u32,
}

impl PartialEq for PoolCard<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.entry_index == other.entry_index && self.copy == other.copy
    }
}

impl Eq for PoolCard<'_> {}

impl Hash for PoolCard<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entry_index.hash(state);
        self.copy.hash(state);
    }
}

impl PoolCard<'_> {
    pub fn name(&self) -> &str {
        &self.card.name
    }
}

/// Expand the mainboard into one pool card per physical copy.
/// Sideboard and maybeboard never enter the pool; commanders stay out in
/// commander formats.
pub fn build_card_pool(deck: &Deck) -> Vec<PoolCard<'_>> {
    let excludes_commander = deck.format.uses_commander();
    deck.entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| match entry.board() {
            Board::Mainboard => true,
            Board::Commander => !excludes_commander,
            Board::Sideboard | Board::Maybeboard => false,
        })
        .flat_map(|(entry_index, entry)| {
            (0..entry.quantity).map(move |copy| PoolCard {
                card: &entry.card,
                entry_index,
                copy,
            })
        })
        .collect()
}

/// Fresh shuffled copy of the pool
pub fn shuffled<'d, R: RandomSource>(pool: &[PoolCard<'d>], rng: &mut R) -> Vec<PoolCard<'d>> {
    let mut order = pool.to_vec();
    rng.shuffle(&mut order);
    order
}

/// Shuffle a copy of the pool and take the first `n` cards
pub fn draw<'d, R: RandomSource>(
    pool: &[PoolCard<'d>],
    n: usize,
    rng: &mut R,
) -> Vec<PoolCard<'d>> {
    let mut order = shuffled(pool, rng);
    order.truncate(n);
    order
}
