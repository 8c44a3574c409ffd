//! Opening hand land odds over many independent shuffles.

use crate::analysis::curve::is_land;
use crate::config::HandConfig;
use crate::deck::Deck;
use crate::rng::GameRng;
use crate::simulation::pool::{build_card_pool, draw, PoolCard};
use rayon::prelude::*;
use serde::Serialize;

/// Land counts from which a seven-card hand is a keep
const KEEPABLE_LANDS: std::ops::RangeInclusive<usize> = 2..=5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpeningHandOdds {
    pub num_hands: usize,
    pub hand_size: usize,
    pub seed: u64,
    /// Hands seen with each land count, indexed by land count
    pub land_distribution: Vec<usize>,
    pub average_lands: f64,
    /// Share of hands holding 2 to 5 lands
    pub keepable_rate: f64,
}

fn lands_in_hand(pool: &[PoolCard<'_>], hand_size: usize, seed: u64) -> usize {
    let mut rng = GameRng::new(Some(seed));
    draw(pool, hand_size, &mut rng)
        .iter()
        .filter(|c| is_land(c.card))
        .count()
}

/// Simulate `num_hands` opening hands. Hand `i` uses seed `base + i`, so a
/// given seed gives the same result on any number of threads.
pub fn simulate_opening_hands(
    deck: &Deck,
    config: &HandConfig,
    num_hands: usize,
    seed: Option<u64>,
) -> OpeningHandOdds {
    simulate_opening_hands_with(deck, config, num_hands, seed, || {})
}

/// Same as `simulate_opening_hands`, calling `on_hand` after every hand
pub fn simulate_opening_hands_with<F>(
    deck: &Deck,
    config: &HandConfig,
    num_hands: usize,
    seed: Option<u64>,
    on_hand: F,
) -> OpeningHandOdds
where
    F: Fn() + Sync,
{
    let base_seed = GameRng::new(seed).seed();
    let pool = build_card_pool(deck);
    let hand_size = config.hand_size.min(pool.len());

    let counts: Vec<usize> = (0..num_hands)
        .into_par_iter()
        .map(|i| {
            let lands = lands_in_hand(&pool, hand_size, base_seed.wrapping_add(i as u64));
            on_hand();
            lands
        })
        .collect();

    let mut land_distribution = vec![0usize; hand_size + 1];
    for &lands in &counts {
        land_distribution[lands] += 1;
    }

    let (average_lands, keepable_rate) = if counts.is_empty() {
        (0.0, 0.0)
    } else {
        let n = counts.len() as f64;
        let keepable = counts.iter().filter(|&&l| KEEPABLE_LANDS.contains(&l)).count();
        (
            counts.iter().sum::<usize>() as f64 / n,
            keepable as f64 / n,
        )
    };

    OpeningHandOdds {
        num_hands,
        hand_size,
        seed: base_seed,
        land_distribution,
        average_lands,
        keepable_rate,
    }
}
