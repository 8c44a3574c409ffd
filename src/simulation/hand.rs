//! Interactive sample-hand session with London mulligan.
//!
//! Every mulligan redraws a full hand from the whole pool; once the player is
//! happy they mark one card per mulligan and confirm, which sends those cards
//! to the bottom of the library.

use crate::config::HandConfig;
use crate::deck::Deck;
use crate::rng::{GameRng, RandomSource};
use crate::simulation::pool::{build_card_pool, shuffled, PoolCard};
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, warn};

/// Rejected hand actions. None of these change the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandError {
    #[error("Nothing to draw: the deck has no mainboard cards")]
    EmptyPool,
    #[error("No hand has been drawn yet")]
    NoHand,
    #[error("Cannot mulligan more than {max} times")]
    MulliganLimit { max: u32 },
    #[error("No mulligan taken, nothing to put on the bottom")]
    NothingToBottom,
    #[error("Card {index} is not in the hand ({hand_size} cards)")]
    IndexOutOfRange { index: usize, hand_size: usize },
    #[error("Already putting {limit} cards on the bottom")]
    TooManyBottomed { limit: u32 },
    #[error("Select exactly {expected} cards to put on the bottom ({selected} selected)")]
    BottomCountMismatch { expected: u32, selected: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HandPhase {
    Empty,
    HandDrawn,
    Mulliganing,
}

/// Snapshot of a session for display
#[derive(Debug, Clone, Serialize)]
pub struct HandState<'d> {
    pub phase: HandPhase,
    pub cards: Vec<PoolCard<'d>>,
    pub mulligan_count: u32,
    pub bottomed: Vec<usize>,
    pub next_draws: Vec<PoolCard<'d>>,
}

/// One player's sample-hand session over a deck
pub struct HandSimulator<'d, R: RandomSource = GameRng> {
    pool: Vec<PoolCard<'d>>,
    /// Library order from the last shuffle; the hand is drawn off the front
    library: Vec<PoolCard<'d>>,
    hand: Vec<PoolCard<'d>>,
    mulligan_count: u32,
    bottomed: BTreeSet<usize>,
    phase: HandPhase,
    config: HandConfig,
    rng: R,
}

impl<'d> HandSimulator<'d, GameRng> {
    /// Session backed by an entropy-seeded RNG
    pub fn new(deck: &'d Deck, config: HandConfig) -> Self {
        Self::with_rng(deck, config, GameRng::new(None))
    }
}

impl<'d, R: RandomSource> HandSimulator<'d, R> {
    pub fn with_rng(deck: &'d Deck, config: HandConfig, rng: R) -> Self {
        HandSimulator {
            pool: build_card_pool(deck),
            library: Vec::new(),
            hand: Vec::new(),
            mulligan_count: 0,
            bottomed: BTreeSet::new(),
            phase: HandPhase::Empty,
            config,
            rng,
        }
    }

    pub fn phase(&self) -> HandPhase {
        self.phase
    }

    pub fn hand(&self) -> &[PoolCard<'d>] {
        &self.hand
    }

    pub fn mulligan_count(&self) -> u32 {
        self.mulligan_count
    }

    pub fn bottomed(&self) -> &BTreeSet<usize> {
        &self.bottomed
    }

    pub fn pool(&self) -> &[PoolCard<'d>] {
        &self.pool
    }

    fn reject<T>(&self, err: HandError) -> Result<T, HandError> {
        warn!(phase = ?self.phase, mulligans = self.mulligan_count, "{}", err);
        Err(err)
    }

    /// Shuffle the whole pool and deal a full hand off the top
    fn deal(&mut self) {
        self.library = shuffled(&self.pool, &mut self.rng);
        let size = self.config.hand_size.min(self.library.len());
        self.hand = self.library[..size].to_vec();
        self.bottomed.clear();
    }

    /// Start a new session with a fresh opening hand
    pub fn draw_opening(&mut self) -> Result<(), HandError> {
        if self.pool.is_empty() {
            self.library.clear();
            self.hand.clear();
            self.bottomed.clear();
            self.mulligan_count = 0;
            self.phase = HandPhase::Empty;
            return self.reject(HandError::EmptyPool);
        }

        self.deal();
        self.mulligan_count = 0;
        self.phase = HandPhase::HandDrawn;
        debug!(hand_size = self.hand.len(), "drew opening hand");
        Ok(())
    }

    /// Most mulligans allowed this session. A pool smaller than the hand
    /// size deals short hands, and every owed card has to come from the hand.
    pub fn mulligan_limit(&self) -> u32 {
        let dealt = self.config.hand_size.min(self.pool.len());
        let dealt = u32::try_from(dealt).unwrap_or(u32::MAX);
        self.config.max_mulligans.min(dealt)
    }

    /// Take a London mulligan: redraw a full hand and owe one more card to
    /// the bottom
    pub fn mulligan(&mut self) -> Result<(), HandError> {
        if self.phase == HandPhase::Empty {
            return self.reject(HandError::NoHand);
        }
        let limit = self.mulligan_limit();
        if self.mulligan_count >= limit {
            return self.reject(HandError::MulliganLimit { max: limit });
        }

        self.deal();
        self.mulligan_count += 1;
        self.phase = HandPhase::Mulliganing;
        debug!(mulligans = self.mulligan_count, "took mulligan");
        Ok(())
    }

    /// Mark or unmark a hand card for the bottom. Returns whether the card is
    /// now marked.
    pub fn toggle_bottom(&mut self, index: usize) -> Result<bool, HandError> {
        if self.phase == HandPhase::Empty {
            return self.reject(HandError::NoHand);
        }
        if self.mulligan_count == 0 {
            return self.reject(HandError::NothingToBottom);
        }
        if index >= self.hand.len() {
            return self.reject(HandError::IndexOutOfRange {
                index,
                hand_size: self.hand.len(),
            });
        }

        if self.bottomed.remove(&index) {
            return Ok(false);
        }
        if self.bottomed.len() >= self.mulligan_count as usize {
            return self.reject(HandError::TooManyBottomed {
                limit: self.mulligan_count,
            });
        }
        self.bottomed.insert(index);
        Ok(true)
    }

    /// Put the marked cards on the bottom and keep the rest
    pub fn confirm_bottom(&mut self) -> Result<(), HandError> {
        if self.phase == HandPhase::Empty {
            return self.reject(HandError::NoHand);
        }
        if self.bottomed.len() != self.mulligan_count as usize {
            return self.reject(HandError::BottomCountMismatch {
                expected: self.mulligan_count,
                selected: self.bottomed.len(),
            });
        }

        let mut kept = Vec::with_capacity(self.hand.len());
        let mut to_bottom = Vec::with_capacity(self.bottomed.len());
        for (i, card) in self.hand.iter().enumerate() {
            if self.bottomed.contains(&i) {
                to_bottom.push(*card);
            } else {
                kept.push(*card);
            }
        }

        self.library.retain(|c| !to_bottom.contains(c));
        self.library.extend(to_bottom);
        self.hand = kept;
        self.bottomed.clear();
        self.mulligan_count = 0;
        self.phase = HandPhase::HandDrawn;
        debug!(hand_size = self.hand.len(), "kept hand");
        Ok(())
    }

    /// The next `k` cards off the library, skipping anything in the hand.
    /// Read-only; recomputed on every call.
    pub fn peek_next_draws(&self, k: usize) -> Vec<PoolCard<'d>> {
        self.library
            .iter()
            .filter(|c| !self.hand.contains(c))
            .take(k)
            .copied()
            .collect()
    }

    pub fn state(&self) -> HandState<'d> {
        HandState {
            phase: self.phase,
            cards: self.hand.clone(),
            mulligan_count: self.mulligan_count,
            bottomed: self.bottomed.iter().copied().collect(),
            next_draws: self.peek_next_draws(self.config.preview_count),
        }
    }
}
