pub mod analysis;
pub mod card;
pub mod config;
pub mod deck;
pub mod rng;
pub mod simulation;
