pub mod hand;
pub mod odds;
pub mod pool;

pub use hand::{HandError, HandPhase, HandSimulator, HandState};
pub use odds::{simulate_opening_hands, simulate_opening_hands_with, OpeningHandOdds};
pub use pool::{build_card_pool, draw, PoolCard};
