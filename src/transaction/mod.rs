pub mod model;

pub use model::{REWARD_SENTINEL, Transaction};
