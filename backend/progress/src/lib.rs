pub mod engine;
pub mod json_store;
pub mod stats;
pub mod store;

pub use engine::record_solution;
pub use json_store::JsonFileStore;
pub use stats::{Streak, UserStats};
pub use store::{InMemoryStatsStore, StatsStore};
