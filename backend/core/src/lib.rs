pub mod error;
pub mod message;
pub mod traits;
pub mod types;

pub use error::TutorError;
pub use message::{ChatMessage, ChatRole};
pub use traits::{SolveRequest, SolverProvider};
pub use types::{DifficultyLevel, SolverMode};
