pub mod config;
pub mod engine;
pub mod tally;
pub mod validation;

pub use config::*;
pub use engine::{is_complete, missing_questions, resolve_primary, score};
pub use tally::{PrimaryResult, ScoreTally, Submission};
pub use validation::validate_catalog;
