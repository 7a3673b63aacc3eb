pub mod accounts;
pub mod config;
pub mod division;
pub mod error;
pub mod interactive;
pub mod output;
pub mod recommend;
pub mod scoring;
pub mod session;

pub use error::{QuizError, Result};
