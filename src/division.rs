//! Division drill: guess the quotient of two numbers.

use crate::error::{QuizError, Result};

const RELATIVE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GuessOutcome {
    Correct,
    Incorrect { answer: f64 },
}

/// The exact quotient `dividend / divisor`
pub fn quotient(dividend: f64, divisor: f64) -> Result<f64> {
    if divisor == 0.0 {
        return Err(QuizError::DivisionByZero);
    }
    Ok(dividend / divisor)
}

/// Grade a guess. Guesses within a relative tolerance of the quotient count
/// as correct, so `1 / 3` accepts `0.3333333333`.
pub fn check_guess(dividend: f64, divisor: f64, guess: f64) -> Result<GuessOutcome> {
    let answer = quotient(dividend, divisor)?;
    let tolerance = RELATIVE_TOLERANCE * answer.abs().max(1.0);
    if (guess - answer).abs() <= tolerance {
        Ok(GuessOutcome::Correct)
    } else {
        Ok(GuessOutcome::Incorrect { answer })
    }
}
