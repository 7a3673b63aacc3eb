use thiserror::Error;

/// Errors a user can trigger during a session. None of them are fatal;
/// the caller reports the message and the session carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("Please answer all questions before submitting ({} unanswered)", missing.len())]
    IncompleteSubmission { missing: Vec<String> },

    #[error("Please log in to access the quizzes")]
    Unauthenticated,

    #[error("unknown quiz: {0}")]
    UnknownQuiz(String),

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Username cannot be empty")]
    InvalidUsername,

    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    #[error("Invalid Username or Password. Denied access.")]
    InvalidCredentials,

    #[error("cannot divide by zero")]
    DivisionByZero,
}

pub type Result<T> = std::result::Result<T, QuizError>;
