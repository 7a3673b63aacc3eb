use rand::Rng;
use tracing::{debug, info, warn};

use crate::accounts::{self, StoredResult, UserRepository};
use crate::config::Config;
use crate::error::{QuizError, Result};
use crate::recommend::MediaPicks;
use crate::scoring::{self, PrimaryResult, QuizConfig, ScoreTally, Submission};

/// Per-quiz line of a user's profile
#[derive(Debug, Clone, PartialEq)]
pub struct QuizStatus<'a> {
    pub quiz: &'a QuizConfig,
    pub primary: PrimaryResult,
}

impl QuizStatus<'_> {
    pub fn is_completed(&self) -> bool {
        self.primary.is_determined()
    }
}

/// Recommendations derived from a user's primary category
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendations<'a> {
    pub primary: PrimaryResult,
    /// The category the picks were drawn for (first in tie order)
    pub category: String,
    pub picks: Vec<MediaPicks<'a>>,
}

/// One user's session: the gate in front of the scoring engine.
///
/// Every quiz operation requires a logged-in user. Results live in the
/// injected repository and are resolved on demand.
pub struct Session<'c, R> {
    config: &'c Config,
    repo: R,
    current_user: Option<String>,
}

impl<'c, R: UserRepository> Session<'c, R> {
    pub fn new(config: &'c Config, repo: R) -> Self {
        Self {
            config,
            repo,
            current_user: None,
        }
    }

    pub fn config(&self) -> &'c Config {
        self.config
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn register(&mut self, username: &str, password: &str) -> Result<String> {
        match accounts::register(&mut self.repo, username, password) {
            Ok(name) => {
                info!(user = %name, "registered");
                Ok(name)
            }
            Err(e) => {
                debug!(error = %e, "registration rejected");
                Err(e)
            }
        }
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
        if !accounts::check_credentials(&self.repo, username, password) {
            warn!(user = %username.trim(), "login denied");
            return Err(QuizError::InvalidCredentials);
        }
        let name = username.trim().to_string();
        info!(user = %name, "logged in");
        self.current_user = Some(name);
        Ok(())
    }

    pub fn logout(&mut self) {
        if let Some(name) = self.current_user.take() {
            info!(user = %name, "logged out");
        }
    }

    fn user(&self) -> Result<&str> {
        self.current_user
            .as_deref()
            .ok_or(QuizError::Unauthenticated)
    }

    fn quiz(&self, quiz_id: &str) -> Result<&'c QuizConfig> {
        self.config
            .quiz(quiz_id)
            .ok_or_else(|| QuizError::UnknownQuiz(quiz_id.to_string()))
    }

    /// Score a completed quiz pass and store it as the user's latest result.
    ///
    /// Incomplete submissions are rejected and leave the stored result untouched.
    pub fn submit(&mut self, quiz_id: &str, submission: &Submission) -> Result<PrimaryResult> {
        let user = self.user()?.to_string();
        let quiz = self.quiz(quiz_id)?;

        let expected = quiz.question_ids();
        if !scoring::is_complete(submission, &expected) {
            let missing = scoring::missing_questions(submission, &expected);
            debug!(quiz = %quiz_id, missing = missing.len(), "incomplete submission rejected");
            return Err(QuizError::IncompleteSubmission { missing });
        }

        let tally = scoring::score(submission, &quiz.categories);
        let primary = scoring::resolve_primary(&tally);
        if !self.repo.store_result(&user, quiz_id, StoredResult::new(tally)) {
            // logged-in users always have a record
            return Err(QuizError::Unauthenticated);
        }

        info!(user = %user, quiz = %quiz_id, primary = %primary, "submission scored");
        Ok(primary)
    }

    /// The user's latest stored result for a quiz
    pub fn result(&self, quiz_id: &str) -> Result<Option<&StoredResult>> {
        let user = self.user()?;
        self.quiz(quiz_id)?;
        Ok(self.repo.result(user, quiz_id))
    }

    /// Latest tally for a quiz, empty if the user has not completed it
    pub fn tally(&self, quiz_id: &str) -> Result<ScoreTally> {
        Ok(self
            .result(quiz_id)?
            .map(|r| r.tally.clone())
            .unwrap_or_default())
    }

    pub fn primary(&self, quiz_id: &str) -> Result<PrimaryResult> {
        Ok(scoring::resolve_primary(&self.tally(quiz_id)?))
    }

    /// Completion status of every configured quiz
    pub fn profile(&self) -> Result<Vec<QuizStatus<'c>>> {
        self.user()?;
        self.config
            .quizzes
            .iter()
            .map(|quiz| {
                Ok(QuizStatus {
                    quiz,
                    primary: self.primary(&quiz.id)?,
                })
            })
            .collect()
    }

    /// Sample recommendations for the user's primary category of a quiz.
    ///
    /// Returns `None` while the quiz is undetermined or when the category has
    /// no curated list.
    pub fn recommendations<G: Rng + ?Sized>(
        &self,
        quiz_id: &str,
        rng: &mut G,
    ) -> Result<Option<Recommendations<'c>>> {
        let primary = self.primary(quiz_id)?;
        let Some(category) = primary.representative().map(str::to_string) else {
            return Ok(None);
        };
        let config = self.config;
        let Some(recs) = config.recommendations.as_ref() else {
            return Ok(None);
        };
        let Some(picks) = recs.pick(&category, rng) else {
            warn!(category = %category, "no recommendations configured");
            return Ok(None);
        };

        debug!(category = %category, media = picks.len(), "recommendations sampled");
        Ok(Some(Recommendations {
            primary,
            category,
            picks,
        }))
    }
}
