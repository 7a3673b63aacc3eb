use serde::{Deserialize, Serialize};

use crate::recommend::RecommendationConfig;
use crate::scoring::QuizConfig;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub quizzes: Vec<QuizConfig>,

    #[serde(default)]
    pub recommendations: Option<RecommendationConfig>,
}

impl Config {
    pub fn quiz(&self, id: &str) -> Option<&QuizConfig> {
        self.quizzes.iter().find(|q| q.id == id)
    }

    pub fn quiz_ids(&self) -> Vec<&str> {
        self.quizzes.iter().map(|q| q.id.as_str()).collect()
    }
}
