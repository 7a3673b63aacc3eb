use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Option label -> category label. Many options share one category.
pub type CategoryMap = HashMap<String, String>;

/// One quiz: an ordered choice catalog plus the map resolving each option
/// to its category.
///
/// Example YAML:
/// ```yaml
/// quizzes:
///   - id: archetype
///     title: "Archetype Profiling"
///     category_noun: "Archetype"
///     questions:
///       - id: q_1
///         prompt: "Which Star Wars character's moral compass do you trust the most?"
///         choices: ["Luke Skywalker", "Darth Vader"]
///     categories:
///       "Luke Skywalker": Hero
///       "Darth Vader": Villain
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct QuizConfig {
    /// Stable identifier used on the command line and as the result key
    pub id: String,

    pub title: String,

    /// One-line description shown above the questions
    #[serde(default)]
    pub caption: Option<String>,

    /// What a category is called in this quiz ("Archetype", "Trope")
    #[serde(default = "default_category_noun")]
    pub category_noun: String,

    /// Whether the recommendation engine serves this quiz's categories
    #[serde(default)]
    pub recommend: bool,

    pub questions: Vec<QuestionConfig>,

    pub categories: CategoryMap,

    /// Narrative blurb per category, shown with the result
    #[serde(default)]
    pub blurbs: HashMap<String, String>,
}

fn default_category_noun() -> String {
    "Category".to_string()
}

impl QuizConfig {
    /// Question identifiers in catalog order
    pub fn question_ids(&self) -> Vec<&str> {
        self.questions.iter().map(|q| q.id.as_str()).collect()
    }

    pub fn question(&self, id: &str) -> Option<&QuestionConfig> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn blurb(&self, category: &str) -> Option<&str> {
        self.blurbs.get(category).map(String::as_str)
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct QuestionConfig {
    pub id: String,
    pub prompt: String,
    pub choices: Vec<String>,
}
