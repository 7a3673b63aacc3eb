use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// A user's answers to one quiz pass, keyed by question id.
///
/// Slots keep the order in which questions were first answered; answering
/// the same question again replaces the choice in place. A `None` choice
/// marks a question that was shown but left unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    answers: Vec<(String, Option<String>)>,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or overwrite) the choice for a question
    pub fn answer(&mut self, question_id: impl Into<String>, choice: Option<String>) {
        let question_id = question_id.into();
        match self.answers.iter_mut().find(|(id, _)| *id == question_id) {
            Some(slot) => slot.1 = choice,
            None => self.answers.push((question_id, choice)),
        }
    }

    /// The chosen option for a question, if it was answered with a non-empty label
    pub fn choice(&self, question_id: &str) -> Option<&str> {
        self.answers
            .iter()
            .find(|(id, _)| id == question_id)
            .and_then(|(_, choice)| choice.as_deref())
            .filter(|c| !c.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.answers
            .iter()
            .map(|(id, choice)| (id.as_str(), choice.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl<Q, C> FromIterator<(Q, C)> for Submission
where
    Q: Into<String>,
    C: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (Q, C)>>(iter: I) -> Self {
        let mut submission = Submission::new();
        for (question_id, choice) in iter {
            submission.answer(question_id, Some(choice.into()));
        }
        submission
    }
}

/// Per-category vote counts, in the order each category received its first vote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTally {
    counts: Vec<(String, u32)>,
}

impl ScoreTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tally from explicit counts. Repeated categories are summed
    /// into their first position.
    pub fn from_counts<K: Into<String>>(counts: impl IntoIterator<Item = (K, u32)>) -> Self {
        let mut tally = ScoreTally::new();
        for (category, count) in counts {
            tally.add(category.into(), count);
        }
        tally
    }

    pub fn increment(&mut self, category: &str) {
        self.add(category.to_string(), 1);
    }

    fn add(&mut self, category: String, count: u32) {
        match self.counts.iter_mut().find(|(c, _)| *c == category) {
            Some(entry) => entry.1 += count,
            None => self.counts.push((category, count)),
        }
    }

    /// Count for a category (0 if it never received a vote)
    pub fn get(&self, category: &str) -> u32 {
        self.counts
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(c, n)| (c.as_str(), *n))
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

// Serialized as an ordered JSON object so tie order survives the trip to `--format json`.
impl Serialize for ScoreTally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (category, count) in &self.counts {
            map.serialize_entry(category, count)?;
        }
        map.end()
    }
}

/// The category (or tied set of categories) holding the highest count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimaryResult {
    Undetermined,
    Single { category: String, score: u32 },
    Tied { categories: Vec<String>, score: u32 },
}

impl PrimaryResult {
    pub fn score(&self) -> u32 {
        match self {
            PrimaryResult::Undetermined => 0,
            PrimaryResult::Single { score, .. } | PrimaryResult::Tied { score, .. } => *score,
        }
    }

    pub fn is_determined(&self) -> bool {
        !matches!(self, PrimaryResult::Undetermined)
    }

    /// The single category standing in for this result: the winner, or the
    /// first tied category in tally order.
    pub fn representative(&self) -> Option<&str> {
        match self {
            PrimaryResult::Undetermined => None,
            PrimaryResult::Single { category, .. } => Some(category),
            PrimaryResult::Tied { categories, .. } => categories.first().map(String::as_str),
        }
    }

    /// Display label: the category name, "Tied (A & B)", or "Undetermined"
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PrimaryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimaryResult::Undetermined => write!(f, "Undetermined"),
            PrimaryResult::Single { category, .. } => write!(f, "{}", category),
            PrimaryResult::Tied { categories, .. } => {
                write!(f, "Tied ({})", categories.join(" & "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_overwrite_keeps_position() {
        let mut submission = Submission::new();
        submission.answer("q_1", Some("Spock".to_string()));
        submission.answer("q_2", None);
        submission.answer("q_1", Some("Han Solo".to_string()));

        let ids: Vec<_> = submission.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["q_1", "q_2"]);
        assert_eq!(submission.choice("q_1"), Some("Han Solo"));
        assert_eq!(submission.choice("q_2"), None);
        assert_eq!(submission.len(), 2);
    }

    #[test]
    fn test_submission_empty_choice_reads_as_unanswered() {
        let mut submission = Submission::new();
        submission.answer("q_1", Some(String::new()));
        assert_eq!(submission.choice("q_1"), None);
    }

    #[test]
    fn test_tally_keeps_first_vote_order() {
        let mut tally = ScoreTally::new();
        tally.increment("Villain");
        tally.increment("Hero");
        tally.increment("Villain");

        let entries: Vec<_> = tally.iter().collect();
        assert_eq!(entries, vec![("Villain", 2), ("Hero", 1)]);
        assert_eq!(tally.total(), 3);
        assert_eq!(tally.get("Mentor"), 0);
    }

    #[test]
    fn test_tally_serializes_in_order() {
        let tally = ScoreTally::from_counts([("Mentor", 2), ("Hero", 2), ("Anti-Hero", 1)]);
        let json = serde_json::to_string(&tally).unwrap();
        assert_eq!(json, r#"{"Mentor":2,"Hero":2,"Anti-Hero":1}"#);
    }

    #[test]
    fn test_primary_labels() {
        assert_eq!(PrimaryResult::Undetermined.label(), "Undetermined");

        let single = PrimaryResult::Single {
            category: "Hero".to_string(),
            score: 3,
        };
        assert_eq!(single.label(), "Hero");
        assert_eq!(single.representative(), Some("Hero"));

        let tied = PrimaryResult::Tied {
            categories: vec!["Hero".to_string(), "Villain".to_string(), "Mentor".to_string()],
            score: 2,
        };
        assert_eq!(tied.label(), "Tied (Hero & Villain & Mentor)");
        assert_eq!(tied.representative(), Some("Hero"));
        assert_eq!(tied.score(), 2);
    }
}
