use super::config::CategoryMap;
use super::tally::{PrimaryResult, ScoreTally, Submission};

/// Tally a submission's choices by category.
///
/// Choices with no entry in `categories` (and unanswered slots) contribute
/// nothing. Catalog completeness is checked once at startup by
/// `validate_catalog`, not here.
pub fn score(submission: &Submission, categories: &CategoryMap) -> ScoreTally {
    let mut tally = ScoreTally::new();
    for (_, choice) in submission.iter() {
        if let Some(category) = choice.and_then(|c| categories.get(c)) {
            tally.increment(category);
        }
    }
    tally
}

/// Resolve the primary category of a tally.
///
/// Ties keep the order in which the tied categories first appeared in the tally.
pub fn resolve_primary(tally: &ScoreTally) -> PrimaryResult {
    let max = tally.iter().map(|(_, n)| n).max().unwrap_or(0);
    if max == 0 {
        return PrimaryResult::Undetermined;
    }

    let mut leaders: Vec<String> = tally
        .iter()
        .filter(|(_, n)| *n == max)
        .map(|(c, _)| c.to_string())
        .collect();

    if leaders.len() == 1 {
        PrimaryResult::Single {
            category: leaders.remove(0),
            score: max,
        }
    } else {
        PrimaryResult::Tied {
            categories: leaders,
            score: max,
        }
    }
}

/// Whether every expected question has a non-empty choice.
pub fn is_complete<S: AsRef<str>>(submission: &Submission, expected: &[S]) -> bool {
    expected
        .iter()
        .all(|id| submission.choice(id.as_ref()).is_some())
}

/// Expected question ids with no usable choice, in expected order
pub fn missing_questions<S: AsRef<str>>(submission: &Submission, expected: &[S]) -> Vec<String> {
    expected
        .iter()
        .map(|id| id.as_ref())
        .filter(|id| submission.choice(id).is_none())
        .map(|id| id.to_string())
        .collect()
}
