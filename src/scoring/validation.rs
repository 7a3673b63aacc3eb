use std::collections::HashSet;

use crate::config::Config;

/// Validate the quiz catalog at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_catalog(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.quizzes.is_empty() {
        errors.push("quizzes: at least one quiz is required".to_string());
    }

    let mut quiz_ids = HashSet::new();
    for (i, quiz) in config.quizzes.iter().enumerate() {
        let at = format!("quizzes[{}]", i);

        if quiz.id.trim().is_empty() {
            errors.push(format!("{}.id: must not be empty", at));
        } else if !quiz_ids.insert(quiz.id.as_str()) {
            errors.push(format!("{}.id: duplicate quiz id '{}'", at, quiz.id));
        }

        if quiz.questions.is_empty() {
            errors.push(format!("{}.questions: at least one question is required", at));
        }

        let mut question_ids = HashSet::new();
        let mut reachable = HashSet::new();
        for (j, question) in quiz.questions.iter().enumerate() {
            let q_at = format!("{}.questions[{}]", at, j);

            if question.id.trim().is_empty() {
                errors.push(format!("{}.id: must not be empty", q_at));
            } else if !question_ids.insert(question.id.as_str()) {
                errors.push(format!("{}.id: duplicate question id '{}'", q_at, question.id));
            }

            if question.choices.is_empty() {
                errors.push(format!("{}.choices: at least one choice is required", q_at));
            }

            let mut seen = HashSet::new();
            for (k, choice) in question.choices.iter().enumerate() {
                if !seen.insert(choice.as_str()) {
                    errors.push(format!(
                        "{}.choices[{}]: duplicate choice '{}'",
                        q_at, k, choice
                    ));
                }
                match quiz.categories.get(choice) {
                    Some(category) => {
                        reachable.insert(category.as_str());
                    }
                    None => errors.push(format!(
                        "{}.choices[{}]: '{}' has no entry in categories",
                        q_at, k, choice
                    )),
                }
            }
        }

        let mut blurbed: Vec<_> = quiz.blurbs.keys().collect();
        blurbed.sort();
        for category in blurbed {
            if !reachable.contains(category.as_str()) {
                errors.push(format!(
                    "{}.blurbs: '{}' is not a category any choice maps to",
                    at, category
                ));
            }
        }

        if quiz.recommend {
            match config.recommendations {
                None => errors.push(format!(
                    "{}.recommend: requires a recommendations section",
                    at
                )),
                Some(ref recs) => {
                    let mut categories: Vec<_> = reachable.iter().copied().collect();
                    categories.sort_unstable();
                    for category in categories {
                        if !recs.has_category(category) {
                            errors.push(format!(
                                "recommendations.catalog: missing entry for '{}' (quiz '{}')",
                                category, quiz.id
                            ));
                        }
                    }
                }
            }
        }
    }

    if let Some(ref recs) = config.recommendations {
        if recs.picks_per_medium == 0 {
            errors.push("recommendations.picks_per_medium: must be at least 1".to_string());
        }

        let mut entries: Vec<_> = recs.catalog.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (category, by_medium) in entries {
            let mut media: Vec<_> = by_medium.keys().collect();
            media.sort();
            for medium in media {
                if !recs.media.contains(medium) {
                    errors.push(format!(
                        "recommendations.catalog['{}']: medium '{}' is not listed in media",
                        category, medium
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
