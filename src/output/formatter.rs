use std::io::IsTerminal;

use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{terminal_size, Width};

use crate::recommend::MediaPicks;
use crate::scoring::{PrimaryResult, QuizConfig, ScoreTally};
use crate::session::{QuizStatus, Recommendations};

const MAX_RULE_WIDTH: usize = 72;
const DEFAULT_RULE_WIDTH: usize = 40;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Horizontal separator sized to the terminal, capped for readability
pub fn rule() -> String {
    let width = terminal_size()
        .map(|(Width(w), _)| (w as usize).min(MAX_RULE_WIDTH))
        .unwrap_or(DEFAULT_RULE_WIDTH);
    "-".repeat(width)
}

fn heading(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

/// Result headline, score fraction and breakdown for one quiz
pub fn format_dashboard(
    quiz: &QuizConfig,
    tally: &ScoreTally,
    primary: &PrimaryResult,
    use_colors: bool,
) -> String {
    let noun = &quiz.category_noun;
    if !primary.is_determined() {
        return format!(
            "No {} profile yet. Complete the {} to find out where you stand.",
            noun.to_lowercase(),
            quiz.title
        );
    }

    let label = primary.label();
    let mut lines = vec![
        heading(&format!("Your {} Profile", noun), use_colors),
        if use_colors {
            format!("You most align with the {} {}!", label.cyan().bold(), noun)
        } else {
            format!("You most align with the {} {}!", label, noun)
        },
    ];

    if let Some(blurb) = primary.representative().and_then(|c| quiz.blurb(c)) {
        lines.push(String::new());
        lines.push(format!("Your Narrative Resonance: {}", blurb));
    }

    lines.push(String::new());
    lines.push(format!(
        "Primary {} Score: {} / {}",
        noun,
        primary.score(),
        quiz.questions.len()
    ));
    lines.push(format!("Total Questions Answered: {}", quiz.questions.len()));
    lines.push(String::new());
    lines.push(format_breakdown(tally, noun, use_colors));

    lines.join("\n")
}

/// Category/score table in tally order. Zero counts are left out.
pub fn format_breakdown(tally: &ScoreTally, noun: &str, use_colors: bool) -> String {
    let rows: Vec<_> = tally.iter().filter(|(_, n)| *n > 0).collect();
    let width = rows
        .iter()
        .map(|(c, _)| c.chars().count())
        .chain(std::iter::once(noun.chars().count()))
        .max()
        .unwrap_or(0);

    let header = format!("{:<width$}  Score", noun, width = width);
    let mut lines = vec![if use_colors {
        header.dimmed().to_string()
    } else {
        header
    }];
    for (category, count) in rows {
        lines.push(format!("{:<width$}  {:>5}", category, count, width = width));
    }
    lines.join("\n")
}

/// The user's profile page: one line per quiz plus completion status
pub fn format_profile(username: &str, statuses: &[QuizStatus], use_colors: bool) -> String {
    let mut lines = vec![
        heading("Profile", use_colors),
        format!("Name: {}", username),
        rule(),
    ];

    for status in statuses {
        let quiz = status.quiz;
        let (summary, state) = if status.is_completed() {
            (
                format!("Primary {}: {}", quiz.category_noun, status.primary.label()),
                "Completed",
            )
        } else {
            (format!("Take the {} to unlock!", quiz.title), "Pending")
        };
        lines.push(format!("{}: {}", quiz.title, summary));
        if use_colors {
            let state = if status.is_completed() {
                state.green().to_string()
            } else {
                state.yellow().to_string()
            };
            lines.push(format!("  Status: {}", state));
        } else {
            lines.push(format!("  Status: {}", state));
        }
    }

    lines.join("\n")
}

/// Sampled recommendations, one section per media type
pub fn format_recommendations(recs: &Recommendations, noun: &str, use_colors: bool) -> String {
    let mut lines = Vec::new();

    if let PrimaryResult::Tied { .. } = recs.primary {
        lines.push(format!(
            "Your primary interest is split: {}. Recommendations below are based on one of your top {}s.",
            recs.primary.label(),
            noun.to_lowercase()
        ));
        lines.push(String::new());
    }

    lines.push(heading(
        &format!("Based on your {} {} Resonance...", recs.category, noun),
        use_colors,
    ));

    for picks in &recs.picks {
        lines.push(String::new());
        lines.push(heading(&format!("{} Recommendations", picks.medium), use_colors));
        for item in &picks.items {
            if use_colors {
                lines.push(format!("  - {}", item.green()));
            } else {
                lines.push(format!("  - {}", item));
            }
        }
    }

    lines.join("\n")
}

#[derive(Serialize)]
struct JsonResult<'a> {
    quiz: &'a str,
    tally: &'a ScoreTally,
    primary: String,
    representative: Option<&'a str>,
    tied: &'a [String],
    score: u32,
    questions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    recommendations: Option<&'a [MediaPicks<'a>]>,
}

/// Machine-readable result for `score --format json`. Tally keys keep
/// first-vote order.
pub fn format_json(
    quiz: &QuizConfig,
    tally: &ScoreTally,
    primary: &PrimaryResult,
    recs: Option<&Recommendations>,
) -> Result<String, serde_json::Error> {
    let tied: &[String] = match primary {
        PrimaryResult::Tied { categories, .. } => categories,
        _ => &[],
    };
    let result = JsonResult {
        quiz: &quiz.id,
        tally,
        primary: primary.label(),
        representative: primary.representative(),
        tied,
        score: primary.score(),
        questions: quiz.questions.len(),
        recommendations: recs.map(|r| r.picks.as_slice()),
    };
    serde_json::to_string_pretty(&result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_quiz() -> QuizConfig {
        serde_saphyr::from_str(
            r#"
id: trope
title: "Master Trope Personality Quiz"
category_noun: Trope
questions:
  - id: tq_1
    prompt: "Game"
    choices: ["Skyrim", "Fallout 4", "Mass Effect"]
  - id: tq_2
    prompt: "Movie"
    choices: ["Harry Potter", "A Quiet Place"]
categories:
  "Skyrim": "Chosen One"
  "Fallout 4": "Survivor"
  "Mass Effect": "Found Family"
  "Harry Potter": "Chosen One"
  "A Quiet Place": "Survivor"
blurbs:
  "Chosen One": "Destiny is real."
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_dashboard_undetermined() {
        let quiz = sample_quiz();
        let output = format_dashboard(&quiz, &ScoreTally::new(), &PrimaryResult::Undetermined, false);
        assert!(output.contains("No trope profile yet"));
        assert!(output.contains("Master Trope Personality Quiz"));
    }

    #[test]
    fn test_dashboard_single() {
        let quiz = sample_quiz();
        let tally = ScoreTally::from_counts([("Chosen One", 2)]);
        let primary = PrimaryResult::Single {
            category: "Chosen One".to_string(),
            score: 2,
        };
        let output = format_dashboard(&quiz, &tally, &primary, false);

        assert!(output.contains("You most align with the Chosen One Trope!"));
        assert!(output.contains("Your Narrative Resonance: Destiny is real."));
        assert!(output.contains("Primary Trope Score: 2 / 2"));
        assert!(output.contains("Total Questions Answered: 2"));
    }

    #[test]
    fn test_dashboard_tie_uses_first_category_blurb() {
        let quiz = sample_quiz();
        let tally = ScoreTally::from_counts([("Chosen One", 1), ("Survivor", 1)]);
        let primary = PrimaryResult::Tied {
            categories: vec!["Chosen One".to_string(), "Survivor".to_string()],
            score: 1,
        };
        let output = format_dashboard(&quiz, &tally, &primary, false);

        assert!(output.contains("Tied (Chosen One & Survivor) Trope"));
        assert!(output.contains("Destiny is real."));
        assert!(output.contains("Primary Trope Score: 1 / 2"));
    }

    #[test]
    fn test_breakdown_rows_in_tally_order() {
        let tally = ScoreTally::from_counts([("Survivor", 1), ("Hero", 0), ("Chosen One", 3)]);
        let output = format_breakdown(&tally, "Trope", false);
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Trope"));
        assert!(lines[1].starts_with("Survivor"));
        assert!(lines[1].ends_with('1'));
        assert!(lines[2].starts_with("Chosen One"));
        assert!(lines[2].ends_with('3'));
    }

    #[test]
    fn test_profile_lines() {
        let quiz = sample_quiz();
        let statuses = vec![QuizStatus {
            quiz: &quiz,
            primary: PrimaryResult::Undetermined,
        }];
        let output = format_profile("ada", &statuses, false);
        assert!(output.contains("Name: ada"));
        assert!(output.contains("Take the Master Trope Personality Quiz to unlock!"));
        assert!(output.contains("Status: Pending"));

        let statuses = vec![QuizStatus {
            quiz: &quiz,
            primary: PrimaryResult::Single {
                category: "Survivor".to_string(),
                score: 2,
            },
        }];
        let output = format_profile("ada", &statuses, false);
        assert!(output.contains("Primary Trope: Survivor"));
        assert!(output.contains("Status: Completed"));
    }

    #[test]
    fn test_recommendations_with_tie_notice() {
        let recs = Recommendations {
            primary: PrimaryResult::Tied {
                categories: vec!["Survivor".to_string(), "Chosen One".to_string()],
                score: 1,
            },
            category: "Survivor".to_string(),
            picks: vec![MediaPicks {
                medium: "Games",
                items: vec!["SOMA", "Days Gone"],
            }],
        };
        let output = format_recommendations(&recs, "Trope", false);

        assert!(output.starts_with("Your primary interest is split: Tied (Survivor & Chosen One)."));
        assert!(output.contains("Based on your Survivor Trope Resonance..."));
        assert!(output.contains("Games Recommendations\n  - SOMA\n  - Days Gone"));
    }

    #[test]
    fn test_json_output() {
        let quiz = sample_quiz();
        let tally = ScoreTally::from_counts([("Survivor", 1), ("Chosen One", 1)]);
        let primary = PrimaryResult::Tied {
            categories: vec!["Survivor".to_string(), "Chosen One".to_string()],
            score: 1,
        };
        let output = format_json(&quiz, &tally, &primary, None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["quiz"], "trope");
        assert_eq!(value["primary"], "Tied (Survivor & Chosen One)");
        assert_eq!(value["representative"], "Survivor");
        assert_eq!(value["score"], 1);
        assert_eq!(value["questions"], 2);
        assert_eq!(value["tally"]["Chosen One"], 1);
        assert!(value.get("recommendations").is_none());

        // tally keys stay in first-vote order, not alphabetical
        let survivor = output.find("\"Survivor\": 1").unwrap();
        let chosen = output.find("\"Chosen One\": 1").unwrap();
        assert!(survivor < chosen, "tally reordered: {}", output);
    }

    #[test]
    fn test_json_output_with_recommendations() {
        let quiz = sample_quiz();
        let tally = ScoreTally::from_counts([("Survivor", 2)]);
        let primary = PrimaryResult::Single {
            category: "Survivor".to_string(),
            score: 2,
        };
        let recs = Recommendations {
            primary: primary.clone(),
            category: "Survivor".to_string(),
            picks: vec![MediaPicks {
                medium: "Games",
                items: vec!["SOMA"],
            }],
        };
        let output = format_json(&quiz, &tally, &primary, Some(&recs)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(
            value["recommendations"],
            serde_json::json!([{ "medium": "Games", "items": ["SOMA"] }])
        );
    }
}
