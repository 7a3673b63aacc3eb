pub mod prompt;

pub use prompt::Prompter;

use anyhow::Result;
use rand::Rng;
use std::io::{BufRead, Write};
use tracing::debug;

use crate::accounts::UserRepository;
use crate::error::QuizError;
use crate::output;
use crate::scoring::{QuizConfig, Submission};
use crate::session::Session;

enum Flow {
    Continue,
    Quit,
}

/// Run the menu loop until the user quits or input ends.
pub fn run<R, I, O, G>(
    session: &mut Session<'_, R>,
    prompter: &mut Prompter<I, O>,
    rng: &mut G,
    use_colors: bool,
) -> Result<()>
where
    R: UserRepository,
    I: BufRead,
    O: Write,
    G: Rng + ?Sized,
{
    prompter.say("Introspective Immersion")?;
    prompter.say("Find your true self")?;

    loop {
        prompter.say(&output::rule())?;
        let flow = if session.is_logged_in() {
            member_menu(session, prompter, rng, use_colors)?
        } else {
            guest_menu(session, prompter)?
        };
        if let Flow::Quit = flow {
            prompter.say("Goodbye!")?;
            return Ok(());
        }
    }
}

fn guest_menu<R, I, O>(session: &mut Session<'_, R>, prompter: &mut Prompter<I, O>) -> Result<Flow>
where
    R: UserRepository,
    I: BufRead,
    O: Write,
{
    prompter.say("[1] Login\n[2] Register\n[q] Quit")?;
    let Some(choice) = prompter.line("> ")? else {
        return Ok(Flow::Quit);
    };

    match choice.as_str() {
        "1" => {
            let Some(username) = prompter.line("Username: ")? else {
                return Ok(Flow::Quit);
            };
            let Some(password) = prompter.secret("Password: ")? else {
                return Ok(Flow::Quit);
            };
            match session.login(&username, &password) {
                Ok(()) => prompter.say("Authentication successful.")?,
                Err(e) => prompter.say(&e.to_string())?,
            }
        }
        "2" => {
            let Some(username) = prompter.line("Desired Username: ")? else {
                return Ok(Flow::Quit);
            };
            let Some(password) = prompter.secret("Secure Password (min 6 chars): ")? else {
                return Ok(Flow::Quit);
            };
            match session.register(&username, &password) {
                Ok(_) => prompter.say("Registration successful! Please login.")?,
                Err(e) => prompter.say(&e.to_string())?,
            }
        }
        "q" | "Q" => return Ok(Flow::Quit),
        other => prompter.say(&format!("Unknown option '{}'", other))?,
    }
    Ok(Flow::Continue)
}

fn member_menu<R, I, O, G>(
    session: &mut Session<'_, R>,
    prompter: &mut Prompter<I, O>,
    rng: &mut G,
    use_colors: bool,
) -> Result<Flow>
where
    R: UserRepository,
    I: BufRead,
    O: Write,
    G: Rng + ?Sized,
{
    let config = session.config();
    let user = session.current_user().unwrap_or_default().to_string();

    prompter.say(&format!("Welcome, {}!", user))?;
    for (i, quiz) in config.quizzes.iter().enumerate() {
        prompter.say(&format!("[{}] {}", i + 1, quiz.title))?;
    }
    prompter.say("[p] Profile\n[r] Recommendations\n[o] Logout\n[q] Quit")?;

    let Some(choice) = prompter.line("> ")? else {
        return Ok(Flow::Quit);
    };

    match choice.as_str() {
        "p" | "P" => {
            let statuses = session.profile()?;
            prompter.say(&output::format_profile(&user, &statuses, use_colors))?;
        }
        "r" | "R" => {
            let mut any = false;
            for quiz in config.quizzes.iter().filter(|q| q.recommend) {
                any = true;
                let recs = session.recommendations(&quiz.id, rng)?;
                let determined = session.primary(&quiz.id)?.is_determined();
                match recs {
                    Some(recs) => prompter.say(&output::format_recommendations(
                        &recs,
                        &quiz.category_noun,
                        use_colors,
                    ))?,
                    None if !determined => prompter.say(&format!(
                        "Please complete the {} first to receive recommendations!",
                        quiz.title
                    ))?,
                    None => prompter.say(&format!(
                        "Could not find recommendation data for your {}.",
                        quiz.category_noun.to_lowercase()
                    ))?,
                }
            }
            if !any {
                prompter.say("No quiz offers recommendations.")?;
            }
        }
        "o" | "O" => {
            session.logout();
            prompter.say("Logged out.")?;
        }
        "q" | "Q" => return Ok(Flow::Quit),
        other => match other.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
            Some(index) if index < config.quizzes.len() => {
                return take_quiz(session, prompter, &config.quizzes[index], use_colors);
            }
            _ => prompter.say(&format!("Unknown option '{}'", other))?,
        },
    }
    Ok(Flow::Continue)
}

fn take_quiz<R, I, O>(
    session: &mut Session<'_, R>,
    prompter: &mut Prompter<I, O>,
    quiz: &QuizConfig,
    use_colors: bool,
) -> Result<Flow>
where
    R: UserRepository,
    I: BufRead,
    O: Write,
{
    let tally = session.tally(&quiz.id)?;
    let primary = session.primary(&quiz.id)?;
    prompter.say(&output::format_dashboard(quiz, &tally, &primary, use_colors))?;
    prompter.say(&output::rule())?;
    prompter.say(&quiz.title)?;
    if let Some(ref caption) = quiz.caption {
        prompter.say(caption)?;
    }

    let mut submission = Submission::new();
    for (number, question) in quiz.questions.iter().enumerate() {
        prompter.say(&format!("\nQ{}. {}", number + 1, question.prompt))?;
        for (i, choice) in question.choices.iter().enumerate() {
            prompter.say(&format!("  {}) {}", i + 1, choice))?;
        }
        let message = format!("Answer (1-{}, blank to skip): ", question.choices.len());
        let Some(reply) = prompter.line(&message)? else {
            return Ok(Flow::Quit);
        };
        let picked = reply
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| question.choices.get(i))
            .cloned();
        if picked.is_none() && !reply.is_empty() {
            debug!(question = %question.id, reply = %reply, "unrecognized answer left blank");
        }
        submission.answer(question.id.clone(), picked);
    }

    match session.submit(&quiz.id, &submission) {
        Ok(primary) => {
            prompter.say(&format!(
                "{} profile successfully updated!",
                quiz.category_noun
            ))?;
            let tally = session.tally(&quiz.id)?;
            prompter.say(&output::format_dashboard(quiz, &tally, &primary, use_colors))?;
        }
        Err(e @ QuizError::IncompleteSubmission { .. }) => prompter.say(&e.to_string())?,
        Err(e) => return Err(e.into()),
    }
    Ok(Flow::Continue)
}
