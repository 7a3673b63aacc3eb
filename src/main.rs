use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use introspect::accounts::InMemoryRepository;
use introspect::config::{Config, ConfigSource};
use introspect::division::{self, GuessOutcome};
use introspect::interactive::{self, Prompter};
use introspect::scoring::{self, QuizConfig, Submission};
use introspect::session::{Recommendations, Session};
use introspect::{output, QuizError};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INCOMPLETE: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in, take quizzes and browse recommendations (default if no subcommand)
    Play,
    /// Score one quiz pass given on the command line
    Score {
        /// Quiz id (see `introspect quizzes`)
        #[arg(short, long)]
        quiz: String,

        /// Answer as QUESTION=CHOICE; CHOICE is the option label or its 1-based number
        #[arg(short, long = "answer", value_name = "QUESTION=CHOICE")]
        answers: Vec<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Also sample recommendations for the primary category
        #[arg(short, long)]
        recommend: bool,
    },
    /// Validate the quiz catalog and exit
    Check,
    /// List quizzes and their questions
    Quizzes,
    /// Guess the quotient of two numbers
    Divide {
        #[arg(allow_negative_numbers = true)]
        dividend: f64,

        #[arg(allow_negative_numbers = true)]
        divisor: f64,

        /// Your guess (prompted for if omitted)
        #[arg(short, long, allow_negative_numbers = true)]
        guess: Option<f64>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "introspect")]
#[command(about = "Find your true self: archetype and trope personality quizzes", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to quiz catalog (defaults to ~/.config/introspect/quizzes.yaml, then the built-in catalog)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let use_colors = !cli.no_color && output::should_use_colors();
    let path = cli.config;

    let code = match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => with_catalog(path, |config, _| run_play(config, use_colors)),
        Commands::Score {
            quiz,
            answers,
            format,
            recommend,
        } => with_catalog(path, |config, _| {
            run_score(config, &quiz, &answers, format, recommend, use_colors)
        }),
        Commands::Check => with_catalog(path, |config, source| {
            let questions: usize = config.quizzes.iter().map(|q| q.questions.len()).sum();
            println!(
                "Catalog OK: {} quizzes, {} questions ({})",
                config.quizzes.len(),
                questions,
                source
            );
            EXIT_SUCCESS
        }),
        Commands::Quizzes => with_catalog(path, |config, _| {
            for quiz in &config.quizzes {
                println!("{}  {} ({} questions)", quiz.id, quiz.title, quiz.questions.len());
                for question in &quiz.questions {
                    println!("  {}  {}", question.id, question.prompt);
                }
            }
            EXIT_SUCCESS
        }),
        // The drill needs no catalog
        Commands::Divide {
            dividend,
            divisor,
            guess,
        } => run_divide(dividend, divisor, guess),
    };

    std::process::exit(code);
}

/// Load and validate the quiz catalog, then run `f` on it. Catalog problems
/// are reported on stderr and exit with `EXIT_CONFIG`.
fn with_catalog<F>(path: Option<PathBuf>, f: F) -> i32
where
    F: FnOnce(&Config, &ConfigSource) -> i32,
{
    let (config, source) = match introspect::config::load_config(path) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            return EXIT_CONFIG;
        }
    };
    info!(source = %source, quizzes = config.quizzes.len(), "loaded quiz catalog");

    if let Err(errors) = scoring::validate_catalog(&config) {
        eprintln!("Quiz catalog errors ({}):", source);
        for error in errors {
            eprintln!("  - {}", error);
        }
        return EXIT_CONFIG;
    }

    f(&config, &source)
}

fn run_play(config: &Config, use_colors: bool) -> i32 {
    let stdin = std::io::stdin();
    let hide_secrets = stdin.is_terminal();
    let mut prompter = Prompter::new(stdin.lock(), std::io::stdout(), hide_secrets);
    let mut session = Session::new(config, InMemoryRepository::new());
    let mut rng = rand::rng();

    match interactive::run(&mut session, &mut prompter, &mut rng, use_colors) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Session error: {:#}", e);
            EXIT_INPUT
        }
    }
}

/// Parse "QUESTION=CHOICE" arguments into a submission. Numeric choices
/// select the option at that 1-based position; labels must name one of the
/// question's options.
fn parse_answers(quiz: &QuizConfig, answers: &[String]) -> Result<Submission, String> {
    let mut submission = Submission::new();
    for raw in answers {
        let (question_id, choice) = raw
            .split_once('=')
            .ok_or_else(|| format!("Invalid answer '{}': expected QUESTION=CHOICE", raw))?;
        let question_id = question_id.trim();
        let question = quiz
            .question(question_id)
            .ok_or_else(|| format!("Unknown question '{}' in quiz '{}'", question_id, quiz.id))?;

        let choice = choice.trim();
        let label = match choice.parse::<usize>() {
            Ok(n) => n
                .checked_sub(1)
                .and_then(|i| question.choices.get(i))
                .cloned()
                .ok_or_else(|| {
                    format!(
                        "Choice {} out of range for {} (1-{})",
                        n,
                        question_id,
                        question.choices.len()
                    )
                })?,
            Err(_) => question
                .choices
                .iter()
                .find(|c| c.as_str() == choice)
                .cloned()
                .ok_or_else(|| {
                    format!(
                        "'{}' is not an option for {} (see `introspect quizzes`)",
                        choice, question_id
                    )
                })?,
        };
        submission.answer(question_id, Some(label));
    }
    Ok(submission)
}

fn run_score(
    config: &Config,
    quiz_id: &str,
    answers: &[String],
    format: OutputFormat,
    recommend: bool,
    use_colors: bool,
) -> i32 {
    let Some(quiz) = config.quiz(quiz_id) else {
        eprintln!("{}", QuizError::UnknownQuiz(quiz_id.to_string()));
        eprintln!("Available quizzes: {}", config.quiz_ids().join(", "));
        return EXIT_INPUT;
    };

    let submission = match parse_answers(quiz, answers) {
        Ok(s) => s,
        Err(message) => {
            eprintln!("{}", message);
            return EXIT_INPUT;
        }
    };

    let expected = quiz.question_ids();
    if !scoring::is_complete(&submission, &expected) {
        let missing = scoring::missing_questions(&submission, &expected);
        eprintln!(
            "{}: {}",
            QuizError::IncompleteSubmission {
                missing: missing.clone()
            },
            missing.join(", ")
        );
        return EXIT_INCOMPLETE;
    }

    let tally = scoring::score(&submission, &quiz.categories);
    let primary = scoring::resolve_primary(&tally);
    debug!(quiz = %quiz.id, primary = %primary, total = tally.total(), "scored");

    let recs = if recommend {
        primary.representative().and_then(|category| {
            config
                .recommendations
                .as_ref()?
                .pick(category, &mut rand::rng())
                .map(|picks| Recommendations {
                    primary: primary.clone(),
                    category: category.to_string(),
                    picks,
                })
        })
    } else {
        None
    };

    match format {
        OutputFormat::Json => match output::format_json(quiz, &tally, &primary, recs.as_ref()) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize result: {}", e);
                return EXIT_INPUT;
            }
        },
        OutputFormat::Text => {
            println!(
                "{}",
                output::format_dashboard(quiz, &tally, &primary, use_colors)
            );

            if recommend {
                println!("{}", output::rule());
                match recs {
                    Some(recs) => println!(
                        "{}",
                        output::format_recommendations(&recs, &quiz.category_noun, use_colors)
                    ),
                    None => println!(
                        "No recommendations available for your {}.",
                        quiz.category_noun.to_lowercase()
                    ),
                }
            }
        }
    }

    EXIT_SUCCESS
}

fn run_divide(dividend: f64, divisor: f64, guess: Option<f64>) -> i32 {
    let guess = match guess {
        Some(g) => g,
        None => {
            let stdin = std::io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), std::io::stdout(), false);
            let message = format!("What is {} divided by {}? ", dividend, divisor);
            match prompter.line(&message) {
                Ok(Some(reply)) => match reply.parse::<f64>() {
                    Ok(g) => g,
                    Err(_) => {
                        eprintln!("'{}' is not a number", reply);
                        return EXIT_INPUT;
                    }
                },
                Ok(None) => {
                    eprintln!("No guess given");
                    return EXIT_INPUT;
                }
                Err(e) => {
                    eprintln!("{:#}", e);
                    return EXIT_INPUT;
                }
            }
        }
    };

    match division::check_guess(dividend, divisor, guess) {
        Ok(GuessOutcome::Correct) => {
            println!("Correct!");
            EXIT_SUCCESS
        }
        Ok(GuessOutcome::Incorrect { answer }) => {
            println!("Incorrect. The correct answer is {}.", answer);
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            EXIT_INPUT
        }
    }
}
