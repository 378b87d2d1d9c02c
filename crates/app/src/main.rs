use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use guard_core::model::{LessonId, Verdict};
use services::config::{SCAN_DELAY_VAR, parse_delay_ms};
use services::{AppServices, Clock, GuardConfig, QuizSession, QuizStatus, ScanReport};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    MissingQuery,
    InvalidLimit { raw: String },
    InvalidLessonId { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::MissingQuery => write!(f, "scan requires an app name or URL"),
            ArgsError::InvalidLimit { raw } => write!(f, "invalid --limit value: {raw}"),
            ArgsError::InvalidLessonId { raw } => write!(f, "invalid --complete lesson id: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app scan <app name or url...> [--json]");
    eprintln!("  app quiz");
    eprintln!("  app lessons [--complete <id>]...");
    eprintln!("  app alerts [--limit <n>]");
    eprintln!();
    eprintln!("Options (any command):");
    eprintln!("  --dataset <path>    JSON reference dataset (default: builtin)");
    eprintln!("  --delay-ms <ms>     simulated scan delay (default: 2000)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  GUARD_DATASET, GUARD_SCAN_DELAY_MS, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Scan { query: String, json: bool },
    Quiz,
    Lessons { complete: Vec<LessonId> },
    Alerts { limit: usize },
}

struct Args {
    command: Command,
    config: GuardConfig,
}

impl Args {
    fn parse(
        subcommand: &str,
        args: &mut impl Iterator<Item = String>,
        mut config: GuardConfig,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut words = Vec::new();
        let mut json = false;
        let mut limit = 2_usize;
        let mut complete = Vec::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--dataset" => {
                    let value = require_value(args, "--dataset")?;
                    config = config.with_dataset_path(PathBuf::from(value));
                }
                "--delay-ms" => {
                    let value = require_value(args, "--delay-ms")?;
                    config = config.with_scan_delay(parse_delay_ms(SCAN_DELAY_VAR, &value)?);
                }
                "--limit" => {
                    let value = require_value(args, "--limit")?;
                    limit = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidLimit { raw: value.clone() })?;
                }
                "--complete" => {
                    let value = require_value(args, "--complete")?;
                    let id = value
                        .parse::<LessonId>()
                        .map_err(|_| ArgsError::InvalidLessonId { raw: value.clone() })?;
                    complete.push(id);
                }
                "--json" => json = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ if arg.starts_with("--") => {
                    return Err(ArgsError::UnknownArg(arg).into());
                }
                _ if subcommand == "scan" => words.push(arg),
                _ => return Err(ArgsError::UnknownArg(arg).into()),
            }
        }

        let command = match subcommand {
            "scan" => {
                let query = words.join(" ");
                if query.trim().is_empty() {
                    return Err(ArgsError::MissingQuery.into());
                }
                Command::Scan { query, json }
            }
            "quiz" => Command::Quiz,
            "lessons" => Command::Lessons { complete },
            "alerts" => Command::Alerts { limit },
            other => return Err(ArgsError::UnknownArg(other.to_string()).into()),
        };

        Ok(Self { command, config })
    }
}

/// Used when `RUST_LOG` is unset. Dataset-load info stays off the terminal.
const DEFAULT_LOG_FILTER: &str = "warn";

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn verdict_badge(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Safe => "[SAFE]",
        Verdict::Suspicious => "[CAUTION]",
        Verdict::Scam => "[SCAM]",
    }
}

fn print_report(report: &ScanReport) {
    let result = &report.result;
    println!("{} {}", verdict_badge(result.verdict), result.title);
    println!("{}", result.description);
    for reason in &result.reasons {
        println!("  - {reason}");
    }
}

async fn run_scan(
    services: &AppServices,
    query: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let scan = services.scan();
    if !json && !scan.delay().is_zero() {
        eprintln!("Scanning...");
    }
    let report = scan.scan(query).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn run_lessons(services: &AppServices, complete: &[LessonId]) {
    let mut lessons = services.lesson_service();
    for id in complete {
        if !lessons.complete(*id) {
            eprintln!("no lesson with id {id}");
        }
    }
    for item in lessons.list() {
        let mark = if item.completed { "x" } else { " " };
        println!("[{mark}] {}. {} ({})", item.position, item.title, item.duration);
        println!("    {}", item.content);
    }
    println!("Lessons completed: {}%", lessons.percent());
}

fn run_alerts(services: &AppServices, limit: usize) {
    for alert in services.alerts().recent(limit) {
        println!("{} {} - {}", verdict_badge(alert.verdict), alert.title, alert.age);
        println!("   {}", alert.message);
    }
}

fn print_quiz_list(quiz: &QuizSession) {
    let progress = quiz.progress();
    println!();
    println!(
        "Score: {} points | {}/{} quizzes completed ({}%)",
        progress.score, progress.completed, progress.total, progress.percent
    );
    for item in quiz.list() {
        let mark = match item.status {
            QuizStatus::Completed => "x",
            QuizStatus::New => " ",
        };
        println!(
            "  [{mark}] {} - {} points ({})",
            item.label(),
            item.points,
            item.action()
        );
    }
    println!("Pick a quiz number, or q to quit.");
}

fn print_question(quiz: &QuizSession) {
    let Some(question) = quiz.current_question() else {
        return;
    };
    println!();
    println!("{}", question.prompt());
    for (index, option) in question.options().iter().enumerate() {
        println!("  {}. {option}", index + 1);
    }
    println!("Choose an option number.");
}

fn run_quiz(services: &AppServices) -> Result<(), Box<dyn std::error::Error>> {
    let mut quiz = services.quiz_session();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    print_quiz_list(&quiz);
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();
        if input.eq_ignore_ascii_case("q") {
            break;
        }

        if quiz.current_question().is_none() {
            let picked = input
                .parse::<usize>()
                .ok()
                .and_then(|n| quiz.list().into_iter().find(|item| item.position == n))
                .map(|item| item.id);
            match picked {
                Some(id) => {
                    quiz.select_question(id);
                    print_question(&quiz);
                }
                None => print_quiz_list(&quiz),
            }
            continue;
        }

        if quiz.state().answer_revealed() {
            match input {
                "n" => {
                    if quiz.advance_to_next().is_some() {
                        print_question(&quiz);
                    } else {
                        print_quiz_list(&quiz);
                    }
                }
                "b" => {
                    quiz.return_to_list();
                    print_quiz_list(&quiz);
                }
                _ => println!("n = next quiz, b = back to quizzes, q = quit"),
            }
            continue;
        }

        let selected = input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .is_some_and(|index| quiz.select_option(index));
        if !selected {
            print_question(&quiz);
            continue;
        }
        if let Some(feedback) = quiz.submit_answer() {
            if feedback.is_correct {
                println!("Correct! +{} points", feedback.points_awarded);
            } else {
                println!("Incorrect. The answer was option {}.", feedback.correct_option + 1);
            }
            println!("{}", feedback.explanation);
            println!("n = next quiz, b = back to quizzes");
        }
    }

    let progress = quiz.progress();
    println!("Final score: {} / {}", progress.score, progress.max_score);
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let Some(subcommand) = argv.next() else {
        print_usage();
        return Err(ArgsError::MissingValue { flag: "command" }.into());
    };
    if matches!(subcommand.as_str(), "--help" | "-h") {
        print_usage();
        return Ok(());
    }

    let config = GuardConfig::from_env()?;
    let parsed = Args::parse(&subcommand, &mut argv, config).inspect_err(|_| print_usage())?;
    tracing::debug!(command = ?parsed.command, config = ?parsed.config, "starting");
    let services = AppServices::load(&parsed.config, Clock::system())?;

    match parsed.command {
        Command::Scan { query, json } => run_scan(&services, &query, json).await?,
        Command::Quiz => run_quiz(&services)?,
        Command::Lessons { complete } => run_lessons(&services, &complete),
        Command::Alerts { limit } => run_alerts(&services, limit),
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    init_logging();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guard_core::model::QuestionId;

    fn parse(parts: &[&str]) -> Result<Args, Box<dyn std::error::Error>> {
        let mut iter = parts[1..].iter().map(|s| (*s).to_string());
        Args::parse(parts[0], &mut iter, GuardConfig::default())
    }

    #[test]
    fn scan_joins_query_words() {
        let args = parse(&["scan", "is", "groww.in", "safe", "--json"]).unwrap();
        assert_eq!(
            args.command,
            Command::Scan {
                query: "is groww.in safe".into(),
                json: true
            }
        );
    }

    #[test]
    fn global_options_override_config() {
        let args = parse(&["alerts", "--limit", "1", "--delay-ms", "0", "--dataset", "x.json"]).unwrap();
        assert_eq!(args.command, Command::Alerts { limit: 1 });
        assert!(args.config.scan_delay.is_zero());
        assert_eq!(args.config.dataset_path, Some(PathBuf::from("x.json")));
    }

    #[test]
    fn scan_without_query_is_rejected() {
        assert!(parse(&["scan", "--json"]).is_err());
        assert!(parse(&["quiz", "extra"]).is_err());
        assert!(parse(&["dance"]).is_err());
    }

    #[test]
    fn lessons_collects_completions() {
        let args = parse(&["lessons", "--complete", "1", "--complete", "3"]).unwrap();
        assert_eq!(
            args.command,
            Command::Lessons {
                complete: vec![LessonId::new(1), LessonId::new(3)]
            }
        );
        assert_eq!(
            parse(&["lessons"]).unwrap().command,
            Command::Lessons { complete: Vec::new() }
        );
        assert!(parse(&["lessons", "--complete", "first"]).is_err());
        assert!(parse(&["lessons", "--complete"]).is_err());
    }

    #[test]
    fn default_log_filter_is_valid() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }

    #[test]
    fn question_ids_in_list_are_bank_ids() {
        let services = AppServices::load(&GuardConfig::default(), Clock::system()).unwrap();
        let quiz = services.quiz_session();
        assert_eq!(quiz.list()[0].id, QuestionId::new(1));
    }
}
