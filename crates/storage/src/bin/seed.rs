use std::fmt;
use std::path::PathBuf;

use quiz_core::model::{QuestionKey, QuizQuestion};
use storage::repository::{KeyValueStore, Storage};

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    file: PathBuf,
    start: QuestionKey,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingFile,
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidStart { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingFile => write!(f, "--file is required"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidStart { raw } => {
                write!(f, "invalid --start value (expected integer >= 1): {raw}")
            }
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

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("QUIZ_DB_URL").unwrap_or_else(|_| "sqlite://quiz.sqlite3?mode=rwc".into());
        let mut file: Option<PathBuf> = None;
        let mut start = QuestionKey::FIRST;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--file" => {
                    file = Some(PathBuf::from(require_value(&mut args, "--file")?));
                }
                "--start" => {
                    let value = require_value(&mut args, "--start")?;
                    start = value
                        .parse::<QuestionKey>()
                        .ok()
                        .filter(|key| key.value() >= 1)
                        .ok_or(ArgsError::InvalidStart { raw: value.clone() })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            file: file.ok_or(ArgsError::MissingFile)?,
            start,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- --file <questions.json> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>   (default: sqlite://quiz.sqlite3?mode=rwc)");
    eprintln!("  --file <path>       JSON array of {{question, options, answer}} objects");
    eprintln!("  --start <key>       key of the first question (default: 1)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        print_usage();
        e
    })?;

    let raw = tokio::fs::read_to_string(&args.file).await?;
    let questions: Vec<QuizQuestion> = serde_json::from_str(&raw)?;

    let storage = Storage::sqlite(&args.db_url).await?;

    let mut key = args.start;
    for question in &questions {
        let value = serde_json::to_string(question)?;
        storage.questions.put(&key.store_key(), &value).await?;
        key = key.next();
    }

    println!(
        "Seeded {} questions starting at key {} into {}",
        questions.len(),
        args.start,
        args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
