use std::fmt;

use chrono::{DateTime, Utc};
use course_core::model::{Email, MemberId};
use storage::repository::MemberRecord;
use storage::sqlite::SqliteRepository;

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    email: Email,
    password: String,
    display_name: Option<String>,
    inactive: bool,
    created_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingRequired { flag: &'static str },
    UnknownArg(String),
    InvalidEmail { raw: String },
    InvalidDbUrl { raw: String },
    InvalidCreatedAt { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingRequired { flag } => write!(f, "{flag} is required"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidEmail { raw } => write!(f, "invalid --email value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidCreatedAt { raw } => {
                write!(f, "invalid --created-at value (expected RFC3339): {raw}")
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
            std::env::var("COURSE_DB_URL").unwrap_or_else(|_| "sqlite:course.sqlite3".into());
        let mut email: Option<Email> = None;
        let mut password: Option<String> = None;
        let mut display_name: Option<String> = None;
        let mut inactive = false;
        let mut created_at: Option<DateTime<Utc>> = None;

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
                "--email" => {
                    let value = require_value(&mut args, "--email")?;
                    let parsed = Email::parse(&value)
                        .map_err(|_| ArgsError::InvalidEmail { raw: value.clone() })?;
                    email = Some(parsed);
                }
                "--password" => {
                    password = Some(require_value(&mut args, "--password")?);
                }
                "--name" => {
                    display_name = Some(require_value(&mut args, "--name")?);
                }
                "--inactive" => {
                    inactive = true;
                }
                "--created-at" => {
                    let value = require_value(&mut args, "--created-at")?;
                    let parsed = DateTime::parse_from_rfc3339(&value)
                        .map_err(|_| ArgsError::InvalidCreatedAt { raw: value.clone() })?
                        .with_timezone(&Utc);
                    created_at = Some(parsed);
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
            email: email.ok_or(ArgsError::MissingRequired { flag: "--email" })?,
            password: password.ok_or(ArgsError::MissingRequired { flag: "--password" })?,
            display_name,
            inactive,
            created_at,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- --email <addr> --password <pw> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite:course.sqlite3)");
    eprintln!("  --email <addr>            Member email (required)");
    eprintln!("  --password <pw>           Member password (required)");
    eprintln!("  --name <text>             Optional display name");
    eprintln!("  --inactive                Store the member as inactive");
    eprintln!("  --created-at <rfc3339>    Member creation time (default: now)");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  COURSE_DB_URL");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let repo = SqliteRepository::connect(&args.db_url).await?;
    repo.migrate().await?;

    let created_at = args.created_at.unwrap_or_else(Utc::now);
    let record = MemberRecord {
        id: MemberId::generate(),
        email: args.email.clone(),
        password: args.password,
        display_name: args.display_name,
        is_active: !args.inactive,
        purchase_date: Some(created_at),
        created_at,
    };
    repo.upsert_member(&record).await?;

    println!(
        "Seeded member {} ({}) into {}",
        args.email,
        if record.is_active { "active" } else { "inactive" },
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
