use std::fmt;
use std::sync::Arc;

use course_core::model::{AuthStrategy, BackendSettings, BackendSettingsDraft, SettingsError};
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, AuthGate, Clock, ProgressTracker};
use tracing_subscriber::EnvFilter;
use ui::{App, DesktopLinkOpener, LinkOpenerRef, UiApp, build_app_context};

const DEFAULT_DB_PATH: &str = "course.sqlite3";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidMinPasswordLen { raw: String },
    Settings(SettingsError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidMinPasswordLen { raw } => {
                write!(f, "invalid COURSE_MIN_PASSWORD_LEN value: {raw}")
            }
            ArgsError::Settings(err) => write!(f, "invalid backend settings: {err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<SettingsError> for ArgsError {
    fn from(err: SettingsError) -> Self {
        ArgsError::Settings(err)
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
    link_opener: LinkOpenerRef,
}

impl UiApp for DesktopApp {
    fn auth_gate(&self) -> Arc<AuthGate> {
        self.services.auth_gate()
    }

    fn progress(&self) -> Arc<ProgressTracker> {
        self.services.progress()
    }

    fn link_opener(&self) -> LinkOpenerRef {
        Arc::clone(&self.link_opener)
    }
}

#[derive(Debug)]
struct Args {
    db_url: String,
    settings: BackendSettings,
}

/// Outcome of parsing the command line.
#[derive(Debug)]
enum Parsed {
    Run(Args),
    Help,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--db <sqlite_url>] [--auth <local|directory|hosted>] [--remote-directory]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:{DEFAULT_DB_PATH}");
    eprintln!("  --auth local");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  COURSE_DB_URL, COURSE_AUTH_BACKEND, COURSE_BACKEND_URL, COURSE_BACKEND_KEY,");
    eprintln!("  COURSE_MIN_PASSWORD_LEN, COURSE_RESET_REDIRECT_URL, RUST_LOG");
}

impl Args {
    /// Parse flags on top of values taken from `env`.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Parsed, ArgsError> {
        let mut db_url = env("COURSE_DB_URL")
            .map_or_else(|| normalize_sqlite_url(DEFAULT_DB_PATH.into()), normalize_sqlite_url);
        let mut strategy = env("COURSE_AUTH_BACKEND")
            .map(|raw| raw.parse::<AuthStrategy>())
            .transpose()?
            .unwrap_or_default();
        let mut remote_directory = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--auth" => {
                    strategy = require_value(args, "--auth")?.parse()?;
                }
                "--remote-directory" => remote_directory = true,
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let min_password_len = env("COURSE_MIN_PASSWORD_LEN")
            .map(|raw| {
                raw.trim()
                    .parse::<usize>()
                    .map_err(|_| ArgsError::InvalidMinPasswordLen { raw })
            })
            .transpose()?;

        let settings = BackendSettingsDraft {
            strategy,
            base_url: env("COURSE_BACKEND_URL"),
            api_key: env("COURSE_BACKEND_KEY"),
            remote_directory,
            min_password_len,
            reset_redirect_url: env("COURSE_RESET_REDIRECT_URL"),
        }
        .validate()?;

        Ok(Parsed::Run(Self { db_url, settings }))
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let args = match parsed {
        Parsed::Run(args) => args,
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
    };

    init_tracing();
    tracing::info!(db = %args.db_url, settings = ?args.settings, "starting");

    // Open + migrate SQLite before the window exists so startup failures surface here.
    prepare_sqlite_file(&args.db_url)?;
    let services =
        AppServices::new_sqlite(&args.db_url, Clock::default_clock(), &args.settings).await?;

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        services,
        link_opener: Arc::new(DesktopLinkOpener),
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Área de Membros")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
