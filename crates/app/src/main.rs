use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use flash_core::model::{Counters, Difficulty};
use services::CountersService;
use storage::repository::{CountersRepository, Storage};
use tracing_subscriber::EnvFilter;
use ui::platform::{HapticsRef, HostRef, WebviewHaptics, WebviewHost};
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://flashmath.sqlite3";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
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

struct DesktopApp {
    counters: Arc<dyn CountersRepository>,
    difficulty: Difficulty,
}

impl UiApp for DesktopApp {
    fn counters(&self) -> Arc<dyn CountersRepository> {
        Arc::clone(&self.counters)
    }

    fn launch_difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn host(&self) -> HostRef {
        Arc::new(WebviewHost)
    }

    fn haptics(&self) -> HapticsRef {
        Arc::new(WebviewHaptics::default())
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [ui] [--db <sqlite_url>] [--hard]");
    eprintln!("  cargo run -p app -- stats [--db <sqlite_url>]");
    eprintln!("  cargo run -p app -- reset [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  FLASH_DB_URL, FLASH_HARD (1/true), FLASH_LOG (tracing filter, default info)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Stats,
    Reset,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "stats" => Some(Self::Stats),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    db_url: String,
    hard: bool,
}

impl Args {
    fn from_env() -> Self {
        let db_url = std::env::var("FLASH_DB_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let hard = std::env::var("FLASH_HARD")
            .ok()
            .is_some_and(|value| matches!(value.trim(), "1" | "true" | "TRUE" | "yes"));
        Self { db_url, hard }
    }

    /// Apply flags on top of `defaults`. `--hard` is only meaningful for `ui`.
    fn parse(
        cmd: Command,
        args: &mut impl Iterator<Item = String>,
        defaults: Self,
    ) -> Result<Self, ArgsError> {
        let Self { mut db_url, mut hard } = defaults;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--hard" if cmd == Command::Ui => hard = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { db_url, hard })
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

fn split_command(mut argv: Vec<String>) -> Result<(Command, Vec<String>), ArgsError> {
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some(first) if first.starts_with('-') => Command::Ui,
        Some(first) => {
            Command::from_arg(first).ok_or_else(|| ArgsError::UnknownCommand(first.to_string()))?
        }
    };
    if argv.first().is_some_and(|first| !first.starts_with('-')) {
        argv.remove(0);
    }
    Ok((cmd, argv))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("FLASH_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn describe(counters: &Counters) -> String {
    let accuracy = counters
        .accuracy_percent()
        .map_or_else(|| "\u{2014}".to_string(), |pct| format!("{pct}%"));
    format!(
        "streak {}  best {}  total {}  correct {}  accuracy {accuracy}",
        counters.streak(),
        counters.best(),
        counters.total(),
        counters.correct()
    )
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let (cmd, rest) = split_command(argv).inspect_err(|_| print_usage())?;

    let mut iter = rest.into_iter();
    let parsed = Args::parse(cmd, &mut iter, Args::from_env()).inspect_err(|_| print_usage())?;

    // Open + migrate SQLite here so the library crates never touch the filesystem layout.
    prepare_sqlite_file(&parsed.db_url)?;
    let storage = Storage::sqlite(&parsed.db_url).await?;
    tracing::info!(db = %parsed.db_url, command = ?cmd, "storage ready");

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                counters: Arc::clone(&storage.counters),
                difficulty: Difficulty::from_hard(parsed.hard),
            });
            let context = build_app_context(&app);

            // On macOS, tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Flash Math")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Stats => {
            let counters = CountersService::new(storage.counters).load().await?;
            println!("{}", describe(&counters));
            Ok(())
        }
        Command::Reset => {
            let counters = CountersService::new(storage.counters).reset().await?;
            println!("{}", describe(&counters));
            Ok(())
        }
    }
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

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
