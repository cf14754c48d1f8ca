// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::PathBuf;

use captionlist::app_config::{self, Config, TranslationProvider};
use captionlist::app_controller::Controller;
use captionlist::translation::StalePolicy;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Ollama,
    Mock,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
            CliTranslationProvider::Mock => TranslationProvider::Mock,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for StalePolicy to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliStalePolicy {
    Discard,
    Apply,
}

impl From<CliStalePolicy> for StalePolicy {
    fn from(cli_policy: CliStalePolicy) -> Self {
        match cli_policy {
            CliStalePolicy::Discard => StalePolicy::Discard,
            CliStalePolicy::Apply => StalePolicy::Apply,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate the empty rows of a session file
    Translate(TranslateArgs),

    /// Generate shell completions for captionlist
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Session file (JSON: captions, subtitles, title)
    #[arg(value_name = "SESSION")]
    input_path: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Source language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// What to do with completions of superseded batches
    #[arg(long, value_enum)]
    stale_policy: Option<CliStalePolicy>,

    /// Translate with the offline mock provider
    #[arg(long)]
    dry_run: bool,
}

/// captionlist - subtitle translation rows with machine translation
#[derive(Parser, Debug)]
#[command(name = "captionlist")]
#[command(version)]
#[command(about = "Fill empty subtitle translations through a machine translation provider")]
#[command(long_about = "captionlist binds base-language subtitles to an editable caption set and \
translates every empty row in one batch.

EXAMPLES:
    captionlist translate session.json                    # Translate using default config
    captionlist translate -s en -t es session.json        # Translate from English to Spanish
    captionlist translate --dry-run -o out.json session.json
    captionlist completions bash > captionlist.bash       # Generate bash completions")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();
    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "captionlist", &mut std::io::stdout());
            Ok(())
        }
        Commands::Translate(args) => run_translate(args).await,
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // Apply the command line level right away so config loading is logged at that level
    if let Some(level) = &options.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;

    if let Some(provider) = options.provider {
        config.translation.provider = provider.into();
    }
    if let Some(model) = options.model {
        config.translation.model = model;
    }
    if let Some(source_lang) = options.source_language {
        config.source_language = source_lang;
    }
    if let Some(target_lang) = options.target_language {
        config.target_language = target_lang;
    }
    if let Some(policy) = options.stale_policy {
        config.stale_policy = policy.into();
    }
    match options.log_level {
        Some(level) => config.log_level = level.into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    let controller = Controller::with_config(config).context("Configuration validation failed")?;
    info!(
        "Translating {} ({} -> {})",
        options.input_path.display(),
        controller.config().source_language,
        controller.config().target_language
    );

    controller
        .run(&options.input_path, options.output.as_deref(), options.dry_run)
        .await?;
    Ok(())
}
