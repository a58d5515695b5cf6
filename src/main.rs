// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
// Add other lints specific to this module that you want to allow but not auto-fix

use anyhow::{Result, anyhow, Context};
use log::{info, warn, debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use clap::{Parser, ValueEnum, CommandFactory, Subcommand, Args};
use clap_complete::{generate, Shell};

use brandspot::app_config::{self, Config, DEFAULT_CONFIG_FILE};
use brandspot::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract brand mentions from files, text or stdin
    Analyze(AnalyzeArgs),

    /// Write a default configuration file
    InitConfig {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Check that the language-model endpoint accepts the configured key
    CheckLlm {
        /// API key (defaults to llm.api_key or OPENAI_API_KEY)
        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },

    /// Generate shell completions for brandspot
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Input .txt/.srt files or directories
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Analyze this text instead of (or in addition to) files
    #[arg(short, long)]
    text: Option<String>,

    /// Fetch this web page and analyze its visible text
    #[arg(short, long)]
    url: Option<String>,

    /// Use the language model instead of the rule engine
    #[arg(long)]
    llm: bool,

    /// Write the JSON result to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Pretty-print the JSON result
    #[arg(short, long)]
    pretty: bool,

    /// Drop hits scoring below this certainty
    #[arg(long, value_name = "CERTAINTY")]
    min_certainty: Option<f64>,

    /// Report every mention instead of one per brand per unit
    #[arg(long)]
    no_dedup: bool,

    /// Extra alias, may be repeated
    #[arg(long = "alias", value_name = "ALIAS=BRAND", value_parser = parse_alias)]
    aliases: Vec<(String, String)>,

    /// Language model to use
    #[arg(short, long)]
    model: Option<String>,

    /// API key for the language model
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

/// Brandspot - brand mention extraction
///
/// Finds mentions of commercial brands in plain text and SRT subtitles and
/// reports them as JSON.
#[derive(Parser, Debug)]
#[command(name = "brandspot")]
#[command(version)]
#[command(about = "Rule-based brand mention extraction for text and subtitles")]
#[command(long_about = "Brandspot finds brand mentions in plain text and SRT subtitle files and prints them as JSON.

EXAMPLES:
    brandspot analyze notes.txt                     # Analyze a text file
    brandspot analyze episode.srt --pretty          # Analyze subtitles, pretty JSON
    brandspot analyze ./transcripts -o hits.json    # Analyze a directory into a file
    brandspot analyze --text \"I took an Uber.\"      # Analyze inline text
    brandspot analyze --url https://example.com     # Analyze a web page
    cat notes.txt | brandspot analyze               # Analyze stdin
    brandspot analyze --alias Hulu=Hulu a.txt       # Add an alias
    brandspot analyze --llm episode.srt             # Use the language model
    brandspot completions bash > brandspot.bash     # Generate bash completions

CONFIGURATION:
    Configuration is read from brandspot.json by default. You can specify a
    different file with --config. Run `brandspot init-config` to write one.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long = "config", global = true, default_value = DEFAULT_CONFIG_FILE)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // Filtering is left to log::set_max_level so the level can change after init
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI colour for log level
    fn get_color_for_level(level: Level) -> &'static str {
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
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(level), now, Self::get_emoji_for_level(level), record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

// @parses: ALIAS=BRAND pair
fn parse_alias(value: &str) -> Result<(String, String), String> {
    let (alias, brand) = value
        .split_once('=')
        .ok_or_else(|| format!("expected ALIAS=BRAND, got '{}'", value))?;
    let (alias, brand) = (alias.trim(), brand.trim());
    if alias.is_empty() || brand.is_empty() {
        return Err(format!("alias and brand must not be empty in '{}'", value));
    }
    Ok((alias.to_string(), brand.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    if let Some(level) = cli.log_level {
        log::set_max_level(app_config::LogLevel::from(level).into());
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "brandspot", &mut std::io::stdout());
            Ok(())
        }
        Commands::InitConfig { force } => run_init_config(&cli.config_path, force),
        Commands::CheckLlm { api_key } => {
            let mut config = load_config(&cli.config_path, cli.log_level)?;
            if let Some(key) = api_key {
                config.llm.api_key = key;
            }
            run_check_llm(config).await
        }
        Commands::Analyze(args) => {
            let config = load_config(&cli.config_path, cli.log_level)?;
            run_analyze(config, args).await
        }
    }
}

// @loads: Config file, then applies the log level
fn load_config(config_path: &str, cli_log_level: Option<CliLogLevel>) -> Result<Config> {
    let mut config = Config::load_or_default(config_path)?;

    // Command line log level wins over the config file
    match cli_log_level {
        Some(level) => config.log_level = level.into(),
        None => log::set_max_level(config.log_level.into()),
    }

    Ok(config)
}

fn run_init_config(config_path: &str, force: bool) -> Result<()> {
    if Path::new(config_path).exists() && !force {
        return Err(anyhow!("Config file already exists at '{}' (use --force to overwrite)", config_path));
    }

    Config::default().save(config_path)?;
    info!("Wrote default configuration to {}", config_path);
    Ok(())
}

async fn run_check_llm(config: Config) -> Result<()> {
    let controller = Controller::with_config(config)?;
    let provider = controller.llm_provider()?;

    info!("Checking {} with model {}", provider.endpoint(), provider.model());
    let models = provider.list_models().await
        .context("Language-model connection check failed")?;
    let model_available = models.iter().any(|m| m == provider.model());
    info!("Connection OK, {} model(s) available", models.len());
    if !model_available {
        warn!("Configured model '{}' is not in the model list", provider.model());
    }
    Ok(())
}

// @applies: CLI overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, args: &AnalyzeArgs) {
    if let Some(min) = args.min_certainty {
        config.extraction.min_certainty = min;
    }
    if args.no_dedup {
        config.extraction.dedup_per_cue = false;
    }
    for (alias, brand) in &args.aliases {
        config.extraction.alias_map_add.insert(alias.as_str(), brand.as_str());
    }
    if let Some(model) = &args.model {
        config.llm.model = model.clone();
    }
    if let Some(key) = &args.api_key {
        config.llm.api_key = key.clone();
    }
}

async fn run_analyze(mut config: Config, args: AnalyzeArgs) -> Result<()> {
    apply_overrides(&mut config, &args);

    let controller = Controller::with_config(config)
        .context("Configuration validation failed")?;

    // Fall back to stdin when no paths, text or URL were given
    let stdin_text = if args.paths.is_empty() && args.text.is_none() && args.url.is_none() {
        debug!("Reading input from stdin");
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        Some(buffer)
    } else {
        None
    };

    let text = args.text.as_deref().or(stdin_text.as_deref());
    let sources = controller.collect_sources_with_url(&args.paths, text, args.url.as_deref()).await?;

    let hits = controller.analyze(&sources, args.llm).await?;
    controller.write_output(&hits, args.output.as_deref(), args.pretty)?;

    Ok(())
}
