// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use log::{error, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};

use srtconv::app_config::{self, Config};
use srtconv::{ConversionOptions, Controller, ScriptCapability, TargetVariant};

/// CLI Wrapper for TargetVariant to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliVariant {
    Traditional,
    Taiwan,
    TaiwanPhrases,
    HongKong,
}

impl From<CliVariant> for TargetVariant {
    fn from(cli_variant: CliVariant) -> Self {
        match cli_variant {
            CliVariant::Traditional => TargetVariant::Traditional,
            CliVariant::Taiwan => TargetVariant::Taiwan,
            CliVariant::TaiwanPhrases => TargetVariant::TaiwanPhrases,
            CliVariant::HongKong => TargetVariant::HongKong,
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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a copy of the SRT file with converted script (movie.srt -> movie_T.srt)
    Subtitle(SubtitleArgs),

    /// Generate shell completions for srtconv
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct SubtitleArgs {
    /// Input SRT file
    #[arg(value_name = "INPUT_FILE")]
    input_file: PathBuf,

    /// Target script variant
    #[arg(short, long, value_enum)]
    variant: Option<CliVariant>,
}

/// srtconv - SRT subtitles to plain text
///
/// Strips markup from every cue of an SRT file and writes the text out,
/// optionally converting simplified Chinese to traditional.
#[derive(Parser, Debug)]
#[command(name = "srtconv")]
#[command(version)]
#[command(about = "Convert SRT subtitles to plain text")]
#[command(long_about = "srtconv extracts the text of SRT subtitle files, removing inline markup.

EXAMPLES:
    srtconv movie.srt                       # Write movie.txt, all cues on one line
    srtconv -l movie.srt                    # One line per cue
    srtconv -l -o transcript.txt movie.srt  # Choose the output file
    srtconv -l -c movie.srt                 # Convert simplified to traditional (Taiwan)
    srtconv -c -v hong-kong -p movie.srt    # Print Hong Kong traditional text to stdout
    srtconv subtitle movie.srt              # Write movie_T.srt with converted text
    srtconv completions bash > srtconv.bash # Generate bash completions

CONFIGURATION:
    Defaults can be stored in a JSON file passed with --config. Every field
    is optional:
    {\"conversion\": {\"variant\": \"taiwan-phrases\", \"segment_by_line\": true},
     \"output\": {\"text_extension\": \"txt\", \"converted_suffix\": \"_T\"},
     \"log_level\": \"info\"}")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input SRT file
    #[arg(value_name = "INPUT_FILE")]
    input_file: Option<PathBuf>,

    /// Output text file (default: input file with a .txt extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Put each cue on its own line instead of joining cues with spaces
    #[arg(short, long)]
    line: bool,

    /// Convert simplified Chinese to traditional
    #[arg(short, long)]
    convert: bool,

    /// Target script variant
    #[arg(short, long, value_enum)]
    variant: Option<CliVariant>,

    /// Print the text to stdout instead of writing a file
    #[arg(short, long, conflicts_with = "output")]
    print: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(long, value_enum, global = true)]
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
        // The max level set below does the runtime filtering
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and prefix for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "❌"),
            Level::Warn => ("\x1B[1;33m", "🚧"),
            Level::Info => ("\x1B[1;32m", "✅"),
            Level::Debug => ("\x1B[1;36m", "🔍"),
            Level::Trace => ("\x1B[1;35m", "📋"),
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
            let (color, prefix) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, prefix, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> ExitCode {
    // Info until the configuration says otherwise
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
        return ExitCode::FAILURE;
    }

    let cli = CommandLineOptions::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(mut cli: CommandLineOptions) -> Result<()> {
    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "srtconv", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;

    match cli.command.take() {
        Some(Commands::Subtitle(args)) => run_subtitle(config, args),
        Some(Commands::Completions { .. }) => Ok(()),
        None => run_text(config, cli),
    }
}

// @loads: Config file when given, CLI overrides applied, validated
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    config.validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

fn run_text(mut config: Config, cli: CommandLineOptions) -> Result<()> {
    let input_file = cli.input_file.ok_or_else(|| {
        anyhow!("INPUT_FILE is required when no subcommand is specified")
    })?;

    if let Some(variant) = cli.variant {
        config.conversion.variant = variant.into();
    }

    let mut options = ConversionOptions::from_config(&config.conversion);
    options.segment_by_line |= cli.line;
    options.convert_script |= cli.convert;

    let capability = resolve_capability(options.convert_script, config.conversion.variant);
    let controller = Controller::with_config(config, capability);

    if cli.print {
        let text = controller.produce_flat_text(&input_file, &options)?;
        println!("{}", text);
        return Ok(());
    }

    let written = match &cli.output {
        Some(output) => controller.save_flat_text(&input_file, &options, output)?,
        None => controller.produce_text_file(&input_file, &options)?,
    };

    info!("Success: {}", written.display());
    Ok(())
}

fn run_subtitle(mut config: Config, args: SubtitleArgs) -> Result<()> {
    if let Some(variant) = args.variant {
        config.conversion.variant = variant.into();
    }

    let capability = resolve_capability(true, config.conversion.variant);
    let controller = Controller::with_config(config, capability);

    let written = controller.produce_converted_subtitle(&args.input_file, true)?;

    info!("Success: {}", written.display());
    Ok(())
}

// @resolves: Conversion dictionaries, loaded only when the request can use them
fn resolve_capability(needed: bool, variant: TargetVariant) -> ScriptCapability {
    if needed {
        ScriptCapability::load(variant)
    } else {
        ScriptCapability::unavailable()
    }
}
