//! CLI binary entry point for structured-data-cli

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use structured_data_sdk::cli::CliError;
#[cfg(feature = "cli")]
use structured_data_sdk::cli::commands::config::{handle_config_init, handle_config_show};
#[cfg(feature = "cli")]
use structured_data_sdk::cli::commands::convert::{ConvertArgs, handle_convert};
#[cfg(feature = "cli")]
use structured_data_sdk::cli::commands::validate::{ValidateArgs, ValidateFormat, handle_validate};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "structured-data-cli")]
#[command(about = "CLI wrapper for the Structured Data SDK")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Convert Schema.org JSON-LD into normalized entities
    Convert {
        /// Input file path or '-' for stdin
        #[arg(default_value = "-")]
        input: String,
        /// Base URL for resolving relative URLs
        #[arg(long)]
        base_url: Option<String>,
        /// Skip required-field diagnostics
        #[arg(long)]
        no_validate_required: bool,
        /// Clear the reserved normalizeUrls option (URL fields are still resolved)
        #[arg(long)]
        no_normalize_urls: bool,
        /// Return only the first converted entity
        #[arg(long)]
        single: bool,
        /// Directory containing .structured-data.toml (defaults to the current directory)
        #[arg(long)]
        config_dir: Option<PathBuf>,
        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Validate a JSON or YAML document
    Validate {
        /// Format to validate
        #[arg(value_enum)]
        format: ValidateFormatArg,
        /// Input file path or '-' for stdin
        #[arg(default_value = "-")]
        input: String,
        /// JSON Schema file to validate against
        #[arg(long)]
        schema: Option<PathBuf>,
        /// Reject schemas that use unknown formats
        #[arg(long)]
        strict: bool,
        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Manage the .structured-data.toml configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum ConfigCommands {
    /// Write a sample configuration file
    Init {
        /// Target directory (defaults to the current directory)
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Show the effective options after environment overrides
    Show {
        /// Directory to load from (defaults to the current directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum ValidateFormatArg {
    Json,
    Yaml,
}

#[cfg(feature = "cli")]
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(feature = "cli")]
fn working_dir(dir: Option<PathBuf>) -> Result<PathBuf, CliError> {
    match dir {
        Some(dir) => Ok(dir),
        None => std::env::current_dir()
            .map_err(|e| CliError::InvalidArgument(format!("No working directory: {}", e))),
    }
}

#[cfg(feature = "cli")]
fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            base_url,
            no_validate_required,
            no_normalize_urls,
            single,
            config_dir,
            pretty,
        } => {
            let args = ConvertArgs {
                input,
                config_dir,
                base_url,
                validate_required: no_validate_required.then_some(false),
                normalize_urls: no_normalize_urls.then_some(false),
                single,
                pretty,
            };
            handle_convert(&args)
        }
        Commands::Validate {
            format,
            input,
            schema,
            strict,
            pretty,
        } => {
            let args = ValidateArgs {
                format: match format {
                    ValidateFormatArg::Json => ValidateFormat::Json,
                    ValidateFormatArg::Yaml => ValidateFormat::Yaml,
                },
                input,
                schema,
                strict,
                pretty,
            };
            handle_validate(&args)
        }
        Commands::Config { command } => match command {
            ConfigCommands::Init { dir, force } => {
                working_dir(dir).and_then(|dir| handle_config_init(&dir, force).map(|_| ()))
            }
            ConfigCommands::Show { dir } => {
                working_dir(dir).and_then(|dir| handle_config_show(&dir).map(|_| ()))
            }
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature is not enabled. Build with --features cli");
    std::process::exit(1);
}
