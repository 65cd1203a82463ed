//! xat CLI
//!
//! Command-line interface for composing and inspecting lint configurations

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::error;
use xat_core::{Result, init_tracing};

#[derive(Parser)]
#[command(name = "xat")]
#[command(about = "xat: compose feature-scoped lint configuration")]
#[command(version = xat_core::VERSION)]
#[command(
    long_about = "xat assembles a flat lint configuration from feature-scoped fragments.\n\
\n\
Examples:\n  \
xat print                    # Print the composed configuration as JSON\n  \
xat print --names            # List fragment names in order\n  \
xat rules src/main.ts        # Show the rules that apply to a file\n  \
xat init --yes               # Write xat.config.json with defaults"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        help = "Path to configuration file (default: auto-discover .xatrc.* / xat.config.*)"
    )]
    config: Option<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose the configuration and print it
    Print {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = PrintFormat::Json)]
        format: PrintFormat,

        /// Compose as if running inside an editor
        #[arg(long, conflicts_with = "no_editor")]
        editor: bool,

        /// Compose as if running outside an editor
        #[arg(long)]
        no_editor: bool,

        /// Print fragment names only
        #[arg(long)]
        names: bool,
    },

    /// Show the effective rules for a file
    Rules {
        /// File path, relative to the project root
        file: String,
    },

    /// Create xat.config.json in the current directory
    Init {
        /// Skip prompts and use the given flags or defaults
        #[arg(short, long)]
        yes: bool,

        /// Frameworks to enable (react, nextjs, astro)
        #[arg(long, value_delimiter = ',')]
        frameworks: Vec<String>,

        /// Extra features to enable (formatters, type-aware)
        #[arg(long, value_delimiter = ',')]
        extra: Vec<String>,

        /// Overwrite an existing xat.config.json
        #[arg(long)]
        force: bool,
    },

    /// Show version information
    Version,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PrintFormat {
    Json,
    Yaml,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "xat=error", // Only errors by default
        1 => "xat=warn",
        2 => "xat=info",
        3 => "xat=debug",
        _ => "xat=trace",
    };
    // SAFETY: no other threads exist yet
    unsafe {
        std::env::set_var("RUST_LOG", log_level);
    }
    init_tracing();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create Tokio runtime");

    runtime.block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> Result<()> {
    if !cli.no_color && std::env::var("NO_COLOR").is_err() {
        colored::control::set_override(true);
    } else {
        colored::control::set_override(false);
    }

    match run_command(cli).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("xat failed: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run_command(cli: Cli) -> Result<()> {
    let config = cli.config.as_deref();
    match cli.command {
        Commands::Print {
            format,
            editor,
            no_editor,
            names,
        } => {
            let editor = match (editor, no_editor) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            commands::print_command(config, format, editor, names).await
        }

        Commands::Rules { file } => commands::rules_command(config, &file).await,

        Commands::Init {
            yes,
            frameworks,
            extra,
            force,
        } => commands::init_command(yes, frameworks, extra, force),

        Commands::Version => {
            commands::version_command();
            Ok(())
        }
    }
}
