//! qbank-docs - render and inspect the QBank API documentation viewer.
//!
//! # Commands
//!
//! - `qbank-docs render` - Write `index.html` and `swagger-initializer.js`
//! - `qbank-docs show` - Print the resolved Swagger UI options
//! - `qbank-docs check` - Check the configuration for common mistakes
//!
//! Settings come from `--config <file>` (TOML, JSON or .env) and
//! `QBANK_DOCS_*` environment variables, on top of the QBank defaults.

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

mod commands;
mod error;

use commands::render::BundleOverrides;
use commands::{SettingsSource, check, render, show};
use error::CliResult;

/// QBank API documentation viewer tools
#[derive(Parser)]
#[command(name = "qbank-docs")]
#[command(version)]
#[command(about = "Render and inspect the Swagger UI bootstrap for the QBank API docs")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (.toml, .json or .env)
    #[arg(short, long, global = true, env = "QBANK_DOCS_CONFIG")]
    config: Option<PathBuf>,

    /// Ignore .env and QBANK_DOCS_* environment variables
    #[arg(long, global = true)]
    no_env: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the viewer page and initializer script
    #[command(alias = "r")]
    Render(RenderArgs),

    /// Print the resolved configuration
    Show(ShowArgs),

    /// Check the configuration for common mistakes
    #[command(visible_alias = "validate")]
    Check,
}

#[derive(Args)]
struct RenderArgs {
    /// Output directory
    #[arg(short, long, default_value = "dist")]
    out: PathBuf,

    /// Base URL of the swagger-ui-dist package
    #[arg(long)]
    cdn: Option<String>,

    /// swagger-ui-dist version to load
    #[arg(long = "swagger-ui-version")]
    swagger_ui_version: Option<String>,

    /// Page title
    #[arg(long)]
    title: Option<String>,
}

#[derive(Args)]
struct ShowArgs {
    /// Print the initializer script instead of the options
    #[arg(long)]
    script: bool,
}

fn configure_logging(cli: &Cli) {
    qbank_docs_log::init();
    if cli.verbose {
        qbank_docs_log::set_debug(true);
    } else if cli.quiet {
        qbank_docs_log::set_level(qbank_docs_log::Level::Error);
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    configure_logging(&cli);

    let source = SettingsSource {
        file: cli.config.as_deref(),
        ignore_env: cli.no_env,
    };

    let result: CliResult<()> = match cli.command {
        Commands::Render(ref args) => {
            let overrides = BundleOverrides {
                cdn_base: args.cdn.clone(),
                swagger_ui_version: args.swagger_ui_version.clone(),
                title: args.title.clone(),
            };
            if !cli.quiet {
                println!("{} {}", "Rendering viewer into".bright_cyan(), args.out.display());
            }
            render::run(&source, &overrides, &args.out, cli.quiet).await
        }
        Commands::Show(ref args) => show::execute(&source, args.script),
        Commands::Check => check::execute(&source, cli.quiet),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
