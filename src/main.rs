mod analyzer;
mod cli;
mod config;
mod error;
mod index;
mod naming;
mod registry;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "weekly-index")]
#[command(about = "Maintain the JSON index of weekly newsletter issues", long_about = None)]
struct Cli {
    /// Path to settings file (defaults to weekly.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an issue, or update the one covering the same dates
    Add {
        /// First day of the issue (YYYY-MM-DD)
        start: String,

        /// Last day of the issue (YYYY-MM-DD)
        end: String,

        /// Issue title, e.g. "第8期"
        title: String,

        /// Short description
        summary: String,

        /// Number of news items
        #[arg(default_value_t = 0)]
        news: u32,

        /// Number of tools mentioned
        #[arg(default_value_t = 0)]
        tools: u32,

        /// Number of releases mentioned
        #[arg(default_value_t = 0)]
        tech: u32,
    },
    /// Scan the weeklies directory for new or changed issue pages
    Scan,
    /// Mark an indexed issue as published
    Publish {
        /// Indexed filename, e.g. weeklies/20251001-20251007issue-report.html
        filename: String,
    },
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write a weekly.toml with default settings
    Init {
        /// Path where to create the settings file
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.kind() == ErrorKind::InvalidSubcommand => {
            print_help();
            return;
        }
        Err(e) => e.exit(),
    };

    init_logging(cli.verbose);

    let Some(command) = cli.command else {
        print_help();
        return;
    };

    let settings_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_PATH));

    let result = match command {
        Commands::Add {
            start,
            end,
            title,
            summary,
            news,
            tools,
            tech,
        } => cli::add::run(
            &settings_path,
            &start,
            &end,
            title,
            summary,
            index::ContentStats {
                news_count: news,
                tool_count: tools,
                tech_count: tech,
            },
        ),
        Commands::Scan => cli::scan::run(&settings_path),
        Commands::Publish { filename } => cli::publish::run(&settings_path, &filename),
        Commands::Config { command } => match command {
            ConfigCommands::Init { path } => cli::config::init(path.unwrap_or(settings_path)),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_help() {
    if let Err(e) = Cli::command().print_long_help() {
        eprintln!("Error: {}", e);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}
