//! nmq: NetMap Query - CLI for parsing and checking placement rules.

use clap::{Parser, Subcommand};
use netql::{Config, LogFormat};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[derive(Parser)]
#[command(name = "nmq")]
#[command(about = "NetMap Query - parse and check placement rules")]
#[command(version)]
struct Cli {
    /// Log parser decisions to stderr (overrides the configured level)
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a placement query and print the resulting rule
    #[command(visible_alias = "p")]
    Parse {
        /// Query text (reads stdin if omitted or "-")
        query: Option<String>,

        /// Output format: text, json (default from config)
        #[arg(short = 'f', long = "format")]
        format: Option<String>,
    },

    /// Check that each query parses; exits non-zero if any does not
    #[command(visible_alias = "c")]
    Check {
        /// Queries to check
        #[arg(required = true)]
        queries: Vec<String>,

        /// Suppress per-query output
        #[arg(short = 'q', long = "quiet")]
        quiet: bool,
    },

    /// List accepted filter operators
    Ops,

    /// Quick reference for query syntax
    #[command(name = "quick-help", visible_alias = "?")]
    QuickHelp,

    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the resolved configuration
    Show,

    /// Write a default config.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn init_logging(config: &Config, verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level))
    };

    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry().with(filter).with(fmt_layer.json()).init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry().with(filter).with(fmt_layer).init();
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    init_logging(&config, cli.verbose);

    let result = match cli.command {
        Commands::Parse { query, format } => {
            commands::parse(&config, query.as_deref(), format.as_deref())
        }
        Commands::Check { queries, quiet } => match commands::check(&config, &queries, quiet) {
            Ok(true) => Ok(()),
            Ok(false) => std::process::exit(1),
            Err(e) => Err(e),
        },
        Commands::Ops => commands::ops(),
        Commands::QuickHelp => commands::quick_help(),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_show(&config),
            ConfigAction::Init { force } => commands::config_init(&config, force),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
