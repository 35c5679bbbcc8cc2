mod cmd;
mod config_path;
mod output;
mod session;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "initiative",
    about = "Tabletop turn tracker: queue timed actions per character and advance a shared clock",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (default: nearest .initiative.yaml, then ~/.initiative.yaml)
    #[arg(long, global = true, env = "INITIATIVE_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Log more (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a session reading commands from stdin
    Play {
        /// Subject names and Name:secs action overrides
        args: Vec<String>,

        /// Seed for dice rolls
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Evaluate a dice expression such as 3d6+2
    Roll {
        #[arg(allow_hyphen_values = true)]
        expr: String,

        /// Seed for dice rolls
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List available actions
    Catalog {
        /// Name:secs action overrides
        args: Vec<String>,
    },

    /// List token kinds
    Tokens,

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::default().add_directive(default_level.into())
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let explicit = cli.config.as_deref();

    let result = match cli.command {
        Commands::Roll { expr, seed } => cmd::roll::run(&expr, seed, cli.json),
        Commands::Config { subcommand } => cmd::config::run(explicit, subcommand, cli.json),
        Commands::Play { args, seed } => config_path::load_config(explicit)
            .and_then(|config| cmd::play::run(&config, &args, seed, cli.json)),
        Commands::Catalog { args } => config_path::load_config(explicit)
            .and_then(|config| cmd::catalog::run(&config, &args, cli.json)),
        Commands::Tokens => {
            config_path::load_config(explicit).and_then(|config| cmd::tokens::run(&config, cli.json))
        }
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
