mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "planlint",
    about = "Lint implementation plans — stage ordering, dependency tables, completion criteria",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root for config discovery (default: auto-detect from .planlint.yaml or .git/)
    #[arg(long, global = true, env = "PLANLINT_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one or more plan documents
    Check {
        /// Plan files (.yaml/.yml as structured plans, anything else as markdown)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Show the stages parsed from a plan document
    Stages { file: PathBuf },

    /// Scaffold a default .planlint.yaml in the project root
    Init,

    /// Inspect and validate the project configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Check { files } => cmd::check::run(&root, &files, cli.json),
        Commands::Stages { file } => cmd::stages::run(&file, cli.json),
        Commands::Init => cmd::init::run(&root),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
