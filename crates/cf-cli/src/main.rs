//! CLI frontend for the civforge mod compiler.

mod commands;
mod project;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cf",
    about = "civforge: compile declarative civilization content into a game mod",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log builder activity (equivalent to RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project directory with a template civforge.toml
    Init {
        /// Name of the project (and mod id)
        name: String,
    },

    /// Compile the project and write the mod
    Build {
        /// Project file (.toml or .json)
        #[arg(short, long, default_value = project::DEFAULT_FILE)]
        project: PathBuf,

        /// Output directory (default: dist/<mod id> next to the project file)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Keep existing files in the output directory
        #[arg(long)]
        no_clean: bool,
    },

    /// Compile the project without writing anything
    Check {
        /// Project file (.toml or .json)
        #[arg(short, long, default_value = project::DEFAULT_FILE)]
        project: PathBuf,
    },

    /// List the project's entities and the files they produce
    List {
        /// Filter by entity kind (e.g. civilization, unit, modifier)
        kind: Option<String>,

        /// Project file (.toml or .json)
        #[arg(short, long, default_value = project::DEFAULT_FILE)]
        project: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Init { name } => commands::init::run(&name),
        Commands::Build {
            project,
            out,
            no_clean,
        } => commands::build::run(&project, out.as_deref(), !no_clean),
        Commands::Check { project } => commands::check::run(&project),
        Commands::List { kind, project } => commands::list::run(&project, kind.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` wins over `-v`.
fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("cf_build=debug,cf_core=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
