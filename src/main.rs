use clap::{Parser, Subcommand};
use miette::{miette, Result};
use std::path::PathBuf;

use csleuth::cli;

#[derive(Parser)]
#[command(name = "csleuth")]
#[command(about = "Heuristic static-analysis engine for C source")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a source file and report all findings
    Analyze {
        /// Input C source file
        input: PathBuf,

        /// Output format (json, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List detected function regions
    Functions {
        /// Input C source file
        input: PathBuf,

        /// Output format (json, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Dump tracked variable lifecycle records
    Variables {
        /// Input C source file
        input: PathBuf,

        /// Output format (json, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Build the call graph and report the recursion verdict
    Callgraph {
        /// Input C source file
        input: PathBuf,

        /// Output DOT file for visualization (optional)
        #[arg(short, long)]
        dot: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { input, format } => {
            cli::analyze::analyze(&input, &format).map_err(|e| miette!("{}", e))
        }
        Commands::Functions { input, format } => {
            cli::functions::functions(&input, &format).map_err(|e| miette!("{}", e))
        }
        Commands::Variables { input, format } => {
            cli::variables::variables(&input, &format).map_err(|e| miette!("{}", e))
        }
        Commands::Callgraph { input, dot } => {
            cli::callgraph::callgraph(&input, dot.as_deref()).map_err(|e| miette!("{}", e))
        }
    }
}
