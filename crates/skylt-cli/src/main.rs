mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "skylt",
    version,
    about = "Chemical safety inventory: GHS hazard/precaution cross-reference"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile the hazard inventory for a list of chemical identifiers
    Compile {
        /// File with one chemical identifier (e.g. CAS number) per line
        ids_file: PathBuf,

        /// JSON file of pre-retrieved raw chemical records
        #[arg(short, long, value_name = "FILE")]
        records: PathBuf,

        /// Directory with custom code tables (h2p.txt, p-statements.txt,
        /// h-statements.txt); defaults to the embedded tables
        #[arg(short, long, value_name = "DIR")]
        tables: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Also write HTML report files to this directory
        #[arg(long, value_name = "DIR")]
        html: Option<PathBuf>,
    },
    /// Resolve a single H or P code to its statement text
    Lookup {
        /// Hazard or precaution code (e.g. H315, P301+P310)
        code: String,

        /// Directory with custom code tables
        #[arg(short, long, value_name = "DIR")]
        tables: Option<PathBuf>,
    },
    /// Inspect and check the code tables
    Tables {
        #[command(subcommand)]
        action: TablesAction,
    },
}

#[derive(Subcommand)]
enum TablesAction {
    /// Parse the tables and report entry counts and consistency problems
    Check {
        /// Directory with custom code tables
        #[arg(short, long, value_name = "DIR")]
        tables: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compile {
            ids_file,
            records,
            tables,
            output,
            html,
        } => commands::compile::run(ids_file, records, tables, &output, html),
        Commands::Lookup { code, tables } => commands::lookup::run(&code, tables),
        Commands::Tables { action } => match action {
            TablesAction::Check { tables } => commands::tables::check(tables),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
