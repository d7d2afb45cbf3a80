pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "shopbot",
    about = "Shopbot operator CLI",
    long_about = "Inspect configuration, check oracle readiness, and run the recommendation pipeline offline.",
    after_help = "Examples:\n  shopbot doctor --json\n  shopbot config\n  shopbot extract \"best phones under 20000\"\n  shopbot recommend --catalog products.json \"cheapest samsung tv\""
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config and LLM/retrieval readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Print the constraints extracted from a shopping query")]
    Extract {
        #[arg(required = true, num_args = 1.., help = "Free-text shopping query")]
        query: Vec<String>,
    },
    #[command(about = "Recommend products from a local JSON catalog without any LLM calls")]
    Recommend {
        #[arg(long, help = "Path to a JSON array of documents or an object with `documents`")]
        catalog: PathBuf,
        #[arg(required = true, num_args = 1.., help = "Free-text shopping query")]
        query: Vec<String>,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
        Command::Extract { query } => commands::extract::run(&query.join(" ")),
        Command::Recommend { catalog, query } => {
            commands::recommend::run(&catalog, &query.join(" "))
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
