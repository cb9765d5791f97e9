use std::io::{self, Read};
use std::process::ExitCode;

use clap::{Parser as ClapParser, Subcommand};
use findql::cli::{self, CheckOptions, CheckResult, CliError};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(ClapParser)]
#[command(name = "findql")]
#[command(about = "findql - run db.<collection>.find(<filter>) queries over JSON documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and execute a query
    Check {
        /// The query to execute, e.g. 'db.people.find({"age": {"$gt": 25}})'
        query: String,

        /// Dataset as a JSON array of objects (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't execute
        #[arg(long)]
        syntax_only: bool,

        /// Maximum nesting of $and/$or/$not
        #[arg(long, env = "FINDQL_MAX_DEPTH")]
        max_depth: Option<usize>,
    },

    /// Run a sample query against a built-in dataset
    Demo {
        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            query,
            input,
            pretty,
            syntax_only,
            max_depth,
        } => run_check(query, input, pretty, syntax_only, max_depth),
        Commands::Demo { pretty } => {
            println!("{}", cli::SAMPLE_QUERY);
            cli::run_demo().map(|output| print_json(&output, pretty))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_check(
    query: String,
    input: Option<String>,
    pretty: bool,
    syntax_only: bool,
    max_depth: Option<usize>,
) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !syntax_only && !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = CheckOptions {
        query,
        input,
        pretty,
        syntax_only,
        max_depth,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Success(output) => print_json(&output, pretty),
    }
    Ok(())
}

fn print_json(output: &serde_json::Value, pretty: bool) {
    if pretty {
        println!("{:#}", output);
    } else {
        println!("{}", output);
    }
}
