use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;

mod commands;
mod config;

/// Abacus expression evaluator.
///
/// Abacus evaluates arithmetic, comparison, and string expressions with
/// built-in math functions and user-defined variables. This CLI provides
/// one-shot evaluation, an interactive REPL, and token/AST dumps for tooling.
///
/// EXAMPLES:
///     abacus eval "1 + 2 * 3"         Evaluate an expression
///     abacus eval "sqrt(2)" --json    Machine-readable output
///     abacus repl                     Start the interactive REPL
///     abacus tokens "10 + foo"        Dump the token stream
///     abacus ast "pow(2, 10)"         Dump the parse tree
///
/// ENVIRONMENT VARIABLES:
///     ABACUS_JSON          Set to '1' for JSON output by default
///     ABACUS_HISTORY_FILE  Custom REPL history location
///     ABACUS_NO_HISTORY    Set to '1' to disable REPL history
///     NO_COLOR             Set to disable colored output
#[derive(Parser)]
#[command(name = "abacus")]
#[command(version)]
#[command(propagate_version = true)]
#[command(after_help = "Running `abacus` with no subcommand starts the REPL.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an expression and print the result
    ///
    /// Prints the result value to stdout. On failure, prints the error with
    /// a caret marking the offending column to stderr and exits non-zero.
    ///
    /// EXAMPLES:
    ///     abacus eval "1 + 2 * 3"          Prints 7
    ///     abacus eval "\"n=\" + 4"         Prints n=4
    ///     abacus eval "1 +" --json         Error as single-line JSON
    #[command(visible_alias = "e")]
    Eval {
        /// Expression to evaluate
        expression: String,
        /// Output the result (or error) as single-line JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the interactive REPL
    ///
    /// Evaluates expressions line by line against a persistent context, so
    /// variables set with :set remain visible to later lines. History is
    /// stored under ~/.abacus/history unless disabled.
    Repl {
        /// Don't load or save REPL history
        #[arg(long)]
        no_history: bool,
    },

    /// Dump the token stream of an expression as JSON
    ///
    /// EXAMPLES:
    ///     abacus tokens "10 + foo"         One token per line
    Tokens {
        /// Expression to tokenize
        expression: String,
    },

    /// Dump the parse tree of an expression as JSON
    ///
    /// EXAMPLES:
    ///     abacus ast "1 + 2 * 3"           Pretty-printed tree
    Ast {
        /// Expression to parse
        expression: String,
    },

    /// Generate shell completion scripts
    ///
    /// EXAMPLES:
    ///     abacus completions bash > /etc/bash_completion.d/abacus
    ///     abacus completions zsh > ~/.zfunc/_abacus
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cli_config = config::Config::from_env();

    if cli_config.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        Some(Commands::Eval { expression, json }) => {
            // Command-line flag overrides environment variable
            let use_json = json || cli_config.default_json;
            commands::eval::run(&expression, use_json)?;
        }
        Some(Commands::Repl { no_history }) => {
            let disable_history = no_history || cli_config.no_history;
            commands::repl::run(disable_history, &cli_config)?;
        }
        Some(Commands::Tokens { expression }) => {
            commands::dump::tokens(&expression)?;
        }
        Some(Commands::Ast { expression }) => {
            commands::dump::ast(&expression)?;
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
        None => {
            commands::repl::run(cli_config.no_history, &cli_config)?;
        }
    }

    Ok(())
}
