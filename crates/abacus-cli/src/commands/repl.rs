//! REPL command implementation

use abacus_runtime::Abacus;
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Run the interactive REPL
///
/// Reads expressions line by line and evaluates each against a persistent
/// context, so `:set` bindings remain visible to later lines.
/// If `no_history` is true, disables history persistence.
pub fn run(no_history: bool, config: &crate::config::Config) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut runtime = Abacus::new();

    // Load history from file (unless disabled)
    let history_path = config.get_history_path();
    if !no_history {
        if let Some(ref path) = history_path {
            let _ = rl.load_history(path); // Ignore errors if file doesn't exist
        }
    }

    // Display welcome message
    println!("Abacus v{} REPL", abacus_runtime::VERSION);
    println!("Type an expression to evaluate it, or :quit to exit");
    println!("Commands: :quit (or :q), :reset, :help, :set <name> <expr>");
    println!();

    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                // Skip empty lines
                if trimmed.is_empty() {
                    continue;
                }

                if trimmed == ":quit" || trimmed == ":q" {
                    println!("Goodbye!");
                    break;
                }

                if trimmed == ":reset" {
                    runtime = Abacus::new();
                    println!("Context reset");
                    continue;
                }

                if trimmed == ":help" || trimmed == ":h" {
                    print_help();
                    continue;
                }

                if let Some(rest) = trimmed.strip_prefix(":set") {
                    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                        let _ = rl.add_history_entry(trimmed);
                        match set_binding(&mut runtime, rest.trim()) {
                            Ok((name, value)) => println!("{} = {}", name, value),
                            Err(message) => eprintln!("{}", message),
                        }
                        continue;
                    }
                }

                let _ = rl.add_history_entry(trimmed);

                match runtime.evaluate(trimmed) {
                    Ok(value) => println!("{}", value),
                    Err(err) => eprintln!("{}", err.pretty(trimmed)),
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C
                println!("^C");
                println!("Use :quit or :q to exit");
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D
                println!("^D");
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    // Save history to file (unless disabled)
    if !no_history {
        if let Some(path) = history_path {
            // Create directory if it doesn't exist
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.save_history(&path); // Ignore errors
        }
    }

    Ok(())
}

/// Handle `:set <name> <expr>`: evaluate the expression in the current
/// context and bind the numeric result to the name
fn set_binding(runtime: &mut Abacus, args: &str) -> Result<(String, f64), String> {
    let mut parts = args.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or("").trim();
    let expr = parts.next().unwrap_or("").trim();
    if name.is_empty() || expr.is_empty() {
        return Err("Usage: :set <name> <expr>".to_string());
    }

    let value = runtime
        .evaluate_as::<f64>(expr)
        .map_err(|err| err.pretty(expr))?;
    runtime
        .set_variable(name, value)
        .map_err(|err| err.to_string())?;
    Ok((name.to_string(), value))
}

/// Print help information
fn print_help() {
    println!("Abacus REPL Commands:");
    println!("  :quit, :q           Exit the REPL");
    println!("  :reset              Clear all user variables");
    println!("  :help, :h           Show this help message");
    println!("  :set <name> <expr>  Bind a variable to an evaluated result");
    println!();
    println!("Type any expression to evaluate it.");
    println!("Examples:");
    println!("  >> 1 + 2 * 3");
    println!("  >> sqrt(2) + pi");
    println!("  >> :set radius 10");
    println!("  >> 2 * pi * radius");
}
