mod builtins;
mod config;
mod env;
mod error;
mod eval;
mod highlighter;
mod interner;
mod parser;
mod runtime;
mod special_forms;
mod value;

use clap::Parser;
use highlighter::LispHelper;
use parser::Reader;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};
use runtime::Runtime;
use std::path::PathBuf;
use value::Value;

/// A tree-walking interpreter for the Sparrow Lisp/Scheme dialect
#[derive(Parser, Debug)]
#[command(name = "sparrow")]
#[command(version = config::VERSION)]
#[command(about = "A tree-walking Scheme-flavored Lisp interpreter")]
struct CliArgs {
    /// Script file to execute (optional — starts the REPL if omitted)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,

    /// Skip loading the bootstrap prelude
    #[arg(long = "no-prelude")]
    no_prelude: bool,

    /// Load a prelude file other than the default
    #[arg(long = "prelude", value_name = "PATH")]
    prelude: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();
    let rt = Runtime::new();

    if !args.no_prelude {
        let prelude_path = args
            .prelude
            .clone()
            .unwrap_or_else(|| PathBuf::from(config::DEFAULT_PRELUDE_PATH));
        match std::fs::read_to_string(&prelude_path) {
            Ok(contents) => {
                if let Err(e) = run_source(&contents, &rt) {
                    eprintln!("Warning: failed to load prelude {}: {e}", prelude_path.display());
                }
            }
            Err(_) if args.prelude.is_none() => {
                // Default prelude is optional; a custom one must exist.
            }
            Err(e) => {
                eprintln!("Warning: cannot read prelude {}: {e}", prelude_path.display());
            }
        }
    }

    if let Some(script_path) = args.script {
        let contents = std::fs::read_to_string(&script_path)
            .map_err(|e| format!("cannot read script file {}: {e}", script_path.display()))?;
        if let Err(e) = run_source(&contents, &rt) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        return Ok(());
    }

    run_repl(&rt)
}

/// Reads and evaluates every top-level form in `source` against the global
/// environment, stopping at the first error.
fn run_source(source: &str, rt: &Runtime) -> Result<Value, error::EvalError> {
    let mut reader = Reader::new(source.chars());
    let mut result = Value::Null;
    loop {
        let expr = reader.read(rt);
        if matches!(expr, Value::Sentinel) {
            break;
        }
        result = eval::eval(expr, &rt.global, rt)?;
    }
    Ok(result)
}

fn run_repl(rt: &Runtime) -> Result<(), Box<dyn std::error::Error>> {
    let rl_config = Config::builder().auto_add_history(true).build();
    let mut rl = Editor::with_config(rl_config)
        .map_err(|e| format!("failed to initialize REPL: {e}"))?;
    rl.set_helper(Some(LispHelper::new()));

    let _ = rl.load_history(config::HISTORY_FILE);

    println!("{}", config::WELCOME_MESSAGE);
    println!("{}", config::WELCOME_SUBTITLE);

    loop {
        match rl.readline("sparrow> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                match line.trim() {
                    "(quit)" | "(exit)" => break,
                    _ => {}
                }
                let mut reader = Reader::new(line.chars());
                loop {
                    let expr = reader.read(rt);
                    if matches!(expr, Value::Sentinel) {
                        break;
                    }
                    match eval::eval(expr, &rt.global, rt) {
                        Ok(result) => println!("=> {result}"),
                        Err(e) => eprintln!("Error: {e}"),
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error: {e}");
                break;
            }
        }
    }

    let _ = rl.save_history(config::HISTORY_FILE);
    Ok(())
}
