// ABOUTME: CLI entry point — runs a script file through the interpreter and reports errors

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tree_lisp::config;

/// Tree-walking interpreter for a small Common-Lisp-family dialect
#[derive(Parser, Debug)]
#[command(name = "tree-lisp")]
#[command(version = config::VERSION)]
#[command(about = config::BANNER)]
struct CliArgs {
    /// Script file to execute
    #[arg(value_name = "FILE")]
    script: PathBuf,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let source = match std::fs::read_to_string(&args.script) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Cannot read script file {}: {}", args.script.display(), e);
            return ExitCode::FAILURE;
        }
    };

    match tree_lisp::interpreter::run(&source) {
        Ok(results) => {
            for result in &results {
                println!("{}", result.to_print_string());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
