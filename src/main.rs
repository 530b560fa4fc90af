use std::{fs, process::ExitCode};

use clap::Parser;
use log::info;
use termcalc::{
    Context, ParserConfig, SplitPolicy, SymbolPolicy,
    interpreter::script::{Line, run_line},
};

/// termcalc evaluates arithmetic expressions with scoped constants and
/// variables.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells termcalc to read a script file instead of an expression.
    #[arg(short, long)]
    file: bool,

    /// Report unknown names and malformed terms instead of reading them as 0.
    #[arg(short, long)]
    strict: bool,

    /// Which operator splits a chain of equal precedence.
    #[arg(long, value_enum, default_value_t = SplitPolicy::Leftmost)]
    split: SplitPolicy,

    /// Maximum parenthesis nesting of an expression.
    #[arg(long, default_value_t = termcalc::interpreter::config::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Declares a constant in the root scope, as `name=value`.
    #[arg(short = 'C', long = "constant", value_parser = parse_binding)]
    constants: Vec<(String, f32)>,

    /// Declares a variable in the root scope, as `name=value`.
    #[arg(short = 'v', long = "variable", value_parser = parse_binding)]
    variables: Vec<(String, f32)>,

    /// Prints the built tree before each result.
    #[arg(short, long)]
    tree: bool,

    contents: String,
}

fn parse_binding(text: &str) -> Result<(String, f32), String> {
    let (name, value) = text.split_once('=')
                            .ok_or_else(|| format!("expected name=value, found '{text}'"))?;
    let value = value.trim()
                     .parse()
                     .map_err(|_| format!("'{value}' is not a number"))?;
    Ok((name.trim().to_string(), value))
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let script = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(script) => script,
            Err(_) => {
                eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                          &args.contents);
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.contents.clone()
    };

    let policy = if args.strict { SymbolPolicy::Strict } else { SymbolPolicy::Permissive };
    let config = ParserConfig::new().with_symbol_policy(policy)
                                    .with_split_policy(args.split)
                                    .with_max_depth(args.max_depth);
    let mut context = Context::with_config(config);
    info!("evaluating with {config:?}");

    for (name, value) in &args.constants {
        if let Err(e) = context.set_constant(name, *value) {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    }
    for (name, value) in &args.variables {
        if let Err(e) = context.set_variable(name, *value) {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    }

    let mut failed = false;
    for (number, line) in script.lines().enumerate() {
        let Some(line) = Line::classify(line) else {
            continue;
        };
        match run_line(&mut context, line, args.tree) {
            Ok(output) => output.iter().for_each(|text| println!("{text}")),
            Err(e) => {
                eprintln!("line {}: {e}", number + 1);
                failed = true;
            },
        }
    }

    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}
