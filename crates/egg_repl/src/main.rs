use std::process;

use clap::Parser;

use egg_interpreter::EvalConfig;

mod logging;
mod repl;

#[derive(Parser, Debug)]
#[command(name = "egg")]
#[command(about = "Interpreter for the egg language", version)]
struct Args {
    /// Source file to run instead of starting the interactive shell
    file: Option<String>,

    /// Program text to run instead of starting the interactive shell
    #[arg(short, long, conflicts_with = "file")]
    eval: Option<String>,

    /// Maximum number of nested function calls
    #[arg(long, default_value_t = EvalConfig::DEFAULT_MAX_CALL_DEPTH)]
    max_depth: usize,

    /// Print the parsed expression instead of evaluating it
    #[arg(long)]
    ast: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    logging::init_tracing(args.verbose);

    let options = repl::Options {
        config: EvalConfig::default().with_max_call_depth(args.max_depth),
        print_ast: args.ast,
    };

    let source = match (args.file, args.eval) {
        (Some(path), _) => match std::fs::read_to_string(&path) {
            Ok(source) => source,
            Err(err) => {
                eprintln!("Error: could not read {}: {}", path, err);
                process::exit(1);
            }
        },
        (None, Some(source)) => source,
        (None, None) => {
            if let Err(err) = repl::repl(&options) {
                eprintln!("Error: {}", err);
                process::exit(1);
            }
            return;
        }
    };

    if !repl::run_once(&source, &options) {
        process::exit(1);
    }
}
