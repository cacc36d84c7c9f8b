use std::cell::RefCell;
use std::rc::Rc;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use egg_interpreter::{
    global_environment, parse, EvalConfig, Environment, Evaluator, InterpreterError,
};
use egg_parser::span::line_col;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Options {
    pub config: EvalConfig,
    pub print_ast: bool,
}

/// Run a whole program once. Returns false if it failed.
pub fn run_once(source: &str, options: &Options) -> bool {
    tracing::debug!(bytes = source.len(), print_ast = options.print_ast, "running program");

    if options.print_ast {
        return match parse(source) {
            Ok(program) => {
                println!("{}", program);
                true
            }
            Err(err) => {
                report(source, &InterpreterError::Syntax(err));
                false
            }
        };
    }

    let root = global_environment();
    let mut evaluator = Evaluator::new().with_config(options.config);

    match evaluator.run(source, &root) {
        Ok(value) => {
            println!("{}", value.to_code_string());
            true
        }
        Err(err) => {
            report(source, &err);
            false
        }
    }
}

/// Interactive loop. Definitions persist across lines in one session environment.
pub fn repl(options: &Options) -> rustyline::Result<()> {
    println!("Egg interpreter v{}", VERSION);
    tracing::debug!(max_call_depth = options.config.max_call_depth, "starting session");

    let root = global_environment();
    let session = Rc::new(RefCell::new(Environment::new_enclosed(root)));
    let mut evaluator = Evaluator::new().with_config(options.config);

    let mut rl = DefaultEditor::new()?;
    loop {
        let readline = rl.readline("egg> ");
        match readline {
            Ok(line) => {
                if line.trim() == "exit" || line.trim() == "quit" {
                    break;
                }
                // Skip empty lines
                else if line.trim().is_empty() {
                    continue;
                }

                rl.add_history_entry(line.as_str())?;

                let program = match parse(&line) {
                    Ok(program) => program,
                    Err(err) => {
                        report(&line, &InterpreterError::Syntax(err));
                        continue;
                    }
                };

                if options.print_ast {
                    println!("{}", program);
                    continue;
                }

                match evaluator.eval(&program, &session) {
                    Ok(value) => println!("{}", value.to_code_string()),
                    Err(err) => report(&line, &InterpreterError::Runtime(err)),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err),
        }
    }

    Ok(())
}

fn report(source: &str, err: &InterpreterError) {
    match err {
        InterpreterError::Syntax(syntax) => {
            let (line, column) = line_col(source, syntax.position());
            println!("Error: {} (line {}, column {})", err, line, column);
        }
        InterpreterError::Runtime(_) => println!("Error: {}", err),
    }
}
