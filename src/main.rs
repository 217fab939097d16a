use std::{env::args, io, path::Path};

use dpll_sat::{
    batch::{self, solve_batch, write_outcomes, write_outcomes_file},
    parser::{self, parse_batch_file, parse_dimacs_file},
    prelude::*,
    report::Report,
    solver::{DpllSolver, Solver},
};
use pretty_env_logger::formatted_builder;

fn usage_string() -> String {
    format!(
        "Usage: {} <command>

command:
    solve <input> [output] - solve every instance of a batch file, one assignment per line
    check <file_name>      - solve a DIMACS CNF file and print SAT or UNSAT",
        args().next().unwrap_or_else(|| "dpll-sat".to_owned())
    )
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Unknown command '{}'\n\n{}", name, usage_string()))]
    UnknownCommand { name: String },
    #[snafu(display("Failed to parse input"))]
    ParserError { source: parser::Error },
    #[snafu(display("Failed to write results"))]
    OutputError { source: batch::Error },
    #[snafu(display("Failed to write results to stdout"))]
    StdoutError { source: io::Error },
    #[snafu(display("Required argument does not exist\n\n{}", usage_string()))]
    MissingArgument,
}

fn solve_command(input: &Path, output: Option<&Path>) -> Result<(), Error> {
    let formulas = parse_batch_file(input).context(ParserError)?;
    let outcomes = solve_batch::<DpllSolver>(formulas);

    match output {
        Some(path) => write_outcomes_file(path, &outcomes).context(OutputError)?,
        None => {
            let stdout = io::stdout();
            write_outcomes(stdout.lock(), &outcomes).context(StdoutError)?;
        }
    }

    Ok(())
}

fn check_command(path: &Path) -> Result<(), Error> {
    let formula = parse_dimacs_file(path).context(ParserError)?;
    let solver = DpllSolver::new(formula);

    match solver.solve() {
        Some(model) => println!("SAT {}", model),
        None => println!("UNSAT"),
    }

    Ok(())
}

fn dispatch_command(args: Vec<String>) -> Result<(), Error> {
    match args.get(0).map(|s| s.as_str()) {
        Some("solve") => {
            let input = args.get(1).context(MissingArgument)?;
            solve_command(Path::new(input), args.get(2).map(Path::new))?;
        }
        Some("check") => {
            let path = args.get(1).context(MissingArgument)?;
            check_command(Path::new(path))?;
        }
        Some(name) => UnknownCommand {
            name: name.to_owned(),
        }
        .fail()?,
        None => {
            println!("{}", usage_string());
        }
    }

    Ok(())
}

fn init_logger() {
    let mut builder = formatted_builder();

    if let Ok(s) = ::std::env::var("RUST_LOG") {
        builder.parse_filters(&s);
    } else if cfg!(debug_assertions) {
        builder.parse_filters("dpll_sat=debug");
    } else {
        builder.parse_filters("dpll_sat=warn");
    }

    builder.try_init().expect("Failed to initialize the logger");
}

fn main() -> Result<(), Report> {
    init_logger();

    // drop arg[0]
    let remaining: Vec<_> = args().skip(1).collect();
    dispatch_command(remaining)?;

    Ok(())
}
