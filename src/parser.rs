use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::formula::{Cnf, CnfBuilder, LiteralParseError, NamedLiteral};
use crate::prelude::*;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("I/O error occurred while reading '{}'", path.display()))]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Invalid literal found on line {}: '{}'", line, clause))]
    MalformedLiteral {
        line: usize,
        clause: String,
        source: LiteralParseError,
    },
    #[snafu(display("Variable '{}' appears with both polarities in clause '{}'", name, clause))]
    ContradictoryLiteral { clause: String, name: String },
    #[snafu(display("Input does not contain any clause"))]
    EmptyFormula,
    #[snafu(display("Problem line 'p cnf <num_variables> <num_clauses>' is not found"))]
    MalformedProblemDefinition,
    #[snafu(display("Failed to parse line '{}' as clause", clause))]
    MalformedClause { clause: String },
    #[snafu(display("Invalid variable found in clause '{}'", clause))]
    MalformedVariable {
        clause: String,
        source: std::num::ParseIntError,
    },
    #[snafu(display(
        "Variable {} in clause '{}' is out of range (must be within 1 to {})",
        num,
        clause,
        max
    ))]
    VariableOutOfRange { clause: String, num: u64, max: u64 },
    #[snafu(display(
        "The number of clauses ({}) does not match the clauses number in the problem definition ({})",
        found,
        expected,
    ))]
    ClauseCountMismatch { expected: usize, found: usize },
}

/// Adds `literal` to `clause` unless the same literal is already there.
/// A variable repeated with the opposite sign is rejected.
fn push_literal(
    clause: &mut Vec<NamedLiteral>,
    literal: NamedLiteral,
    text: &str,
) -> Result<(), Error> {
    match clause.iter().find(|seen| seen.name() == literal.name()) {
        Some(seen) => {
            ensure!(
                seen.positive() == literal.positive(),
                ContradictoryLiteral {
                    clause: text,
                    name: literal.name(),
                }
            );
        }
        None => clause.push(literal),
    }

    Ok(())
}

/// Parse a line of whitespace separated literals to a clause
fn parse_line(text: &str, line: usize) -> Result<Vec<NamedLiteral>, Error> {
    let mut clause = Vec::new();

    for token in text.split_whitespace() {
        let literal = token
            .parse::<NamedLiteral>()
            .with_context(|| MalformedLiteral {
                line,
                clause: text.to_owned(),
            })?;
        push_literal(&mut clause, literal, text)?;
    }

    Ok(clause)
}

/// Parses a single instance: one clause per non-blank line.
pub fn parse_instance(text: &str) -> Result<Cnf, Error> {
    let mut builder = CnfBuilder::new();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        builder.add_clause(parse_line(line, index + 1)?);
    }

    ensure!(builder.num_clauses() > 0, EmptyFormula);

    Ok(builder.build())
}

/// Parses a batch of instances separated by blank lines.
pub fn parse_batch(text: &str) -> Result<Vec<Cnf>, Error> {
    let mut formulas = Vec::new();
    let mut builder = CnfBuilder::new();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            if builder.num_clauses() > 0 {
                formulas.push(std::mem::take(&mut builder).build());
            }
            continue;
        }
        builder.add_clause(parse_line(line, index + 1)?);
    }

    if builder.num_clauses() > 0 {
        formulas.push(builder.build());
    }

    ensure!(!formulas.is_empty(), EmptyFormula);

    Ok(formulas)
}

fn read_file(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).context(IoError {
        path: path.to_owned(),
    })
}

/// Parses a batch of instances from a file
pub fn parse_batch_file(path: impl AsRef<Path>) -> Result<Vec<Cnf>, Error> {
    parse_batch(&read_file(path.as_ref())?)
}

/// Parse a DIMACS line to a clause
fn parse_dimacs_line(line: &str, num_variables: u64) -> Result<Vec<NamedLiteral>, Error> {
    let mut clause = Vec::new();

    let splitted = line.split_whitespace().collect::<Vec<_>>();

    ensure!(
        splitted.last() == Some(&"0"),
        MalformedClause {
            clause: line.to_owned(),
        }
    );

    for s in &splitted[..splitted.len() - 1] {
        let value = s.parse::<i64>().with_context(|| MalformedVariable {
            clause: line.to_owned(),
        })?;
        let num = value.unsigned_abs();
        ensure!(
            num != 0 && num <= num_variables,
            VariableOutOfRange {
                clause: line.to_owned(),
                num,
                max: num_variables,
            }
        );
        push_literal(&mut clause, NamedLiteral::new(num.to_string(), value > 0), line)?;
    }

    Ok(clause)
}

/// Parses a DIMACS CNF formula.
/// Variables are named by their decimal IDs.
pub fn parse_dimacs(text: &str) -> Result<Cnf, Error> {
    // skip until we find the problem definition
    let mut lines = text
        .lines()
        .map(str::trim)
        .skip_while(|line| !line.starts_with('p'));

    let prob_line = lines
        .next()
        .ok_or_else(|| MalformedProblemDefinition.build())?;

    let splitted = prob_line.split_whitespace().collect::<Vec<_>>();

    // We only support CNF DIMACS format
    ensure!(
        splitted.len() == 4 && splitted[0] == "p" && splitted[1] == "cnf",
        MalformedProblemDefinition
    );

    let (num_variables, num_clauses) =
        match (splitted[2].parse::<u64>(), splitted[3].parse::<usize>()) {
            (Ok(num_variables), Ok(num_clauses)) => (num_variables, num_clauses),
            _ => return MalformedProblemDefinition.fail(),
        };

    let mut builder = CnfBuilder::new();

    for line in lines {
        if line.is_empty() || line.starts_with('c') {
            // empty line, comment
            continue;
        }
        builder.add_clause(parse_dimacs_line(line, num_variables)?);
    }

    ensure!(
        builder.num_clauses() == num_clauses,
        ClauseCountMismatch {
            found: builder.num_clauses(),
            expected: num_clauses,
        }
    );
    ensure!(num_clauses > 0, EmptyFormula);

    Ok(builder.build())
}

/// Parses a DIMACS CNF formula from a file
pub fn parse_dimacs_file(path: impl AsRef<Path>) -> Result<Cnf, Error> {
    parse_dimacs(&read_file(path.as_ref())?)
}
