/*!
Solving a batch of independent instances and writing their results.
*/

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use rayon::prelude::*;

use crate::{
    assignment::Model,
    formula::Cnf,
    prelude::*,
    solver::Solver,
};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("I/O error occurred while writing results to '{}'", path.display()))]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Solves every formula with its own solver, in parallel.
/// Results are returned in input order.
pub fn solve_batch<T: Solver>(formulas: Vec<Cnf>) -> Vec<Option<Model>> {
    info!("Solving {} instances", formulas.len());

    formulas
        .into_par_iter()
        .enumerate()
        .map(|(index, formula)| {
            debug!("Instance {}: {}", index, formula);
            let outcome = T::new(formula).solve();
            if outcome.is_none() {
                info!("Instance {} is unsatisfiable", index);
            }
            outcome
        })
        .collect()
}

/// Formats one result line: the model's literals in binding order, or an
/// empty line when no model was found.
pub fn format_outcome(outcome: Option<&Model>) -> String {
    outcome.map(|model| model.to_string()).unwrap_or_default()
}

pub fn write_outcomes(mut writer: impl Write, outcomes: &[Option<Model>]) -> std::io::Result<()> {
    for outcome in outcomes {
        writeln!(writer, "{}", format_outcome(outcome.as_ref()))?;
    }
    writer.flush()
}

/// Writes one result line per instance to `path`.
pub fn write_outcomes_file(path: impl AsRef<Path>, outcomes: &[Option<Model>]) -> Result<(), Error> {
    let path = path.as_ref();
    let context = || WriteError {
        path: path.to_owned(),
    };

    let file = File::create(path).with_context(context)?;
    write_outcomes(BufWriter::new(file), outcomes).with_context(context)
}
