use crate::{assignment::Model, formula::Cnf};

mod dpll;
pub mod heuristics;

pub use dpll::{DpllSolver, SearchStats};

pub trait Solver {
    /// Creates a new solver instance.
    fn new(formula: Cnf) -> Self;

    /// Solves a CNF SAT problem with the solver.
    /// Returns `Some(Model)` if satisfiable, `None` otherwise.
    fn solve(self) -> Option<Model>;
}
