use crate::{
    assignment::{Assignment, Model},
    eval,
    formula::{Cnf, Literal, Variable},
};

use super::{
    heuristics::{find_pure_literal, find_unit_clause},
    Solver,
};

/// Counters collected over one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub pure_literals: usize,
    pub unit_propagations: usize,
    pub decisions: usize,
    pub backtracks: usize,
}

#[derive(Clone, Copy, Debug)]
enum Reason {
    Pure,
    Unit,
    Decision,
}

#[derive(Debug)]
pub struct DpllSolver {
    formula: Cnf,
    /// Unassigned variables in canonical order
    pool: Vec<Variable>,
    assignment: Assignment,
    stats: SearchStats,
}

impl DpllSolver {
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Moves the literal's variable from the pool into the assignment.
    /// Returns the pool position it was taken from.
    fn assign_literal(&mut self, literal: Literal, reason: Reason) -> usize {
        let position = self
            .pool
            .iter()
            .position(|&variable| variable == literal.variable())
            .expect("unassigned variable must be in the pool");
        self.pool.remove(position);
        self.assignment.assign(literal);

        trace!(
            "{:?} {}{} at depth {}",
            reason,
            if literal.positive() { "" } else { "-" },
            self.formula.name(literal.variable()),
            self.assignment.len()
        );

        position
    }

    /// Undoes the latest binding and puts its variable back at `position`.
    fn pop_assignment(&mut self, position: usize) -> Literal {
        let literal = self
            .assignment
            .pop()
            .expect("pop_assignment called on an empty assignment");
        self.pool.insert(position, literal.variable());
        literal
    }

    /// Binds a literal implied by a heuristic and recurses.
    /// The binding is undone if the recursion fails.
    fn propagate(&mut self, literal: Literal, reason: Reason) -> bool {
        let position = self.assign_literal(literal, reason);
        if self.solve_inner() {
            return true;
        }
        self.pop_assignment(position);
        self.stats.backtracks += 1;

        false
    }

    /// Runs the recursive search from the current state.
    /// Returns true with the satisfying bindings left in place, or false with
    /// the state unchanged.
    fn solve_inner(&mut self) -> bool {
        let clauses = self.formula.clauses();

        if eval::formula_satisfied(clauses, &self.assignment) {
            return true;
        } else if eval::formula_falsified(clauses, &self.assignment) {
            return false;
        }

        if let Some(literal) = find_pure_literal(&self.pool, clauses, &self.assignment) {
            self.stats.pure_literals += 1;
            return self.propagate(literal, Reason::Pure);
        }

        if let Some(literal) = find_unit_clause(clauses, &self.assignment) {
            self.stats.unit_propagations += 1;
            return self.propagate(literal, Reason::Unit);
        }

        let variable = match self.pool.first() {
            Some(&variable) => variable,
            None => {
                // Every variable is bound, so one of the checks above must have decided.
                warn!("Undetermined formula with no variables left");
                return false;
            }
        };

        self.stats.decisions += 1;
        let literal = Literal::new(variable, true);

        let position = self.assign_literal(literal, Reason::Decision);
        if self.solve_inner() {
            return true;
        }
        self.assignment.pop();

        self.assignment.assign(!literal);
        trace!(
            "Flip -{} at depth {}",
            self.formula.name(variable),
            self.assignment.len()
        );
        if self.solve_inner() {
            return true;
        }
        self.pop_assignment(position);
        self.stats.backtracks += 1;

        false
    }
}

impl Solver for DpllSolver {
    fn new(formula: Cnf) -> Self {
        let pool = formula.variables().collect();
        let assignment = Assignment::new(formula.num_variables());

        DpllSolver {
            formula,
            pool,
            assignment,
            stats: Default::default(),
        }
    }

    fn solve(mut self) -> Option<Model> {
        let satisfiable = self.solve_inner();

        debug!(
            "{} after {:?}",
            if satisfiable { "SAT" } else { "UNSAT" },
            self.stats
        );

        if satisfiable {
            Some(Model::new(self.formula, self.assignment))
        } else {
            None
        }
    }
}
