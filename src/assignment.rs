/*!
Partial assignments built during search, and the models returned by a solver.
*/

use std::fmt::Display;

use typed_index_collections::TiVec;

use crate::{
    eval,
    formula::{Cnf, Literal, Variable},
};

/// A partial function from variables to truth values.
///
/// Bound literals are also kept in binding order (the trail), which is the
/// order used when the assignment is printed. Bindings are undone in stack
/// order with [`Assignment::pop`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Variable ID -> assigned value
    values: TiVec<Variable, Option<bool>>,
    trail: Vec<Literal>,
}

impl Assignment {
    pub fn new(num_variables: usize) -> Self {
        Assignment {
            values: vec![None; num_variables].into(),
            trail: Vec::with_capacity(num_variables),
        }
    }

    pub fn value(&self, variable: Variable) -> Option<bool> {
        self.values[variable]
    }

    /// Returns whether `literal` is true under this assignment, or `None` if
    /// its variable is unassigned.
    pub fn literal_value(&self, literal: Literal) -> Option<bool> {
        self.value(literal.variable())
            .map(|val| val == literal.positive())
    }

    pub fn is_assigned(&self, variable: Variable) -> bool {
        self.value(variable).is_some()
    }

    /// Binds the literal's variable so that the literal becomes true.
    pub fn assign(&mut self, literal: Literal) {
        debug_assert!(!self.is_assigned(literal.variable()));

        self.values[literal.variable()] = Some(literal.positive());
        self.trail.push(literal);
    }

    /// Removes the most recent binding and returns it.
    pub fn pop(&mut self) -> Option<Literal> {
        let literal = self.trail.pop()?;
        self.values[literal.variable()] = None;
        Some(literal)
    }

    pub fn len(&self) -> usize {
        self.trail.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trail.is_empty()
    }

    pub fn is_total(&self) -> bool {
        self.trail.len() == self.values.len()
    }

    /// Bound literals in binding order.
    pub fn trail(&self) -> &[Literal] {
        &self.trail
    }
}

/// Represents a satisfying assignment for a formula.
///
/// Variables irrelevant to satisfaction may be left unbound.
#[derive(Debug)]
pub struct Model {
    formula: Cnf,
    assignment: Assignment,
}

impl Model {
    /// Creates a new model from a formula and an assignment.
    ///
    /// # Panics
    ///
    /// Panics when `assignment` does not belong to `formula` or does not satisfy it.
    pub fn new(formula: Cnf, assignment: Assignment) -> Self {
        assert_eq!(assignment.values.len(), formula.num_variables());
        assert!(eval::formula_satisfied(formula.clauses(), &assignment));

        Model {
            formula,
            assignment,
        }
    }

    pub fn formula(&self) -> &Cnf {
        &self.formula
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Looks up the value bound to the variable called `name`.
    pub fn value_of(&self, name: &str) -> Option<bool> {
        self.formula
            .variable(name)
            .and_then(|variable| self.assignment.value(variable))
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, &literal) in self.assignment.trail().iter().enumerate() {
            if index != 0 {
                write!(f, " ")?;
            }
            self.formula.fmt_literal(f, literal, "-")?;
        }

        Ok(())
    }
}
