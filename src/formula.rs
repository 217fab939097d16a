/*!
A module to represent conjunctive normal form formula over named variables.
*/

use std::{collections::BTreeSet, fmt::Display, str::FromStr};

use typed_index_collections::TiVec;

use crate::prelude::*;

#[derive(Debug, Snafu)]
pub enum LiteralParseError {
    #[snafu(display("Literal has an empty variable name"))]
    EmptyName,
    #[snafu(display("Variable name '{}' must not start with '-'", name))]
    InvalidName { name: String },
}

/// Dense variable ID assigned when a formula is built.
/// IDs follow the lexicographic order of the variable names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(usize);

impl Variable {
    pub fn as_index(&self) -> usize {
        self.0
    }
}

impl From<usize> for Variable {
    fn from(index: usize) -> Self {
        Variable(index)
    }
}

impl From<Variable> for usize {
    fn from(variable: Variable) -> Self {
        variable.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal {
    variable: Variable,
    positive: bool,
}

impl Literal {
    pub fn new(variable: Variable, positive: bool) -> Self {
        Literal { variable, positive }
    }

    pub fn variable(&self) -> Variable {
        self.variable
    }

    pub fn positive(&self) -> bool {
        self.positive
    }
}

impl std::ops::Not for Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        Literal {
            variable: self.variable,
            positive: !self.positive,
        }
    }
}

/// A literal as it appears in the input text, before variable IDs are assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedLiteral {
    name: String,
    positive: bool,
}

impl NamedLiteral {
    pub fn new(name: impl Into<String>, positive: bool) -> Self {
        NamedLiteral {
            name: name.into(),
            positive,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn positive(&self) -> bool {
        self.positive
    }
}

impl FromStr for NamedLiteral {
    type Err = LiteralParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (positive, name) = if let Some(stripped) = s.strip_prefix('-') {
            (false, stripped)
        } else {
            (true, s)
        };

        ensure!(!name.is_empty(), EmptyName);
        ensure!(!name.starts_with('-'), InvalidName { name });

        Ok(NamedLiteral::new(name, positive))
    }
}

impl Display for NamedLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", if self.positive { "" } else { "-" }, self.name)
    }
}

/// Disjunction of literals.
/// Invariant: a variable appears at most once.
#[derive(Debug, Clone)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Self {
        debug_assert!(
            literals
                .iter()
                .map(|literal| literal.variable())
                .collect::<BTreeSet<_>>()
                .len()
                == literals.len(),
            "a variable may appear only once in a clause"
        );

        Self { literals }
    }

    pub fn num_literals(&self) -> usize {
        self.literals.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Literal> + '_ {
        self.literals.iter().copied()
    }

    /// Returns the polarity with which `variable` occurs in this clause.
    pub fn polarity_of(&self, variable: Variable) -> Option<bool> {
        self.literals
            .iter()
            .find(|literal| literal.variable() == variable)
            .map(|literal| literal.positive())
    }
}

/// Formula representation in Conjunctive Normal Form
#[derive(Debug, Clone)]
pub struct Cnf {
    /// Variable ID -> name, sorted
    names: TiVec<Variable, String>,
    clauses: Vec<Clause>,
}

impl Cnf {
    pub fn num_variables(&self) -> usize {
        self.names.len()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Iterates variables in canonical (sorted name) order.
    pub fn variables(&self) -> impl Iterator<Item = Variable> {
        (0..self.names.len()).map(Variable::from)
    }

    pub fn name(&self, variable: Variable) -> &str {
        &self.names[variable]
    }

    pub fn variable(&self, name: &str) -> Option<Variable> {
        self.names
            .raw
            .binary_search_by(|candidate| candidate.as_str().cmp(name))
            .ok()
            .map(Variable::from)
    }

    pub(crate) fn fmt_literal(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        literal: Literal,
        negation: &str,
    ) -> std::fmt::Result {
        write!(
            f,
            "{}{}",
            if literal.positive() { "" } else { negation },
            self.name(literal.variable())
        )
    }
}

impl Display for Cnf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CNF with {} variables (", self.num_variables())?;

        for (clause_index, clause) in self.clauses.iter().enumerate() {
            if clause_index != 0 {
                write!(f, " ∧ ")?;
            }

            write!(f, "(")?;
            for (literal_index, literal) in clause.iter().enumerate() {
                if literal_index != 0 {
                    write!(f, " ∨ ")?;
                }
                self.fmt_literal(f, literal, "¬")?;
            }
            write!(f, ")")?;
        }

        write!(f, ")")?;

        Ok(())
    }
}

/// Collects clauses of named literals and interns the names into a [`Cnf`].
#[derive(Debug, Default)]
pub struct CnfBuilder {
    clauses: Vec<Vec<NamedLiteral>>,
}

impl CnfBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Adds a clause. The caller guarantees that no name is repeated.
    pub fn add_clause(&mut self, clause: Vec<NamedLiteral>) {
        self.clauses.push(clause);
    }

    pub fn build(self) -> Cnf {
        let names: TiVec<Variable, String> = self
            .clauses
            .iter()
            .flatten()
            .map(|literal| literal.name().to_owned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>()
            .into();

        let mut cnf = Cnf {
            names,
            clauses: Vec::with_capacity(self.clauses.len()),
        };

        for named in self.clauses {
            let literals = named
                .iter()
                .map(|literal| {
                    let variable = cnf
                        .variable(literal.name())
                        .expect("every clause name was interned");
                    Literal::new(variable, literal.positive())
                })
                .collect();
            cnf.clauses.push(Clause::new(literals));
        }

        cnf
    }
}
