/*!
Truth evaluation of clauses and formulas under a partial assignment.
*/

use crate::{
    assignment::Assignment,
    formula::{Clause, Literal},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseStatus {
    /// At least one literal is true.
    Satisfied,
    /// Every literal is assigned and false.
    Falsified,
    /// No literal is true and exactly one is unassigned.
    Unit(Literal),
    Unresolved,
}

impl ClauseStatus {
    pub fn of(clause: &Clause, assignment: &Assignment) -> Self {
        let total = clause.num_literals();
        let mut unsatisfied = 0;
        let mut unresolved = None;

        for literal in clause.iter() {
            match assignment.literal_value(literal) {
                Some(true) => return ClauseStatus::Satisfied,
                Some(false) => unsatisfied += 1,
                None => unresolved = Some(literal),
            }
        }

        match unresolved {
            None => ClauseStatus::Falsified,
            Some(literal) if unsatisfied + 1 == total => ClauseStatus::Unit(literal),
            Some(_) => ClauseStatus::Unresolved,
        }
    }
}

/// Returns true iff some literal of the clause is true.
/// An undetermined clause is not satisfied.
pub fn clause_satisfied(clause: &Clause, assignment: &Assignment) -> bool {
    clause
        .iter()
        .any(|literal| assignment.literal_value(literal) == Some(true))
}

/// Returns true iff some clause has all of its variables assigned and no true literal.
pub fn formula_falsified(clauses: &[Clause], assignment: &Assignment) -> bool {
    clauses
        .iter()
        .any(|clause| ClauseStatus::of(clause, assignment) == ClauseStatus::Falsified)
}

pub fn formula_satisfied(clauses: &[Clause], assignment: &Assignment) -> bool {
    clauses
        .iter()
        .all(|clause| clause_satisfied(clause, assignment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_instance;

    #[test]
    fn partial_clause_is_neither_satisfied_nor_falsified() {
        let cnf = parse_instance("a b").unwrap();
        let a = cnf.variable("a").unwrap();
        let mut assignment = Assignment::new(cnf.num_variables());
        assignment.assign(Literal::new(a, false));

        let clause = &cnf.clauses()[0];
        assert!(!clause_satisfied(clause, &assignment));
        assert!(!formula_falsified(cnf.clauses(), &assignment));
        assert!(!formula_satisfied(cnf.clauses(), &assignment));
        assert_eq!(
            ClauseStatus::of(clause, &assignment),
            ClauseStatus::Unit(Literal::new(cnf.variable("b").unwrap(), true))
        );
    }

    #[test]
    fn total_assignment_is_satisfied_xor_falsified() {
        let cnf = parse_instance("a b\n-a b\na -b").unwrap();
        let a = cnf.variable("a").unwrap();
        let b = cnf.variable("b").unwrap();

        for &(va, vb) in &[(true, true), (true, false), (false, true), (false, false)] {
            let mut assignment = Assignment::new(cnf.num_variables());
            assignment.assign(Literal::new(a, va));
            assignment.assign(Literal::new(b, vb));

            let satisfied = formula_satisfied(cnf.clauses(), &assignment);
            let falsified = formula_falsified(cnf.clauses(), &assignment);
            assert_ne!(satisfied, falsified);
            assert_eq!(satisfied, va && vb);
        }
    }

    #[test]
    fn empty_assignment_decides_nothing() {
        let cnf = parse_instance("a\n-a").unwrap();
        let assignment = Assignment::new(cnf.num_variables());

        assert!(!formula_satisfied(cnf.clauses(), &assignment));
        assert!(!formula_falsified(cnf.clauses(), &assignment));
    }
}
