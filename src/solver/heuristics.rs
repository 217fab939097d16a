/*!
Pure-literal and unit-clause detection.
*/

use crate::{
    assignment::Assignment,
    eval::{clause_satisfied, ClauseStatus},
    formula::{Clause, Literal, Variable},
};

/// Finds the first clause that forces an assignment and returns the forced literal.
///
/// A single-literal clause is a unit clause as long as its variable is open.
/// Otherwise a clause with no true literal and exactly one unassigned
/// literal forces that literal.
pub fn find_unit_clause(clauses: &[Clause], assignment: &Assignment) -> Option<Literal> {
    for clause in clauses {
        if clause.num_literals() == 1 {
            let literal = clause.iter().next()?;
            if !assignment.is_assigned(literal.variable()) {
                return Some(literal);
            }
            continue;
        }

        if let ClauseStatus::Unit(literal) = ClauseStatus::of(clause, assignment) {
            return Some(literal);
        }
    }

    None
}

/// Finds the first variable of `pool` that occurs with a single polarity in
/// the clauses not yet satisfied.
pub fn find_pure_literal(
    pool: &[Variable],
    clauses: &[Clause],
    assignment: &Assignment,
) -> Option<Literal> {
    let open: Vec<&Clause> = clauses
        .iter()
        .filter(|clause| !clause_satisfied(clause, assignment))
        .collect();

    'variables: for &variable in pool {
        let mut sign = None;

        for clause in &open {
            match (clause.polarity_of(variable), sign) {
                (None, _) => (),
                (Some(polarity), None) => sign = Some(polarity),
                (Some(polarity), Some(expected)) if polarity != expected => continue 'variables,
                (Some(_), Some(_)) => (),
            }
        }

        if let Some(polarity) = sign {
            return Some(Literal::new(variable, polarity));
        }
    }

    None
}
