use paste::paste;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    assignment::Assignment,
    eval::formula_satisfied,
    formula::{Cnf, Literal},
    parser::{parse_dimacs, parse_instance},
    solver::{DpllSolver, Solver},
};

macro_rules! sat_testcase_with_solver {
    ($solver:ident, $name:ident, $text:expr) => {
        paste! {
            #[test]
            fn [< $solver:lower _sat_ $name >]() {
                let formula = parse_instance($text).unwrap();
                let solver = $solver::new(formula);
                let model = solver.solve().expect("instance should be satisfiable");
                assert!(formula_satisfied(model.formula().clauses(), model.assignment()));
            }
        }
    };
}

macro_rules! unsat_testcase_with_solver {
    ($solver:ident, $name:ident, $text:expr) => {
        paste! {
            #[test]
            fn [< $solver:lower _unsat_ $name >]() {
                let formula = parse_instance($text).unwrap();
                let solver = $solver::new(formula);
                assert!(solver.solve().is_none());
            }
        }
    };
}

macro_rules! sat_testcase {
    ($name:ident, $text:expr) => {
        sat_testcase_with_solver!(DpllSolver, $name, $text);
    };
}

macro_rules! unsat_testcase {
    ($name:ident, $text:expr) => {
        unsat_testcase_with_solver!(DpllSolver, $name, $text);
    };
}

sat_testcase!(single_positive, "a");
sat_testcase!(single_negative, "-a");
sat_testcase!(two_of_three, "a b\n-a b\na -b");
sat_testcase!(chain, "-a b\n-b c\n-c d\n-d e\na");
sat_testcase!(
    exactly_one,
    "a b c\n-a -b\n-a -c\n-b -c"
);
sat_testcase!(
    long_names,
    "rain -wet_grass\nsprinkler -wet_grass\nwet_grass\n-rain -sprinkler cloudy"
);
sat_testcase!(
    graph_coloring_triangle,
    "r1 g1 b1\nr2 g2 b2\nr3 g3 b3\n-r1 -r2\n-g1 -g2\n-b1 -b2\n-r2 -r3\n-g2 -g3\n-b2 -b3\n-r1 -r3\n-g1 -g3\n-b1 -b3"
);

unsat_testcase!(contradiction, "a\n-a");
unsat_testcase!(all_pairs, "a b\na -b\n-a b\n-a -b");
unsat_testcase!(
    chain_contradiction,
    "a\n-a b\n-b c\n-c"
);
unsat_testcase!(
    pigeonhole_3_2,
    "p11 p12\np21 p22\np31 p32\n-p11 -p21\n-p11 -p31\n-p21 -p31\n-p12 -p22\n-p12 -p32\n-p22 -p32"
);
unsat_testcase!(
    graph_coloring_k4_with_3_colors,
    "r1 g1 b1\nr2 g2 b2\nr3 g3 b3\nr4 g4 b4\n\
     -r1 -r2\n-g1 -g2\n-b1 -b2\n-r1 -r3\n-g1 -g3\n-b1 -b3\n-r1 -r4\n-g1 -g4\n-b1 -b4\n\
     -r2 -r3\n-g2 -g3\n-b2 -b3\n-r2 -r4\n-g2 -g4\n-b2 -b4\n-r3 -r4\n-g3 -g4\n-b3 -b4"
);

#[test]
fn dimacs_instance() {
    let formula = parse_dimacs("c small\np cnf 3 3\n1 2 0\n-1 3 0\n-3 -2 0\n").unwrap();
    let model = DpllSolver::new(formula).solve().unwrap();

    assert!(formula_satisfied(model.formula().clauses(), model.assignment()));
}

#[test]
fn solve_is_deterministic() {
    let text = "a b c\n-a -b\n-b -c\n-a -c\nd -a\n-d b c";
    let first = DpllSolver::new(parse_instance(text).unwrap()).solve().unwrap();
    let second = DpllSolver::new(parse_instance(text).unwrap()).solve().unwrap();

    assert_eq!(first.to_string(), second.to_string());
}

/// Builds a random 3-CNF over `num_variables` variables named `v0`, `v1`, ...
fn random_instance(rng: &mut StdRng, num_variables: usize, num_clauses: usize) -> String {
    let mut lines = Vec::with_capacity(num_clauses);

    for _ in 0..num_clauses {
        let mut picked: Vec<usize> = Vec::new();
        while picked.len() < 3 {
            let variable = rng.gen_range(0..num_variables);
            if !picked.contains(&variable) {
                picked.push(variable);
            }
        }

        let line = picked
            .iter()
            .map(|variable| {
                let sign = if rng.gen_bool(0.5) { "" } else { "-" };
                format!("{}v{}", sign, variable)
            })
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(line);
    }

    lines.join("\n")
}

/// Enumerates every total assignment.
fn brute_force_satisfiable(formula: &Cnf) -> bool {
    let variables: Vec<_> = formula.variables().collect();

    (0u32..1 << variables.len()).any(|bits| {
        let mut assignment = Assignment::new(formula.num_variables());
        for (shift, &variable) in variables.iter().enumerate() {
            assignment.assign(Literal::new(variable, bits & (1 << shift) != 0));
        }
        formula_satisfied(formula.clauses(), &assignment)
    })
}

#[test]
fn random_3sat_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(0x5a7);

    for round in 0..200 {
        let num_variables = rng.gen_range(3..=8);
        // Around the 4.26 clause/variable ratio, so both outcomes show up.
        let num_clauses = rng.gen_range(num_variables..=num_variables * 6);
        let text = random_instance(&mut rng, num_variables, num_clauses);

        let formula = parse_instance(&text).unwrap();
        let expected = brute_force_satisfiable(&formula);

        match DpllSolver::new(formula).solve() {
            Some(model) => {
                assert!(expected, "round {}: model found for UNSAT instance\n{}", round, text);
                assert!(formula_satisfied(model.formula().clauses(), model.assignment()));
            }
            None => assert!(!expected, "round {}: missed a model\n{}", round, text),
        }
    }
}
