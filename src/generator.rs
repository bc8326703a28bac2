/*!
Benchmark instance generators.
*/

use rand::{seq::index::sample, Rng};

use crate::formula::{Clause, Formula, Literal, Variable};

/// Draws a uniform random k-CNF formula.
///
/// Every clause has `width` distinct variables out of `num_variables`, each
/// with a random polarity.
///
/// # Panics
///
/// Panics when `width` is larger than `num_variables`.
pub fn random_k_cnf<R: Rng + ?Sized>(
    rng: &mut R,
    num_variables: usize,
    num_clauses: usize,
    width: usize,
) -> Formula {
    assert!(
        width <= num_variables,
        "clause width {} exceeds the {} available variables",
        width,
        num_variables
    );

    (0..num_clauses)
        .map(|_| {
            sample(rng, num_variables, width)
                .into_iter()
                .map(|index| Literal::new(Variable::from(index), rng.gen_bool(0.5)))
                .collect::<Clause>()
        })
        .collect()
}

/// The pigeonhole principle for `holes + 1` pigeons and `holes` holes,
/// which is unsatisfiable for every `holes >= 1`.
///
/// Variable `x(i * holes + j + 1)` states that pigeon `i` sits in hole `j`.
pub fn pigeonhole(holes: usize) -> Formula {
    let pigeons = holes + 1;
    let sits = |pigeon: usize, hole: usize| Variable::from(pigeon * holes + hole);

    let mut formula = Formula::new();

    // every pigeon sits somewhere
    for pigeon in 0..pigeons {
        formula = formula.add_clause(
            (0..holes)
                .map(|hole| Literal::new(sits(pigeon, hole), true))
                .collect(),
        );
    }

    // no hole holds two pigeons
    for hole in 0..holes {
        for first in 0..pigeons {
            for second in first + 1..pigeons {
                formula = formula.add_clause(
                    vec![
                        Literal::new(sits(first, hole), false),
                        Literal::new(sits(second, hole), false),
                    ]
                    .into_iter()
                    .collect(),
                );
            }
        }
    }

    formula
}
