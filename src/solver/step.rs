//! The pieces of a DPLL step shared by every search driver.

use crate::{
    env::Environment,
    formula::{Clause, Formula, Literal},
};

/// What to do with a formula state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decision {
    /// No clause is left: the environment satisfies the input.
    Satisfied,
    /// Some clause is empty: no assignment extends the environment.
    Conflict,
    /// The smallest clause is a unit clause whose literal must hold.
    Forced(Literal),
    /// Try the literal first, then its negation.
    Branch(Literal),
}

/// Returns the clause with the fewest literals; ties go to the clause met
/// first.
pub(crate) fn select_clause(formula: &Formula) -> Option<&Clause> {
    formula.clauses().min_by_key(|clause| clause.size())
}

pub(crate) fn decide(formula: &Formula) -> Decision {
    let smallest = match select_clause(formula) {
        None => return Decision::Satisfied,
        Some(clause) => clause,
    };

    // An empty clause is always the smallest one.
    if smallest.is_empty() {
        return Decision::Conflict;
    }

    let literal = smallest.choose_literal();
    if smallest.is_unit() {
        Decision::Forced(literal)
    } else {
        Decision::Branch(literal)
    }
}

/// Simplifies `formula` under the assumption that `literal` is true.
///
/// Satisfied clauses are dropped and the negation of `literal` is removed
/// from the others. Returns `None` as soon as a clause is (or becomes)
/// empty. Surviving clauses keep their relative order.
pub fn substitute(formula: &Formula, literal: Literal) -> Option<Formula> {
    let negation = !literal;

    formula
        .clauses()
        .filter(|clause| !clause.contains(literal))
        .map(|clause| {
            let clause = if clause.contains(negation) {
                clause.reduce(literal)
            } else {
                clause.clone()
            };

            if clause.is_empty() {
                None
            } else {
                Some(clause)
            }
        })
        .collect()
}

/// Substitutes `literal` and records it in the environment.
pub(crate) fn assume(
    formula: &Formula,
    env: &Environment,
    literal: Literal,
) -> Option<(Formula, Environment)> {
    let simplified = substitute(formula, literal)?;
    Some((simplified, env.assume(literal)))
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{
        formula::Variable,
        generator::{pigeonhole, random_k_cnf},
    };

    fn p(x: usize) -> Literal {
        Literal::new(Variable::from_index(x).unwrap(), true)
    }

    fn n(x: usize) -> Literal {
        Literal::new(Variable::from_index(x).unwrap(), false)
    }

    fn formula(clauses: Vec<Vec<Literal>>) -> Formula {
        clauses
            .into_iter()
            .map(|literals| literals.into_iter().collect::<Clause>())
            .collect()
    }

    #[test]
    fn decide_on_trivial_formulas() {
        assert_eq!(decide(&Formula::new()), Decision::Satisfied);
        assert_eq!(
            decide(&formula(vec![vec![p(0), p(1)], vec![]])),
            Decision::Conflict
        );
    }

    #[test]
    fn smallest_clause_wins_and_ties_go_first() {
        let f = formula(vec![
            vec![p(0), p(1), p(2)],
            vec![n(3), p(4)],
            vec![p(5), n(6)],
        ]);
        assert_eq!(decide(&f), Decision::Branch(n(3)));

        let f = formula(vec![vec![p(0), p(1)], vec![n(2)], vec![p(3)]]);
        assert_eq!(decide(&f), Decision::Forced(n(2)));
    }

    #[test]
    fn substitute_drops_and_reduces() {
        let f = formula(vec![
            vec![p(0), p(1)],
            vec![n(0), p(2)],
            vec![p(3)],
            vec![n(0), n(1), p(2)],
        ]);

        let result = substitute(&f, p(0)).unwrap();
        assert_eq!(
            result,
            formula(vec![vec![p(2)], vec![p(3)], vec![n(1), p(2)]])
        );
        assert_eq!(f.len(), 4, "the input formula must stay untouched");
    }

    #[test]
    fn substitute_reports_empty_clauses() {
        let already_empty = formula(vec![vec![p(1)], vec![]]);
        assert_eq!(substitute(&already_empty, p(0)), None);

        let becomes_empty = formula(vec![vec![p(1), p(2)], vec![n(0)]]);
        assert_eq!(substitute(&becomes_empty, p(0)), None);
    }

    #[test]
    fn substitute_is_idempotent() {
        let f = formula(vec![
            vec![p(0), n(1)],
            vec![n(0), p(2), p(3)],
            vec![p(1), n(3)],
        ]);

        let once = substitute(&f, n(0)).unwrap();
        let twice = substitute(&once, n(0)).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn branch_literal_substitutes_both_ways() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut formulas = vec![pigeonhole(2), pigeonhole(3)];
        for width in 2..=4 {
            formulas.extend((0..20).map(|_| random_k_cnf(&mut rng, 8, 30, width)));
        }

        for f in formulas {
            if let Decision::Branch(literal) = decide(&f) {
                assert!(substitute(&f, literal).is_some(), "{} under {}", f, literal);
                assert!(substitute(&f, !literal).is_some(), "{} under {}", f, !literal);
            }
        }
    }

    #[test]
    fn assume_binds_the_literal() {
        let f = formula(vec![vec![n(0), p(1)]]);
        let (simplified, env) = assume(&f, &Environment::new(), n(0)).unwrap();

        assert!(simplified.is_empty());
        assert_eq!(env.get(n(0).variable()), crate::env::Value::False);
    }
}
