use crate::{env::Environment, formula::Formula};

// Simple brute-force search used as the reference in property tests
pub(crate) fn solve_brute_force(f: &Formula) -> Option<Environment> {
    let variables = f.variables();
    assert!(variables.len() <= 16); // just for safety

    for assignment in 0..2u32.pow(variables.len() as u32) {
        let env = variables
            .iter()
            .enumerate()
            .fold(Environment::new(), |env, (bit, &variable)| {
                if assignment & (1 << bit) == 0 {
                    env.put_true(variable)
                } else {
                    env.put_false(variable)
                }
            });

        if env.satisfies(f) {
            return Some(env);
        }
    }

    // no assignment is valid
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{Clause, Literal, Variable};

    fn p(x: usize) -> Literal {
        Literal::new(Variable::from_index(x).unwrap(), true)
    }
    fn n(x: usize) -> Literal {
        Literal::new(Variable::from_index(x).unwrap(), false)
    }

    #[test]
    fn solve_bcp_sat() {
        let c1: Clause = vec![p(0), p(1)].into_iter().collect();
        let c2: Clause = vec![n(0)].into_iter().collect();
        let f: Formula = vec![c1, c2].into_iter().collect();

        let env = solve_brute_force(&f).unwrap();
        assert!(env.satisfies(&f));
    }

    #[test]
    fn solve_bcp_unsat() {
        let c1: Clause = vec![p(0), p(1)].into_iter().collect();
        let c2: Clause = vec![n(0)].into_iter().collect();
        let c3: Clause = vec![n(1)].into_iter().collect();
        let f: Formula = vec![c1, c2, c3].into_iter().collect();

        assert_eq!(solve_brute_force(&f), None);
    }

    #[test]
    fn empty_clause_unsat() {
        let f = Formula::new().add_clause(Clause::new());
        assert_eq!(solve_brute_force(&f), None);
    }
}
