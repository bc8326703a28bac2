use crate::{config::SolverConfig, env::Environment, formula::Formula};

use super::{
    step::{assume, decide, Decision},
    Deadline, Error, Prepared, SolveStats, Solver,
};

/// DPLL as a plain recursive function: one stack frame per search step.
///
/// Stack depth grows with the number of variables, prefer [`StackSolver`]
/// for large instances.
///
/// [`StackSolver`]: super::StackSolver
#[derive(Debug)]
pub struct RecursiveSolver {
    input: Prepared,
    config: SolverConfig,
    stats: SolveStats,
}

impl RecursiveSolver {
    fn search(
        &mut self,
        deadline: &Deadline,
        formula: Formula,
        env: Environment,
        depth: usize,
    ) -> Result<Option<Environment>, Error> {
        deadline.check()?;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        match decide(&formula) {
            Decision::Satisfied => Ok(Some(env)),
            Decision::Conflict => {
                self.stats.conflicts += 1;
                Ok(None)
            }
            Decision::Forced(literal) => {
                trace!("[{}] propagate {}", depth, literal);
                self.stats.propagations += 1;

                match assume(&formula, &env, literal) {
                    Some((formula, env)) => self.search(deadline, formula, env, depth + 1),
                    None => {
                        self.stats.conflicts += 1;
                        Ok(None)
                    }
                }
            }
            Decision::Branch(literal) => {
                trace!("[{}] decide {}", depth, literal);
                self.stats.decisions += 1;

                // Every clause has two or more literals here, so neither
                // substitution can produce an empty clause.
                if let Some((simplified, assumed)) = assume(&formula, &env, literal) {
                    if let Some(found) = self.search(deadline, simplified, assumed, depth + 1)? {
                        return Ok(Some(found));
                    }
                }

                // Retry from the state before `literal` was assumed.
                trace!("[{}] backtrack to {}", depth, !literal);
                self.stats.backtracks += 1;

                match assume(&formula, &env, !literal) {
                    Some((formula, env)) => self.search(deadline, formula, env, depth + 1),
                    None => Ok(None),
                }
            }
        }
    }
}

impl Solver for RecursiveSolver {
    fn new(formula: Formula, config: SolverConfig) -> Self {
        RecursiveSolver {
            input: Prepared::new(formula, &config),
            config,
            stats: SolveStats::default(),
        }
    }

    fn solve(&mut self) -> Result<Option<Environment>, Error> {
        self.stats = SolveStats::default();
        let deadline = Deadline::start(self.config.timeout);

        let formula = self.input.formula.clone();
        let result = self
            .search(&deadline, formula, Environment::new(), 0)?
            .map(|env| self.input.complete(env));
        debug!(
            "Recursive search finished ({}): {:?}",
            if result.is_some() { "SAT" } else { "UNSAT" },
            self.stats
        );

        Ok(result)
    }

    fn stats(&self) -> &SolveStats {
        &self.stats
    }
}
