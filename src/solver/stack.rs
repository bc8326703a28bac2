use crate::{
    config::SolverConfig,
    env::Environment,
    formula::{Formula, Literal},
};

use super::{
    step::{assume, decide, Decision},
    Deadline, Error, Prepared, SolveStats, Solver,
};

/// Pending work of the depth-first search.
#[derive(Debug)]
enum Frame {
    /// Decide what to do with a state.
    Visit {
        formula: Formula,
        env: Environment,
        depth: usize,
    },
    /// Run the negative branch of `literal` from the state it was decided in.
    Retry {
        formula: Formula,
        env: Environment,
        literal: Literal,
        depth: usize,
    },
}

/// DPLL driven by an explicit work list instead of the call stack.
///
/// Frames are explored in the same order as [`RecursiveSolver`] explores its
/// calls, so both drivers return the same environment.
///
/// [`RecursiveSolver`]: super::RecursiveSolver
#[derive(Debug)]
pub struct StackSolver {
    input: Prepared,
    config: SolverConfig,
    stats: SolveStats,
}

impl StackSolver {
    fn search(&mut self, deadline: &Deadline) -> Result<Option<Environment>, Error> {
        let mut work = vec![Frame::Visit {
            formula: self.input.formula.clone(),
            env: Environment::new(),
            depth: 0,
        }];

        while let Some(frame) = work.pop() {
            let (formula, env, depth) = match frame {
                Frame::Visit {
                    formula,
                    env,
                    depth,
                } => (formula, env, depth),
                Frame::Retry {
                    formula,
                    env,
                    literal,
                    depth,
                } => {
                    trace!("[{}] backtrack to {}", depth, !literal);
                    self.stats.backtracks += 1;

                    match assume(&formula, &env, !literal) {
                        Some((formula, env)) => (formula, env, depth + 1),
                        None => continue,
                    }
                }
            };

            deadline.check()?;
            self.stats.max_depth = self.stats.max_depth.max(depth);

            match decide(&formula) {
                Decision::Satisfied => return Ok(Some(env)),
                Decision::Conflict => self.stats.conflicts += 1,
                Decision::Forced(literal) => {
                    trace!("[{}] propagate {}", depth, literal);
                    self.stats.propagations += 1;

                    match assume(&formula, &env, literal) {
                        Some((formula, env)) => work.push(Frame::Visit {
                            formula,
                            env,
                            depth: depth + 1,
                        }),
                        None => self.stats.conflicts += 1,
                    }
                }
                Decision::Branch(literal) => {
                    trace!("[{}] decide {}", depth, literal);
                    self.stats.decisions += 1;

                    // Every clause has two or more literals here, so neither
                    // substitution can produce an empty clause.
                    let positive = assume(&formula, &env, literal);

                    // Below the positive branch, so it only runs once that fails.
                    work.push(Frame::Retry {
                        formula,
                        env,
                        literal,
                        depth,
                    });

                    if let Some((formula, env)) = positive {
                        work.push(Frame::Visit {
                            formula,
                            env,
                            depth: depth + 1,
                        });
                    }
                }
            }
        }

        Ok(None)
    }
}

impl Solver for StackSolver {
    fn new(formula: Formula, config: SolverConfig) -> Self {
        StackSolver {
            input: Prepared::new(formula, &config),
            config,
            stats: SolveStats::default(),
        }
    }

    fn solve(&mut self) -> Result<Option<Environment>, Error> {
        self.stats = SolveStats::default();
        let deadline = Deadline::start(self.config.timeout);

        let result = self
            .search(&deadline)?
            .map(|env| self.input.complete(env));
        debug!(
            "Stack search finished ({}): {:?}",
            if result.is_some() { "SAT" } else { "UNSAT" },
            self.stats
        );

        Ok(result)
    }

    fn stats(&self) -> &SolveStats {
        &self.stats
    }
}
