use std::time::{Duration, Instant};

use crate::{
    config::SolverConfig,
    env::Environment,
    formula::Formula,
    prelude::*,
};

mod recursive;
mod stack;
mod step;

pub use recursive::RecursiveSolver;
pub use stack::StackSolver;
pub use step::substitute;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Search gave up after {:?} (limit {:?})", elapsed, limit))]
    Timeout { elapsed: Duration, limit: Duration },
}

pub trait Solver {
    /// Creates a new solver instance.
    fn new(formula: Formula, config: SolverConfig) -> Self;

    /// Solves a CNF SAT problem with the solver.
    /// Returns `Some(Environment)` if satisfiable, `None` otherwise.
    fn solve(&mut self) -> Result<Option<Environment>, Error>;

    /// Counters collected by the last call to `solve`.
    fn stats(&self) -> &SolveStats;
}

/// Decides `formula` with the default solver and configuration.
///
/// The returned environment binds only the variables the search had to
/// decide; variables left unbound may take either value.
pub fn solve(formula: &Formula) -> Option<Environment> {
    let mut solver = StackSolver::new(formula.clone(), SolverConfig::default());
    match solver.solve() {
        Ok(result) => result,
        Err(e) => unreachable!("no deadline is configured: {}", e),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Binary branches entered.
    pub decisions: usize,
    /// Unit clauses resolved without branching.
    pub propagations: usize,
    /// States that contained an empty clause or failed substitution.
    pub conflicts: usize,
    /// Negative branches tried after the positive one failed.
    pub backtracks: usize,
    pub max_depth: usize,
}

/// The formula handed to the search, and the tautological clauses held back
/// from it when `drop_tautologies` is set.
#[derive(Debug)]
struct Prepared {
    formula: Formula,
    tautologies: Formula,
}

impl Prepared {
    fn new(formula: Formula, config: &SolverConfig) -> Self {
        if !config.drop_tautologies {
            return Prepared {
                formula,
                tautologies: Formula::new(),
            };
        }

        let (formula, tautologies) = formula.split_tautologies();
        debug!("Dropped {} tautological clauses", tautologies.len());

        Prepared {
            formula,
            tautologies,
        }
    }

    /// Binds one complementary variable of every held back clause the
    /// environment does not satisfy yet. Such a variable is always unbound.
    fn complete(&self, env: Environment) -> Environment {
        self.tautologies.clauses().fold(env, |env, clause| {
            if env.satisfies_clause(clause) {
                return env;
            }

            match clause.iter().find(|&literal| clause.contains(!literal)) {
                Some(literal) => env.assume(literal),
                None => env,
            }
        })
    }
}

/// Tracks the optional time limit of a search.
#[derive(Debug)]
struct Deadline {
    started: Instant,
    limit: Option<Duration>,
}

impl Deadline {
    fn start(limit: Option<Duration>) -> Self {
        Deadline {
            started: Instant::now(),
            limit,
        }
    }

    fn check(&self) -> Result<(), Error> {
        if let Some(limit) = self.limit {
            let elapsed = self.started.elapsed();
            ensure!(elapsed < limit, Timeout { elapsed, limit });
        }
        Ok(())
    }
}
