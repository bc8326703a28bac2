use std::{
    env::args,
    fs::File,
    io::{stdout, BufWriter},
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use log::info;
use persat::{
    config::{self, SolverConfig},
    env::Environment,
    formula::Formula,
    generator::{pigeonhole, random_k_cnf},
    output::{write_assignment, write_solution, Model},
    parser::{self, parse_file},
    prelude::*,
    report::Report,
    solver::{self, RecursiveSolver, Solver, StackSolver},
};
use pretty_env_logger::formatted_builder;
use rand::{rngs::StdRng, SeedableRng};

fn usage_string() -> String {
    format!(
        "Usage: {0} <solver_name> <command>
       {0} generate <generator>

solver_name: recursive, stack

command:
    check <file_name> - print whether the formula is satisfiable
    solve <file_name> <output_file> - write the assignment of every variable
    competition <file_name> - print the result in SAT competition format

generator:
    random <num_variables> <num_clauses> <width> [seed] - uniform random k-CNF
    pigeonhole <holes> - holes + 1 pigeons in <holes> holes

environment:
    {1} - give up after this many milliseconds
    {2} - drop tautological clauses before solving",
        args().next().unwrap_or_else(|| "persat".to_owned()),
        config::TIMEOUT_VAR,
        config::DROP_TAUTOLOGIES_VAR,
    )
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Unknown solver '{}'\n\n{}", name, usage_string()))]
    UnknownSolver { name: String },
    #[snafu(display("Unknown command '{}'\n\n{}", name, usage_string()))]
    UnknownCommand { name: String },
    #[snafu(display("Unknown generator '{}'\n\n{}", name, usage_string()))]
    UnknownGenerator { name: String },
    #[snafu(display("Failed to parse CNF"))]
    ParserError { source: parser::Error },
    #[snafu(display("Invalid solver configuration"))]
    ConfigError { source: config::Error },
    #[snafu(display("Solver did not finish"))]
    SolverError { source: solver::Error },
    #[snafu(display("Argument '{}' is not a valid {}", value, what))]
    InvalidArgument {
        value: String,
        what: &'static str,
        source: std::num::ParseIntError,
    },
    #[snafu(display(
        "Clause width {} exceeds the {} available variables",
        width,
        num_variables
    ))]
    InvalidWidth { width: usize, num_variables: usize },
    #[snafu(display("Failed to write '{}'", path.display()))]
    OutputError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to write to standard output"))]
    StdoutError { source: std::io::Error },
    #[snafu(display("Required argument does not exist\n\n{}", usage_string()))]
    MissingArgument,
}

struct Solved {
    formula: Formula,
    result: Option<Environment>,
    elapsed: Duration,
}

impl Solved {
    fn millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

fn solve_path<T: Solver>(path: &Path) -> Result<Solved, Error> {
    let formula = parse_file(path).context(ParserError)?;
    let config = SolverConfig::from_env().context(ConfigError)?;
    let mut solver = T::new(formula.clone(), config);

    let started = Instant::now();
    let result = solver.solve().context(SolverError)?;
    let elapsed = started.elapsed();
    info!("Search statistics: {:?}", solver.stats());

    Ok(Solved {
        formula,
        result,
        elapsed,
    })
}

fn dispatch_command<T: Solver>(args: Vec<String>) -> Result<(), Error> {
    match args.get(0).map(|s| s.as_str()) {
        Some("check") => {
            let path = args.get(1).context(MissingArgument)?;
            let solved = solve_path::<T>(path.as_ref())?;
            println!("Time: {:.3}ms", solved.millis());
            if let Some(env) = &solved.result {
                println!("SAT {}", Model::new(&solved.formula, env));
            } else {
                println!("UNSAT");
            }
        }
        Some("solve") => {
            let path = args.get(1).context(MissingArgument)?;
            let output = PathBuf::from(args.get(2).context(MissingArgument)?);
            let solved = solve_path::<T>(path.as_ref())?;
            println!("Time: {:.3}ms", solved.millis());
            if let Some(env) = &solved.result {
                println!("satisfiable");
                let file = File::create(&output).context(OutputError {
                    path: output.clone(),
                })?;
                write_assignment(BufWriter::new(file), &solved.formula, env).context(
                    OutputError {
                        path: output.clone(),
                    },
                )?;
            } else {
                println!("not satisfiable");
            }
        }
        Some("competition") => {
            let path = args.get(1).context(MissingArgument)?;
            let solved = solve_path::<T>(path.as_ref())?;
            println!("c solved in {:.3}ms", solved.millis());
            write_solution(
                BufWriter::new(stdout()),
                &solved.formula,
                solved.result.as_ref(),
            )
            .context(StdoutError)?;
        }
        Some(name) => UnknownCommand {
            name: name.to_owned(),
        }
        .fail()?,
        None => MissingArgument.fail()?,
    }

    Ok(())
}

fn numeric_arg<T>(args: &[String], index: usize, what: &'static str) -> Result<T, Error>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    let value = args.get(index).context(MissingArgument)?;
    value
        .parse()
        .context(InvalidArgument { value, what })
}

fn generate(args: Vec<String>) -> Result<(), Error> {
    let formula = match args.get(0).map(|s| s.as_str()) {
        Some("random") => {
            let num_variables: usize = numeric_arg(&args, 1, "number of variables")?;
            let num_clauses: usize = numeric_arg(&args, 2, "number of clauses")?;
            let width: usize = numeric_arg(&args, 3, "clause width")?;
            ensure!(
                width <= num_variables,
                InvalidWidth {
                    width,
                    num_variables
                }
            );

            let mut rng = if args.len() > 4 {
                StdRng::seed_from_u64(numeric_arg(&args, 4, "seed")?)
            } else {
                StdRng::from_entropy()
            };
            random_k_cnf(&mut rng, num_variables, num_clauses, width)
        }
        Some("pigeonhole") => pigeonhole(numeric_arg(&args, 1, "number of holes")?),
        Some(name) => UnknownGenerator {
            name: name.to_owned(),
        }
        .fail()?,
        None => MissingArgument.fail()?,
    };

    formula
        .write_dimacs(BufWriter::new(stdout()))
        .context(StdoutError)
}

fn init_logger() {
    let mut builder = formatted_builder();

    if let Ok(s) = ::std::env::var("RUST_LOG") {
        builder.parse_filters(&s);
    } else {
        if cfg!(debug_assertions) {
            builder.parse_filters("persat=debug");
        } else {
            builder.parse_filters("persat=warn");
        }
    }

    builder.try_init().expect("Failed to initialize the logger");
}

fn main() -> Result<(), Report> {
    init_logger();

    let mut args = args();

    // drop arg[0]
    args.next();

    // solver name
    let solver_name = args.next();
    let remaining: Vec<_> = args.collect();

    match solver_name.as_deref() {
        Some("recursive") => dispatch_command::<RecursiveSolver>(remaining)?,
        Some("stack") => dispatch_command::<StackSolver>(remaining)?,
        Some("generate") => generate(remaining)?,
        Some(name) => UnknownSolver {
            name: name.to_owned(),
        }
        .fail()?,
        None => {
            println!("{}", usage_string());
        }
    }

    Ok(())
}
