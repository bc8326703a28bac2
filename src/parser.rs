use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::{Path, PathBuf},
};

use crate::formula::{Clause, Formula, Literal, VariableParseError};
use crate::prelude::*;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Failed to open CNF file '{}'", path.display()))]
    OpenError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("I/O error occurred while reading CNF input"))]
    ReadError { source: std::io::Error },
    #[snafu(display("Failed to parse CNF file '{}'", path.display()))]
    FileError { path: PathBuf, source: Box<Error> },
    #[snafu(display("Failed to parse line '{}' as clause", clause))]
    MalformedClause { clause: String },
    #[snafu(display("Invalid variable found in clause '{}'", clause))]
    MalformedVariable {
        clause: String,
        source: VariableParseError,
    },
    #[snafu(display(
        "Problem line '{}' is malformed (expected 'p cnf <num_variables> <num_clauses>')",
        line
    ))]
    MalformedProblemDefinition { line: String },
    #[snafu(display(
        "The number of clauses ({}) does not match the clauses number in the problem definition ({})",
        found,
        expected,
    ))]
    ClauseCountMismatch { expected: usize, found: usize },
}

/// Header values of a `p cnf` line.
#[derive(Debug, Clone, Copy)]
struct Problem {
    num_variables: usize,
    num_clauses: usize,
}

fn parse_problem(line: &str) -> Result<Problem, Error> {
    let splitted = line.split_whitespace().collect::<Vec<_>>();

    // We only support CNF DIMACS format
    ensure!(
        splitted.len() == 4 && splitted[0] == "p" && splitted[1] == "cnf",
        MalformedProblemDefinition { line }
    );

    match (splitted[2].parse::<usize>(), splitted[3].parse::<usize>()) {
        (Ok(num_variables), Ok(num_clauses)) => Ok(Problem {
            num_variables,
            num_clauses,
        }),
        _ => MalformedProblemDefinition { line }.fail(),
    }
}

/// Parse a line to a clause
fn parse_line(line: &str) -> Result<Clause, Error> {
    let splitted = line.split_whitespace().collect::<Vec<_>>();

    ensure!(
        splitted.last() == Some(&"0"),
        MalformedClause {
            clause: line.to_owned(),
        }
    );

    let mut clause = Clause::new();
    for s in &splitted[..splitted.len() - 1] {
        let literal = s.parse::<Literal>().with_context(|| MalformedVariable {
            clause: line.to_owned(),
        })?;
        clause = clause.add(literal);
    }

    Ok(clause)
}

/// Parses a CNF formula from DIMACS text.
///
/// The problem line is optional, but when present the number of clauses it
/// announces must match the input.
pub fn parse_reader(reader: impl Read) -> Result<Formula, Error> {
    let reader = BufReader::new(reader);

    let mut problem = None;
    let mut clauses = Vec::new();

    for line in reader.lines() {
        let line = line.context(ReadError)?;
        let trimmed = line.trim();

        if trimmed.starts_with('%') {
            // end of input in SATLIB benchmark files
            break;
        } else if trimmed.is_empty() || trimmed.starts_with('c') {
            // empty line, comment
            continue;
        } else if trimmed.starts_with('p') {
            problem = Some(parse_problem(trimmed)?);
        } else {
            clauses.push(parse_line(trimmed)?);
        }
    }

    let formula: Formula = clauses.into_iter().collect();

    if let Some(problem) = problem {
        ensure!(
            formula.len() == problem.num_clauses,
            ClauseCountMismatch {
                found: formula.len(),
                expected: problem.num_clauses,
            }
        );

        if formula.num_variables() > problem.num_variables {
            warn!(
                "Formula uses {} variables but the problem line declares {}",
                formula.num_variables(),
                problem.num_variables
            );
        }
    }

    debug!(
        "Parsed {} clauses over {} variables",
        formula.len(),
        formula.num_variables()
    );

    Ok(formula)
}

pub fn parse_str(input: &str) -> Result<Formula, Error> {
    parse_reader(input.as_bytes())
}

/// Parses CNF formula from a file
pub fn parse_file(path: impl AsRef<Path>) -> Result<Formula, Error> {
    let path = path.as_ref();
    let file = File::open(path).context(OpenError {
        path: path.to_owned(),
    })?;

    parse_reader(file)
        .map_err(Box::new)
        .context(FileError {
            path: path.to_owned(),
        })
}
