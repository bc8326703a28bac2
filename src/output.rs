/*!
Turning a solver result into something a user can read.
*/

use std::{
    fmt::Display,
    io::{self, Write},
};

use typed_index_collections::TiVec;

use crate::{
    env::{Environment, Value},
    formula::{Formula, Variable},
};

/// Value of every variable of a formula, indexed by variable.
#[derive(Debug)]
pub struct Model {
    values: TiVec<Variable, Value>,
}

impl Model {
    /// Reads the value of variables `x1` up to the largest variable of
    /// `formula` from `env`.
    pub fn new(formula: &Formula, env: &Environment) -> Self {
        let values = (0..formula.num_variables())
            .map(|index| env.get(Variable::from(index)))
            .collect();

        Model { values }
    }

    /// Returns `Value::Unbound` for variables beyond the model.
    pub fn value(&self, variable: Variable) -> Value {
        self.values
            .get(variable)
            .copied()
            .unwrap_or(Value::Unbound)
    }

    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, Value)> + '_ {
        self.values
            .iter_enumerated()
            .map(|(variable, &value)| (variable, value))
    }

    /// True when every clause has a literal whose variable is bound to the
    /// literal's polarity.
    pub fn is_satisfying(&self, formula: &Formula) -> bool {
        formula.clauses().all(|clause| {
            clause
                .iter()
                .any(|literal| self.value(literal.variable()) == Value::from(literal.positive()))
        })
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Model with {} variables", self.values.len())?;
        for (variable, value) in self.iter() {
            let value = match value.as_bool() {
                Some(b) => b.to_string(),
                None => "free".to_owned(),
            };
            write!(f, "\n  {}: {}", variable, value)?;
        }

        Ok(())
    }
}

/// Writes one `<id>:<VALUE>` line for every variable of `formula`, in order
/// of first occurrence.
pub fn write_assignment<W: Write>(
    mut writer: W,
    formula: &Formula,
    env: &Environment,
) -> io::Result<()> {
    for variable in formula.variables() {
        writeln!(writer, "{}:{}", variable.id(), env.get(variable))?;
    }
    writer.flush()
}

/// Writes the result in the SAT competition output format.
///
/// Unbound variables are left out of the `v` lines.
pub fn write_solution<W: Write>(
    mut writer: W,
    formula: &Formula,
    result: Option<&Environment>,
) -> io::Result<()> {
    const LITERALS_PER_LINE: usize = 10;

    let env = match result {
        Some(env) => env,
        None => {
            writeln!(writer, "s UNSATISFIABLE")?;
            return writer.flush();
        }
    };

    writeln!(writer, "s SATISFIABLE")?;

    let mut variables = formula.variables();
    variables.sort();

    let bound: Vec<i64> = variables
        .into_iter()
        .filter_map(|variable| {
            let id = i64::from(variable.id());
            env.get(variable)
                .as_bool()
                .map(|value| if value { id } else { -id })
        })
        .collect();

    for chunk in bound.chunks(LITERALS_PER_LINE) {
        write!(writer, "v")?;
        for literal in chunk {
            write!(writer, " {}", literal)?;
        }
        writeln!(writer)?;
    }
    writeln!(writer, "v 0")?;

    writer.flush()
}
