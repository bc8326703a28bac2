/*!
Partial assignments built up along a search path.
*/

use std::fmt::Display;

use im::OrdMap;

use crate::formula::{Clause, Formula, Literal, Variable};

/// The value of a variable (or literal) under an [`Environment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    True,
    False,
    Unbound,
}

impl Value {
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Value::True => Some(true),
            Value::False => Some(false),
            Value::Unbound => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        if value {
            Value::True
        } else {
            Value::False
        }
    }
}

impl From<Option<bool>> for Value {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Value::Unbound, Value::from)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Value::True => "TRUE",
            Value::False => "FALSE",
            Value::Unbound => "UNBOUND",
        };
        write!(f, "{}", s)
    }
}

/// Persistent mapping from variables to booleans.
///
/// `put_true` and `put_false` return a new environment; the receiver keeps
/// its bindings, so a sibling search branch can restart from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    bindings: OrdMap<Variable, bool>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            bindings: OrdMap::new(),
        }
    }

    pub fn put_true(&self, variable: Variable) -> Self {
        self.put(variable, true)
    }

    pub fn put_false(&self, variable: Variable) -> Self {
        self.put(variable, false)
    }

    /// Binds the variable of `literal` so that `literal` evaluates true.
    pub fn assume(&self, literal: Literal) -> Self {
        self.put(literal.variable(), literal.positive())
    }

    fn put(&self, variable: Variable, value: bool) -> Self {
        match self.bindings.get(&variable) {
            Some(&bound) if bound == value => self.clone(),
            bound => {
                debug_assert!(
                    bound.is_none(),
                    "{} is already bound to {}",
                    variable,
                    !value
                );
                Environment {
                    bindings: self.bindings.update(variable, value),
                }
            }
        }
    }

    pub fn get(&self, variable: Variable) -> Value {
        self.bindings.get(&variable).copied().into()
    }

    pub fn value_of(&self, literal: Literal) -> Value {
        match self.get(literal.variable()) {
            Value::Unbound => Value::Unbound,
            value => Value::from(value == Value::from(literal.positive())),
        }
    }

    /// True when some literal of the clause evaluates true.
    pub fn satisfies_clause(&self, clause: &Clause) -> bool {
        clause.iter().any(|l| self.value_of(l) == Value::True)
    }

    /// True when every clause of the formula is satisfied.
    pub fn satisfies(&self, formula: &Formula) -> bool {
        formula.clauses().all(|clause| self.satisfies_clause(clause))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings ordered by variable.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.bindings.iter().map(|(&variable, &value)| (variable, value))
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (variable, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", variable, value)?;
        }
        write!(f, "}}")
    }
}
