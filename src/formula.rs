/*!
A module to represent conjunctive normal form formula.

Clauses and formulas are persistent values backed by [`im::Vector`].
Every operation that "changes" one of them returns a new value which shares
the untouched structure with the old one, so a search branch can keep its
own formula while the sibling branch still sees the original.
*/

use std::{
    collections::HashSet,
    convert::TryInto,
    fmt::Display,
    io::{self, Write},
    iter::FromIterator,
    num::NonZeroU32,
    str::FromStr,
};

use im::Vector;

use crate::prelude::*;

#[derive(Debug, Snafu)]
pub enum VariableParseError {
    #[snafu(display("Failed to parse Variable ID"))]
    ParseIntError { source: std::num::ParseIntError },
    #[snafu(display(
        "Variable ID {} is out of range (must be within 1 to {})",
        num,
        Variable::MAX_VARIABLE_ID
    ))]
    RangeError { num: usize },
}

/// Newtype wrapper for variable ID.
/// Invariant: 0 < ID <= MAX_VARIABLE_ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(NonZeroU32);

impl Variable {
    pub const MAX_VARIABLE_ID: usize = std::u32::MAX as usize;
}

impl Variable {
    pub fn as_index(&self) -> usize {
        (self.0.get() - 1) as usize
    }

    /// Creates a variable from a raw index.
    /// Returns `None` if the index is invalid.
    pub fn from_index(index: usize) -> Option<Self> {
        let id = index.checked_add(1)?;
        if id > Variable::MAX_VARIABLE_ID {
            return None;
        }
        Some(Variable(NonZeroU32::new(id.try_into().ok()?)?))
    }

    /// The DIMACS number of this variable.
    pub fn id(&self) -> u32 {
        self.0.get()
    }
}

impl FromStr for Variable {
    type Err = VariableParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let num = s.parse::<usize>().context(ParseIntError)?;
        ensure!(num != 0, RangeError { num });
        Variable::from_index(num - 1).context(RangeError { num })
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.0)
    }
}

// Lets `Variable` key typed-index collections such as the model table.
impl From<usize> for Variable {
    fn from(index: usize) -> Self {
        Variable::from_index(index).expect("variable index out of range")
    }
}

impl From<Variable> for usize {
    fn from(variable: Variable) -> Self {
        variable.as_index()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    id: Variable,
    positive: bool,
}

impl Literal {
    pub fn new(id: Variable, positive: bool) -> Self {
        Literal { id, positive }
    }

    pub fn variable(&self) -> Variable {
        self.id
    }

    pub fn positive(&self) -> bool {
        self.positive
    }

    /// Same variable, opposite polarity.
    pub fn is_complement_of(&self, other: Literal) -> bool {
        self.id == other.id && self.positive != other.positive
    }

    /// Signed DIMACS form, e.g. `-3` for `¬x3`.
    pub fn to_dimacs(&self) -> i64 {
        let id = i64::from(self.id.id());
        if self.positive {
            id
        } else {
            -id
        }
    }
}

impl FromStr for Literal {
    type Err = VariableParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (positive, id) = if let Some(rest) = s.strip_prefix('-') {
            (false, rest.parse()?)
        } else {
            (true, s.parse()?)
        };

        Ok(Literal { id, positive })
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", if self.positive { "" } else { "¬" }, self.id)
    }
}

impl std::ops::Not for Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        Literal {
            id: self.id,
            positive: !self.positive,
        }
    }
}

/// Disjunction of literals.
///
/// A literal occurs at most once; literals keep their insertion order, which
/// makes [`Clause::choose_literal`] deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Clause {
    literals: Vector<Literal>,
}

impl Clause {
    pub fn new() -> Self {
        Self {
            literals: Vector::new(),
        }
    }

    /// Returns a clause with `literal` appended, or an unchanged copy when
    /// it is already a member.
    pub fn add(&self, literal: Literal) -> Self {
        if self.contains(literal) {
            return self.clone();
        }

        let mut literals = self.literals.clone();
        literals.push_back(literal);
        Self { literals }
    }

    pub fn contains(&self, literal: Literal) -> bool {
        self.literals.iter().any(|&l| l == literal)
    }

    /// Removes `¬literal` from the clause, i.e. the clause after `literal`
    /// has been assumed true.
    ///
    /// # Panics
    ///
    /// Panics when the clause does not contain `¬literal`.
    pub fn reduce(&self, literal: Literal) -> Self {
        let negation = !literal;
        let position = self
            .literals
            .iter()
            .position(|&l| l == negation)
            .unwrap_or_else(|| panic!("reduce({}) on {} which lacks {}", literal, self, negation));

        let mut literals = self.literals.clone();
        literals.remove(position);
        Self { literals }
    }

    /// Returns the first literal of the clause.
    ///
    /// # Panics
    ///
    /// Panics on an empty clause.
    pub fn choose_literal(&self) -> Literal {
        *self
            .literals
            .front()
            .expect("choose_literal() called on an empty clause")
    }

    pub fn size(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    /// True when some variable appears with both polarities.
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .any(|&l| l.positive() && self.contains(!l))
    }

    pub fn iter(&self) -> impl Iterator<Item = Literal> + '_ {
        self.literals.iter().copied()
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Clause::new(), |clause, literal| clause.add(literal))
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;

        let mut iter = self.literals.iter();
        if let Some(first) = iter.next() {
            write!(f, "{}", first)?;
        }
        for literal in iter {
            write!(f, " ∨ {}", literal)?;
        }

        write!(f, ")")?;

        Ok(())
    }
}

/// Formula representation in Conjunctive Normal Form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Formula {
    clauses: Vector<Clause>,
}

impl Formula {
    pub fn new() -> Self {
        Formula {
            clauses: Vector::new(),
        }
    }

    /// Returns a formula with `clause` appended.
    pub fn add_clause(&self, clause: Clause) -> Self {
        let mut clauses = self.clauses.clone();
        clauses.push_back(clause);
        Formula { clauses }
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> + '_ {
        self.clauses.iter()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Distinct variables in order of first occurrence.
    pub fn variables(&self) -> Vec<Variable> {
        let mut seen = HashSet::new();
        let mut variables = Vec::new();
        for literal in self.clauses.iter().flat_map(Clause::iter) {
            if seen.insert(literal.variable()) {
                variables.push(literal.variable());
            }
        }
        variables
    }

    /// The largest variable ID in the formula, 0 if there is none.
    pub fn num_variables(&self) -> usize {
        self.clauses
            .iter()
            .flat_map(Clause::iter)
            .map(|literal| literal.variable().as_index() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Splits the formula into its non-tautological clauses and its
    /// tautologies, both in their original order.
    pub fn split_tautologies(&self) -> (Formula, Formula) {
        let (tautologies, kept): (Vec<_>, Vec<_>) = self
            .clauses
            .iter()
            .cloned()
            .partition(Clause::is_tautology);

        (kept.into_iter().collect(), tautologies.into_iter().collect())
    }

    /// Writes the formula in DIMACS CNF format.
    pub fn write_dimacs<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "p cnf {} {}", self.num_variables(), self.len())?;
        for clause in self.clauses.iter() {
            for literal in clause.iter() {
                write!(writer, "{} ", literal.to_dimacs())?;
            }
            writeln!(writer, "0")?;
        }
        writer.flush()
    }
}

impl FromIterator<Clause> for Formula {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        Formula {
            clauses: iter.into_iter().collect(),
        }
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CNF with {} variables (", self.num_variables())?;

        let mut iter = self.clauses.iter();
        if let Some(first) = iter.next() {
            write!(f, "{}", first)?;
        }
        for clause in iter {
            write!(f, " ∧ {}", clause)?;
        }

        write!(f, ")")?;

        Ok(())
    }
}
