use crate::*;

use itertools::Itertools;
use std::fmt;
use std::iter::FromIterator;
use std::ops::BitAnd;
use std::str::FromStr;

/// A product term defined by sets of positive and negative literals, the other variables are free.
///
/// They are represented as a pair of [VarSet] to store positive and negative variables.
/// A variable is never fixed to both values: adding a literal replaces the opposite one.
/// This pair is equivalent to a care mask (the union of both sets) and a polarity mask
/// (the positive set). The cube without literals is the tautology.
///
/// A Cube can be parsed from strings where the position in the string defines the
/// variable UID and the character defines the literal: - for free, 0 for negative, 1 for positive.
/// To make the strings easier to read, spaces and single quotes are ignored around and inside the string.
/// For example "0-100-100", "  0-100-100", and "0-100 -100" are equivalent.
///
/// # Cube algebra
///
/// ESOP construction relies on a small set of operations:
/// * The [distance](Cube::distance) counts the variables with a different literal in two cubes
/// * Two cubes at distance 1 can be [merged](Cube::merge) into their XOR, which is a single cube
/// * A cube can be evaluated on an input assignment or expanded into a [TruthTable]
#[derive(Clone, PartialEq, Eq, Hash, Default, Debug)]
pub struct Cube {
    pub(crate) positive: VarSet,
    pub(crate) negative: VarSet,
}

impl Cube {
    /// The cube without any literal
    pub fn tautology() -> Self {
        Self::default()
    }

    /// Create a cube from the two inner sets of fixed variables.
    ///
    /// Variables found in both sets are dropped from the negative one.
    pub fn with(positive: VarSet, mut negative: VarSet) -> Self {
        negative.difference_with(&positive);
        Self { positive, negative }
    }

    /// Add a literal to this cube.
    ///
    /// If this variable was free, this leads to a restriction of the cube.
    /// If it was fixed to the same value, the cube is unchanged.
    /// If it was fixed to the opposite value, the existing literal
    /// is replaced by the new one.
    pub fn add_literal(&mut self, var: impl Into<Variable>, polarity: bool) {
        let var = var.into();
        if polarity {
            self.negative.remove(var);
            self.positive.insert(var);
        } else {
            self.positive.remove(var);
            self.negative.insert(var);
        }
    }

    /// Clone this cube and add a literal, see [Cube::add_literal]
    pub fn with_literal(&self, var: impl Into<Variable>, polarity: bool) -> Self {
        let mut copy = self.clone();
        copy.add_literal(var, polarity);
        copy
    }

    /// Remove any literal on a given variable.
    pub fn remove_literal(&mut self, var: impl Into<Variable>) {
        let var = var.into();
        self.positive.remove(var);
        self.negative.remove(var);
    }

    /// Polarity of the literal on a variable, None if it is free
    pub fn literal(&self, var: impl Into<Variable>) -> Option<bool> {
        let var = var.into();
        if self.positive.contains(var) {
            Some(true)
        } else if self.negative.contains(var) {
            Some(false)
        } else {
            None
        }
    }

    /// Iterate over the literals of this cube, ordered by variable
    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        let pos = self.positive.iter().map(|v| v.literal(true));
        let neg = self.negative.iter().map(|v| v.literal(false));
        pos.merge_by(neg, |a, b| a.variable() < b.variable())
    }

    /// Number of literals in this cube
    pub fn num_literals(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    pub fn is_tautology(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }

    /// All variables with a literal in this cube
    pub fn care(&self) -> VarSet {
        let mut care = self.positive.clone();
        care.union_with(&self.negative);
        care
    }

    /// Variables on which the two cubes do not have the same literal
    fn difference(&self, other: &Self) -> VarSet {
        let mut diff = self.positive.clone();
        diff.symmetric_difference_with(&other.positive);
        let mut neg = self.negative.clone();
        neg.symmetric_difference_with(&other.negative);
        diff.union_with(&neg);
        diff
    }

    /// Count the variables with a different literal in the two cubes.
    ///
    /// A variable differs if one cube fixes it and the other leaves it free,
    /// or if both fix it to opposite values.
    pub fn distance(&self, other: &Self) -> usize {
        self.difference(other).len()
    }

    /// Merge two cubes at distance 1 into the single cube equal to their XOR.
    ///
    /// All shared literals are kept, and the differing variable takes the
    /// literal used by neither cube: ```x ^ !x = 1```, ```1 ^ x = !x``` and ```1 ^ !x = x```.
    /// In the first case the literal is removed and the result covers the union of both cubes.
    ///
    /// Returns None if the cubes are not at distance 1.
    pub fn merge(&self, other: &Self) -> Option<Self> {
        let diff = self.difference(other);
        let mut vars = diff.iter();
        let var = vars.next()?;
        if vars.next().is_some() {
            return None;
        }

        let mut merged = self.clone();
        match (self.literal(var), other.literal(var)) {
            (Some(_), Some(_)) => merged.remove_literal(var),
            (None, Some(b)) | (Some(b), None) => merged.add_literal(var, !b),
            (None, None) => return None,
        }
        Some(merged)
    }

    /// Check if an input assignment satisfies all literals of this cube
    pub fn eval(&self, assignment: usize) -> bool {
        self.positive.iter().all(|v| v.eval(assignment))
            && self.negative.iter().all(|v| !v.eval(assignment))
    }

    /// Truth table of this cube over the given number of variables
    pub fn to_truth_table(&self, num_vars: usize) -> TruthTable {
        TruthTable::from_fn(num_vars, |idx| self.eval(idx))
    }

    /// Check if this cube shares at least one input assignment with another cube
    pub fn overlaps(&self, other: &Cube) -> bool {
        self.positive.is_disjoint(&other.negative) && self.negative.is_disjoint(&other.positive)
    }

    /// Test if all input assignments of the given cube are covered by this cube.
    pub fn contains(&self, c: &Cube) -> bool {
        c.positive.contains_all(&self.positive) && c.negative.contains_all(&self.negative)
    }
}

impl FromStr for Cube {
    type Err = EsopError;

    fn from_str(descr: &str) -> Result<Cube, EsopError> {
        let mut c = Cube::default();
        let mut idx = 0;
        for ch in descr.chars() {
            match ch {
                ' ' | '\t' | '\'' => (), // skip spacing and ` for formatting
                '-' => idx += 1,
                '0' => {
                    c.negative.insert(Variable(idx));
                    idx += 1;
                }
                '1' => {
                    c.positive.insert(Variable(idx));
                    idx += 1;
                }
                _ => return Err(EsopError::InvalidCharacter(ch)),
            };
        }
        Ok(c)
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_tautology() {
            return write!(f, "-");
        }
        let mut pos = 0;
        for lit in self.literals() {
            while pos < lit.variable().uid() {
                write!(f, "-")?;
                pos += 1;
            }
            write!(f, "{}", if lit.polarity() { '1' } else { '0' })?;
            pos += 1;
        }
        Ok(())
    }
}

impl From<Literal> for Cube {
    fn from(lit: Literal) -> Self {
        let mut cube = Cube::default();
        cube.add_literal(lit.variable(), lit.polarity());
        cube
    }
}

impl From<Variable> for Cube {
    fn from(var: Variable) -> Self {
        Cube::from(Literal::from(var))
    }
}

impl FromIterator<Literal> for Cube {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        let mut cube = Cube::default();
        for lit in iter {
            cube.add_literal(lit.variable(), lit.polarity());
        }
        cube
    }
}

impl<T: Into<Literal>> BitAnd<T> for Cube {
    type Output = Cube;
    fn bitand(mut self, rhs: T) -> Self::Output {
        let lit = rhs.into();
        self.add_literal(lit.variable(), lit.polarity());
        self
    }
}

impl<T: Into<Literal>> BitAnd<T> for Literal {
    type Output = Cube;
    fn bitand(self, rhs: T) -> Self::Output {
        Cube::from(self) & rhs
    }
}

impl<T: Into<Literal>> BitAnd<T> for Variable {
    type Output = Cube;
    fn bitand(self, rhs: T) -> Self::Output {
        Cube::from(self) & rhs
    }
}
