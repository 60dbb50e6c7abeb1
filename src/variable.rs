//! Implementation for variables, literals and sets of variables

use crate::*;

use bit_set::BitSet;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::ops::Not;
use std::str::FromStr;

static RE_GENERIC_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[xX]|_)?([0-9]+)_?\s*$").unwrap());

/// A single Boolean variable identified by its position in the truth table index.
///
/// Variable `i` is the value of bit `i` in the binary encoding of an input assignment.
#[derive(Clone, Copy, Default, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Variable(pub(crate) usize);

impl Variable {
    /// Create a new variable with a specific UID
    pub fn new(uid: usize) -> Self {
        Self(uid)
    }

    /// Return the internal integer UID
    pub fn uid(&self) -> usize {
        self.0
    }

    /// The literal of this variable with the given polarity
    pub fn literal(self, polarity: bool) -> Literal {
        Literal {
            var: self,
            polarity,
        }
    }

    /// Value of this variable in an input assignment
    pub fn eval(&self, assignment: usize) -> bool {
        self.0 < usize::BITS as usize && (assignment >> self.0) & 1 == 1
    }
}

impl From<usize> for Variable {
    fn from(uid: usize) -> Self {
        Self(uid)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// Parse a variable name such as ```x3```.
///
/// Only the variables of a truth table are accepted: the UID must be lower than [MAX_VARIABLES].
impl FromStr for Variable {
    type Err = EsopError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        RE_GENERIC_NAME
            .captures(name)
            .and_then(|cap| cap.get(1))
            .and_then(|uid| uid.as_str().parse::<usize>().ok())
            .filter(|&uid| uid < MAX_VARIABLES)
            .map(Variable)
            .ok_or_else(|| EsopError::InvalidVariable(name.to_string()))
    }
}

impl Not for Variable {
    type Output = Literal;
    fn not(self) -> Self::Output {
        self.literal(false)
    }
}

/// A variable with a polarity: ```x``` (positive) or ```!x``` (negative).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Literal {
    var: Variable,
    polarity: bool,
}

impl Literal {
    pub fn new(var: impl Into<Variable>, polarity: bool) -> Self {
        Self {
            var: var.into(),
            polarity,
        }
    }

    pub fn variable(&self) -> Variable {
        self.var
    }

    pub fn polarity(&self) -> bool {
        self.polarity
    }

    /// Check if the literal is satisfied by an input assignment
    pub fn eval(&self, assignment: usize) -> bool {
        self.var.eval(assignment) == self.polarity
    }
}

impl From<Variable> for Literal {
    fn from(var: Variable) -> Self {
        var.literal(true)
    }
}

impl Not for Literal {
    type Output = Literal;
    fn not(self) -> Self::Output {
        self.var.literal(!self.polarity)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.polarity {
            write!(f, "!")?;
        }
        write!(f, "{}", self.var)
    }
}

/// The variables fixed by one polarity of a [Cube], stored as a [BitSet] of UIDs.
///
/// Cube algebra works on whole sets at once: the care set of a cube is the union of its
/// two polarity sets, and the variables where two cubes differ come from symmetric differences.
///
/// A VarSet can be parsed from a string of 0 (absent) and 1 (present) characters,
/// the position in the string gives the variable UID. Spaces and ' are ignored.
///
/// ```
/// use esopkit::{Variable, VarSet};
///
/// let vs: VarSet = "01 01".parse().unwrap();
/// assert!(vs.contains(Variable::from(1)));
/// assert!(!vs.contains(Variable::from(2)));
/// assert_eq!(vs.len(), 2);
/// ```
#[derive(Clone, Default, Debug)]
pub struct VarSet {
    pub(crate) variables: BitSet,
}

impl VarSet {
    pub fn iter(&self) -> Iter {
        self.into_iter()
    }

    pub fn insert(&mut self, var: Variable) {
        self.variables.insert(var.uid());
    }

    pub fn remove(&mut self, var: Variable) {
        self.variables.remove(var.uid());
    }

    pub fn contains(&self, var: Variable) -> bool {
        self.variables.contains(var.uid())
    }

    /// Drop the variables of another set
    pub fn difference_with(&mut self, other: &Self) {
        self.variables.difference_with(&other.variables);
    }

    /// Add the variables of another set
    pub fn union_with(&mut self, other: &Self) {
        self.variables.union_with(&other.variables);
    }

    /// Keep the variables found in exactly one of the two sets
    pub fn symmetric_difference_with(&mut self, other: &Self) {
        self.variables.symmetric_difference_with(&other.variables);
    }

    /// Test if all variables of the other set are also in this one
    pub fn contains_all(&self, other: &Self) -> bool {
        self.variables.is_superset(&other.variables)
    }

    /// Test if no variable is shared with the other set
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.variables.is_disjoint(&other.variables)
    }

    /// Number of variables in the set
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

// Equal sets can have different capacities, only compare and hash the members
impl PartialEq for VarSet {
    fn eq(&self, other: &Self) -> bool {
        self.variables.iter().eq(other.variables.iter())
    }
}

impl Eq for VarSet {}

impl Hash for VarSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for uid in &self.variables {
            uid.hash(state);
        }
    }
}

impl FromIterator<Variable> for VarSet {
    fn from_iter<I: IntoIterator<Item = Variable>>(iter: I) -> Self {
        let mut result = VarSet::default();
        for var in iter {
            result.insert(var);
        }
        result
    }
}

impl fmt::Display for VarSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut next_uid = 0;
        for var in self {
            let padding = var.uid() - next_uid;
            write!(f, "{}1", "0".repeat(padding))?;
            next_uid = var.uid() + 1;
        }
        Ok(())
    }
}

impl FromStr for VarSet {
    type Err = EsopError;

    fn from_str(descr: &str) -> Result<Self, EsopError> {
        descr
            .chars()
            .filter(|&c| !matches!(c, ' ' | '\t' | '\''))
            .enumerate()
            .filter_map(|(uid, c)| match c {
                '0' => None,
                '1' => Some(Ok(Variable(uid))),
                _ => Some(Err(EsopError::InvalidCharacter(c))),
            })
            .collect()
    }
}

/// Iterator over the variables of a [VarSet], by increasing UID
pub struct Iter<'a>(bit_set::Iter<'a, u32>);

impl Iterator for Iter<'_> {
    type Item = Variable;
    fn next(&mut self) -> Option<Variable> {
        self.0.next().map(Variable)
    }
}

impl<'a> IntoIterator for &'a VarSet {
    type Item = Variable;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        Iter(self.variables.iter())
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use core::str::FromStr;
    use test_log::test;

    #[test]
    fn extract_variable() {
        assert_eq!(Variable::from_str("12").unwrap().uid(), 12);
        assert_eq!(Variable::from_str("x3").unwrap().uid(), 3);
        assert_eq!(Variable::from_str("_003_").unwrap().uid(), 3);
        assert_eq!(Variable::from_str("  X5  ").unwrap().uid(), 5);

        assert!(Variable::from_str("h12").is_err());
        assert!(Variable::from_str("x1y2").is_err());
        assert_eq!(Variable::from_str("x23").unwrap().uid(), 23);
        assert!(Variable::from_str("x24").is_err());
        assert_eq!(
            Variable::from_str("a"),
            Err(EsopError::InvalidVariable("a".to_string()))
        );
    }

    #[test]
    fn literals() {
        let v = Variable::from(2);
        let pos = Literal::from(v);
        let neg = !v;

        assert_eq!(format!("{}", pos), "x2");
        assert_eq!(format!("{}", neg), "!x2");
        assert_eq!(!neg, pos);

        assert!(pos.eval(0b100));
        assert!(!pos.eval(0b011));
        assert!(neg.eval(0b011));
    }

    #[test]
    fn varset_display_and_parse() -> Result<(), EsopError> {
        let vs: VarSet = "0100 1".parse()?;
        assert_eq!(vs.len(), 2);
        assert!(vs.contains(Variable(1)));
        assert!(vs.contains(Variable(4)));
        assert_eq!(format!("{}", vs), "01001");

        assert_eq!("01a".parse::<VarSet>(), Err(EsopError::InvalidCharacter('a')));
        Ok(())
    }

    #[test]
    fn symmetric_difference() {
        let mut a = VarSet::from_iter([Variable(0), Variable(1)]);
        let b = VarSet::from_iter([Variable(1), Variable(2)]);
        a.symmetric_difference_with(&b);
        assert_eq!(a.iter().collect::<Vec<_>>(), vec![Variable(0), Variable(2)]);
    }
}
