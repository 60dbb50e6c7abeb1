//! Boolean functions given by their complete truth table.

use crate::*;

use bit_set::BitSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{BitAnd, BitXor, BitXorAssign, Not};
use std::str::FromStr;

/// Largest number of variables accepted for a truth table.
pub const MAX_VARIABLES: usize = 24;

/// A Boolean function of `n` variables stored as its 2^n output bits.
///
/// The bit at index `i` is the value of the function for the input assignment `i`,
/// where bit `v` of `i` gives the value of [Variable] `v`.
/// Only the positions of the true outputs are stored, in a [BitSet].
///
/// Truth tables are immutable values: two tables with the same arity and the same
/// bits are equal and hash identically, whatever the operations used to build them.
///
/// A truth table can be parsed from a binary string where the character at position `i`
/// gives the output for the assignment `i`. The length of the string must be a power of two.
///
/// ```
/// use esopkit::TruthTable;
/// # use esopkit::EsopError;
/// # fn main() -> Result<(), EsopError> {
///
/// let and: TruthTable = "0001".parse()?;
/// assert_eq!(and.num_vars(), 2);
/// assert!(and.get(3));
///
/// // Fix the first variable to 1: the remaining function is the second variable
/// let x1: TruthTable = "01".parse()?;
/// assert_eq!(and.cofactor1(0), x1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct TruthTable {
    num_vars: usize,
    ones: BitSet,
}

impl TruthTable {
    /// The constant false function
    pub fn const0(num_vars: usize) -> Self {
        assert!(num_vars <= MAX_VARIABLES, "too many variables");
        Self {
            num_vars,
            ones: BitSet::with_capacity(1 << num_vars),
        }
    }

    /// The constant true function
    pub fn const1(num_vars: usize) -> Self {
        Self::from_fn(num_vars, |_| true)
    }

    /// The projection function of a single variable
    pub fn nth_var(num_vars: usize, var: impl Into<Variable>) -> Self {
        let var = var.into();
        assert!(var.uid() < num_vars, "variable out of range");
        Self::from_fn(num_vars, |idx| var.eval(idx))
    }

    /// Build a truth table by evaluating a closure on every input assignment
    pub fn from_fn<F: Fn(usize) -> bool>(num_vars: usize, f: F) -> Self {
        let mut tt = Self::const0(num_vars);
        for idx in 0..tt.num_bits() {
            if f(idx) {
                tt.ones.insert(idx);
            }
        }
        tt
    }

    /// Parse a binary string, the character at position `i` gives the output for assignment `i`
    pub fn from_binary_str(descr: &str) -> Result<Self, EsopError> {
        let len = descr.chars().count();
        if len == 0 || !len.is_power_of_two() {
            return Err(EsopError::InvalidLength(len));
        }
        let num_vars = len.trailing_zeros() as usize;
        if num_vars > MAX_VARIABLES {
            return Err(EsopError::TooManyVariables(num_vars));
        }

        let mut tt = Self::const0(num_vars);
        for (idx, c) in descr.chars().enumerate() {
            match c {
                '0' => (),
                '1' => {
                    tt.ones.insert(idx);
                }
                _ => return Err(EsopError::InvalidCharacter(c)),
            }
        }
        Ok(tt)
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Number of bits in the table (2^n)
    pub fn num_bits(&self) -> usize {
        1 << self.num_vars
    }

    /// Value of the function for the given input assignment
    pub fn get(&self, idx: usize) -> bool {
        self.ones.contains(idx)
    }

    pub fn set(&mut self, idx: usize, value: bool) {
        assert!(idx < self.num_bits(), "assignment out of range");
        if value {
            self.ones.insert(idx);
        } else {
            self.ones.remove(idx);
        }
    }

    /// Number of input assignments for which the function is true
    pub fn count_ones(&self) -> usize {
        self.ones.len()
    }

    /// Iterate over the input assignments for which the function is true
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.ones.iter()
    }

    pub fn is_const0(&self) -> bool {
        self.ones.is_empty()
    }

    pub fn is_const1(&self) -> bool {
        self.ones.len() == self.num_bits()
    }

    /// Test if the function depends on the given variable
    pub fn depends_on(&self, var: usize) -> bool {
        self.cofactor0(var) != self.cofactor1(var)
    }

    /// Fix a variable to a constant value.
    ///
    /// The fixed variable is removed: the result is a function of `n-1` variables where
    /// all variables above the fixed one are shifted down by one position.
    pub fn cofactor(&self, var: usize, value: bool) -> Self {
        assert!(var < self.num_vars, "variable out of range");
        let low_mask = (1 << var) - 1;
        let fixed = (value as usize) << var;
        let mut result = Self::const0(self.num_vars - 1);
        for idx in &self.ones {
            if idx & (1 << var) != fixed {
                continue;
            }
            result.ones.insert((idx & low_mask) | ((idx >> (var + 1)) << var));
        }
        result
    }

    /// Fix a variable to 0, see [TruthTable::cofactor]
    pub fn cofactor0(&self, var: usize) -> Self {
        self.cofactor(var, false)
    }

    /// Fix a variable to 1, see [TruthTable::cofactor]
    pub fn cofactor1(&self, var: usize) -> Self {
        self.cofactor(var, true)
    }

    fn check_arity(&self, other: &Self) {
        assert_eq!(
            self.num_vars, other.num_vars,
            "truth tables have different arities"
        );
    }
}

// Compare and hash the true positions only
impl PartialEq for TruthTable {
    fn eq(&self, other: &Self) -> bool {
        self.num_vars == other.num_vars && self.ones.iter().eq(other.ones.iter())
    }
}

impl Eq for TruthTable {}

impl Hash for TruthTable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.num_vars.hash(state);
        for idx in &self.ones {
            idx.hash(state);
        }
    }
}

impl BitXorAssign<&TruthTable> for TruthTable {
    fn bitxor_assign(&mut self, rhs: &TruthTable) {
        self.check_arity(rhs);
        self.ones.symmetric_difference_with(&rhs.ones);
    }
}

impl BitXor<&TruthTable> for &TruthTable {
    type Output = TruthTable;
    fn bitxor(self, rhs: &TruthTable) -> Self::Output {
        let mut result = self.clone();
        result ^= rhs;
        result
    }
}

impl BitXor<&TruthTable> for TruthTable {
    type Output = TruthTable;
    fn bitxor(mut self, rhs: &TruthTable) -> Self::Output {
        self ^= rhs;
        self
    }
}

impl BitAnd<&TruthTable> for &TruthTable {
    type Output = TruthTable;
    fn bitand(self, rhs: &TruthTable) -> Self::Output {
        self.check_arity(rhs);
        let mut result = self.clone();
        result.ones.intersect_with(&rhs.ones);
        result
    }
}

impl Not for &TruthTable {
    type Output = TruthTable;
    fn not(self) -> Self::Output {
        TruthTable::from_fn(self.num_vars, |idx| !self.get(idx))
    }
}

impl Not for TruthTable {
    type Output = TruthTable;
    fn not(self) -> Self::Output {
        !&self
    }
}

impl FromStr for TruthTable {
    type Err = EsopError;

    fn from_str(descr: &str) -> Result<Self, EsopError> {
        Self::from_binary_str(descr.trim())
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for idx in 0..self.num_bits() {
            write!(f, "{}", if self.get(idx) { '1' } else { '0' })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use test_log::test;

    #[test]
    fn parse_and_display() -> Result<(), EsopError> {
        let tt: TruthTable = "01101001".parse()?;
        assert_eq!(tt.num_vars(), 3);
        assert_eq!(tt.count_ones(), 4);
        assert_eq!(format!("{}", tt), "01101001");

        assert_eq!(
            "011".parse::<TruthTable>(),
            Err(EsopError::InvalidLength(3))
        );
        assert_eq!("".parse::<TruthTable>(), Err(EsopError::InvalidLength(0)));
        assert_eq!(
            "01x1".parse::<TruthTable>(),
            Err(EsopError::InvalidCharacter('x'))
        );
        Ok(())
    }

    #[test]
    fn constants() {
        assert!(TruthTable::const0(3).is_const0());
        assert!(TruthTable::const1(3).is_const1());
        assert!(!TruthTable::const1(3).is_const0());
        assert!(TruthTable::const1(0).is_const1());
        assert_eq!(!TruthTable::const0(2), TruthTable::const1(2));
    }

    #[test]
    fn cofactors() -> Result<(), EsopError> {
        // f = x0 & !x2 | x1 & x2
        let f = TruthTable::from_fn(3, |i| (i & 1 == 1 && i & 4 == 0) || (i & 2 == 2 && i & 4 == 4));

        assert_eq!(f.cofactor0(2), TruthTable::nth_var(2, Variable(0)));
        assert_eq!(f.cofactor1(2), TruthTable::nth_var(2, Variable(1)));

        // Fixing x0 keeps x1 and x2, renamed as x0 and x1
        let expected: TruthTable = "0001".parse()?;
        assert_eq!(f.cofactor0(0), expected);
        let expected: TruthTable = "1101".parse()?;
        assert_eq!(f.cofactor1(0), expected);

        assert!(f.depends_on(1));
        assert!(!TruthTable::nth_var(3, Variable(0)).depends_on(1));
        Ok(())
    }

    #[test]
    fn content_equality() -> Result<(), EsopError> {
        use std::collections::HashSet;

        let a: TruthTable = "0110".parse()?;
        let b = &TruthTable::nth_var(2, Variable(0)) ^ &TruthTable::nth_var(2, Variable(1));
        assert_eq!(a, b);

        let mut seen = HashSet::new();
        seen.insert(a);
        assert!(seen.contains(&b));

        // Same bits, different arity
        assert_ne!(TruthTable::const0(1), TruthTable::const0(2));
        Ok(())
    }

    #[test]
    fn masking() -> Result<(), EsopError> {
        let f: TruthTable = "0111".parse()?;
        let care: TruthTable = "1100".parse()?;
        assert_eq!(format!("{}", &f & &care), "0100");
        Ok(())
    }
}
