//! Exclusive sums of products, built incrementally with cancellation and merging.

use crate::*;

use delegate::delegate;
use log::trace;
use std::fmt;
use std::iter::FromIterator;
use std::ops::{BitXor, BitXorAssign};
use std::slice::Iter;
use std::str::FromStr;
use std::vec::IntoIter;

pub(crate) static PATTERN_SEPARATORS: [char; 4] = [',', ';', '|', '\n'];

/// Boolean function represented as the XOR of a collection of distinct cubes.
///
/// The empty ESOP is the constant false function, an ESOP with only the tautology
/// cube is the constant true function.
///
/// An ESOP is also used as the accumulator of the construction algorithms: inserting a cube
/// toggles its presence (```c ^ c = 0```) and can optionally merge it with an existing cube
/// at distance 1. At any time the ESOP equals the XOR of all cubes inserted so far.
///
/// Cubes are kept in insertion order, which makes the greedy merge deterministic.
/// This order is not part of the value: two ESOPs with the same cubes are equal.
#[derive(Clone, Default, Debug)]
pub struct Esop {
    cubes: Vec<Cube>,
}

impl Esop {
    delegate! {
        to self.cubes {
            /// Number of cubes in this ESOP
            pub fn len(&self) -> usize;

            /// Return whether there are no cube (constant false function)
            pub fn is_empty(&self) -> bool;

            /// Iterate over the cubes in insertion order
            pub fn iter(&self) -> Iter<'_, Cube>;

            /// Test if a specific cube is part of this ESOP
            pub fn contains(&self, cube: &Cube) -> bool;
        }
    }

    /// Remove all cubes
    pub fn clear(&mut self) {
        self.cubes.clear();
    }

    /// Add a cube to this ESOP, preserving its value as the XOR of all inserted cubes.
    ///
    /// * If the cube is already present, both copies cancel out and it is removed.
    /// * Otherwise, if merging is enabled, the first member at distance 1 is removed and
    ///   the merged cube is inserted in turn (with merging still enabled).
    /// * Otherwise the cube is appended.
    pub fn insert(&mut self, cube: Cube, merge: bool) {
        if let Some(idx) = self.cubes.iter().position(|c| c == &cube) {
            trace!("cancel {}", cube);
            self.cubes.remove(idx);
            return;
        }

        if merge {
            let found = self
                .cubes
                .iter()
                .enumerate()
                .find_map(|(idx, c)| cube.merge(c).map(|m| (idx, m)));
            if let Some((idx, merged)) = found {
                trace!("merge {} and {} into {}", cube, self.cubes[idx], merged);
                self.cubes.remove(idx);
                self.insert(merged, true);
                return;
            }
        }

        self.cubes.push(cube);
    }

    /// Evaluate the ESOP: true if an odd number of cubes contain the assignment
    pub fn eval(&self, assignment: usize) -> bool {
        self.cubes.iter().filter(|c| c.eval(assignment)).count() % 2 == 1
    }

    /// Truth table of this ESOP over the given number of variables
    pub fn to_truth_table(&self, num_vars: usize) -> TruthTable {
        let mut tt = TruthTable::const0(num_vars);
        for c in &self.cubes {
            tt ^= &c.to_truth_table(num_vars);
        }
        tt
    }

    /// Check that this ESOP matches the target function on all positions of the care set.
    pub fn verify(&self, bits: &TruthTable, care: &TruthTable) -> bool {
        let tt = self.to_truth_table(bits.num_vars());
        (&(tt ^ bits) & care).is_const0()
    }

    /// All variables used in at least one cube
    pub fn variables(&self) -> VarSet {
        let mut vars = VarSet::default();
        for c in &self.cubes {
            vars.union_with(&c.care());
        }
        vars
    }

    /// Total number of literals in all cubes
    pub fn num_literals(&self) -> usize {
        self.cubes.iter().map(|c| c.num_literals()).sum()
    }
}

// The insertion order is an artifact of the construction
impl PartialEq for Esop {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|c| other.contains(c))
    }
}

impl Eq for Esop {}

impl FromIterator<Cube> for Esop {
    fn from_iter<I: IntoIterator<Item = Cube>>(iter: I) -> Self {
        let mut esop = Esop::default();
        for c in iter {
            esop.insert(c, false);
        }
        esop
    }
}

impl<'a> IntoIterator for &'a Esop {
    type Item = &'a Cube;
    type IntoIter = Iter<'a, Cube>;

    fn into_iter(self) -> Self::IntoIter {
        self.cubes.iter()
    }
}

impl IntoIterator for Esop {
    type Item = Cube;
    type IntoIter = IntoIter<Cube>;

    fn into_iter(self) -> Self::IntoIter {
        self.cubes.into_iter()
    }
}

impl BitXorAssign<Cube> for Esop {
    fn bitxor_assign(&mut self, rhs: Cube) {
        self.insert(rhs, false);
    }
}

impl BitXor<Cube> for Esop {
    type Output = Esop;
    fn bitxor(mut self, rhs: Cube) -> Self::Output {
        self ^= rhs;
        self
    }
}

impl FromStr for Esop {
    type Err = EsopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut result = Esop::default();
        for elt in s.split(&PATTERN_SEPARATORS[..]) {
            if elt.trim().is_empty() {
                continue;
            }
            result.insert(elt.parse()?, false);
        }
        Ok(result)
    }
}

impl fmt::Display for Esop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.cubes {
            writeln!(f, "{}", c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use test_log::test;

    #[test]
    fn parsing() -> Result<(), EsopError> {
        let esop: Esop = "--01-1---0-1".parse()?;
        assert_eq!(esop.len(), 1);

        let esop = "--01-1\n1-0101\n--0-1\n".parse::<Esop>()?;
        assert_eq!(esop.len(), 3);

        let esop: Esop = "0-10;0-11;1-11".parse()?;
        assert_eq!(esop.len(), 3);
        assert_eq!(esop.num_literals(), 9);
        assert_eq!(format!("{}", esop.variables()), "1011");

        // Duplicates cancel out
        let esop: Esop = "0-10;1-11;0-10".parse()?;
        assert_eq!(esop.len(), 1);

        assert!("01x".parse::<Esop>().is_err());
        Ok(())
    }

    #[test]
    fn cancellation() -> Result<(), EsopError> {
        let c: Cube = "1-0".parse()?;
        for merge in [false, true] {
            let mut esop = Esop::default();
            esop.insert(c.clone(), merge);
            assert_eq!(esop.len(), 1);
            esop.insert(c.clone(), merge);
            assert!(esop.is_empty());
        }
        Ok(())
    }

    #[test]
    fn greedy_merge() -> Result<(), EsopError> {
        let mut esop = Esop::default();
        esop.insert("11".parse()?, true);
        esop.insert("-0".parse()?, true);
        assert_eq!(esop.len(), 2);

        // 01 merges with 11 into -1, which merges with -0 into the tautology
        esop.insert("01".parse()?, true);
        assert_eq!(esop.len(), 1);
        assert!(esop.contains(&Cube::tautology()));

        // Without merging the cubes are simply collected
        let mut esop = Esop::default();
        esop.insert("11".parse()?, false);
        esop.insert("01".parse()?, false);
        assert_eq!(esop.len(), 2);
        Ok(())
    }

    #[test]
    fn merge_preserves_value() -> Result<(), EsopError> {
        let cubes = ["1-0", "--1", "110", "0-1", "-01", "111", "1-0", "---"];
        let mut merged = Esop::default();
        let mut plain = Esop::default();
        for c in cubes {
            let cube: Cube = c.parse()?;
            merged.insert(cube.clone(), true);
            plain.insert(cube, false);
            assert_eq!(merged.to_truth_table(3), plain.to_truth_table(3));
        }
        assert!(merged.len() <= plain.len());
        Ok(())
    }

    #[test]
    fn evaluation() -> Result<(), EsopError> {
        // x0 ^ x1
        let esop: Esop = "1-;-1".parse()?;
        let xor: TruthTable = "0110".parse()?;
        assert_eq!(esop.to_truth_table(2), xor);
        assert!(esop.eval(1));
        assert!(!esop.eval(3));

        let care: TruthTable = "1110".parse()?;
        let or: TruthTable = "0111".parse()?;
        assert!(esop.verify(&or, &care));
        assert!(!esop.verify(&or, &TruthTable::const1(2)));
        Ok(())
    }

    #[test]
    fn unordered_equality() -> Result<(), EsopError> {
        let a: Esop = "1-0;--1;01-".parse()?;
        let b: Esop = "01-;1-0;--1".parse()?;
        assert_eq!(a, b);
        assert_ne!(a, "1-0;--1".parse::<Esop>()?);

        let c = Esop::default() ^ "--1".parse::<Cube>()? ^ "01-".parse::<Cube>()? ^ "1-0".parse::<Cube>()?;
        assert_eq!(a, c);
        Ok(())
    }
}
