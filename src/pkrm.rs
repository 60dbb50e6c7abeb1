//! Optimum Pseudo-Kronecker Reed-Muller (PKRM) construction.
//!
//! A Boolean function ```f``` can be expanded around a variable ```x``` using its two cofactors
//! ```f0``` and ```f1``` in three ways:
//!
//! * positive Davio: ```f = f0 ^ x & (f0 ^ f1)```
//! * negative Davio: ```f = f1 ^ !x & (f0 ^ f1)```
//! * Shannon: ```f = !x & f0 ^ x & f1```
//!
//! Expanding recursively on all variables in a fixed order, with a free choice of
//! expansion for each sub-function, gives a PKRM form. The construction first computes
//! the minimal number of cubes for each sub-function bottom-up, remembering the best expansion,
//! then emits the cubes top-down according to the recorded choices.
//!
//! ```
//! use esopkit::{esop_from_optimum_pkrm, ExpansionCache, TruthTable};
//! # use esopkit::EsopError;
//! # fn main() -> Result<(), EsopError> {
//!
//! let f: TruthTable = "0111".parse()?;
//! let esop = esop_from_optimum_pkrm(&f);
//! assert_eq!(esop.len(), 2);
//! assert_eq!(esop.to_truth_table(2), f);
//!
//! // The optimum cost is also available directly
//! assert_eq!(ExpansionCache::build(&f).cost(&f), Some(2));
//! # Ok(())
//! # }
//! ```

use crate::*;

use log::debug;
use std::fmt;

/// The expansion selected for a sub-function, with the minimal number of cubes it leads to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Expansion {
    PositiveDavio(u32),
    NegativeDavio(u32),
    Shannon(u32),
}

impl Expansion {
    /// Pick the cheapest expansion from the costs of ```f0```, ```f1``` and ```f0 ^ f1```.
    ///
    /// Each expansion uses two of these sub-functions: the most expensive one is left out.
    /// Ties are broken in favor of positive Davio, then negative Davio.
    pub fn select(c0: u32, c1: u32, c2: u32) -> Self {
        let m = c0.max(c1).max(c2);
        if m == c1 {
            Expansion::PositiveDavio(c0 + c2)
        } else if m == c0 {
            Expansion::NegativeDavio(c1 + c2)
        } else {
            Expansion::Shannon(c0 + c1)
        }
    }

    /// Number of cubes obtained with this expansion
    pub fn cost(&self) -> u32 {
        match self {
            Expansion::PositiveDavio(c) | Expansion::NegativeDavio(c) | Expansion::Shannon(c) => *c,
        }
    }
}

impl fmt::Display for Expansion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expansion::PositiveDavio(c) => write!(f, "pD({})", c),
            Expansion::NegativeDavio(c) => write!(f, "nD({})", c),
            Expansion::Shannon(c) => write!(f, "S({})", c),
        }
    }
}

/// Best expansion of all non-constant sub-functions reached from a root function.
///
/// Sub-functions are obtained by fixing the variables in increasing order. As the fixed
/// variables are removed from the cofactors, a sub-function found at depth ```d``` always has
/// ```n-d``` variables: the content of a truth table identifies both the function and its depth.
#[derive(Clone, Default, Debug)]
pub struct ExpansionCache {
    expansions: HashMap<TruthTable, Expansion>,
}

impl ExpansionCache {
    /// Compute the best expansion for a function and all its sub-functions
    pub fn build(f: &TruthTable) -> Self {
        let mut cache = Self::default();
        let cost = cache.fill(f);
        debug!(
            "PKRM cost of {} is {} ({} sub-functions)",
            f,
            cost,
            cache.len()
        );
        cache
    }

    fn fill(&mut self, f: &TruthTable) -> u32 {
        if f.is_const0() {
            return 0;
        }
        if f.is_const1() {
            return 1;
        }
        if let Some(e) = self.expansions.get(f) {
            return e.cost();
        }

        let f0 = f.cofactor0(0);
        let f1 = f.cofactor1(0);
        let f2 = &f0 ^ &f1;
        let c0 = self.fill(&f0);
        let c1 = self.fill(&f1);
        let c2 = self.fill(&f2);

        let expansion = Expansion::select(c0, c1, c2);
        self.expansions.insert(f.clone(), expansion);
        expansion.cost()
    }

    /// Minimal number of cubes for a function explored by this cache.
    ///
    /// Constant functions are always available.
    pub fn cost(&self, f: &TruthTable) -> Option<u32> {
        if f.is_const0() {
            Some(0)
        } else if f.is_const1() {
            Some(1)
        } else {
            self.get(f).map(|e| e.cost())
        }
    }

    /// The selected expansion for a non-constant function explored by this cache
    pub fn get(&self, f: &TruthTable) -> Option<Expansion> {
        self.expansions.get(f).copied()
    }

    /// Number of non-constant sub-functions
    pub fn len(&self) -> usize {
        self.expansions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expansions.is_empty()
    }

    fn emit(&self, cubes: &mut Esop, f: &TruthTable, var: usize, cube: Cube) {
        if f.is_const0() {
            return;
        }
        if f.is_const1() {
            cubes.insert(cube, true);
            return;
        }

        let expansion = match self.get(f) {
            Some(e) => e,
            None => panic!("No expansion recorded for sub-function {}", f),
        };
        let x = Variable(var);
        let f0 = f.cofactor0(0);
        let f1 = f.cofactor1(0);
        match expansion {
            Expansion::PositiveDavio(_) => {
                let f2 = &f0 ^ &f1;
                self.emit(cubes, &f0, var + 1, cube.clone());
                self.emit(cubes, &f2, var + 1, cube & x);
            }
            Expansion::NegativeDavio(_) => {
                let f2 = &f0 ^ &f1;
                self.emit(cubes, &f1, var + 1, cube.clone());
                self.emit(cubes, &f2, var + 1, cube & !x);
            }
            Expansion::Shannon(_) => {
                self.emit(cubes, &f0, var + 1, cube.with_literal(x, false));
                self.emit(cubes, &f1, var + 1, cube & x);
            }
        }
    }
}

/// Build an ESOP from the optimum PKRM form of a function.
///
/// The resulting cubes are collected with cancellation and greedy merging,
/// the ESOP can thus be smaller than the optimum PKRM.
pub fn esop_from_optimum_pkrm(f: &TruthTable) -> Esop {
    let cache = ExpansionCache::build(f);
    let mut cubes = Esop::default();
    cache.emit(&mut cubes, f, 0, Cube::tautology());
    debug!("optimum PKRM ESOP with {} cubes", cubes.len());
    cubes
}

#[cfg(test)]
mod tests {
    use crate::*;
    use test_log::test;

    fn check(bits: &str, expected: &str) -> Result<(), EsopError> {
        let f: TruthTable = bits.parse()?;
        let esop = esop_from_optimum_pkrm(&f);
        assert_eq!(esop.to_truth_table(f.num_vars()), f);
        assert_eq!(esop, expected.parse::<Esop>()?);
        Ok(())
    }

    #[test]
    fn expansion_choice() {
        assert_eq!(Expansion::select(1, 2, 1), Expansion::PositiveDavio(2));
        assert_eq!(Expansion::select(2, 1, 1), Expansion::NegativeDavio(2));
        assert_eq!(Expansion::select(1, 1, 2), Expansion::Shannon(2));
        // Ties favor positive Davio
        assert_eq!(Expansion::select(1, 1, 1), Expansion::PositiveDavio(2));
        assert_eq!(Expansion::select(2, 1, 2), Expansion::NegativeDavio(3));
        assert_eq!(Expansion::Shannon(4).cost(), 4);
    }

    #[test]
    fn expansion_skips_most_expensive_cofactor() -> Result<(), EsopError> {
        // f0 = 0001 (1 cube), f1 = 1110 (2 cubes), f0 ^ f1 = 1 (1 cube)
        let f: TruthTable = "01010110".parse()?;
        let cache = ExpansionCache::build(&f);
        assert_eq!(cache.get(&f), Some(Expansion::PositiveDavio(2)));
        check("01010110", "-11;1")?;

        // Keeping the most expensive cofactor would exceed the 2 cubes of the PPRM form
        check("11111110", "-;111")?;
        assert_eq!(esop_from_pprm(&"11111110".parse::<TruthTable>()?).len(), 2);
        Ok(())
    }

    #[test]
    fn constants() -> Result<(), EsopError> {
        assert!(esop_from_optimum_pkrm(&TruthTable::const0(3)).is_empty());

        let esop = esop_from_optimum_pkrm(&TruthTable::const1(3));
        assert_eq!(esop.len(), 1);
        assert!(esop.contains(&Cube::tautology()));

        assert!(ExpansionCache::build(&TruthTable::const1(3)).is_empty());
        Ok(())
    }

    #[test]
    fn small_functions() -> Result<(), EsopError> {
        check("0110", "-1;1-")?;
        check("1000", "00")?;
        check("0111", "-1;10")?;
        check("0001", "11")?;
        check("1110", "--;11")?;
        check("10010110", "--0;-1-;1--")?;
        check("0000000100010111", "-111;1-11;11-1;1110")?;
        Ok(())
    }

    #[test]
    fn five_variables() -> Result<(), EsopError> {
        check(
            "01111111111101010111111101010011",
            "-----;-0111;0--10;0-0--;0100-",
        )
    }

    #[test]
    fn cache_content() -> Result<(), EsopError> {
        let f: TruthTable = "10010110".parse()?;
        let cache = ExpansionCache::build(&f);
        let cost = cache.cost(&f).unwrap();
        assert!(cost as usize >= esop_from_optimum_pkrm(&f).len());

        // The cofactors were explored as well
        let f0 = f.cofactor0(0);
        assert!(cache.get(&f0).is_some());
        assert!(cache.cost(&f0.cofactor0(0)).is_some());
        Ok(())
    }

    #[test]
    fn shared_sub_functions() -> Result<(), EsopError> {
        // Majority: 0001 ^ 0111 = 0110, and 01 is reached from all three
        let f: TruthTable = "00010111".parse()?;
        let (f0, f1) = (f.cofactor0(0), f.cofactor1(0));
        let f2 = &f0 ^ &f1;
        let shared: TruthTable = "01".parse()?;
        assert_eq!(f0.cofactor1(0), shared);
        assert_eq!(&f0.cofactor0(0) ^ &f0.cofactor1(0), shared);
        assert_eq!(f1.cofactor0(0), shared);
        assert_eq!(f2.cofactor0(0), shared);

        // Root, 0001, 0111, 0110, 01 and 10
        let cache = ExpansionCache::build(&f);
        assert_eq!(cache.len(), 6);
        for g in [&f, &f0, &f1, &f2, &shared, &"10".parse::<TruthTable>()?] {
            assert!(cache.get(g).is_some(), "{}", g);
        }
        Ok(())
    }
}
