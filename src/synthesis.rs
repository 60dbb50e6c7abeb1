//! Exact ESOP synthesis for incompletely specified functions.
//!
//! The target function is given as a [Specification]: the expected output bits and
//! a care set. An ESOP satisfies the specification if it matches the expected bits
//! on all positions of the care set, other positions are free.
//!
//! The synthesizers look for ESOPs with a fixed number of distinct cubes
//! by an exhaustive search over all cubes on the variables of the specification.
//! The cubes are ordered by a base-3 code where the digit ```i``` is the state of variable ```i```
//! (0 for free, 1 for negative and 2 for positive), and each candidate ESOP is a strictly
//! increasing sequence of cube indices. All but the last two cubes are enumerated in
//! lexicographic order, the last two are looked up in a table of pairs indexed by their masked XOR.
//!
//! This search is exponential in the number of variables and in the number of cubes,
//! it is limited to [MAX_EXACT_VARIABLES] variables.
//!
//! ```
//! use esopkit::synthesis::{exact_synthesis_from_binary_string, verify_esop, ExactSynthesisConfig};
//! # use esopkit::EsopError;
//! # fn main() -> Result<(), EsopError> {
//!
//! // x0 | x1, ignoring the last position
//! let solutions = exact_synthesis_from_binary_string("0111", "1110", &ExactSynthesisConfig::default())?;
//! assert_eq!(solutions.len(), 1);
//! assert_eq!(solutions[0].len(), 2);
//! assert!(verify_esop(&solutions[0], "0111", "1110")?);
//! # Ok(())
//! # }
//! ```

use crate::*;

use log::{debug, trace};
use once_cell::unsync::OnceCell;

/// Largest number of variables supported by the exact synthesis
pub const MAX_EXACT_VARIABLES: usize = 6;

/// A target function with a set of positions where its value matters.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Specification {
    bits: TruthTable,
    care: TruthTable,
}

impl Specification {
    /// Create a specification from the expected output and the care set
    pub fn new(bits: TruthTable, care: TruthTable) -> Result<Self, EsopError> {
        if bits.num_bits() != care.num_bits() {
            return Err(EsopError::LengthMismatch(bits.num_bits(), care.num_bits()));
        }
        Ok(Self { bits, care })
    }

    /// A completely specified function: all positions are in the care set
    pub fn complete(bits: TruthTable) -> Self {
        let care = TruthTable::const1(bits.num_vars());
        Self { bits, care }
    }

    /// Parse the expected output and the care set from two binary strings of the same length
    pub fn from_binary_strings(bits: &str, care: &str) -> Result<Self, EsopError> {
        let (len_bits, len_care) = (bits.trim().chars().count(), care.trim().chars().count());
        if len_bits != len_care {
            return Err(EsopError::LengthMismatch(len_bits, len_care));
        }
        Self::new(bits.parse()?, care.parse()?)
    }

    pub fn num_vars(&self) -> usize {
        self.bits.num_vars()
    }

    pub fn bits(&self) -> &TruthTable {
        &self.bits
    }

    pub fn care(&self) -> &TruthTable {
        &self.care
    }

    /// Check if an ESOP matches the expected output on all positions of the care set
    pub fn is_satisfied_by(&self, esop: &Esop) -> bool {
        esop.verify(&self.bits, &self.care)
    }
}

/// Check if an ESOP matches a function given as binary strings on all positions of the care set.
pub fn verify_esop(esop: &Esop, bits: &str, care: &str) -> Result<bool, EsopError> {
    let spec = Specification::from_binary_strings(bits, care)?;
    Ok(spec.is_satisfied_by(esop))
}

/// Bounds of the exact synthesis
#[derive(Clone, Copy, Debug)]
pub struct ExactSynthesisConfig {
    /// Largest number of cubes to consider
    pub maximum_cubes: usize,
    /// Stop at the first solution instead of listing all minimum ESOPs
    pub one_esop: bool,
}

impl Default for ExactSynthesisConfig {
    fn default() -> Self {
        Self {
            maximum_cubes: 10,
            one_esop: true,
        }
    }
}

/// Find the minimum ESOPs satisfying a specification.
///
/// The number of cubes is increased from 0 up to the configured maximum. At the first
/// number of cubes admitting a solution, the first solution or all solutions are returned.
/// Each solution is a different set of cubes. The result is empty if no ESOP exists within the bound.
///
/// Fails with [EsopError::TooManyVariables] above [MAX_EXACT_VARIABLES] variables.
pub fn exact_synthesis(
    spec: &Specification,
    cfg: &ExactSynthesisConfig,
) -> Result<Vec<Esop>, EsopError> {
    let space = CubeSpace::new(spec)?;
    for num_cubes in 0..=cfg.maximum_cubes {
        let solutions = space.solutions(num_cubes, cfg.one_esop);
        debug!("{} solution(s) with {} cubes", solutions.len(), num_cubes);
        if !solutions.is_empty() {
            return Ok(solutions);
        }
    }
    Ok(vec![])
}

/// Parse and validate a specification, then call [exact_synthesis]
pub fn exact_synthesis_from_binary_string(
    bits: &str,
    care: &str,
    cfg: &ExactSynthesisConfig,
) -> Result<Vec<Esop>, EsopError> {
    let spec = Specification::from_binary_strings(bits, care)?;
    exact_synthesis(&spec, cfg)
}

#[derive(Clone, Copy, Default, Debug)]
pub struct SimpleSynthesizerParams {
    pub number_of_terms: usize,
}

/// Search for an ESOP with an exact number of cubes
pub struct SimpleSynthesizer {
    space: CubeSpace,
}

impl SimpleSynthesizer {
    /// Fails with [EsopError::TooManyVariables] above [MAX_EXACT_VARIABLES] variables
    pub fn new(spec: &Specification) -> Result<Self, EsopError> {
        Ok(Self {
            space: CubeSpace::new(spec)?,
        })
    }

    /// Find the first ESOP with the requested number of distinct cubes, if any
    pub fn try_synthesize(&self, params: &SimpleSynthesizerParams) -> Option<Esop> {
        let result = self
            .space
            .solutions(params.number_of_terms, true)
            .into_iter()
            .next();
        debug!(
            "{} terms: {}",
            params.number_of_terms,
            if result.is_some() { "SAT" } else { "UNSAT" }
        );
        result
    }

    /// Find an ESOP with the requested number of cubes, the result is empty if none exists
    pub fn synthesize(&self, params: &SimpleSynthesizerParams) -> Esop {
        self.try_synthesize(params).unwrap_or_default()
    }
}

/// Drive a sequence of bounded searches.
///
/// The search starts with ```begin``` cubes. After each attempt, ```next``` receives
/// the current bound and the success of the attempt: it can update the bound and
/// returns false to stop the search.
pub struct MinimumSynthesizerParams<F: FnMut(&mut usize, bool) -> bool> {
    pub begin: usize,
    pub next: F,
}

impl MinimumSynthesizerParams<fn(&mut usize, bool) -> bool> {
    /// Decrease the bound until the search fails
    pub fn downward(begin: usize) -> Self {
        fn next(bound: &mut usize, sat: bool) -> bool {
            if sat && *bound > 0 {
                *bound -= 1;
                return true;
            }
            false
        }
        Self { begin, next }
    }

    /// Increase the bound until the search succeeds
    pub fn upward(begin: usize) -> Self {
        fn next(bound: &mut usize, sat: bool) -> bool {
            if sat {
                return false;
            }
            *bound += 1;
            true
        }
        Self { begin, next }
    }
}

/// Search for a minimum ESOP with a sequence of bounded searches
pub struct MinimumSynthesizer {
    inner: SimpleSynthesizer,
}

impl MinimumSynthesizer {
    pub fn new(spec: &Specification) -> Result<Self, EsopError> {
        Ok(Self {
            inner: SimpleSynthesizer::new(spec)?,
        })
    }

    /// Run the search and return the last ESOP found, or an empty ESOP
    pub fn synthesize<F>(&self, mut params: MinimumSynthesizerParams<F>) -> Esop
    where
        F: FnMut(&mut usize, bool) -> bool,
    {
        let mut bound = params.begin;
        let mut best = Esop::default();
        loop {
            let result = self.inner.try_synthesize(&SimpleSynthesizerParams {
                number_of_terms: bound,
            });
            let sat = result.is_some();
            if let Some(esop) = result {
                best = esop;
            }
            if !(params.next)(&mut bound, sat) {
                break;
            }
        }
        best
    }
}

/// All cubes on the variables of a specification, with their masked truth tables
struct CubeSpace {
    num_vars: usize,
    cubes: Vec<Cube>,
    tables: Vec<TruthTable>,
    target: TruthTable,
    pairs: OnceCell<HashMap<TruthTable, Vec<(usize, usize)>>>,
}

impl CubeSpace {
    fn new(spec: &Specification) -> Result<Self, EsopError> {
        let num_vars = spec.num_vars();
        if num_vars > MAX_EXACT_VARIABLES {
            return Err(EsopError::TooManyVariables(num_vars));
        }

        let cubes: Vec<Cube> = (0..3usize.pow(num_vars as u32))
            .map(|code| cube_from_code(num_vars, code))
            .collect();
        let tables = cubes
            .iter()
            .map(|c| &c.to_truth_table(num_vars) & spec.care())
            .collect();
        let target = spec.bits() & spec.care();

        Ok(Self {
            num_vars,
            cubes,
            tables,
            target,
            pairs: OnceCell::new(),
        })
    }

    /// Pairs of cubes indexed by their XOR with the target: a prefix with the same XOR is completed by the pair
    fn pairs(&self) -> &HashMap<TruthTable, Vec<(usize, usize)>> {
        self.pairs.get_or_init(|| {
            let mut pairs: HashMap<TruthTable, Vec<(usize, usize)>> = HashMap::new();
            for i in 0..self.tables.len() {
                let ti = &self.tables[i] ^ &self.target;
                for j in (i + 1)..self.tables.len() {
                    pairs.entry(&ti ^ &self.tables[j]).or_default().push((i, j));
                }
            }
            trace!("{} distinct pairs of cubes", pairs.len());
            pairs
        })
    }

    fn solutions(&self, num_cubes: usize, first_only: bool) -> Vec<Esop> {
        let mut solutions = vec![];
        self.search(num_cubes, &mut |indices: &[usize]| {
            solutions.push(indices.iter().map(|&i| self.cubes[i].clone()).collect());
            !first_only
        });
        solutions
    }

    /// Call the visitor on each strictly increasing sequence of cube indices whose XOR matches the target.
    ///
    /// The visitor returns false to stop the search.
    fn search<F: FnMut(&[usize]) -> bool>(&self, num_cubes: usize, visit: &mut F) {
        match num_cubes {
            0 => {
                if self.target.is_const0() {
                    visit(&[]);
                }
            }
            1 => {
                for (idx, t) in self.tables.iter().enumerate() {
                    if t == &self.target && !visit(&[idx]) {
                        return;
                    }
                }
            }
            _ => {
                let mut prefix = Vec::with_capacity(num_cubes);
                let mut acc = TruthTable::const0(self.num_vars);
                self.extend(&mut prefix, &mut acc, num_cubes - 2, visit);
            }
        }
    }

    fn extend<F: FnMut(&[usize]) -> bool>(
        &self,
        prefix: &mut Vec<usize>,
        acc: &mut TruthTable,
        remaining: usize,
        visit: &mut F,
    ) -> bool {
        let start = prefix.last().map(|&l| l + 1).unwrap_or(0);
        if remaining == 0 {
            let candidates = match self.pairs().get(&*acc) {
                None => return true,
                Some(c) => c,
            };
            for &(d, e) in candidates {
                if d < start {
                    continue;
                }
                prefix.push(d);
                prefix.push(e);
                let go_on = visit(prefix);
                prefix.truncate(prefix.len() - 2);
                if !go_on {
                    return false;
                }
            }
            return true;
        }

        // Leave room for the remaining prefix and the final pair
        let end = self.tables.len().saturating_sub(remaining + 1);
        for idx in start..end {
            prefix.push(idx);
            *acc ^= &self.tables[idx];
            let go_on = self.extend(prefix, acc, remaining - 1, visit);
            *acc ^= &self.tables[idx];
            prefix.pop();
            if !go_on {
                return false;
            }
        }
        true
    }
}

/// The cube at a given position of the base-3 enumeration
fn cube_from_code(num_vars: usize, mut code: usize) -> Cube {
    let mut cube = Cube::tautology();
    for var in 0..num_vars {
        match code % 3 {
            1 => cube.add_literal(Variable(var), false),
            2 => cube.add_literal(Variable(var), true),
            _ => (),
        }
        code /= 3;
    }
    cube
}
