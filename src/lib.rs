//! Build Exclusive Sum-Of-Products (ESOP) forms of Boolean functions.
//!
//! An ESOP is the XOR of a set of [cubes](Cube), i.e. products of [literals](Literal)
//! on some [Boolean variables](Variable). Variables are identified by an integer UID which
//! gives their position in the input assignments of a [TruthTable]: the bit ```i``` of an
//! assignment is the value of the variable ```i```.
//!
//! ```
//! use esopkit::{Cube, Esop, Variable};
//! # use esopkit::EsopError;
//! # fn main() -> Result<(), EsopError> {
//!
//! // Create some variables
//! let a = Variable::from(0);
//! let c = Variable::from(2);
//!
//! // Cubes are built from literals or parsed from strings (- for free, 0 for negative, 1 for positive)
//! let c1 = a & !c;
//! let c2: Cube = "-1".parse()?;
//! assert_eq!(c1.distance(&c2), 3);
//!
//! // The ESOP is the XOR of its cubes
//! let esop = Esop::default() ^ c1 ^ c2 ^ Cube::from(c);
//! assert_eq!(esop.len(), 3);
//! assert!(esop.eval(0b001));
//! assert!(!esop.eval(0b110));
//! # Ok(())
//! # }
//! ```
//!
//! # Constructing ESOPs from truth tables
//!
//! Recursive expansions of a function around its variables yield ESOP forms. The
//! [Positive Polarity Reed-Muller](esop_from_pprm) form only uses positive literals and is canonical.
//! The [optimum Pseudo-Kronecker Reed-Muller](esop_from_optimum_pkrm) form selects the best expansion for each
//! sub-function and is never larger than the PPRM form. Cubes are collected in an [Esop] which cancels
//! duplicate cubes and (for PKRM) greedily merges cubes at distance 1.
//!
//! ```
//! use esopkit::{esop_from_optimum_pkrm, esop_from_pprm, efmt, TruthTable};
//! # use esopkit::EsopError;
//! # fn main() -> Result<(), EsopError> {
//!
//! let f: TruthTable = "1000".parse()?;
//! let pprm = esop_from_pprm(&f);
//! let pkrm = esop_from_optimum_pkrm(&f);
//! assert_eq!(pprm.len(), 4);
//! assert_eq!(pkrm.len(), 1);
//!
//! assert_eq!(format!("{}", pkrm.infix(&efmt::DEFAULT_FMT_CFG)), "!x0 & !x1");
//! assert_eq!(pkrm.to_truth_table(2), f);
//! # Ok(())
//! # }
//! ```
//!
//! # Exact synthesis
//!
//! For small incompletely specified functions, the [synthesis] module finds ESOPs with a
//! minimal number of cubes by exhaustive search.
//!
//! ```
//! use esopkit::synthesis::{MinimumSynthesizer, MinimumSynthesizerParams, Specification};
//! # use esopkit::EsopError;
//! # fn main() -> Result<(), EsopError> {
//!
//! let spec = Specification::from_binary_strings("01101001", "11111111")?;
//! let esop = MinimumSynthesizer::new(&spec)?.synthesize(MinimumSynthesizerParams::upward(1));
//! assert_eq!(esop.len(), 3);
//! assert!(spec.is_satisfied_by(&esop));
//! # Ok(())
//! # }
//! ```

mod cube;
pub mod efmt;
mod error;
mod esop;
mod parse;
mod pkrm;
mod pprm;
pub mod synthesis;
mod truth_table;
mod variable;

use std::collections::HashMap;

#[macro_use]
extern crate pest_derive;

// Export public structures and API
pub use cube::Cube;
pub use error::EsopError;
pub use esop::Esop;
pub use parse::parse_esop;
pub use pkrm::{esop_from_optimum_pkrm, Expansion, ExpansionCache};
pub use pprm::esop_from_pprm;
pub use synthesis::{verify_esop, Specification};
pub use truth_table::{TruthTable, MAX_VARIABLES};
pub use variable::{Literal, VarSet, Variable};
