//! Positive Polarity Reed-Muller (PPRM) form.

use crate::*;

use log::debug;

fn emit_pprm(cubes: &mut Esop, f: &TruthTable, var: usize, cube: Cube) {
    if f.is_const0() {
        return;
    }
    if f.is_const1() {
        cubes.insert(cube, false);
        return;
    }

    let f0 = f.cofactor0(0);
    let f2 = &f0 ^ &f.cofactor1(0);
    emit_pprm(cubes, &f0, var + 1, cube.clone());
    emit_pprm(cubes, &f2, var + 1, cube & Variable(var));
}

/// Build the canonical PPRM form of a function.
///
/// All variables are expanded with positive Davio decomposition:
/// the result only uses positive literals and is unique for each function.
/// The cubes are collected with cancellation but without merging.
///
/// ```
/// use esopkit::{esop_from_pprm, TruthTable};
/// # use esopkit::EsopError;
/// # fn main() -> Result<(), EsopError> {
///
/// // !x0 & !x1 = 1 ^ x0 ^ x1 ^ x0 & x1
/// let nor: TruthTable = "1000".parse()?;
/// let esop = esop_from_pprm(&nor);
/// assert_eq!(esop.len(), 4);
/// assert_eq!(esop.to_truth_table(2), nor);
/// # Ok(())
/// # }
/// ```
pub fn esop_from_pprm(f: &TruthTable) -> Esop {
    let mut cubes = Esop::default();
    emit_pprm(&mut cubes, f, 0, Cube::tautology());
    debug!("PPRM of {} with {} cubes", f, cubes.len());
    cubes
}
