//! End-to-end checks of the ESOP constructors and synthesizers

use esopkit::synthesis::*;
use esopkit::*;
use test_log::test;

const BITS: &str = "01111111111101010111111101010011";
const CARE: &str = "11111111111111111111111111111111";

/// All functions of a given arity, taking one out of `stride`
fn functions(num_vars: usize, stride: usize) -> impl Iterator<Item = TruthTable> {
    let num_bits = 1 << num_vars;
    (0..1usize << num_bits)
        .step_by(stride)
        .map(move |code| TruthTable::from_fn(num_vars, |idx| (code >> idx) & 1 == 1))
}

#[test]
fn pprm_is_correct_and_canonical() {
    for num_vars in 0..4 {
        for f in functions(num_vars, 1) {
            let pprm = esop_from_pprm(&f);
            assert!(pprm.verify(&f, &TruthTable::const1(num_vars)), "PPRM of {}", f);
            assert_eq!(pprm.is_empty(), f.is_const0());
            assert!(pprm.iter().all(|c| c.literals().all(|l| l.polarity())));
        }
    }
}

#[test]
fn pkrm_is_correct_and_not_larger_than_pprm() {
    let check = |f: TruthTable| {
        let pkrm = esop_from_optimum_pkrm(&f);
        let pprm = esop_from_pprm(&f);
        assert_eq!(pkrm.to_truth_table(f.num_vars()), f, "PKRM of {}", f);
        assert!(pkrm.len() <= pprm.len(), "PKRM of {} is larger than PPRM", f);

        let cost = ExpansionCache::build(&f).cost(&f).unwrap() as usize;
        assert!(pkrm.len() <= cost);
    };

    for num_vars in 0..4 {
        functions(num_vars, 1).for_each(check);
    }
    functions(4, 97).for_each(check);
}

#[test]
fn constant_functions() {
    for num_vars in 0..5 {
        assert!(esop_from_optimum_pkrm(&TruthTable::const0(num_vars)).is_empty());
        assert!(esop_from_pprm(&TruthTable::const0(num_vars)).is_empty());

        for esop in [
            esop_from_optimum_pkrm(&TruthTable::const1(num_vars)),
            esop_from_pprm(&TruthTable::const1(num_vars)),
        ] {
            assert_eq!(esop.len(), 1);
            assert!(esop.contains(&Cube::tautology()));
        }
    }
}

#[test]
fn constructors_verify_against_strings() -> Result<(), EsopError> {
    let f: TruthTable = BITS.parse()?;
    assert!(verify_esop(&esop_from_optimum_pkrm(&f), BITS, CARE)?);
    assert!(verify_esop(&esop_from_pprm(&f), BITS, CARE)?);
    Ok(())
}

#[test]
fn one_esop() -> Result<(), EsopError> {
    let cfg = ExactSynthesisConfig {
        maximum_cubes: 10,
        one_esop: true,
    };
    let esops = exact_synthesis_from_binary_string(BITS, CARE, &cfg)?;
    assert_eq!(esops.len(), 1);
    for e in &esops {
        assert_eq!(e.len(), 5);
        assert!(verify_esop(e, BITS, CARE)?);
    }
    Ok(())
}

#[test]
fn all_esops() -> Result<(), EsopError> {
    let cfg = ExactSynthesisConfig {
        maximum_cubes: 10,
        one_esop: false,
    };
    let esops = exact_synthesis_from_binary_string(BITS, CARE, &cfg)?;
    assert_eq!(esops.len(), 7);
    for (i, e) in esops.iter().enumerate() {
        assert_eq!(e.len(), 5);
        assert!(verify_esop(e, BITS, CARE)?);
        assert!(esops[..i].iter().all(|other| other != e));
    }
    Ok(())
}

#[test]
fn bounded_synthesis() -> Result<(), EsopError> {
    let spec = Specification::from_binary_strings(BITS, CARE)?;
    let synth = SimpleSynthesizer::new(&spec)?;

    let esop = synth.synthesize(&SimpleSynthesizerParams { number_of_terms: 4 });
    assert!(esop.is_empty());

    let esop = synth.synthesize(&SimpleSynthesizerParams { number_of_terms: 5 });
    assert_eq!(esop.len(), 5);
    assert!(verify_esop(&esop, BITS, CARE)?);
    Ok(())
}

#[test]
fn minimum_synthesis() -> Result<(), EsopError> {
    let spec = Specification::from_binary_strings(BITS, CARE)?;
    let synth = MinimumSynthesizer::new(&spec)?;

    // Decrease the number of terms while the search succeeds
    let esop = synth.synthesize(MinimumSynthesizerParams {
        begin: 8,
        next: |i: &mut usize, sat: bool| {
            if !sat || *i == 0 {
                return false;
            }
            *i -= 1;
            true
        },
    });
    assert_eq!(esop.len(), 5);
    assert!(verify_esop(&esop, BITS, CARE)?);

    // Increase the number of terms until the search succeeds
    let esop = synth.synthesize(MinimumSynthesizerParams::upward(1));
    assert_eq!(esop.len(), 5);
    assert!(verify_esop(&esop, BITS, CARE)?);
    Ok(())
}

#[test]
fn algebraic_roundtrip() -> Result<(), EsopError> {
    for f in functions(3, 1) {
        let esop = esop_from_optimum_pkrm(&f);
        let text = format!("{}", esop.infix(&efmt::DEFAULT_FMT_CFG));
        assert_eq!(parse_esop(&text)?, esop, "{}", text);
    }
    Ok(())
}
