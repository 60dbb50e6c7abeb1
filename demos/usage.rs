use esopkit::synthesis::{exact_synthesis, ExactSynthesisConfig, Specification};
use esopkit::*;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let f: TruthTable = "01111111111101010111111101010011".parse()?;
    println!("f = {}", f);

    let pprm = esop_from_pprm(&f);
    println!("PPRM ({} cubes):\n{}", pprm.len(), pprm);

    let pkrm = esop_from_optimum_pkrm(&f);
    println!("PKRM ({} cubes): {}", pkrm.len(), pkrm.infix(&efmt::DEFAULT_FMT_CFG));
    println!("prefix: {}", efmt::PrefixFormatted(&pkrm));

    let parsed = parse_esop("x0 & !x1 ^ x2 ^ x2 & x0")?;
    println!("parsed: {}", parsed.infix(&efmt::LOWERCASE_FMT_CFG));

    let spec = Specification::complete(f);
    let cfg = ExactSynthesisConfig::default();
    for esop in exact_synthesis(&spec, &cfg)? {
        println!(
            "minimum ({} cubes, verified: {}): {}",
            esop.len(),
            spec.is_satisfied_by(&esop),
            esop.infix(&efmt::DEFAULT_FMT_CFG)
        );
    }

    Ok(())
}
