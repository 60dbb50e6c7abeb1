//! Formatting API for ESOP expressions

use crate::{Cube, Esop, Literal};
use delegate::delegate;

use std::fmt;

/// Operators used in the algebraic form of an ESOP
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Operator {
    And,
    Xor,
}

impl Operator {
    /// Binding strength of the operator: AND binds tighter than XOR
    pub fn priority(&self) -> u8 {
        match self {
            Operator::And => 2,
            Operator::Xor => 1,
        }
    }
}

pub struct FormatterConfig<'a> {
    s_and: &'a str,
    s_xor: &'a str,
    s_not: &'a str,
}

pub static DEFAULT_FMT_CFG: FormatterConfig = FormatterConfig {
    s_and: "&",
    s_xor: "^",
    s_not: "!",
};

pub static LOWERCASE_FMT_CFG: FormatterConfig = FormatterConfig {
    s_and: "and",
    s_xor: "xor",
    s_not: "not ",
};

pub struct InfixFormatted<'a> {
    esop: &'a Esop,
    cfg: &'a FormatterConfig<'a>,
}

/// Define hooks to display separate parts of ESOP expressions.
///
/// [Esop::fmt_with] visits the cubes and literals of the ESOP and calls the hooks
/// defined in this trait. Infix and prefix formatters are implemented on top of [fmt::Formatter],
/// they are used through wrappers overriding the Display trait.
pub trait EsopFormatter {
    /// Pass-through function calling an internal [fmt::Formatter].
    ///
    /// This function enables the use of the ```write!``` macro in other functions.
    fn write_fmt(&mut self, args: fmt::Arguments) -> fmt::Result;

    /// Write a constant: the empty ESOP or the tautology cube
    fn write_bool(&mut self, b: bool) -> fmt::Result;

    /// Write a single literal
    fn write_literal(&mut self, lit: Literal) -> fmt::Result;

    /// Start writing an operation with at least two operands
    fn start_operation(&mut self, op: Operator, parent: Option<Operator>) -> fmt::Result;

    /// Stop writing an operation with at least two operands
    fn end_operation(&mut self, op: Operator, parent: Option<Operator>) -> fmt::Result;

    /// Separate two operands in the ongoing operation
    fn sep_operation(&mut self, op: Operator) -> fmt::Result;

    /// Write a cube as the conjunction of its literals
    fn write_cube(&mut self, cube: &Cube, parent: Option<Operator>) -> fmt::Result {
        if cube.is_tautology() {
            return self.write_bool(true);
        }
        if cube.num_literals() == 1 {
            if let Some(lit) = cube.literals().next() {
                return self.write_literal(lit);
            }
        }

        self.start_operation(Operator::And, parent)?;
        for (idx, lit) in cube.literals().enumerate() {
            if idx > 0 {
                self.sep_operation(Operator::And)?;
            }
            self.write_literal(lit)?;
        }
        self.end_operation(Operator::And, parent)
    }

    /// Write a full ESOP as the XOR of its cubes
    fn write_esop(&mut self, esop: &Esop) -> fmt::Result {
        match esop.len() {
            0 => self.write_bool(false),
            1 => match esop.iter().next() {
                Some(cube) => self.write_cube(cube, None),
                None => Ok(()),
            },
            _ => {
                self.start_operation(Operator::Xor, None)?;
                for (idx, cube) in esop.iter().enumerate() {
                    if idx > 0 {
                        self.sep_operation(Operator::Xor)?;
                    }
                    self.write_cube(cube, Some(Operator::Xor))?;
                }
                self.end_operation(Operator::Xor, None)
            }
        }
    }
}

impl FormatterConfig<'_> {
    pub fn operator(&self, op: Operator) -> &str {
        match op {
            Operator::And => self.s_and,
            Operator::Xor => self.s_xor,
        }
    }

    pub fn infix<'a>(&'a self, esop: &'a Esop) -> InfixFormatted<'a> {
        InfixFormatted { esop, cfg: self }
    }
}

impl Esop {
    /// Visit this ESOP with a custom formatter
    pub fn fmt_with<F: EsopFormatter>(&self, f: &mut F) -> fmt::Result {
        f.write_esop(self)
    }

    /// Display this ESOP as an algebraic expression using the given operators
    ///
    /// ```
    /// use esopkit::{Esop, efmt};
    /// # use esopkit::EsopError;
    /// # fn main() -> Result<(), EsopError> {
    ///
    /// let esop: Esop = "1-0 ; --1".parse()?;
    /// assert_eq!(format!("{}", esop.infix(&efmt::DEFAULT_FMT_CFG)), "x0 & !x2 ^ x2");
    /// assert_eq!(format!("{}", esop.infix(&efmt::LOWERCASE_FMT_CFG)), "x0 and not x2 xor x2");
    /// # Ok(())
    /// # }
    /// ```
    pub fn infix<'a>(&'a self, cfg: &'a FormatterConfig<'a>) -> InfixFormatted<'a> {
        cfg.infix(self)
    }
}

pub struct InfixFormatter<'a, 'b>(&'a mut fmt::Formatter<'b>, &'a FormatterConfig<'a>);
pub struct PrefixFormatter<'a, 'b>(InfixFormatter<'a, 'b>);

impl<'a, 'b> InfixFormatter<'a, 'b> {
    pub fn new(f: &'a mut fmt::Formatter<'b>) -> Self {
        Self(f, &DEFAULT_FMT_CFG)
    }
    pub fn with(f: &'a mut fmt::Formatter<'b>, cfg: &'a FormatterConfig) -> Self {
        Self(f, cfg)
    }
}

impl<'a, 'b> PrefixFormatter<'a, 'b> {
    pub fn new(f: &'a mut fmt::Formatter<'b>) -> Self {
        Self(InfixFormatter::new(f))
    }
}

impl EsopFormatter for InfixFormatter<'_, '_> {
    fn write_fmt(&mut self, args: fmt::Arguments) -> fmt::Result {
        fmt::Formatter::write_fmt(self.0, args)
    }

    fn write_bool(&mut self, b: bool) -> fmt::Result {
        match b {
            false => write!(self, "0"),
            true => write!(self, "1"),
        }
    }

    fn write_literal(&mut self, lit: Literal) -> fmt::Result {
        if !lit.polarity() {
            write!(self, "{}", self.1.s_not)?;
        }
        write!(self, "{}", lit.variable())
    }

    fn start_operation(&mut self, op: Operator, parent: Option<Operator>) -> fmt::Result {
        match op.priority() < parent.map(|o| o.priority()).unwrap_or(0) {
            true => write!(self, "("),
            false => Ok(()),
        }
    }

    fn end_operation(&mut self, op: Operator, parent: Option<Operator>) -> fmt::Result {
        match op.priority() < parent.map(|o| o.priority()).unwrap_or(0) {
            true => write!(self, ")"),
            false => Ok(()),
        }
    }

    fn sep_operation(&mut self, op: Operator) -> fmt::Result {
        write!(self, " {} ", self.1.operator(op))
    }
}

/// Display an ESOP in prefix notation: ```(^ (& x0 !x2) x2)```
pub struct PrefixFormatted<'a>(pub &'a Esop);

impl fmt::Display for PrefixFormatted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut ef = PrefixFormatter::new(f);
        self.0.fmt_with(&mut ef)
    }
}

impl fmt::Display for InfixFormatted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut ef = InfixFormatter::with(f, self.cfg);
        self.esop.fmt_with(&mut ef)
    }
}

impl EsopFormatter for PrefixFormatter<'_, '_> {
    delegate! {
        to self.0 {
            fn write_fmt(&mut self, args: fmt::Arguments) -> fmt::Result;
            fn write_bool(&mut self, b: bool) -> fmt::Result;
            fn write_literal(&mut self, lit: Literal) -> fmt::Result;
        }
    }

    fn start_operation(&mut self, op: Operator, _parent: Option<Operator>) -> fmt::Result {
        match op {
            Operator::And => write!(self, "(& "),
            Operator::Xor => write!(self, "(^ "),
        }
    }

    fn end_operation(&mut self, _op: Operator, _parent: Option<Operator>) -> fmt::Result {
        write!(self, ")")
    }

    fn sep_operation(&mut self, _op: Operator) -> fmt::Result {
        write!(self, " ")
    }
}

#[cfg(test)]
mod tests {
    use crate::efmt;
    use crate::*;
    use test_log::test;

    #[test]
    fn infix_and_prefix() -> Result<(), EsopError> {
        let esop: Esop = "1-0;--1;01".parse()?;
        assert_eq!(
            format!("{}", esop.infix(&efmt::DEFAULT_FMT_CFG)),
            "x0 & !x2 ^ x2 ^ !x0 & x1"
        );
        assert_eq!(
            format!("{}", esop.infix(&efmt::LOWERCASE_FMT_CFG)),
            "x0 and not x2 xor x2 xor not x0 and x1"
        );
        assert_eq!(
            format!("{}", efmt::PrefixFormatted(&esop)),
            "(^ (& x0 !x2) x2 (& !x0 x1))"
        );
        Ok(())
    }

    #[test]
    fn constants_and_single_cubes() -> Result<(), EsopError> {
        let cfg = &efmt::DEFAULT_FMT_CFG;
        assert_eq!(format!("{}", Esop::default().infix(cfg)), "0");

        let one = Esop::default() ^ Cube::tautology();
        assert_eq!(format!("{}", one.infix(cfg)), "1");

        let esop: Esop = "1-0".parse()?;
        assert_eq!(format!("{}", esop.infix(cfg)), "x0 & !x2");
        assert_eq!(format!("{}", efmt::PrefixFormatted(&esop)), "(& x0 !x2)");

        let esop: Esop = "---;0".parse()?;
        assert_eq!(format!("{}", esop.infix(cfg)), "1 ^ !x0");
        Ok(())
    }
}
