use crate::*;
use pest::{iterators, Parser};

#[derive(Parser)]
#[grammar_inline = r####"
esop   = { SOI ~ prod ~ ( "^" ~ prod )* ~ EOI }
prod   = { factor ~ ( "&" ~ factor )* }
factor = _{ neg | bt | bf | var | "(" ~ prod ~ ")" | "[" ~ prod ~ "]" }
neg    = { ("!" | "~") ~ var }
bt     = { ^"true" | "1" }
bf     = { ^"false" | "0" }
var    = @{ ^"x" ~ ASCII_DIGIT+ }

WHITESPACE = _{ " " | "\t" | "\n" }
"####]
struct ExpressionParser;

/// Parse an ESOP written as an algebraic expression.
///
/// The expression is a XOR (```^```) of products (```&```) of literals. Literals are
/// variables (```x0```, ```x1```...), optionally negated with ```!``` or ```~```.
/// Products can be wrapped in parentheses and can use the constants ```0``` and ```1```.
/// This is the format produced by the default infix formatter.
///
/// Products are collected with cancellation only: the result is the
/// XOR of all products, but no cubes are merged.
///
/// ```
/// use esopkit::parse_esop;
/// # use esopkit::{Esop, EsopError};
/// # fn main() -> Result<(), EsopError> {
///
/// let esop = parse_esop("x0 & !x2 ^ x2 ^ x2")?;
/// assert_eq!(esop, "1-0".parse::<Esop>()?);
/// # Ok(())
/// # }
/// ```
pub fn parse_esop(s: &str) -> Result<Esop, EsopError> {
    let root = ExpressionParser::parse(Rule::esop, s)
        .map_err(|_| EsopError::InvalidExpression)?
        .next()
        .ok_or(EsopError::InvalidExpression)?;

    let mut esop = Esop::default();
    for prod in root.into_inner() {
        match prod.as_rule() {
            Rule::prod => {
                if let Some(cube) = load_product(prod)? {
                    esop.insert(cube, false);
                }
            }
            Rule::EOI => (),
            _ => return Err(EsopError::InvalidExpression),
        }
    }
    Ok(esop)
}

/// Load a product, None if it is always false
fn load_product(prod: iterators::Pair<Rule>) -> Result<Option<Cube>, EsopError> {
    let mut cube = Cube::tautology();
    let mut satisfiable = true;
    for factor in prod.into_inner() {
        match factor.as_rule() {
            Rule::bt => (),
            Rule::bf => satisfiable = false,
            Rule::var => {
                let lit = Literal::new(factor.as_str().parse::<Variable>()?, true);
                satisfiable &= restrict(&mut cube, lit);
            }
            Rule::neg => {
                let var = factor
                    .into_inner()
                    .next()
                    .ok_or(EsopError::InvalidExpression)?;
                let lit = Literal::new(var.as_str().parse::<Variable>()?, false);
                satisfiable &= restrict(&mut cube, lit);
            }
            Rule::prod => match load_product(factor)? {
                None => satisfiable = false,
                Some(inner) => {
                    for lit in inner.literals() {
                        satisfiable &= restrict(&mut cube, lit);
                    }
                }
            },
            // Other rules are outside of scope or hidden
            _ => return Err(EsopError::InvalidExpression),
        }
    }
    Ok(if satisfiable { Some(cube) } else { None })
}

/// Add a literal to a product, false if it conflicts with an existing one
fn restrict(cube: &mut Cube, lit: Literal) -> bool {
    if cube.literal(lit.variable()) == Some(!lit.polarity()) {
        return false;
    }
    cube.add_literal(lit.variable(), lit.polarity());
    true
}
