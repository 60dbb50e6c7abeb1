use thiserror::Error;

/// Error raised when reading truth tables, cubes or ESOP expressions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EsopError {
    /// A binary or cube string contains an unexpected character
    #[error("Unexpected character '{0}'")]
    InvalidCharacter(char),

    /// The length of a truth table string is not a power of two
    #[error("A truth table needs a power of two bits, got {0}")]
    InvalidLength(usize),

    /// The function and care strings do not have the same length
    #[error("Length mismatch between bits ({0}) and care ({1})")]
    LengthMismatch(usize, usize),

    /// The truth table would be too large
    #[error("Too many variables: {0}")]
    TooManyVariables(usize),

    /// The name is not a valid variable, or its index is out of range
    #[error("The name '{0}' is not a valid variable")]
    InvalidVariable(String),

    /// The expression is invalid
    #[error("Not a valid expression")]
    InvalidExpression,
}
