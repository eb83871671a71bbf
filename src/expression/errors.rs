use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },
    #[error("Unexpected token: {0}")]
    UnexpectedToken(String),
    #[error("Unexpected end of expression")]
    UnexpectedEnd,
    #[error("Invalid number literal: {0}")]
    InvalidNumber(String),
    #[error("Unknown function: {0}")]
    UnknownFunction(String),
    #[error("Factorial requires a non-negative integer, got {0}")]
    InvalidFactorial(f64),
}
