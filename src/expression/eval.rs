use log::debug;

use crate::expression::ast::{BinaryOp, Node, NodeKind};
use crate::expression::errors::ExpressionError;
use crate::value::Value;

// 171! no longer fits in an f64
const FACTORIAL_OVERFLOW: f64 = 170.0;

impl BinaryOp {
    /// Apply the operator to two values. The result is normalized.
    pub fn apply(&self, left: &Value, right: &Value) -> Value {
        match self {
            BinaryOp::Add => left + right,
            BinaryOp::Sub => left - right,
            BinaryOp::Mul => left * right,
            BinaryOp::Div => left / right,
            BinaryOp::Pow => left.pow(right),
        }
    }
}

impl Node {
    /// Recompute this node's value from its operator and its children's
    /// stored values. Always equal to [`Node::value`] for a well-formed node.
    pub fn recompute(&self) -> Value {
        match self.kind() {
            NodeKind::Literal(text) => text
                .parse::<num_bigint::BigInt>()
                .map(Value::Integer)
                .unwrap_or(Value::Real(f64::NAN)),
            NodeKind::Factorial(child) => child.value().factorial(),
            NodeKind::SquareRoot(child) => child.value().sqrt(),
            NodeKind::Binary { op, left, right } => op.apply(left.value(), right.value()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<Token>, ExpressionError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(position, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&(_, d)) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let number = literal
                    .parse::<f64>()
                    .map_err(|_| ExpressionError::InvalidNumber(literal.clone()))?;
                tokens.push(Token::Number(number));
            }
            'a'..='z' | 'A'..='Z' | '_' => {
                let mut ident = String::new();
                while let Some(&(_, d)) = chars.peek() {
                    if d.is_ascii_alphanumeric() || d == '_' {
                        ident.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(ident));
            }
            '*' => {
                chars.next();
                if matches!(chars.peek(), Some(&(_, '*'))) {
                    chars.next();
                    tokens.push(Token::DoubleStar);
                } else {
                    tokens.push(Token::Star);
                }
            }
            '+' | '-' | '/' | '(' | ')' => {
                chars.next();
                tokens.push(match c {
                    '+' => Token::Plus,
                    '-' => Token::Minus,
                    '/' => Token::Slash,
                    '(' => Token::LParen,
                    _ => Token::RParen,
                });
            }
            character => {
                return Err(ExpressionError::UnexpectedCharacter {
                    character,
                    position,
                });
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        self.position += 1;
        token
    }

    fn expect(&mut self, expected: Token) -> Result<(), ExpressionError> {
        match self.advance() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(ExpressionError::UnexpectedToken(format!("{:?}", token))),
            None => Err(ExpressionError::UnexpectedEnd),
        }
    }

    fn expression(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.advance();
                    value += self.term()?;
                }
                Some(Token::Minus) => {
                    self.advance();
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.power()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.advance();
                    value *= self.power()?;
                }
                Some(Token::Slash) => {
                    self.advance();
                    let divisor = self.power()?;
                    if divisor == 0.0 {
                        debug!("Division by zero attempted");
                        return Err(ExpressionError::DivisionByZero);
                    }
                    value /= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    // `**` is right-associative
    fn power(&mut self) -> Result<f64, ExpressionError> {
        let base = self.atom()?;
        if matches!(self.peek(), Some(Token::DoubleStar)) {
            self.advance();
            let exponent = self.power()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<f64, ExpressionError> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::LParen) => {
                let value = self.expression()?;
                self.expect(Token::RParen)?;
                Ok(value)
            }
            Some(Token::Ident(name)) => {
                self.expect(Token::LParen)?;
                let argument = self.expression()?;
                self.expect(Token::RParen)?;
                call(&name, argument)
            }
            Some(token) => Err(ExpressionError::UnexpectedToken(format!("{:?}", token))),
            None => Err(ExpressionError::UnexpectedEnd),
        }
    }
}

fn call(name: &str, argument: f64) -> Result<f64, ExpressionError> {
    match name {
        "round" => Ok(argument.round()),
        "factorial" => {
            if argument < 0.0 || argument.fract() != 0.0 {
                return Err(ExpressionError::InvalidFactorial(argument));
            }
            if argument > FACTORIAL_OVERFLOW {
                return Ok(f64::INFINITY);
            }
            Ok((1..=argument as u64).map(|k| k as f64).product())
        }
        other => Err(ExpressionError::UnknownFunction(other.to_string())),
    }
}

/// Evaluate the evaluable rendering of a node with plain floating-point
/// arithmetic
///
/// # Errors
///
/// Returns an error when the input is not a well-formed evaluable string,
/// names an unknown function, divides by zero, or takes the factorial of a
/// negative or fractional number.
pub fn evaluate_evaluable(input: &str) -> Result<f64, ExpressionError> {
    debug!("Evaluating evaluable expression: {}", input);

    let mut parser = Parser {
        tokens: tokenize(input)?,
        position: 0,
    };
    let value = parser.expression()?;

    if let Some(token) = parser.peek() {
        return Err(ExpressionError::UnexpectedToken(format!("{:?}", token)));
    }

    debug!("Evaluable expression evaluated to: {}", value);
    Ok(value)
}
