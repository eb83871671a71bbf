use num_bigint::BigInt;
use num_traits::{FromPrimitive, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use crate::value::constants::NORMALIZATION_EPSILON;

// Largest operand whose factorial is still finite as an f64
const FACTORIAL_OVERFLOW: u32 = 170;

// Any power at least this many bits wide is beyond f64::MAX
const POWER_OVERFLOW_BITS: u64 = 1024;

/// A scalar produced by an expression node
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(BigInt),
    Real(f64),
}

/// Hashable identity of a normalized value
///
/// Integers compare by magnitude, reals by their exact bit pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Integer(BigInt),
    Real(u64),
}

impl Value {
    /// Snap a real that sits within [`NORMALIZATION_EPSILON`] of an integer
    /// onto that integer. Integers and non-finite reals pass through unchanged.
    #[must_use]
    pub fn normalize(self) -> Self {
        match self {
            Value::Real(x) if x.is_finite() => {
                let nearest = x.round();
                if (x - nearest).abs() < NORMALIZATION_EPSILON {
                    match BigInt::from_f64(nearest) {
                        Some(n) => Value::Integer(n),
                        None => Value::Real(x),
                    }
                } else {
                    Value::Real(x)
                }
            }
            other => other,
        }
    }

    /// Build a normalized value from a raw float
    #[must_use]
    pub fn from_f64(x: f64) -> Self {
        Value::Real(x).normalize()
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Value::Integer(n) => n.to_f64().unwrap_or(f64::INFINITY),
            Value::Real(x) => *x,
        }
    }

    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Value::Integer(n) => Some(n),
            Value::Real(_) => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Value::Integer(n) => n.is_zero(),
            Value::Real(x) => *x == 0.0,
        }
    }

    /// True when this is an integer no greater than `limit`
    pub fn is_integer_at_most(&self, limit: u64) -> bool {
        self.as_integer().is_some_and(|n| *n <= BigInt::from(limit))
    }

    /// True when this is a strictly positive integer
    pub fn is_positive_integer(&self) -> bool {
        self.as_integer().is_some_and(|n| n.is_positive())
    }

    /// Exact equality against an integer target
    pub fn equals_target(&self, target: &BigInt) -> bool {
        self.as_integer().is_some_and(|n| n == target)
    }

    /// Inclusive range check; NaN is never in range
    pub fn in_range(&self, min: f64, max: f64) -> bool {
        let x = self.as_f64();
        x >= min && x <= max
    }

    pub fn key(&self) -> ValueKey {
        match self {
            Value::Integer(n) => ValueKey::Integer(n.clone()),
            Value::Real(x) => ValueKey::Real(x.to_bits()),
        }
    }

    /// Raise to a power. Integer bases with small non-negative integer
    /// exponents stay exact unless the result could not fit in an f64, in
    /// which case it is infinite.
    #[must_use]
    pub fn pow(&self, exponent: &Value) -> Value {
        let small_exponent = exponent
            .as_integer()
            .filter(|e| !e.is_negative())
            .and_then(ToPrimitive::to_u32);

        match (self, small_exponent) {
            (Value::Integer(base), Some(e)) => {
                // base >= 2^(bits - 1), so the result has at least (bits - 1) * e bits
                let min_bits = base.bits().saturating_sub(1).saturating_mul(u64::from(e));
                if min_bits >= POWER_OVERFLOW_BITS {
                    Value::Real(f64::INFINITY)
                } else {
                    Value::Integer(base.pow(e))
                }
            }
            _ => Value::from_f64(self.as_f64().powf(exponent.as_f64())),
        }
    }

    /// Factorial of a non-negative integer. Any other operand yields NaN.
    #[must_use]
    pub fn factorial(&self) -> Value {
        let Some(n) = self
            .as_integer()
            .filter(|n| !n.is_negative())
            .map(|n| n.to_u32().unwrap_or(u32::MAX))
        else {
            return Value::Real(f64::NAN);
        };

        if n > FACTORIAL_OVERFLOW {
            return Value::Real(f64::INFINITY);
        }

        Value::Integer((1..=n).fold(BigInt::from(1u32), |acc, k| acc * k))
    }

    /// Square root. Perfect squares stay exact; negative operands yield NaN.
    #[must_use]
    pub fn sqrt(&self) -> Value {
        match self {
            Value::Integer(n) if n.is_negative() => Value::Real(f64::NAN),
            Value::Integer(n) => {
                let root = n.sqrt();
                if &root * &root == *n {
                    Value::Integer(root)
                } else {
                    Value::from_f64(self.as_f64().sqrt())
                }
            }
            Value::Real(x) => Value::from_f64(x.sqrt()),
        }
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Integer(BigInt::from(n))
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::Integer(n)
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Real(x) => write!(f, "{}", x),
        }
    }
}

impl Add for &Value {
    type Output = Value;

    fn add(self, rhs: &Value) -> Value {
        match (self, rhs) {
            (Value::Integer(a), Value::Integer(b)) => Value::Integer(a + b),
            _ => Value::from_f64(self.as_f64() + rhs.as_f64()),
        }
    }
}

impl Sub for &Value {
    type Output = Value;

    fn sub(self, rhs: &Value) -> Value {
        match (self, rhs) {
            (Value::Integer(a), Value::Integer(b)) => Value::Integer(a - b),
            _ => Value::from_f64(self.as_f64() - rhs.as_f64()),
        }
    }
}

impl Mul for &Value {
    type Output = Value;

    fn mul(self, rhs: &Value) -> Value {
        match (self, rhs) {
            (Value::Integer(a), Value::Integer(b)) => Value::Integer(a * b),
            _ => Value::from_f64(self.as_f64() * rhs.as_f64()),
        }
    }
}

impl Div for &Value {
    type Output = Value;

    /// Exact when the integer quotient has no remainder. Division by zero
    /// follows IEEE semantics and is gated out by the search engine.
    fn div(self, rhs: &Value) -> Value {
        match (self, rhs) {
            (Value::Integer(a), Value::Integer(b)) if !b.is_zero() && (a % b).is_zero() => {
                Value::Integer(a / b)
            }
            _ => Value::from_f64(self.as_f64() / rhs.as_f64()),
        }
    }
}
