//! Dynamically typed number type.

use std::fmt::{self, Debug, Display};

use num_bigint::BigInt;
use num_traits::{Num, ToPrimitive};

/// Represents a Rouge number, whether integer or floating point.
///
/// Integers have arbitrary precision. Integers that fit into an `i64` are kept
/// unboxed; larger magnitudes are stored as a [`BigInt`]. The representation is
/// normalized, so two integers of equal value always compare equal, regardless
/// of how they were constructed.
#[derive(PartialEq, Clone)]
pub struct Number {
    n: N,
}

#[derive(Debug, PartialEq, Clone)]
enum N {
    Fixnum(i64),
    // Never holds a value in the `i64` range.
    Bignum(BigInt),
    Float(f64),
}

impl Number {
    /// Returns true if the `Number` is an integer, of any magnitude.
    ///
    /// ```
    /// # use rouge_reader::Number;
    /// assert!(Number::from(42).is_integer());
    /// assert!(!Number::from(4.2).is_integer());
    /// ```
    #[inline]
    pub fn is_integer(&self) -> bool {
        match self.n {
            N::Fixnum(_) | N::Bignum(_) => true,
            N::Float(_) => false,
        }
    }

    /// Returns true if the `Number` is an integer between `i64::MIN` and
    /// `i64::MAX`.
    ///
    /// For any `Number` on which `is_i64` returns true, `as_i64` is
    /// guaranteed to return the integer value.
    #[inline]
    pub fn is_i64(&self) -> bool {
        match self.n {
            N::Fixnum(_) => true,
            N::Bignum(_) | N::Float(_) => false,
        }
    }

    /// Returns true if the `Number` is a floating point number.
    #[inline]
    pub fn is_float(&self) -> bool {
        match self.n {
            N::Float(_) => true,
            N::Fixnum(_) | N::Bignum(_) => false,
        }
    }

    /// If the `Number` is an integer, represent it as i64 if possible. Returns
    /// None otherwise.
    ///
    /// ```
    /// # use rouge_reader::Number;
    /// let big = Number::from(u64::max_value());
    /// assert_eq!(Number::from(64).as_i64(), Some(64));
    /// assert_eq!(big.as_i64(), None);
    /// assert_eq!(Number::from(256.0).as_i64(), None);
    /// ```
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self.n {
            N::Fixnum(n) => Some(n),
            N::Bignum(_) | N::Float(_) => None,
        }
    }

    /// Represents the number as f64, converting integers. Returns None if an
    /// integer is too large to be represented as a finite `f64`.
    ///
    /// ```
    /// # use rouge_reader::Number;
    /// assert_eq!(Number::from(256.0).as_f64(), Some(256.0));
    /// assert_eq!(Number::from(-64).as_f64(), Some(-64.0));
    /// ```
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match &self.n {
            N::Fixnum(n) => Some(*n as f64),
            N::Bignum(n) => n.to_f64().filter(|f| f.is_finite()),
            N::Float(n) => Some(*n),
        }
    }

    /// Returns the integer value as a `BigInt`, or None for floating point
    /// numbers.
    pub fn to_bigint(&self) -> Option<BigInt> {
        match &self.n {
            N::Fixnum(n) => Some(BigInt::from(*n)),
            N::Bignum(n) => Some(n.clone()),
            N::Float(_) => None,
        }
    }

    /// Converts a finite `f64` to a `Number`. Infinite or NaN values
    /// cannot be written as Rouge number literals.
    ///
    /// ```
    /// # use std::f64;
    /// #
    /// # use rouge_reader::Number;
    /// #
    /// assert!(Number::from_f64(256.0).is_some());
    ///
    /// assert!(Number::from_f64(f64::NAN).is_none());
    /// ```
    #[inline]
    pub fn from_f64(f: f64) -> Option<Number> {
        if f.is_finite() {
            Some(Number { n: N::Float(f) })
        } else {
            None
        }
    }

    /// Parses an unsigned run of digits in the given radix, negating the result
    /// if requested. Underscore separators must already be removed.
    pub(crate) fn from_digits(negative: bool, digits: &str, radix: u32) -> Option<Number> {
        let magnitude = BigInt::from_str_radix(digits, radix).ok()?;
        Some(Number::from(if negative { -magnitude } else { magnitude }))
    }

    /// Dispatch based on the type of the contained value.
    ///
    /// Depending on the stored value, one of the functions of the
    /// supplied visitor will be called.
    pub fn visit<V>(&self, visitor: V) -> Result<V::Value, V::Error>
    where
        V: Visitor,
    {
        match &self.n {
            N::Fixnum(n) => visitor.visit_i64(*n),
            N::Bignum(n) => visitor.visit_bigint(n),
            N::Float(n) => visitor.visit_f64(*n),
        }
    }
}

/// Trait to access the value stored in `Number`.
///
/// The `Number` type does not directly expose its internal
/// structure to allow future changes without breaking the API.
///
/// Instead, you can implement this trait and pass your implementation
/// to `Number::visit`.
///
/// [`Number::visit`]: struct.Number.html#method.visit
pub trait Visitor {
    /// The return type of the visitor methods.
    type Value;
    /// The error type of the visitor methods.
    type Error;

    /// The stored value is an integer fitting into `i64`.
    fn visit_i64(self, n: i64) -> Result<Self::Value, Self::Error>;
    /// The stored value is an integer outside of the `i64` range.
    fn visit_bigint(self, n: &BigInt) -> Result<Self::Value, Self::Error>;
    /// The stored value is `f64`.
    fn visit_f64(self, n: f64) -> Result<Self::Value, Self::Error>;
}

macro_rules! impl_from_small {
    (
        $($ty:ty),*
    ) => {
        $(
            impl From<$ty> for Number {
                #[inline]
                fn from(n: $ty) -> Self {
                    Number { n: N::Fixnum(i64::from(n)) }
                }
            }
        )*
    };
}

impl_from_small!(u8, u16, u32, i8, i16, i32, i64);

impl From<u64> for Number {
    #[inline]
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(n) => Number { n: N::Fixnum(n) },
            Err(_) => Number {
                n: N::Bignum(BigInt::from(n)),
            },
        }
    }
}

impl From<BigInt> for Number {
    fn from(n: BigInt) -> Self {
        match n.to_i64() {
            Some(n) => Number { n: N::Fixnum(n) },
            None => Number { n: N::Bignum(n) },
        }
    }
}

impl From<f32> for Number {
    #[inline]
    fn from(n: f32) -> Self {
        Number {
            n: N::Float(f64::from(n)),
        }
    }
}

impl From<f64> for Number {
    #[inline]
    fn from(n: f64) -> Self {
        Number { n: N::Float(n) }
    }
}

impl Display for Number {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.n {
            N::Fixnum(i) => Display::fmt(i, formatter),
            N::Bignum(i) => Display::fmt(i, formatter),
            N::Float(f) if f.is_finite() => {
                let mut buffer = ryu::Buffer::new();
                formatter.write_str(buffer.format_finite(*f))
            }
            N::Float(f) => Display::fmt(f, formatter),
        }
    }
}

impl Debug for Number {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.n, formatter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_bignums() {
        let small = Number::from(BigInt::from(42));
        assert!(small.is_i64());
        assert_eq!(small, Number::from(42));

        let big = Number::from(u64::max_value());
        assert!(big.is_integer());
        assert!(!big.is_i64());
        assert_eq!(big.to_bigint(), Some(BigInt::from(u64::max_value())));
    }

    #[test]
    fn test_from_digits() {
        assert_eq!(Number::from_digits(false, "1F", 16), Some(Number::from(31)));
        assert_eq!(Number::from_digits(true, "101", 2), Some(Number::from(-5)));
        assert_eq!(Number::from_digits(false, "19", 8), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Number::from(150.0).to_string(), "150.0");
        assert_eq!(Number::from(-7).to_string(), "-7");
        assert_eq!(
            Number::from(u64::max_value()).to_string(),
            "18446744073709551615"
        );
    }
}
