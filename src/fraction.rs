use crate::error::{FractionError, Result};

use log::trace;
use num_traits::{FromPrimitive, Num, One, PrimInt, Signed, ToPrimitive, Unsigned, Zero};
use std::{
    cmp::Ordering,
    fmt,
    iter::{Product, Sum},
    mem,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign},
    str::FromStr
};

/// Largest magnitude a stored numerator or denominator may have. `i64::MIN`
/// is excluded so that negating a fraction can never overflow.
const LIMIT: u128 = i64::MAX as u128;

/// Find the greatest common divisor of two numbers. `gcd(0, n)` is `n`.
pub fn gcd<T: PrimInt + Unsigned>(mut x: T, mut y: T) -> T {
    // https://en.wikipedia.org/wiki/Binary_GCD_algorithm
    if x.is_zero() {
        return y;
    }
    if y.is_zero() {
        return x;
    }

    // gcd(4, 6) = gcd(2, 3) * 2
    let common = (x | y).trailing_zeros() as usize;

    // gcd(2, 3) = gcd(1, 3)
    x = x >> x.trailing_zeros() as usize;

    loop {
        // Same thing for y
        y = y >> y.trailing_zeros() as usize;

        // Ensure x <= y because it avoids the need to do some checks below
        if x > y {
            mem::swap(&mut x, &mut y);
        }

        // gcd(1, 3) = gcd(1, 2) = gcd(1, 1) = gcd(1, 0) = 1
        y = y - x;

        if y.is_zero() {
            break;
        }
    }

    // Restore the previously removed common factors of two
    x << common
}
/// Find the least common multiple of two numbers. Overflow is not checked,
/// so pick a `T` wide enough for the product.
pub fn lcm<T: PrimInt + Unsigned>(x: T, y: T) -> T {
    if x.is_zero() || y.is_zero() {
        return T::zero();
    }
    x / gcd(x, y) * y
}

fn narrow(magnitude: u128) -> Result<i64> {
    if magnitude > LIMIT {
        Err(FractionError::Overflow)
    } else {
        Ok(magnitude as i64)
    }
}

/// A number stored in fraction form instead of actually calculating the
/// result. This ensures (10/3) * 3 is actually 10 and not 9.99998.
///
/// A fraction is always kept in lowest terms with a positive denominator, so
/// two fractions are equal exactly when their fields are.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fraction {
    numerator: i64,
    denominator: i64
}
impl Default for Fraction {
    fn default() -> Self {
        Self::ZERO
    }
}
impl Fraction {
    pub const ZERO: Self = Self { numerator: 0, denominator: 1 };
    pub const ONE: Self = Self { numerator: 1, denominator: 1 };

    /// Construct a new fraction, reduced to lowest terms with the sign moved
    /// to the numerator.
    /// ```rust
    /// use mixed_fractions::{Fraction, FractionError};
    ///
    /// let fraction = Fraction::new(6, -8)?;
    /// assert_eq!((fraction.numerator(), fraction.denominator()), (-3, 4));
    /// assert_eq!(Fraction::new(1, 0), Err(FractionError::ZeroDenominator));
    /// # Ok::<(), FractionError>(())
    /// ```
    ///
    /// ## Errors
    /// Fails with `ZeroDenominator` if the denominator is 0, and with
    /// `Overflow` if the reduced result still contains `i64::MIN`.
    pub fn new(numerator: i64, denominator: i64) -> Result<Self> {
        Self::reduce(numerator as i128, denominator as i128)
    }
    /// Construct a whole number
    pub fn from_integer(i: i64) -> Result<Self> {
        Self::new(i, 1)
    }
    pub(crate) const fn from_integer_unchecked(i: i64) -> Self {
        Self { numerator: i, denominator: 1 }
    }
    /// Wrap parts that are already known to be in canonical form
    pub(crate) const fn from_raw(numerator: i64, denominator: i64) -> Self {
        Self { numerator, denominator }
    }
    /// Reduce a double-width fraction to lowest terms and narrow it back.
    fn reduce(numerator: i128, denominator: i128) -> Result<Self> {
        if denominator == 0 {
            return Err(FractionError::ZeroDenominator);
        }
        let negative = (numerator < 0) != (denominator < 0);
        let (numerator, denominator) = (numerator.unsigned_abs(), denominator.unsigned_abs());

        // gcd(0, n) = n, so zero always comes out as 0/1
        let divisor = gcd(numerator, denominator);
        let numerator = narrow(numerator / divisor)?;
        let denominator = narrow(denominator / divisor)?;

        Ok(Self {
            numerator: if negative { -numerator } else { numerator },
            denominator
        })
    }
    /// Scale both numerators to the least common denominator. Everything is
    /// widened, so none of the products can overflow.
    fn common_denominator(self, other: Self) -> (i128, i128, i128) {
        let denominator = lcm(self.denominator as u128, other.denominator as u128);
        let left = self.numerator as i128 * (denominator / self.denominator as u128) as i128;
        let right = other.numerator as i128 * (denominator / other.denominator as u128) as i128;
        (left, right, denominator as i128)
    }
    fn parse_radix(input: &str, radix: u32) -> Result<Self> {
        if input.trim().is_empty() || !(2..=36).contains(&radix) {
            return Err(FractionError::format(input));
        }
        let integer = |part: &str| {
            i64::from_str_radix(part.trim(), radix).map_err(|_| FractionError::format(input))
        };
        let mut parts = input.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(whole), None, _) => Self::new(integer(whole)?, 1),
            (Some(numerator), Some(denominator), None) => {
                Self::new(integer(numerator)?, integer(denominator)?)
            },
            _ => Err(FractionError::format(input))
        }
    }

    /// Parse either `n` or `n/d`. Surrounding whitespace of each part is
    /// ignored.
    pub fn parse(input: &str) -> Result<Self> {
        input.parse()
    }
    /// Like `parse`, but never fails. Use `unwrap_or_default` to get zero
    /// for malformed input.
    pub fn try_parse(input: &str) -> Option<Self> {
        match Self::parse(input) {
            Ok(fraction) => Some(fraction),
            Err(err) => {
                trace!("rejected fraction literal {:?}: {}", input, err);
                None
            }
        }
    }

    /// Return the numerator, which carries the sign
    pub fn numerator(self) -> i64 {
        self.numerator
    }
    /// Return the denominator, which is always positive
    pub fn denominator(self) -> i64 {
        self.denominator
    }
    /// Returns true if this fraction is 0
    pub fn is_zero(self) -> bool {
        self.numerator == 0
    }
    /// Returns true if this fraction is 1
    pub fn is_one(self) -> bool {
        self == Self::ONE
    }
    pub fn is_positive(self) -> bool {
        self.numerator > 0
    }
    pub fn is_negative(self) -> bool {
        self.numerator < 0
    }
    /// Return this value with a positive sign.
    /// abs of 1/2 is 1/2.
    /// abs of -1/2 is 1/2.
    pub fn abs(self) -> Self {
        Self {
            numerator: self.numerator.abs(),
            denominator: self.denominator
        }
    }
    /// Same thing as in mathematics taking the power of -1.
    ///
    /// ## Errors
    /// Fails with `ZeroReciprocal` if this fraction is 0
    pub fn reciprocal(self) -> Result<Self> {
        if self.is_zero() {
            return Err(FractionError::ZeroReciprocal);
        }
        // Moves the sign back onto the numerator
        Self::new(self.denominator, self.numerator)
    }
    /// Calculates the decimal result of this fraction
    pub fn decimal(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
    /// The integer part, rounded toward zero
    pub fn trunc(self) -> i64 {
        self.numerator / self.denominator
    }
    /// What's left after removing `trunc`. Keeps the sign of the fraction.
    pub fn fract(self) -> Self {
        // gcd(n % d, d) == gcd(n, d), so this is still in lowest terms
        Self::from_raw(self.numerator % self.denominator, self.denominator)
    }

    /// Calculates addition, but returns an error on overflow
    pub fn checked_add(self, other: Self) -> Result<Self> {
        let (left, right, denominator) = self.common_denominator(other);
        Self::reduce(left + right, denominator)
    }
    /// Calculates subtraction, but returns an error on overflow
    pub fn checked_sub(self, other: Self) -> Result<Self> {
        let (left, right, denominator) = self.common_denominator(other);
        Self::reduce(left - right, denominator)
    }
    /// Calculates multiplication, but returns an error on overflow
    pub fn checked_mul(self, other: Self) -> Result<Self> {
        Self::reduce(
            self.numerator as i128 * other.numerator as i128,
            self.denominator as i128 * other.denominator as i128
        )
    }
    /// Calculates division, but returns an error on overflow or if other is 0
    pub fn checked_div(self, other: Self) -> Result<Self> {
        if other.is_zero() {
            return Err(FractionError::DivideByZero);
        }
        Self::reduce(
            self.numerator as i128 * other.denominator as i128,
            self.denominator as i128 * other.numerator as i128
        )
    }
    /// Calculates the remainder of a division rounded toward zero, so the
    /// result has the sign of self. Returns an error if other is 0.
    pub fn checked_rem(self, other: Self) -> Result<Self> {
        if other.is_zero() {
            return Err(FractionError::DivideByZero);
        }
        let (left, right, denominator) = self.common_denominator(other);
        Self::reduce(left % right, denominator)
    }
    /// Raise this fraction to an integer power. Negative exponents take the
    /// reciprocal first.
    pub fn checked_pow(self, exp: i32) -> Result<Self> {
        let mut base = if exp < 0 { self.reciprocal()? } else { self };
        let mut exp = exp.unsigned_abs();
        let mut result = Self::ONE;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result.checked_mul(base)?;
            }
            exp >>= 1;
            if exp > 0 {
                base = base.checked_mul(base)?;
            }
        }
        Ok(result)
    }
}
impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        let left = self.numerator as i128 * other.denominator as i128;
        let right = other.numerator as i128 * self.denominator as i128;
        left.cmp(&right)
    }
}
impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}
impl Neg for Fraction {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            numerator: -self.numerator,
            denominator: self.denominator
        }
    }
}
impl FromStr for Fraction {
    type Err = FractionError;

    fn from_str(input: &str) -> Result<Self> {
        Self::parse_radix(input, 10)
    }
}

impl_from!(Fraction: u8, u16, u32, i8, i16, i32);

impl TryFrom<i64> for Fraction {
    type Error = FractionError;

    fn try_from(i: i64) -> Result<Self> {
        Self::from_integer(i)
    }
}
impl TryFrom<u64> for Fraction {
    type Error = FractionError;

    fn try_from(i: u64) -> Result<Self> {
        narrow(i as u128).map(Self::from_integer_unchecked)
    }
}
impl From<Fraction> for f64 {
    fn from(fraction: Fraction) -> Self {
        fraction.decimal()
    }
}

impl_op! {
    Fraction;
    Add add = checked_add,
    Sub sub = checked_sub,
    Mul mul = checked_mul,
    Div div = checked_div,
    Rem rem = checked_rem
    ---
    AddAssign add_assign = (+),
    SubAssign sub_assign = (-),
    MulAssign mul_assign = (*),
    DivAssign div_assign = (/),
    RemAssign rem_assign = (%)
}

impl Sum for Fraction {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |total, item| total + item)
    }
}
impl<'a> Sum<&'a Fraction> for Fraction {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
impl Product for Fraction {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |total, item| total * item)
    }
}
impl<'a> Product<&'a Fraction> for Fraction {
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().product()
    }
}

impl Zero for Fraction {
    fn zero() -> Self {
        Self::ZERO
    }
    fn is_zero(&self) -> bool {
        self.numerator == 0
    }
}
impl One for Fraction {
    fn one() -> Self {
        Self::ONE
    }
}
impl Num for Fraction {
    type FromStrRadixErr = FractionError;

    fn from_str_radix(input: &str, radix: u32) -> Result<Self> {
        Self::parse_radix(input, radix)
    }
}
impl Signed for Fraction {
    fn abs(&self) -> Self {
        Fraction::abs(*self)
    }
    fn abs_sub(&self, other: &Self) -> Self {
        if self <= other {
            Self::ZERO
        } else {
            *self - *other
        }
    }
    fn signum(&self) -> Self {
        Self::from_integer_unchecked(self.numerator.signum())
    }
    fn is_positive(&self) -> bool {
        self.numerator > 0
    }
    fn is_negative(&self) -> bool {
        self.numerator < 0
    }
}
impl ToPrimitive for Fraction {
    fn to_i64(&self) -> Option<i64> {
        Some(self.trunc())
    }
    fn to_u64(&self) -> Option<u64> {
        u64::try_from(self.trunc()).ok()
    }
    fn to_f64(&self) -> Option<f64> {
        Some(self.decimal())
    }
}
impl FromPrimitive for Fraction {
    fn from_i64(i: i64) -> Option<Self> {
        Self::try_from(i).ok()
    }
    fn from_u64(i: u64) -> Option<Self> {
        Self::try_from(i).ok()
    }
}
