use crate::{
    error::{FractionError, Result},
    fraction::Fraction
};

use log::trace;
use num_traits::{One, ToPrimitive, Zero};
use std::{
    cmp::Ordering,
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
    str::FromStr
};

/// A whole number beside a proper fraction, like 2 1/2.
///
/// All arithmetic goes through [`Fraction`]: both sides are turned into
/// improper fractions, combined, and split up again.
///
/// The fraction part keeps the sign of whatever numerator it was built from,
/// so `MixedNumber::new(-1, 1, 2)` is -1 + 1/2 = -1/2 even though it prints as
/// `-1 1/2`. Because of that, `==` compares fields while ordering compares
/// values, so two numbers can compare as `Ordering::Equal` without being `==`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MixedNumber {
    whole: i64,
    numerator: i64,
    denominator: i64
}
impl Default for MixedNumber {
    fn default() -> Self {
        Self::from_integer_unchecked(0)
    }
}
impl MixedNumber {
    /// Construct a new mixed number. The fraction is reduced and anything
    /// above one is carried into the whole part.
    /// ```rust
    /// use mixed_fractions::MixedNumber;
    ///
    /// let number = MixedNumber::new(1, 5, 3)?;
    /// assert_eq!((number.whole(), number.numerator(), number.denominator()), (2, 2, 3));
    /// # Ok::<(), mixed_fractions::FractionError>(())
    /// ```
    ///
    /// ## Errors
    /// Fails with `ZeroDenominator` if the denominator is 0, and with
    /// `Overflow` if the value can't be written as an improper fraction of
    /// `i64`s.
    pub fn new(whole: i64, numerator: i64, denominator: i64) -> Result<Self> {
        let fraction = Fraction::new(numerator, denominator)?;
        let whole = whole.checked_add(fraction.trunc()).ok_or(FractionError::Overflow)?;
        let fraction = fraction.fract();

        let improper = whole as i128 * fraction.denominator() as i128 + fraction.numerator() as i128;
        if improper.unsigned_abs() > i64::MAX as u128 {
            return Err(FractionError::Overflow);
        }

        Ok(Self {
            whole,
            numerator: fraction.numerator(),
            denominator: fraction.denominator()
        })
    }
    /// Construct a whole number
    pub fn from_integer(i: i64) -> Result<Self> {
        Self::new(i, 0, 1)
    }
    const fn from_integer_unchecked(i: i64) -> Self {
        Self { whole: i, numerator: 0, denominator: 1 }
    }
    /// Split an improper fraction up, rounding the whole part toward zero.
    /// 7/4 becomes 1 3/4 and -7/4 becomes -1 -3/4.
    pub fn from_fraction(fraction: Fraction) -> Self {
        let proper = fraction.fract();
        Self {
            whole: fraction.trunc(),
            numerator: proper.numerator(),
            denominator: proper.denominator()
        }
    }
    /// Turn this back into a single fraction. This is always the true value,
    /// no matter how the signs of the parts are laid out.
    pub fn to_improper_fraction(self) -> Fraction {
        // Checked to fit when constructed, and gcd(w * d + n, d) == gcd(n, d) == 1
        let numerator = self.whole as i128 * self.denominator as i128 + self.numerator as i128;
        Fraction::from_raw(numerator as i64, self.denominator)
    }

    /// Parse `w`, `n/d` or `w n/d`, where the last one is separated by
    /// exactly one space.
    pub fn parse(input: &str) -> Result<Self> {
        input.parse()
    }
    /// Like `parse`, but never fails. Use `unwrap_or_default` to get zero
    /// for malformed input.
    pub fn try_parse(input: &str) -> Option<Self> {
        match Self::parse(input) {
            Ok(number) => Some(number),
            Err(err) => {
                trace!("rejected mixed number literal {:?}: {}", input, err);
                None
            }
        }
    }

    pub fn whole(self) -> i64 {
        self.whole
    }
    /// The numerator of the fraction part. Its sign may differ from `whole`.
    pub fn numerator(self) -> i64 {
        self.numerator
    }
    pub fn denominator(self) -> i64 {
        self.denominator
    }
    /// The fraction part on its own
    pub fn fraction_part(self) -> Fraction {
        Fraction::from_raw(self.numerator, self.denominator)
    }
    pub fn is_zero(self) -> bool {
        self.whole == 0 && self.numerator == 0
    }
    /// Looks at the whole part first and only falls back to the fraction's
    /// sign when the whole part is 0.
    pub fn is_positive(self) -> bool {
        self.whole > 0 || (self.whole == 0 && self.numerator > 0)
    }
    /// Mirror of `is_positive`
    pub fn is_negative(self) -> bool {
        self.whole < 0 || (self.whole == 0 && self.numerator < 0)
    }
    /// Returns an error if the result would overflow
    pub fn checked_abs(self) -> Result<Self> {
        Self::new(self.whole.abs(), self.numerator.abs(), self.denominator)
    }
    /// Take the absolute value of both parts.
    ///
    /// ## Panics
    /// Panics on overflow, which can only happen when the parts have
    /// different signs
    pub fn abs(self) -> Self {
        self.checked_abs().unwrap_or_else(|err| panic!("{}", err))
    }
    /// Three-way comparison of the true values
    pub fn compare(&self, other: &Self) -> Ordering {
        self.to_improper_fraction().cmp(&other.to_improper_fraction())
    }
    /// Calculates the decimal result of this number
    pub fn decimal(self) -> f64 {
        self.to_improper_fraction().decimal()
    }

    /// Calculates addition, but returns an error on overflow
    pub fn checked_add(self, other: Self) -> Result<Self> {
        self.to_improper_fraction()
            .checked_add(other.to_improper_fraction())
            .map(Self::from_fraction)
    }
    /// Calculates subtraction, but returns an error on overflow
    pub fn checked_sub(self, other: Self) -> Result<Self> {
        self.to_improper_fraction()
            .checked_sub(other.to_improper_fraction())
            .map(Self::from_fraction)
    }
    /// Calculates multiplication, but returns an error on overflow
    pub fn checked_mul(self, other: Self) -> Result<Self> {
        self.to_improper_fraction()
            .checked_mul(other.to_improper_fraction())
            .map(Self::from_fraction)
    }
    /// Calculates division, but returns an error on overflow or if other is 0
    pub fn checked_div(self, other: Self) -> Result<Self> {
        self.to_improper_fraction()
            .checked_div(other.to_improper_fraction())
            .map(Self::from_fraction)
    }
}
impl PartialOrd for MixedNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}
impl fmt::Display for MixedNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.numerator == 0 {
            write!(f, "{}", self.whole)
        } else if self.whole == 0 {
            write!(f, "{}/{}", self.numerator, self.denominator)
        } else {
            write!(f, "{} {}/{}", self.whole, self.numerator.abs(), self.denominator)
        }
    }
}
impl Neg for MixedNumber {
    type Output = Self;

    fn neg(self) -> Self::Output {
        // |numerator| < denominator, so nothing carries and the improper
        // form is just negated
        Self {
            whole: -self.whole,
            numerator: -self.numerator,
            denominator: self.denominator
        }
    }
}
impl FromStr for MixedNumber {
    type Err = FractionError;

    fn from_str(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(FractionError::format(input));
        }
        let integer = |part: &str| part.parse::<i64>().map_err(|_| FractionError::format(input));

        match (trimmed.contains('/'), trimmed.contains(' ')) {
            (true, false) => trimmed.parse::<Fraction>().map(Self::from_fraction),
            (false, false) => Self::from_integer(integer(trimmed)?),
            _ => {
                let mut tokens = trimmed.split(' ');
                let (whole, fraction) = match (tokens.next(), tokens.next(), tokens.next()) {
                    (Some(whole), Some(fraction), None) => (whole, fraction),
                    _ => return Err(FractionError::format(input))
                };
                let mut parts = fraction.split('/');
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(numerator), Some(denominator), None) => {
                        Self::new(integer(whole)?, integer(numerator)?, integer(denominator)?)
                    },
                    _ => Err(FractionError::format(input))
                }
            }
        }
    }
}

impl_from!(MixedNumber: u8, u16, u32, i8, i16, i32);

impl TryFrom<i64> for MixedNumber {
    type Error = FractionError;

    fn try_from(i: i64) -> Result<Self> {
        Self::from_integer(i)
    }
}
impl From<Fraction> for MixedNumber {
    fn from(fraction: Fraction) -> Self {
        Self::from_fraction(fraction)
    }
}
impl From<MixedNumber> for Fraction {
    fn from(number: MixedNumber) -> Self {
        number.to_improper_fraction()
    }
}
impl From<MixedNumber> for f64 {
    fn from(number: MixedNumber) -> Self {
        number.decimal()
    }
}

impl_op! {
    MixedNumber;
    Add add = checked_add,
    Sub sub = checked_sub,
    Mul mul = checked_mul,
    Div div = checked_div
    ---
    AddAssign add_assign = (+),
    SubAssign sub_assign = (-),
    MulAssign mul_assign = (*),
    DivAssign div_assign = (/)
}

impl Sum for MixedNumber {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |total, item| total + item)
    }
}
impl<'a> Sum<&'a MixedNumber> for MixedNumber {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Zero for MixedNumber {
    fn zero() -> Self {
        Self::default()
    }
    fn is_zero(&self) -> bool {
        MixedNumber::is_zero(*self)
    }
}
impl One for MixedNumber {
    fn one() -> Self {
        Self::from_integer_unchecked(1)
    }
}
impl ToPrimitive for MixedNumber {
    fn to_i64(&self) -> Option<i64> {
        Some(self.to_improper_fraction().trunc())
    }
    fn to_u64(&self) -> Option<u64> {
        u64::try_from(self.to_improper_fraction().trunc()).ok()
    }
    fn to_f64(&self) -> Option<f64> {
        Some(self.decimal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn mixed(whole: i64, numerator: i64, denominator: i64) -> MixedNumber {
        MixedNumber::new(whole, numerator, denominator).unwrap()
    }
    fn parts(number: MixedNumber) -> (i64, i64, i64) {
        (number.whole(), number.numerator(), number.denominator())
    }
    fn frac(numerator: i64, denominator: i64) -> Fraction {
        Fraction::new(numerator, denominator).unwrap()
    }

    #[test]
    fn new() {
        assert_eq!(parts(mixed(1, 5, 3)), (2, 2, 3));
        assert_eq!(parts(mixed(0, 2, 4)), (0, 1, 2));
        assert_eq!(parts(mixed(3, 4, 2)), (5, 0, 1));
        assert_eq!(parts(mixed(0, -7, 4)), (-1, -3, 4));
        assert_eq!(parts(mixed(0, 7, -4)), (-1, -3, 4));
        assert_eq!(parts(mixed(-2, 0, 5)), (-2, 0, 1));
        assert_eq!(MixedNumber::new(1, 1, 0), Err(FractionError::ZeroDenominator));
    }

    #[test]
    fn new_keeps_fraction_sign() {
        // Carries are folded in, but the remainder's sign is left alone
        assert_eq!(parts(mixed(-2, 1, 2)), (-2, 1, 2));
        assert_eq!(parts(mixed(2, -1, 2)), (2, -1, 2));
        assert_eq!(parts(mixed(1, -5, 3)), (0, -2, 3));
        assert_eq!(mixed(-2, 1, 2).to_improper_fraction(), frac(-3, 2));
        assert_eq!(mixed(2, -1, 2).to_improper_fraction(), frac(3, 2));
    }

    #[test]
    fn new_overflow() {
        assert_eq!(MixedNumber::new(i64::MAX, 1, 1), Err(FractionError::Overflow));
        assert_eq!(MixedNumber::new(i64::MAX, 1, 2), Err(FractionError::Overflow));
        assert_eq!(MixedNumber::new(i64::MIN, 0, 1), Err(FractionError::Overflow));
        assert_eq!(MixedNumber::new(0, i64::MIN, 1), Err(FractionError::Overflow));
        assert_eq!(parts(mixed(i64::MAX, 0, 1)), (i64::MAX, 0, 1));
    }

    #[test]
    fn improper_round_trip() {
        assert_eq!(parts(MixedNumber::from_fraction(frac(7, 4))), (1, 3, 4));
        assert_eq!(parts(MixedNumber::from_fraction(frac(-7, 4))), (-1, -3, 4));
        assert_eq!(parts(MixedNumber::from_fraction(frac(3, 4))), (0, 3, 4));
        assert_eq!(parts(MixedNumber::from_fraction(frac(8, 4))), (2, 0, 1));
        assert_eq!(parts(MixedNumber::from_fraction(Fraction::ZERO)), (0, 0, 1));
        assert_eq!(mixed(2, 1, 2).to_improper_fraction(), frac(5, 2));
        let big = frac(i64::MAX, 2);
        assert_eq!(MixedNumber::from_fraction(big).to_improper_fraction(), big);
    }

    #[test]
    fn add() {
        assert_eq!(parts(mixed(2, 1, 2) + mixed(1, 1, 4)), (3, 3, 4));
        assert_eq!(parts(mixed(0, 1, 2) + mixed(0, 1, 2)), (1, 0, 1));
        assert_eq!(parts(mixed(1, 1, 2) + frac(1, 3)), (1, 5, 6));
        assert_eq!(parts(mixed(1, 0, 1) + 2), (3, 0, 1));
    }

    #[test]
    fn sub() {
        assert_eq!(parts(mixed(1, 1, 4) - mixed(2, 1, 2)), (-1, -1, 4));
        assert_eq!(parts(mixed(3, 3, 4) - mixed(1, 1, 4)), (2, 1, 2));
    }

    #[test]
    fn mul() {
        assert_eq!(parts(mixed(1, 1, 2) * mixed(1, 1, 2)), (2, 1, 4));
        assert_eq!(parts(mixed(-1, -1, 2) * mixed(0, 2, 3)), (-1, 0, 1));
    }

    #[test]
    fn div() {
        assert_eq!(parts(mixed(1, 1, 2) / mixed(0, 3, 4)), (2, 0, 1));
        assert_eq!(parts(mixed(2, 0, 1) / mixed(0, 3, 1)), (0, 2, 3));
        assert_eq!(
            mixed(1, 1, 2).checked_div(MixedNumber::default()),
            Err(FractionError::DivideByZero)
        );
    }

    #[test]
    #[should_panic(expected = "attempt to divide by zero")]
    fn div_by_zero_operator() {
        let _ = mixed(1, 1, 2) / 0;
    }

    #[test]
    fn assign() {
        let mut value = mixed(1, 1, 2);
        value += mixed(0, 1, 2);
        value *= 3;
        value -= frac(1, 4);
        value /= 2;
        assert_eq!(parts(value), (2, 7, 8));
    }

    #[test]
    fn neg() {
        assert_eq!(parts(-mixed(2, 1, 2)), (-2, -1, 2));
        assert_eq!(-mixed(2, 1, 2), MixedNumber::from_fraction(frac(-5, 2)));
        assert_eq!(parts(-mixed(-2, 1, 2)), (2, -1, 2));
        assert_eq!((-mixed(-2, 1, 2)).to_improper_fraction(), frac(3, 2));
        assert_eq!(-MixedNumber::default(), MixedNumber::default());
    }

    #[test]
    fn abs() {
        assert_eq!(parts(mixed(-1, -3, 4).abs()), (1, 3, 4));
        assert_eq!(parts(mixed(2, 1, 2).abs()), (2, 1, 2));
        // Both parts are made positive, which changes the value here
        assert_eq!(mixed(-2, 1, 2).abs().to_improper_fraction(), frac(5, 2));
    }

    #[test]
    fn predicates() {
        assert!(MixedNumber::default().is_zero());
        assert!(mixed(0, 1, 2).is_positive());
        assert!(mixed(0, -1, 2).is_negative());
        assert!(mixed(-1, -1, 2).is_negative());
        assert!(!mixed(0, 0, 1).is_positive() && !mixed(0, 0, 1).is_negative());

        // Only the whole part counts when it isn't zero
        assert!(mixed(2, -1, 2).is_positive());
        assert!(mixed(-1, 1, 2).is_negative());
        assert!(!mixed(-1, 1, 2).is_positive());
    }

    #[test]
    fn equality_is_field_wise() {
        let layout = mixed(-2, 1, 2);
        let canonical = MixedNumber::from_fraction(frac(-3, 2));
        assert_eq!(parts(canonical), (-1, -1, 2));
        assert_ne!(layout, canonical);
        assert_eq!(layout.compare(&canonical), Ordering::Equal);
        assert_eq!(layout.partial_cmp(&canonical), Some(Ordering::Equal));
    }

    #[test]
    fn ordering() {
        assert!(mixed(1, 1, 2) < mixed(1, 2, 3));
        assert!(mixed(-1, -1, 2) < mixed(0, -1, 2));
        assert!(mixed(2, -1, 2) < mixed(1, 2, 3));
        assert!(mixed(3, 0, 1) >= mixed(2, 4, 4));
        assert_eq!(mixed(1, 1, 2).compare(&mixed(0, 3, 2)), Ordering::Equal);
    }

    #[test]
    fn conversions() {
        assert_eq!(parts(MixedNumber::from(5u8)), (5, 0, 1));
        assert_eq!(parts(MixedNumber::from(&-5i32)), (-5, 0, 1));
        assert_eq!(MixedNumber::try_from(i64::MIN), Err(FractionError::Overflow));
        assert_eq!(Fraction::from(mixed(1, 3, 4)), frac(7, 4));
        assert_eq!(MixedNumber::from(frac(7, 4)), mixed(1, 3, 4));
        assert_eq!(f64::from(mixed(-1, -1, 4)), -1.25);
        assert_eq!(mixed(-1, -1, 4).to_i64(), Some(-1));
        assert_eq!(mixed(-1, -1, 4).to_u64(), None);
        assert_eq!(mixed(2, 1, 3).fraction_part(), frac(1, 3));
        assert_eq!(<MixedNumber as One>::one(), mixed(1, 0, 1));
    }

    #[test]
    fn sum() {
        let numbers = [mixed(1, 1, 2), mixed(0, 1, 3), mixed(2, 1, 6)];
        assert_eq!(parts(numbers.iter().sum()), (4, 0, 1));
    }

    #[test]
    fn format() {
        assert_eq!(mixed(3, 0, 1).to_string(), "3");
        assert_eq!(mixed(0, 0, 1).to_string(), "0");
        assert_eq!(mixed(0, 3, 4).to_string(), "3/4");
        assert_eq!(mixed(0, -3, 4).to_string(), "-3/4");
        assert_eq!(mixed(2, 1, 2).to_string(), "2 1/2");
        assert_eq!(mixed(-1, -3, 4).to_string(), "-1 3/4");
        assert_eq!(mixed(2, -1, 2).to_string(), "2 1/2");
    }

    #[test]
    fn parse() {
        assert_eq!(MixedNumber::parse("7/4").map(parts), Ok((1, 3, 4)));
        assert_eq!(MixedNumber::parse("-7/4").map(parts), Ok((-1, -3, 4)));
        assert_eq!(MixedNumber::parse("  5 ").map(parts), Ok((5, 0, 1)));
        assert_eq!(MixedNumber::parse("2 1/2").map(parts), Ok((2, 1, 2)));
        assert_eq!(MixedNumber::parse("1 5/3").map(parts), Ok((2, 2, 3)));
        assert_eq!(MixedNumber::parse(" 2 2/4 ").map(parts), Ok((2, 1, 2)));
        // The fraction keeps the sign it was written with
        assert_eq!(MixedNumber::parse("-1 3/4").map(parts), Ok((-1, 3, 4)));
        assert_eq!(MixedNumber::parse("1 1/0"), Err(FractionError::ZeroDenominator));
        assert_eq!(MixedNumber::parse("2/0"), Err(FractionError::ZeroDenominator));
    }

    #[test]
    fn parse_malformed() {
        for input in &["", "   ", "1 2", "1  1/2", "1 1/2/3", "a 1/2", "1 a/2", "1 1/2 3", "1.5", "x"] {
            assert_eq!(MixedNumber::parse(input), Err(FractionError::format(input)), "input {:?}", input);
        }
        assert!(matches!(MixedNumber::parse("1/2/3"), Err(FractionError::Format(_))));
    }

    #[test]
    fn try_parse() {
        assert_eq!(MixedNumber::try_parse("2 1/2"), Some(mixed(2, 1, 2)));
        assert_eq!(MixedNumber::try_parse("2 1/0"), None);
        assert_eq!(MixedNumber::try_parse("junk").unwrap_or_default(), MixedNumber::default());
    }

    fn small_fraction() -> impl Strategy<Value = Fraction> {
        (-10_000i64..10_000, 1i64..1000).prop_map(|(n, d)| frac(n, d))
    }

    proptest! {
        #[test]
        fn fraction_round_trip(f in small_fraction()) {
            prop_assert_eq!(MixedNumber::from_fraction(f).to_improper_fraction(), f);
        }

        #[test]
        fn arithmetic_matches_fractions(a in small_fraction(), b in small_fraction()) {
            let (x, y) = (MixedNumber::from(a), MixedNumber::from(b));
            prop_assert_eq!(Fraction::from(x + y), a + b);
            prop_assert_eq!(Fraction::from(x - y), a - b);
            prop_assert_eq!(Fraction::from(x * y), a * b);
            if !b.is_zero() {
                prop_assert_eq!(Fraction::from(x / y), a / b);
            }
            prop_assert_eq!(x.compare(&y), a.cmp(&b));
        }

        #[test]
        fn constructor_preserves_value(whole in -1000i64..1000, n in -10_000i64..10_000, d in 1i64..1000) {
            let number = mixed(whole, n, d);
            prop_assert!(number.numerator().abs() < number.denominator());
            prop_assert_eq!(number.to_improper_fraction(), frac(whole * d + n, d));
        }

        #[test]
        fn format_round_trip_for_same_sign(f in small_fraction()) {
            let number = MixedNumber::from_fraction(f);
            if number.whole() == 0 || number.numerator() >= 0 {
                prop_assert_eq!(MixedNumber::parse(&number.to_string()), Ok(number));
            }
        }
    }
}
