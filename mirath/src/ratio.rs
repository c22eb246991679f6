//! Utilities for working with `num_rational::BigRational` shares.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use rust_decimal::Decimal;

/// Extension trait adding share-specific helpers to [`BigRational`].
pub trait ShareRatioExt: Sized {
    /// Creates a fraction `numerator / denominator`.
    ///
    /// # Panics
    ///
    /// Panics if `denominator` is zero. Only ever called with legal constants.
    fn frac(numerator: u64, denominator: u64) -> Self;

    /// Converts a decimal amount into an exact rational.
    fn from_decimal(value: Decimal) -> Self;

    /// Splits `self` equally among `count` heirs, `None` when nobody is counted.
    fn per_capita(&self, count: usize) -> Option<Self>;

    /// Rounds to `scale` fractional digits, halves away from zero.
    ///
    /// Returns `None` if the result does not fit a [`Decimal`].
    fn round_half_up(&self, scale: u32) -> Option<Decimal>;

    /// Whether `self` lies within `tolerance` of `target`.
    fn within(&self, target: &Self, tolerance: &Self) -> bool;
}

impl ShareRatioExt for BigRational {
    fn frac(numerator: u64, denominator: u64) -> Self {
        BigRational::new(BigInt::from(numerator), BigInt::from(denominator))
    }

    fn from_decimal(value: Decimal) -> Self {
        let denominator = num_traits::pow(BigInt::from(10u32), value.scale() as usize);
        BigRational::new(BigInt::from(value.mantissa()), denominator)
    }

    fn per_capita(&self, count: usize) -> Option<Self> {
        if count == 0 {
            return None;
        }
        Some(self / BigRational::from_integer(BigInt::from(count)))
    }

    fn round_half_up(&self, scale: u32) -> Option<Decimal> {
        let factor = BigRational::from_integer(num_traits::pow(BigInt::from(10u32), scale as usize));
        let scaled = self * factor;
        let half = BigRational::new(BigInt::one(), BigInt::from(2u32));

        let magnitude = (scaled.abs() + half).floor().to_integer();
        let units = if scaled.is_negative() { -magnitude } else { magnitude };

        let units = units.to_i128()?;
        Decimal::try_from_i128_with_scale(units, scale).ok()
    }

    fn within(&self, target: &Self, tolerance: &Self) -> bool {
        (self - target).abs() <= *tolerance
    }
}

/// Sum of a sequence of shares.
pub fn total<'a>(shares: impl IntoIterator<Item = &'a BigRational>) -> BigRational {
    shares
        .into_iter()
        .fold(BigRational::zero(), |acc, share| acc + share)
}

/// Unit share when `males` take two units each and `females` one.
pub fn two_to_one_unit(remainder: &BigRational, males: usize, females: usize) -> Option<BigRational> {
    let weight = males * 2 + females;
    remainder.per_capita(weight)
}

/// Least common denominator of a set of shares, the "asl al-mas'ala".
pub fn common_denominator<'a>(shares: impl IntoIterator<Item = &'a BigRational>) -> BigInt {
    shares
        .into_iter()
        .fold(BigInt::one(), |acc, share| acc.lcm(share.denom()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_frac_reduces() {
        assert_eq!(BigRational::frac(2, 6), BigRational::frac(1, 3));
    }

    #[test]
    fn test_from_decimal_is_exact() {
        assert_eq!(BigRational::from_decimal(dec!(0.0001)), BigRational::frac(1, 10_000));
        assert_eq!(BigRational::from_decimal(dec!(1000)), BigRational::frac(1000, 1));
    }

    #[test]
    fn test_per_capita_guards_zero() {
        assert!(BigRational::frac(2, 3).per_capita(0).is_none());
        assert_eq!(
            BigRational::frac(2, 3).per_capita(4),
            Some(BigRational::frac(1, 6))
        );
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(BigRational::frac(2000, 3).round_half_up(2), Some(dec!(666.67)));
        assert_eq!(BigRational::frac(1000, 3).round_half_up(2), Some(dec!(333.33)));
        // exactly half rounds up
        assert_eq!(BigRational::frac(1, 200).round_half_up(2), Some(dec!(0.01)));
        assert_eq!(BigRational::frac(0, 1).round_half_up(2), Some(dec!(0.00)));
    }

    #[test]
    fn test_within_tolerance() {
        let tolerance = BigRational::frac(1, 10_000);
        let one = BigRational::frac(1, 1);
        assert!(BigRational::frac(10_001, 10_000).within(&one, &tolerance));
        assert!(!BigRational::frac(10_002, 10_000).within(&one, &tolerance));
    }

    #[test]
    fn test_two_to_one_unit() {
        let unit = two_to_one_unit(&BigRational::frac(1, 1), 1, 1).unwrap();
        assert_eq!(unit, BigRational::frac(1, 3));
        assert!(two_to_one_unit(&BigRational::frac(1, 1), 0, 0).is_none());
    }

    #[test]
    fn test_common_denominator() {
        let shares = [BigRational::frac(1, 4), BigRational::frac(1, 6), BigRational::frac(1, 8)];
        assert_eq!(common_denominator(shares.iter()), BigInt::from(24));
    }
}
