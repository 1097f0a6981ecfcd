//! Fixed-point token amounts and timestamps
//!
//! Balances are held as `u128` base units with [`DECIMALS`] fractional digits,
//! so every ledger computation is exact integer arithmetic. Human-readable
//! decimal strings are converted at the I/O boundary only.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Token amount in base units (1 token == [`ONE_TOKEN`] base units)
pub type TokenAmount = u128;

/// Seconds since the unix epoch
pub type Timestamp = u64;

/// Number of fractional digits carried by [`TokenAmount`]
pub const DECIMALS: u32 = 18;

/// Base units in one whole token
pub const ONE_TOKEN: TokenAmount = 1_000_000_000_000_000_000;

/// Length of the rolling trade window
pub const SECONDS_PER_DAY: Timestamp = 86_400;

/// Convert a whole number of tokens into base units
///
/// Returns `None` if the result is not representable.
pub fn tokens(whole: u128) -> Option<TokenAmount> {
    whole.checked_mul(ONE_TOKEN)
}

/// Parse a decimal token string (e.g. `"100.5"`) into base units
///
/// Rejects negative values, malformed input and anything with more than
/// [`DECIMALS`] significant fractional digits. Trailing zeros do not count. Zero is accepted here; whether a zero
/// amount is meaningful is decided by the operation consuming it.
pub fn parse_token_amount(input: &str) -> Result<TokenAmount, String> {
    let trimmed = input.trim();
    let decimal = Decimal::from_str(trimmed)
        .map_err(|_| format!("Invalid token amount '{}'", trimmed))?
        .normalize();

    if decimal.is_sign_negative() && !decimal.is_zero() {
        return Err(format!("Token amount '{}' must not be negative", trimmed));
    }

    let scale = decimal.scale();
    if scale > DECIMALS {
        return Err(format!(
            "Token amount '{}' has more than {} fractional digits",
            trimmed, DECIMALS
        ));
    }

    let mantissa = decimal.mantissa().unsigned_abs();
    10u128
        .checked_pow(DECIMALS - scale)
        .and_then(|factor| mantissa.checked_mul(factor))
        .ok_or_else(|| format!("Token amount '{}' is out of range", trimmed))
}

/// Format base units as an exact decimal token string
///
/// Trailing fractional zeros are trimmed: `9500 * ONE_TOKEN` formats as
/// `"9500"`, `ONE_TOKEN / 20` as `"0.05"`.
pub fn format_token_amount(amount: TokenAmount) -> String {
    let whole = amount / ONE_TOKEN;
    let fraction = amount % ONE_TOKEN;
    if fraction == 0 {
        return whole.to_string();
    }

    let digits = format!("{:0width$}", fraction, width = DECIMALS as usize);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::whole("100", 100 * ONE_TOKEN)]
    #[case::fraction("100.5", 100 * ONE_TOKEN + ONE_TOKEN / 2)]
    #[case::padded("  7.25 ", 7 * ONE_TOKEN + ONE_TOKEN / 4)]
    #[case::one_unit("0.000000000000000001", 1)]
    #[case::zero("0", 0)]
    #[case::billion("1000000000", 1_000_000_000 * ONE_TOKEN)]
    #[case::trailing_zeros("1.0000000000000000000", ONE_TOKEN)]
    #[case::trailing_zeros_past_one_unit("0.0000000000000000010", 1)]
    #[case::negative_zero("-0.00", 0)]
    fn test_parse_token_amount(#[case] input: &str, #[case] expected: TokenAmount) {
        assert_eq!(parse_token_amount(input), Ok(expected));
    }

    #[rstest]
    #[case::negative("-1", "must not be negative")]
    #[case::malformed("ten", "Invalid token amount")]
    #[case::too_precise("0.0000000000000000001", "fractional digits")]
    #[case::empty("", "Invalid token amount")]
    fn test_parse_token_amount_errors(#[case] input: &str, #[case] expected: &str) {
        let err = parse_token_amount(input).unwrap_err();
        assert!(err.contains(expected), "unexpected error: {}", err);
    }

    #[rstest]
    #[case::whole(9500 * ONE_TOKEN, "9500")]
    #[case::fraction(ONE_TOKEN / 20, "0.05")]
    #[case::one_unit(1, "0.000000000000000001")]
    #[case::zero(0, "0")]
    #[case::mixed(12 * ONE_TOKEN + 340_000_000_000_000_000, "12.34")]
    fn test_format_token_amount(#[case] amount: TokenAmount, #[case] expected: &str) {
        assert_eq!(format_token_amount(amount), expected);
    }

    #[test]
    fn test_tokens_overflow() {
        assert_eq!(tokens(5), Some(5 * ONE_TOKEN));
        assert_eq!(tokens(u128::MAX), None);
    }
}
