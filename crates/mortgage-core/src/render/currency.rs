use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::Money;

/// Display format for money: two decimals, `,` thousands separators, and a
/// fixed prefix such as `£`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    prefix: String,
}

impl CurrencyFormat {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Pound sterling with the `£` sign.
    pub fn gbp() -> Self {
        Self::new("£")
    }

    /// Pound sterling spelled as an ASCII code, for outputs limited to
    /// single-byte fonts.
    pub fn gbp_ascii() -> Self {
        Self::new("GBP ")
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `1234567.5` → `£1,234,567.50`. Negative amounts keep the sign in
    /// front of the prefix: `-£12.00`.
    pub fn format(&self, amount: Money) -> String {
        let plain = format_plain(amount);
        let (sign, digits) = match plain.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", plain.as_str()),
        };
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));
        format!(
            "{sign}{}{}.{frac_part}",
            self.prefix,
            group_thousands(int_part)
        )
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::gbp()
    }
}

/// Two decimals, no separators, no symbol. Midpoints round away from zero.
pub fn format_plain(amount: Money) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // Tiny negatives round to a signed zero; print it unsigned.
    let rounded = if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    };
    format!("{rounded:.2}")
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_millions() {
        let gbp = CurrencyFormat::gbp();
        assert_eq!(gbp.format(dec!(1234567.5)), "£1,234,567.50");
    }

    #[test]
    fn test_format_small_values() {
        let gbp = CurrencyFormat::gbp();
        assert_eq!(gbp.format(dec!(0)), "£0.00");
        assert_eq!(gbp.format(dec!(999.999)), "£1,000.00");
        assert_eq!(gbp.format(dec!(100)), "£100.00");
        assert_eq!(gbp.format(dec!(123456)), "£123,456.00");
    }

    #[test]
    fn test_format_negative_keeps_sign_outside_prefix() {
        assert_eq!(CurrencyFormat::gbp().format(dec!(-1500.256)), "-£1,500.26");
    }

    #[test]
    fn test_format_custom_prefix() {
        let fmt = CurrencyFormat::gbp_ascii();
        assert_eq!(fmt.format(dec!(200000)), "GBP 200,000.00");
        assert_eq!(CurrencyFormat::new("$").format(dec!(12.3)), "$12.30");
    }

    #[test]
    fn test_plain_rounds_half_away_from_zero() {
        assert_eq!(format_plain(dec!(2.345)), "2.35");
        assert_eq!(format_plain(dec!(1666.6666666666666666666666667)), "1666.67");
        assert_eq!(format_plain(dec!(1234567.5)), "1234567.50");
    }

    #[test]
    fn test_plain_drops_negative_zero() {
        assert_eq!(format_plain(dec!(-0.001)), "0.00");
    }
}
