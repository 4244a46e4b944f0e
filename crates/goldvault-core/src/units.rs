//! Fixed-point unit conversions and display formatting
//!
//! The oracle publishes prices as 8-decimal fixed-point integers; the token
//! uses 18-decimal base units. Amounts cross the API as decimal strings and
//! are converted to base units exactly once, at submission time.

use ethers::types::{Address, U256};
use ethers::utils::to_checksum;

use crate::TokenError;

/// Price feed fractional digits (Chainlink-style USD feed)
pub const ORACLE_DECIMALS: u32 = 8;

/// Token fractional digits (wei-like base units)
pub const TOKEN_DECIMALS: u32 = 18;

/// Display symbol for the token
pub const TOKEN_SYMBOL: &str = "GLD";

/// Format a raw oracle price as a dollar string with two decimals.
///
/// `250_000_000_000` → `"$2500.00"`. Negative feed values keep their sign
/// inside the dollar string.
pub fn format_usd_price(raw: i128) -> String {
    let sign = if raw < 0 { "-" } else { "" };
    let abs = raw.unsigned_abs();
    // Round 8 fractional digits down to cents
    let cents = (abs + 500_000) / 1_000_000;
    format!("${}{}.{:02}", sign, cents / 100, cents % 100)
}

/// Format base units as a decimal string, trailing zeros trimmed.
///
/// `1_500_000_000_000_000_000` with 18 decimals → `"1.5"`.
pub fn format_units(amount: U256, decimals: u32) -> String {
    let divisor = U256::exp10(decimals as usize);
    let whole = amount / divisor;
    let frac = amount % divisor;
    if frac.is_zero() {
        return whole.to_string();
    }
    let frac_str = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    format!("{}.{}", whole, frac_str.trim_end_matches('0'))
}

/// Format token base units for display, with symbol suffix.
pub fn format_gld(amount: U256) -> String {
    format!("{} {}", format_units(amount, TOKEN_DECIMALS), TOKEN_SYMBOL)
}

/// Parse a decimal string into base units.
///
/// Rejects empty input, non-decimal characters, and more fractional digits
/// than the unit carries (no silent truncation).
pub fn parse_units(input: &str, decimals: u32) -> Result<U256, TokenError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(TokenError::InvalidAmount {
            message: "amount is required".to_string(),
        });
    }

    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(TokenError::InvalidAmount {
            message: format!("not a decimal number: {}", input),
        });
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(TokenError::InvalidAmount {
            message: format!("not a decimal number: {}", input),
        });
    }
    if frac.len() > decimals as usize {
        return Err(TokenError::InvalidAmount {
            message: format!("more than {} fractional digits", decimals),
        });
    }

    let mut digits = String::with_capacity(whole.len() + decimals as usize);
    digits.push_str(whole);
    digits.push_str(frac);
    for _ in frac.len()..decimals as usize {
        digits.push('0');
    }
    if digits.is_empty() {
        digits.push('0');
    }

    U256::from_dec_str(&digits).map_err(|_| TokenError::InvalidAmount {
        message: format!("amount out of range: {}", input),
    })
}

/// Parse a GLD amount for a write call. Zero is rejected: submitting a
/// zero-value withdraw or mint is always a user error.
pub fn parse_gld_amount(input: &str) -> Result<U256, TokenError> {
    let amount = parse_units(input, TOKEN_DECIMALS)?;
    if amount.is_zero() {
        return Err(TokenError::InvalidAmount {
            message: "amount must be greater than zero".to_string(),
        });
    }
    Ok(amount)
}

/// Parse a 20-byte hex address
pub fn parse_address(input: &str) -> Result<Address, TokenError> {
    input
        .trim()
        .parse::<Address>()
        .map_err(|_| TokenError::InvalidAddress {
            address: input.to_string(),
        })
}

/// Truncated address form: first 6 characters + "..." + last 4.
pub fn short_address_str(address: &str) -> String {
    if address.len() <= 10 {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

/// Truncated checksummed form of an address
pub fn short_address(address: &Address) -> String {
    short_address_str(&to_checksum(address, None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd_price() {
        assert_eq!(format_usd_price(250_000_000_000), "$2500.00");
        assert_eq!(format_usd_price(123_456_789), "$1.23");
        assert_eq!(format_usd_price(199_999_999), "$2.00");
        assert_eq!(format_usd_price(0), "$0.00");
        assert_eq!(format_usd_price(-250_000_000), "$-2.50");
    }

    #[test]
    fn test_format_gld() {
        let v = U256::from_dec_str("1500000000000000000").unwrap();
        assert_eq!(format_gld(v), "1.5 GLD");

        let v = U256::from_dec_str("2000000000000000000").unwrap();
        assert_eq!(format_gld(v), "2 GLD");

        assert_eq!(format_gld(U256::zero()), "0 GLD");

        // 1 wei of GLD keeps full precision
        assert_eq!(format_gld(U256::one()), "0.000000000000000001 GLD");
    }

    #[test]
    fn test_parse_units_roundtrip() {
        let v = parse_units("1.5", TOKEN_DECIMALS).unwrap();
        assert_eq!(v, U256::from_dec_str("1500000000000000000").unwrap());

        let v = parse_units("2500", TOKEN_DECIMALS).unwrap();
        assert_eq!(format_units(v, TOKEN_DECIMALS), "2500");

        assert_eq!(parse_units("0.5", 8).unwrap(), U256::from(50_000_000u64));
        assert_eq!(parse_units(".5", 1).unwrap(), U256::from(5u64));
        assert_eq!(parse_units("5.", 1).unwrap(), U256::from(50u64));
    }

    #[test]
    fn test_parse_units_rejects_bad_input() {
        assert!(parse_units("", TOKEN_DECIMALS).is_err());
        assert!(parse_units("   ", TOKEN_DECIMALS).is_err());
        assert!(parse_units(".", TOKEN_DECIMALS).is_err());
        assert!(parse_units("-1", TOKEN_DECIMALS).is_err());
        assert!(parse_units("1.5e18", TOKEN_DECIMALS).is_err());
        assert!(parse_units("1,5", TOKEN_DECIMALS).is_err());
        // 19 fractional digits on an 18-decimal token
        assert!(parse_units("0.0000000000000000001", TOKEN_DECIMALS).is_err());
    }

    #[test]
    fn test_parse_gld_amount_rejects_zero() {
        assert!(parse_gld_amount("0").is_err());
        assert!(parse_gld_amount("0.000").is_err());
        assert!(parse_gld_amount("0.001").is_ok());
    }

    #[test]
    fn test_short_address_str() {
        assert_eq!(
            short_address_str("0xAbCdEf0000000000000000000000000000001234"),
            "0xAbCd...1234"
        );
        // Too short to truncate
        assert_eq!(short_address_str("0x1234"), "0x1234");
    }

    #[test]
    fn test_short_address_shape() {
        let addr: Address = "0xabcdef0000000000000000000000000000001234"
            .parse()
            .unwrap();
        let short = short_address(&addr);
        assert_eq!(short.len(), 13);
        assert!(short.starts_with("0x"));
        assert!(short.contains("..."));
        assert!(short.to_lowercase().ends_with("1234"));
    }

    #[test]
    fn test_parse_address() {
        assert!(parse_address("0x7BA1ce81eC8D4c3c7565b0B3de0F8100f8455fdD").is_ok());
        assert!(parse_address("not-an-address").is_err());
        assert!(parse_address("").is_err());
    }
}
