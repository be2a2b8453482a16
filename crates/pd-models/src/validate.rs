//! Field validators shared by submission payloads

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

/// M-Pesa subscriber numbers: country code 254 followed by nine digits.
pub static MSISDN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^254\d{9}$").expect("valid msisdn pattern"));

/// Monetary amounts travel as decimal strings. They must parse, be strictly
/// positive and carry at most two fractional digits.
pub fn amount(value: &str) -> Result<(), ValidationError> {
    let parsed: Decimal = value
        .parse()
        .map_err(|_| error("amount_invalid", "is not a valid amount"))?;
    if parsed <= Decimal::ZERO {
        return Err(error("amount_not_positive", "must be greater than zero"));
    }
    if parsed.scale() > 2 {
        return Err(error(
            "amount_precision",
            "must have at most two decimal places",
        ));
    }
    Ok(())
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}
