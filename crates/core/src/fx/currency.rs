use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::constants::DISPLAY_DECIMAL_PRECISION;

static CURRENCY_SYMBOLS: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

fn get_symbols() -> &'static HashMap<&'static str, &'static str> {
    CURRENCY_SYMBOLS.get_or_init(|| {
        [
            ("AED", "د.إ"),
            ("AFN", "؋"),
            ("ALL", "L"),
            ("AMD", "֏"),
            ("ARS", "$"),
            ("AUD", "$"),
            ("AZN", "₼"),
            ("BAM", "KM"),
            ("BDT", "৳"),
            ("BGN", "лв"),
            ("BHD", ".د.ب"),
            ("BRL", "R$"),
            ("BTC", "₿"),
            ("BYN", "Br"),
            ("CAD", "$"),
            ("CHF", "CHF"),
            ("CLP", "$"),
            ("CNY", "¥"),
            ("COP", "$"),
            ("CRC", "₡"),
            ("CZK", "Kč"),
            ("DKK", "kr"),
            ("EGP", "£"),
            ("ETH", "Ξ"),
            ("EUR", "€"),
            ("GBP", "£"),
            ("GEL", "₾"),
            ("GHS", "¢"),
            ("HKD", "$"),
            ("HUF", "Ft"),
            ("IDR", "Rp"),
            ("ILS", "₪"),
            ("INR", "₹"),
            ("ISK", "kr"),
            ("JPY", "¥"),
            ("KES", "KSh"),
            ("KRW", "₩"),
            ("KWD", "KD"),
            ("KZT", "₸"),
            ("MAD", "MAD"),
            ("MDL", "L"),
            ("MXN", "$"),
            ("MYR", "RM"),
            ("NGN", "₦"),
            ("NOK", "kr"),
            ("NZD", "$"),
            ("PHP", "₱"),
            ("PKR", "₨"),
            ("PLN", "zł"),
            ("QAR", "﷼"),
            ("RON", "lei"),
            ("RSD", "Дин."),
            ("RUB", "₽"),
            ("SAR", "﷼"),
            ("SEK", "kr"),
            ("SGD", "$"),
            ("THB", "฿"),
            ("TRY", "₺"),
            ("TWD", "NT$"),
            ("UAH", "₴"),
            ("USD", "$"),
            ("UZS", "лв"),
            ("VND", "₫"),
            ("XAG", "XAG"),
            ("XAU", "XAU"),
            ("ZAR", "R"),
        ]
        .into_iter()
        .collect()
    })
}

/// Returns the display symbol for a currency code, if one is known.
///
/// Lookup ignores case: `"eur"` and `"EUR"` both resolve to `€`.
pub fn currency_symbol(code: &str) -> Option<&'static str> {
    get_symbols()
        .get(code.trim().to_ascii_uppercase().as_str())
        .copied()
}

/// Rounds an amount to two decimal places, halves away from zero.
///
/// The result carries a scale of exactly 2 unless the integer part has more
/// than 26 digits. `Decimal` holds at most 28 significant digits, so such
/// values keep their (already rounded) scale of 0 or 1.
pub fn round_amount(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    );
    rounded.rescale(DISPLAY_DECIMAL_PRECISION);
    rounded
}

/// Formats an amount for display, e.g. `€1,234.50` or `-$0.99`.
///
/// Unknown currency codes are formatted without a symbol.
pub fn format_currency(value: Decimal, currency_code: &str) -> String {
    let rounded = round_amount(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let symbol = currency_symbol(currency_code).unwrap_or("");

    let digits = rounded.abs().to_string();
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!(
        "{}{}{}.{:0<width$}",
        sign,
        symbol,
        group_thousands(integer),
        fraction,
        width = DISPLAY_DECIMAL_PRECISION as usize
    )
}

fn group_thousands(integer: &str) -> String {
    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amounts_beyond_two_decimal_capacity() {
        let huge = Decimal::from_str_exact("7922816251426433759354395033.5").unwrap();
        let rounded = round_amount(huge);
        assert_eq!(rounded, huge);
        assert!(rounded.scale() <= 2);
        assert_eq!(
            format_currency(huge, "USD"),
            "$7,922,816,251,426,433,759,354,395,033.50"
        );
        assert_eq!(
            format_currency(Decimal::MAX, "USD"),
            "$79,228,162,514,264,337,593,543,950,335.00"
        );
    }

    #[test]
    fn test_round_amount_two_places() {
        assert_eq!(round_amount(dec!(1.005)).to_string(), "1.01");
        assert_eq!(round_amount(dec!(-1.005)).to_string(), "-1.01");
        assert_eq!(round_amount(dec!(1.004)).to_string(), "1.00");
        assert_eq!(round_amount(dec!(100)).to_string(), "100.00");
    }

    #[test]
    fn test_currency_symbol_lookup() {
        assert_eq!(currency_symbol("USD"), Some("$"));
        assert_eq!(currency_symbol("eur"), Some("€"));
        assert_eq!(currency_symbol(" GBP "), Some("£"));
        assert_eq!(currency_symbol("UAH"), Some("₴"));
        assert_eq!(currency_symbol("XYZ"), None);
        assert_eq!(currency_symbol(""), None);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec!(1234.5), "EUR"), "€1,234.50");
        assert_eq!(format_currency(dec!(100), "USD"), "$100.00");
        assert_eq!(format_currency(dec!(0.999), "GBP"), "£1.00");
        assert_eq!(format_currency(dec!(1234567.891), "UAH"), "₴1,234,567.89");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_currency(dec!(-0.99), "USD"), "-$0.99");
        assert_eq!(format_currency(dec!(-1000), "EUR"), "-€1,000.00");
        assert_eq!(format_currency(dec!(-0.001), "USD"), "$0.00");
    }

    #[test]
    fn test_format_unknown_currency_has_no_symbol() {
        assert_eq!(format_currency(dec!(42), "XYZ"), "42.00");
    }

    #[test]
    fn test_format_is_idempotent() {
        let first = format_currency(dec!(987.654), "UAH");
        let second = format_currency(dec!(987.654), "UAH");
        assert_eq!(first, second);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("123456"), "123,456");
    }
}
