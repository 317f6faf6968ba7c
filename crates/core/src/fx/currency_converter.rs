use crate::fx::currency::round_amount;
use crate::fx::fx_errors::FxError;
use crate::fx::fx_model::ConversionOptions;
use pocketfx_rates::RateSnapshot;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Converts amounts between the currencies of one rate snapshot.
///
/// Every rate is expressed against `base`, so any pair present in the snapshot
/// converts in at most one cross step. A new snapshot means a new converter.
#[derive(Debug, Clone)]
pub struct CurrencyConverter {
    base: String,
    rates: HashMap<String, Decimal>,
}

impl CurrencyConverter {
    /// Creates a converter scoped to the base and rates of `snapshot`.
    pub fn new(snapshot: &RateSnapshot) -> Self {
        Self {
            base: snapshot.base.clone(),
            rates: snapshot
                .rates
                .iter()
                .map(|(code, rate)| (code.to_string(), rate))
                .collect(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn lookup(&self, code: &str) -> Option<Decimal> {
        self.rates.get(code).copied()
    }

    fn divisor(&self, code: &str) -> Result<Decimal, FxError> {
        match self.lookup(code) {
            Some(rate) if rate.is_zero() => Err(FxError::InvalidRate(format!(
                "Rate for {} is zero and cannot be inverted",
                code
            ))),
            Some(rate) => Ok(rate),
            None => Err(FxError::RateNotFound(code.to_string())),
        }
    }

    /// Applies the snapshot rates to `amount` without rounding.
    ///
    /// Resolution order:
    /// 1. Same currency: unchanged
    /// 2. `from` is the base: multiply by the rate of `to`
    /// 3. `to` is the base: divide by the rate of `from`
    /// 4. Both listed: cross through the base
    fn apply_rates(&self, amount: Decimal, from: &str, to: &str) -> Result<Decimal, FxError> {
        if from == to {
            return Ok(amount);
        }

        if from == self.base {
            if let Some(to_rate) = self.lookup(to) {
                return checked(amount.checked_mul(to_rate), from, to);
            }
        }

        if to == self.base && self.rates.contains_key(from) {
            return checked(amount.checked_div(self.divisor(from)?), from, to);
        }

        match (self.rates.contains_key(from), self.lookup(to)) {
            (true, Some(to_rate)) => {
                let divisor = self.divisor(from)?;
                checked(
                    amount
                        .checked_mul(to_rate)
                        .and_then(|value| value.checked_div(divisor)),
                    from,
                    to,
                )
            }
            _ => Err(FxError::RateNotFound(format!(
                "No rate for {} -> {} against base {}",
                from, to, self.base
            ))),
        }
    }

    /// Rate that turns one unit of `from` into `to`.
    pub fn get_rate(&self, from: &str, to: &str) -> Result<Decimal, FxError> {
        self.apply_rates(Decimal::ONE, from, to)
    }

    /// Converts `amount` and rounds the result to 2 decimals.
    pub fn convert(
        &self,
        amount: Decimal,
        options: &ConversionOptions,
    ) -> Result<Decimal, FxError> {
        let converted = self.apply_rates(amount, &options.from, &options.to)?;
        Ok(round_amount(converted))
    }
}

fn checked(value: Option<Decimal>, from: &str, to: &str) -> Result<Decimal, FxError> {
    value.ok_or_else(|| FxError::InvalidRate(format!("{} -> {} overflowed", from, to)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pocketfx_rates::CurrencyRates;
    use rust_decimal_macros::dec;

    fn make_converter(base: &str, rates: &[(&str, Decimal)]) -> CurrencyConverter {
        let rates: CurrencyRates = rates.iter().map(|(c, r)| (*c, *r)).collect();
        CurrencyConverter::new(&RateSnapshot::new(base, 1_700_000_000, rates))
    }

    fn converter() -> CurrencyConverter {
        make_converter(
            "USD",
            &[
                ("USD", dec!(1)),
                ("EUR", dec!(0.9)),
                ("GBP", dec!(0.8)),
                ("UAH", dec!(41.5)),
            ],
        )
    }

    #[test]
    fn test_convert_from_base() {
        let result = converter()
            .convert(dec!(100), &ConversionOptions::new("USD", "EUR"))
            .unwrap();
        assert_eq!(result, dec!(90.00));
    }

    #[test]
    fn test_convert_to_base() {
        let result = converter()
            .convert(dec!(90), &ConversionOptions::new("EUR", "USD"))
            .unwrap();
        assert_eq!(result, dec!(100.00));
    }

    #[test]
    fn test_convert_cross_rate() {
        let result = converter()
            .convert(dec!(10), &ConversionOptions::new("EUR", "GBP"))
            .unwrap();
        // 10 / 0.9 * 0.8 = 8.888...
        assert_eq!(result, dec!(8.89));
    }

    #[test]
    fn test_convert_same_currency() {
        let result = converter()
            .convert(dec!(12.345), &ConversionOptions::new("UAH", "UAH"))
            .unwrap();
        assert_eq!(result, dec!(12.35));
    }

    #[test]
    fn test_base_without_self_rate() {
        let converter = make_converter("USD", &[("EUR", dec!(0.9))]);
        assert_eq!(
            converter
                .convert(dec!(100), &ConversionOptions::new("USD", "EUR"))
                .unwrap(),
            dec!(90)
        );
        assert_eq!(
            converter
                .convert(dec!(9), &ConversionOptions::new("EUR", "USD"))
                .unwrap(),
            dec!(10)
        );
    }

    #[test]
    fn test_get_rate() {
        let converter = converter();
        assert_eq!(converter.get_rate("USD", "UAH").unwrap(), dec!(41.5));
        assert_eq!(converter.get_rate("GBP", "GBP").unwrap(), Decimal::ONE);
        assert_eq!(converter.get_rate("GBP", "USD").unwrap(), dec!(1.25));
    }

    #[test]
    fn test_unknown_currency() {
        let err = converter()
            .convert(dec!(1), &ConversionOptions::new("USD", "JPY"))
            .unwrap_err();
        assert!(matches!(err, FxError::RateNotFound(_)));

        let err = converter()
            .convert(dec!(1), &ConversionOptions::new("JPY", "EUR"))
            .unwrap_err();
        assert!(matches!(err, FxError::RateNotFound(_)));
    }

    #[test]
    fn test_zero_rate_cannot_be_inverted() {
        let converter = make_converter("USD", &[("EUR", dec!(0)), ("GBP", dec!(0.8))]);
        let err = converter
            .convert(dec!(1), &ConversionOptions::new("EUR", "GBP"))
            .unwrap_err();
        assert!(matches!(err, FxError::InvalidRate(_)));
    }

    #[test]
    fn test_overflow_is_reported() {
        let err = converter()
            .convert(Decimal::MAX, &ConversionOptions::new("USD", "UAH"))
            .unwrap_err();
        assert!(matches!(err, FxError::InvalidRate(_)));
    }
}
