//! Exchange rates between supported cryptocurrencies and fiat currencies.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::{Asset, Fiat};
use crate::method::ApiMethod;

/// A single exchange rate, e.g. `BTC → USD = 16836.58`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// `false` if the service could not refresh this rate.
    pub is_valid: bool,

    /// `true` if `source` is a cryptocurrency.
    #[serde(default)]
    pub is_crypto: bool,

    /// `true` if `source` is a fiat currency.
    #[serde(default)]
    pub is_fiat: bool,

    /// Source currency code.
    pub source: Asset,

    /// Target fiat code.
    pub target: Fiat,

    /// Price of one `source` in `target`.
    pub rate: Decimal,
}

impl ExchangeRate {
    /// Converts `amount` of `source` into `target`.
    #[must_use]
    pub fn convert(&self, amount: Decimal) -> Decimal {
        amount * self.rate
    }
}

/// Returns the first valid rate from `source` to `target`.
#[must_use]
pub fn find_rate<'a>(
    rates: &'a [ExchangeRate],
    source: &Asset,
    target: &Fiat,
) -> Option<&'a ExchangeRate> {
    rates
        .iter()
        .find(|rate| rate.is_valid && &rate.source == source && &rate.target == target)
}

/// Parameters for `getExchangeRates`. The method takes none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GetExchangeRatesRequest;

impl ApiMethod for GetExchangeRatesRequest {
    const NAME: &'static str = "getExchangeRates";
    type Output = Vec<ExchangeRate>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates() -> Vec<ExchangeRate> {
        serde_json::from_str(
            r#"[
                {"is_valid": false, "is_crypto": true, "is_fiat": false, "source": "BTC", "target": "USD", "rate": "1.00"},
                {"is_valid": true, "is_crypto": true, "is_fiat": false, "source": "BTC", "target": "USD", "rate": "16836.58000000"},
                {"is_valid": true, "is_crypto": true, "is_fiat": false, "source": "TON", "target": "EUR", "rate": "2.1"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_find_rate_skips_invalid_entries() {
        let rates = rates();
        let rate = find_rate(&rates, &Asset::Btc, &Fiat::Usd).unwrap();
        assert_eq!(rate.rate, Decimal::new(1_683_658, 2));
    }

    #[test]
    fn test_find_rate_unknown_pair() {
        let rates = rates();
        assert!(find_rate(&rates, &Asset::Ton, &Fiat::Usd).is_none());
    }

    #[test]
    fn test_convert() {
        let rates = rates();
        let rate = find_rate(&rates, &Asset::Ton, &Fiat::Eur).unwrap();
        assert_eq!(rate.convert(Decimal::new(10, 0)), Decimal::new(21, 0));
    }
}
