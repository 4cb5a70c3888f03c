//! App balance, one entry per asset.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::Asset;
use crate::method::ApiMethod;

/// Balance of a single asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceAsset {
    /// Asset code.
    pub currency_code: Asset,

    /// Spendable amount.
    pub available: Decimal,

    /// Amount reserved by pending operations.
    #[serde(default)]
    pub onhold: Decimal,
}

impl BalanceAsset {
    /// Returns the available and on-hold amounts combined.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.available + self.onhold
    }
}

/// The app balance as returned by `getBalance`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balance(pub Vec<BalanceAsset>);

impl Balance {
    /// Returns the entry for `asset`, if the service listed it.
    #[must_use]
    pub fn get(&self, asset: &Asset) -> Option<&BalanceAsset> {
        self.0.iter().find(|entry| &entry.currency_code == asset)
    }

    /// Returns the spendable amount of `asset`, zero if unlisted.
    #[must_use]
    pub fn available(&self, asset: &Asset) -> Decimal {
        self.get(asset).map_or(Decimal::ZERO, |entry| entry.available)
    }

    /// Returns the entries holding a non-zero amount.
    pub fn non_zero(&self) -> impl Iterator<Item = &BalanceAsset> {
        self.0.iter().filter(|entry| !entry.total().is_zero())
    }

    /// Returns an iterator over all entries.
    pub fn iter(&self) -> std::slice::Iter<'_, BalanceAsset> {
        self.0.iter()
    }
}

/// Parameters for `getBalance`. The method takes none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GetBalanceRequest;

impl ApiMethod for GetBalanceRequest {
    const NAME: &'static str = "getBalance";
    type Output = Balance;
}

#[cfg(test)]
mod tests {
    use super::*;

    const BALANCE: &str = r#"[
        {"currency_code": "USDT", "available": "12.5", "onhold": "0.5"},
        {"currency_code": "TON", "available": "0", "onhold": "0"},
        {"currency_code": "BTC", "available": "0.0001"}
    ]"#;

    #[test]
    fn test_balance_lookup() {
        let balance: Balance = serde_json::from_str(BALANCE).unwrap();
        assert_eq!(balance.available(&Asset::Usdt), Decimal::new(125, 1));
        assert_eq!(balance.get(&Asset::Usdt).unwrap().total(), Decimal::new(13, 0));
        assert_eq!(balance.available(&Asset::Eth), Decimal::ZERO);
        assert_eq!(balance.get(&Asset::Btc).unwrap().onhold, Decimal::ZERO);
    }

    #[test]
    fn test_balance_non_zero_skips_empty_assets() {
        let balance: Balance = serde_json::from_str(BALANCE).unwrap();
        let codes: Vec<_> = balance.non_zero().map(|entry| entry.currency_code.clone()).collect();
        assert_eq!(codes, vec![Asset::Usdt, Asset::Btc]);
        assert_eq!(balance.iter().count(), 3);
    }
}
