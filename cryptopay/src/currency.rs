//! Currency codes used across the Crypto Pay API.
//!
//! - [`Asset`] - Cryptocurrency codes accepted for invoices, checks and transfers
//! - [`Fiat`] - Fiat currency codes used for fiat-priced invoices and exchange rates
//! - [`CurrencyType`] - Whether an invoice is priced in crypto or fiat
//! - [`CurrencyInfo`] - Metadata returned by `getCurrencies`
//!
//! # Serialization
//!
//! Codes serialize to/from their upper-case string form: `"USDT"`, `"EUR"`.
//! Codes this crate does not know are kept verbatim in the `Other` variant,
//! so new assets listed by the service never break deserialization.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::method::ApiMethod;

macro_rules! currency_code {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $code:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A code not known to this crate, kept verbatim.
            Other(String),
        }

        impl $name {
            /// Returns the code as sent over the wire.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $code, )+
                    Self::Other(code) => code,
                }
            }

            /// Returns `true` unless this is an [`Other`](Self::Other) code.
            #[must_use]
            pub const fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }

            fn parse(s: &str) -> Self {
                match s.to_ascii_uppercase().as_str() {
                    $( $code => Self::$variant, )+
                    _ => Self::Other(s.to_owned()),
                }
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::parse(s))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Ok(Self::parse(&s))
            }
        }
    };
}

currency_code! {
    /// A cryptocurrency supported by the Crypto Bot.
    Asset {
        /// Tether.
        Usdt => "USDT",
        /// Toncoin.
        Ton => "TON",
        /// Solana.
        Sol => "SOL",
        /// Tron.
        Trx => "TRX",
        /// Gram.
        Gram => "GRAM",
        /// Bitcoin.
        Btc => "BTC",
        /// Ethereum.
        Eth => "ETH",
        /// Dogecoin.
        Doge => "DOGE",
        /// Litecoin.
        Ltc => "LTC",
        /// Notcoin.
        Not => "NOT",
        /// BNB.
        Bnb => "BNB",
        /// USD Coin.
        Usdc => "USDC",
        /// Binance USD.
        Busd => "BUSD",
        /// Test jetton, available on testnet only.
        Jet => "JET",
    }
}

currency_code! {
    /// A fiat currency accepted for fiat-priced invoices.
    Fiat {
        /// US dollar.
        Usd => "USD",
        /// Euro.
        Eur => "EUR",
        /// Russian ruble.
        Rub => "RUB",
        /// Belarusian ruble.
        Byn => "BYN",
        /// Ukrainian hryvnia.
        Uah => "UAH",
        /// Pound sterling.
        Gbp => "GBP",
        /// Chinese yuan.
        Cny => "CNY",
        /// Kazakhstani tenge.
        Kzt => "KZT",
        /// Uzbekistani som.
        Uzs => "UZS",
        /// Georgian lari.
        Gel => "GEL",
        /// Turkish lira.
        Try => "TRY",
        /// Armenian dram.
        Amd => "AMD",
        /// Thai baht.
        Thb => "THB",
        /// Indian rupee.
        Inr => "INR",
        /// Brazilian real.
        Brl => "BRL",
        /// Indonesian rupiah.
        Idr => "IDR",
        /// Azerbaijani manat.
        Azn => "AZN",
        /// UAE dirham.
        Aed => "AED",
        /// Polish zloty.
        Pln => "PLN",
        /// Israeli new shekel.
        Ils => "ILS",
    }
}

/// How an invoice amount is denominated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyType {
    /// Amount is in the invoice's `asset`.
    #[default]
    Crypto,
    /// Amount is in the invoice's `fiat`, payable in any accepted asset.
    Fiat,
}

impl fmt::Display for CurrencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Crypto => f.write_str("crypto"),
            Self::Fiat => f.write_str("fiat"),
        }
    }
}

/// A currency supported by the service, as returned by `getCurrencies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyInfo {
    /// `true` for on-chain cryptocurrencies.
    #[serde(default)]
    pub is_blockchain: bool,

    /// `true` for stablecoins.
    #[serde(default)]
    pub is_stablecoin: bool,

    /// `true` for fiat currencies.
    #[serde(default)]
    pub is_fiat: bool,

    /// Human-readable name (e.g., `"Tether"`).
    pub name: String,

    /// Currency code (e.g., `"USDT"`, `"EUR"`).
    pub code: String,

    /// Project URL, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Number of decimal places the service keeps for this currency.
    pub decimals: u32,
}

impl CurrencyInfo {
    /// Returns the code as an [`Asset`], or `None` for fiat currencies.
    #[must_use]
    pub fn asset(&self) -> Option<Asset> {
        (!self.is_fiat).then(|| Asset::parse(&self.code))
    }

    /// Returns the code as a [`Fiat`], or `None` for cryptocurrencies.
    #[must_use]
    pub fn fiat(&self) -> Option<Fiat> {
        self.is_fiat.then(|| Fiat::parse(&self.code))
    }
}

/// Parameters for `getCurrencies`. The method takes none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GetCurrenciesRequest;

impl ApiMethod for GetCurrenciesRequest {
    const NAME: &'static str = "getCurrencies";
    type Output = Vec<CurrencyInfo>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_parse_known_is_case_insensitive() {
        assert_eq!("USDT".parse::<Asset>().unwrap(), Asset::Usdt);
        assert_eq!("ton".parse::<Asset>().unwrap(), Asset::Ton);
        assert!(Asset::Btc.is_known());
    }

    #[test]
    fn test_asset_unknown_code_is_preserved() {
        let asset: Asset = serde_json::from_str("\"HMSTR\"").unwrap();
        assert_eq!(asset, Asset::Other("HMSTR".into()));
        assert!(!asset.is_known());
        assert_eq!(serde_json::to_string(&asset).unwrap(), "\"HMSTR\"");
    }

    #[test]
    fn test_asset_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Asset::Usdc).unwrap(), "\"USDC\"");
        assert_eq!(Asset::Jet.to_string(), "JET");
    }

    #[test]
    fn test_fiat_parse_and_display() {
        let fiat: Fiat = serde_json::from_str("\"EUR\"").unwrap();
        assert_eq!(fiat, Fiat::Eur);
        assert_eq!(Fiat::Try.to_string(), "TRY");
        assert_eq!("xyz".parse::<Fiat>().unwrap(), Fiat::Other("xyz".into()));
    }

    #[test]
    fn test_currency_type_wire_format() {
        assert_eq!(
            serde_json::to_string(&CurrencyType::Fiat).unwrap(),
            "\"fiat\""
        );
        let parsed: CurrencyType = serde_json::from_str("\"crypto\"").unwrap();
        assert_eq!(parsed, CurrencyType::Crypto);
    }

    #[test]
    fn test_currency_info_splits_asset_and_fiat() {
        let json = r#"[
            {"is_blockchain":true,"is_stablecoin":true,"is_fiat":false,"name":"Tether","code":"USDT","url":"https://tether.to/","decimals":18},
            {"is_blockchain":false,"is_stablecoin":false,"is_fiat":true,"name":"Euro","code":"EUR","decimals":8}
        ]"#;
        let currencies: Vec<CurrencyInfo> = serde_json::from_str(json).unwrap();
        assert_eq!(currencies[0].asset(), Some(Asset::Usdt));
        assert_eq!(currencies[0].fiat(), None);
        assert_eq!(currencies[1].fiat(), Some(Fiat::Eur));
        assert!(currencies[1].url.is_none());
    }
}
