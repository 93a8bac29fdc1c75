//! Display currencies and compact money formatting.
//!
//! Amounts are stored unit-less; choosing a currency only relabels them. No
//! exchange-rate conversion happens anywhere.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// Closed list of supported display currencies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "CurrencyOption", into = "CurrencyOption")]
pub enum Currency {
    #[default]
    Pkr,
    Usd,
    Eur,
    Gbp,
    Inr,
    Jpy,
    Aud,
    Cad,
    Aed,
    Sar,
}

impl Currency {
    pub const ALL: [Currency; 10] = [
        Currency::Pkr,
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Inr,
        Currency::Jpy,
        Currency::Aud,
        Currency::Cad,
        Currency::Aed,
        Currency::Sar,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Currency::Pkr => "PKR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Inr => "INR",
            Currency::Jpy => "JPY",
            Currency::Aud => "AUD",
            Currency::Cad => "CAD",
            Currency::Aed => "AED",
            Currency::Sar => "SAR",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Pkr => "Rs.",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Inr => "₹",
            Currency::Jpy => "¥",
            Currency::Aud => "A$",
            Currency::Cad => "C$",
            Currency::Aed => "DH",
            Currency::Sar => "SR",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Currency::Pkr => "Pakistani Rupee",
            Currency::Usd => "US Dollar",
            Currency::Eur => "Euro",
            Currency::Gbp => "British Pound",
            Currency::Inr => "Indian Rupee",
            Currency::Jpy => "Japanese Yen",
            Currency::Aud => "Australian Dollar",
            Currency::Cad => "Canadian Dollar",
            Currency::Aed => "UAE Dirham",
            Currency::Sar => "Saudi Riyal",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|currency| currency.code().eq_ignore_ascii_case(code))
    }

    /// Formats `amount` compactly with this currency's symbol.
    pub fn format(self, amount: f64) -> String {
        format_compact(amount, self.symbol())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) {}", self.code(), self.symbol(), self.name())
    }
}

/// Wire shape of a currency: the `{code, symbol, name}` triple.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrencyOption {
    pub code: String,
    pub symbol: String,
    pub name: String,
}

impl From<Currency> for CurrencyOption {
    fn from(value: Currency) -> Self {
        Self {
            code: value.code().into(),
            symbol: value.symbol().into(),
            name: value.name().into(),
        }
    }
}

impl TryFrom<CurrencyOption> for Currency {
    type Error = LedgerError;

    fn try_from(value: CurrencyOption) -> Result<Self, Self::Error> {
        Currency::from_code(&value.code).ok_or_else(|| {
            LedgerError::Validation(format!("unsupported currency `{}`", value.code))
        })
    }
}

/// Formats a monetary amount into a short human string.
///
/// Magnitudes of at least a thousand are scaled to `k`/`M`/`B`/`T` with one
/// decimal place (a trailing `.0` is dropped). Smaller values keep at most one
/// decimal place with comma grouping. The sign precedes the symbol:
/// `format_compact(-250000.0, "$") == "-$250k"`.
pub fn format_compact(amount: f64, symbol: &str) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let abs = amount.abs();
    let sign = if amount < 0.0 { "-" } else { "" };

    const SCALES: [(f64, &str); 4] = [(1.0e12, "T"), (1.0e9, "B"), (1.0e6, "M"), (1.0e3, "k")];
    let body = match SCALES.iter().find(|(threshold, _)| abs >= *threshold) {
        Some((threshold, suffix)) => format!("{}{}", one_decimal(abs / threshold, false), suffix),
        None => one_decimal(abs, true),
    };
    format!("{sign}{symbol}{body}")
}

/// Rounds half away from zero to tenths and drops a `.0` fraction.
fn one_decimal(value: f64, grouped: bool) -> String {
    let tenths = (value * 10.0).round() as u128;
    let whole = (tenths / 10).to_string();
    let whole = if grouped {
        group_digits(&whole, ',')
    } else {
        whole
    };
    match tenths % 10 {
        0 => whole,
        fraction => format!("{whole}.{fraction}"),
    }
}

/// Inserts `separator` between every group of three digits.
pub fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.chars().count();
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (len - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
