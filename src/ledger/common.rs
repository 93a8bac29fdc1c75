use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque record identifier.
///
/// Newly created records receive a UUID v4 string. Identifiers read from
/// storage or backup files are kept verbatim, so short legacy ids such as
/// `cat-1` survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the first eight characters, enough to address a record from the CLI.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies records that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> &RecordId;
}

/// Rejects amounts that are NaN, infinite, zero, or negative.
pub fn ensure_positive_amount(amount: f64, what: &str) -> Result<(), String> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(format!("{what} must be a positive number, got {amount}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = RecordId::generate();
        let b = RecordId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn short_id_truncates_long_ids_only() {
        let id = RecordId::from("0123456789abcdef");
        assert_eq!(id.short(), "01234567");
        let legacy = RecordId::from("cat-1");
        assert_eq!(legacy.short(), "cat-1");
    }

    #[test]
    fn positive_amount_guard_rejects_bad_values() {
        assert!(ensure_positive_amount(12.5, "amount").is_ok());
        assert!(ensure_positive_amount(0.0, "amount").is_err());
        assert!(ensure_positive_amount(-3.0, "amount").is_err());
        assert!(ensure_positive_amount(f64::NAN, "amount").is_err());
        assert!(ensure_positive_amount(f64::INFINITY, "amount").is_err());
    }
}
