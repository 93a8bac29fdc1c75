use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Identifiable, RecordId};

/// Informal person-to-person debt ("udhaar").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: RecordId,
    pub person_name: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: DebtKind,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub is_paid: bool,
}

impl Debt {
    pub fn new(
        person_name: impl Into<String>,
        amount: f64,
        kind: DebtKind,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RecordId::generate(),
            person_name: person_name.into(),
            amount,
            kind,
            date,
            is_paid: false,
        }
    }

    pub fn is_outstanding(&self) -> bool {
        !self.is_paid
    }
}

impl Identifiable for Debt {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

/// Direction of a debt from the user's point of view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DebtKind {
    /// The user owes the other person.
    Borrowed,
    /// The other person owes the user.
    Lent,
}

impl DebtKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "borrowed" | "borrow" => Some(Self::Borrowed),
            "lent" | "lend" => Some(Self::Lent),
            _ => None,
        }
    }
}

impl fmt::Display for DebtKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebtKind::Borrowed => f.write_str("borrowed"),
            DebtKind::Lent => f.write_str("lent"),
        }
    }
}
