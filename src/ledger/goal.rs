use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::DEFAULT_CATEGORY_COLOR;
use super::common::{Identifiable, RecordId};

/// Quick contribution amounts offered next to each goal.
pub const CONTRIBUTION_PRESETS: [f64; 3] = [10.0, 50.0, 100.0];

/// A savings target. `current_amount` may exceed `target_amount`; only the
/// displayed progress is clamped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: RecordId,
    pub name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    pub deadline: DateTime<Utc>,
    pub color: String,
}

impl Goal {
    pub fn new(name: impl Into<String>, target_amount: f64, deadline: DateTime<Utc>) -> Self {
        Self {
            id: RecordId::generate(),
            name: name.into(),
            target_amount,
            current_amount: 0.0,
            deadline,
            color: DEFAULT_CATEGORY_COLOR.into(),
        }
    }

    pub fn remaining(&self) -> f64 {
        (self.target_amount - self.current_amount).max(0.0)
    }

    pub fn is_reached(&self) -> bool {
        self.current_amount >= self.target_amount
    }
}

impl Identifiable for Goal {
    fn id(&self) -> &RecordId {
        &self.id
    }
}
