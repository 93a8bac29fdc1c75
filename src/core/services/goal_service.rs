use crate::ledger::{common::ensure_positive_amount, Goal, Ledger, RecordId};

use super::{ServiceError, ServiceResult};

pub struct GoalService;

impl GoalService {
    /// Adds a goal. Progress always starts at zero.
    pub fn add(ledger: &mut Ledger, mut goal: Goal) -> ServiceResult<RecordId> {
        goal.name = goal.name.trim().to_string();
        goal.current_amount = 0.0;
        Self::validate(&goal)?;
        Ok(ledger.add_goal(goal))
    }

    /// Adds `amount` to the goal's saved total. Storage is not clamped at the
    /// target. Returns the new saved total.
    pub fn contribute(ledger: &mut Ledger, id: &RecordId, amount: f64) -> ServiceResult<f64> {
        ensure_positive_amount(amount, "Contribution").map_err(ServiceError::Invalid)?;
        let goal = ledger
            .goal_mut(id)
            .ok_or_else(|| ServiceError::NotFound(format!("Goal {id}")))?;
        let total = goal.current_amount + amount;
        if !total.is_finite() {
            return Err(ServiceError::Invalid(format!(
                "Contribution of {amount} would overflow the saved total"
            )));
        }
        goal.current_amount = total;
        Ok(total)
    }

    /// Applies `mutator` to the goal, rolling back if the result is invalid.
    pub fn update<F>(ledger: &mut Ledger, id: &RecordId, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut Goal),
    {
        let goal = ledger
            .goal_mut(id)
            .ok_or_else(|| ServiceError::NotFound(format!("Goal {id}")))?;
        let original = goal.clone();
        mutator(goal);
        goal.id = original.id.clone();
        if let Err(err) = Self::validate(goal) {
            *goal = original;
            return Err(err);
        }
        Ok(())
    }

    pub fn remove(ledger: &mut Ledger, id: &RecordId) -> ServiceResult<Goal> {
        ledger
            .remove_goal(id)
            .ok_or_else(|| ServiceError::NotFound(format!("Goal {id}")))
    }

    fn validate(goal: &Goal) -> ServiceResult<()> {
        if goal.name.trim().is_empty() {
            return Err(ServiceError::Invalid("Goal name cannot be empty".into()));
        }
        ensure_positive_amount(goal.target_amount, "Target amount")
            .map_err(ServiceError::Invalid)?;
        if !goal.current_amount.is_finite() || goal.current_amount < 0.0 {
            return Err(ServiceError::Invalid(
                "Saved amount must be a finite, non-negative number".into(),
            ));
        }
        Ok(())
    }
}
