//! Savings goals
//!
//! A goal accumulates contributions toward a target. Contributions past the
//! target are kept; the goal simply reports complete.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;
use super::money::Money;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: GoalId,
    pub name: String,
    pub target: Money,
    #[serde(default)]
    pub saved: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl SavingsGoal {
    pub fn new(name: impl Into<String>, target: Money) -> Self {
        Self {
            id: GoalId::new(),
            name: name.into().trim().to_string(),
            target,
            saved: Money::zero(),
            deadline: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn contribute(&mut self, amount: Money) {
        self.saved += amount;
    }

    pub fn is_complete(&self) -> bool {
        self.saved >= self.target
    }

    /// Amount still needed, never negative
    pub fn remaining(&self) -> Money {
        if self.is_complete() {
            Money::zero()
        } else {
            self.target - self.saved
        }
    }

    /// Progress toward the target, capped at 100
    pub fn progress_percent(&self) -> f64 {
        self.saved.percent_of(self.target).unwrap_or(0.0).min(100.0)
    }
}

impl fmt::Display for SavingsGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} of {} ({:.1}%)",
            self.name,
            self.saved,
            self.target,
            self.progress_percent()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contributions_accumulate() {
        let mut goal = SavingsGoal::new("Vacation", Money::from_units(1000));
        goal.contribute(Money::from_units(250));
        goal.contribute(Money::from_units(250));

        assert_eq!(goal.saved, Money::from_units(500));
        assert_eq!(goal.remaining(), Money::from_units(500));
        assert_eq!(goal.progress_percent(), 50.0);
        assert!(!goal.is_complete());
    }

    #[test]
    fn test_overshoot_caps_progress() {
        let mut goal = SavingsGoal::new("Laptop", Money::from_units(100));
        goal.contribute(Money::from_units(150));

        assert!(goal.is_complete());
        assert_eq!(goal.remaining(), Money::zero());
        assert_eq!(goal.progress_percent(), 100.0);
        assert_eq!(goal.to_string(), "Laptop: $150.00 of $100.00 (100.0%)");
    }
}
