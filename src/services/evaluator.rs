//! Threshold evaluator
//!
//! Decides whether a category has just crossed its alert threshold. The
//! decision in [`ThresholdEvaluator::evaluate`] is pure: it reads a budget
//! entry and a spend total and reports what should happen. Moving the entry
//! to `Alerted` is a separate step ([`ThresholdEvaluator::apply`]), and
//! persisting and dispatching the alert are left to the caller.
//!
//! An entry alerts at most once between budget edits:
//!
//! ```text
//!   Unalerted --(limit > 0, enabled, spent% >= threshold)--> Alerted
//!   Alerted   --(explicit budget edit)---------------------> Unalerted
//! ```

use tracing::debug;

use crate::models::{BudgetEntry, Money};

use super::budgets::BudgetRegistry;

/// Why an evaluation did or did not fire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Threshold reached for the first time since the last edit
    Fire,
    /// Threshold reached but the alert already went out
    AlreadyAlerted,
    /// Spend is below the threshold
    BelowThreshold,
    /// No limit set for the category
    Unbudgeted,
    /// Notifications are off; nothing was evaluated
    NotificationsDisabled,
}

/// Result of evaluating one category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub decision: Decision,
    /// Spend as a percentage of the limit; zero when unbudgeted
    pub percent_spent: f64,
    pub spent: Money,
    pub limit: Money,
}

impl Evaluation {
    pub fn fired(&self) -> bool {
        self.decision == Decision::Fire
    }
}

/// Title and body handed to the notification dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdAlert {
    pub category: String,
    pub title: String,
    pub body: String,
}

/// Budget threshold decision engine
#[derive(Debug, Clone, Copy)]
pub struct ThresholdEvaluator {
    notifications_enabled: bool,
}

impl ThresholdEvaluator {
    pub fn new(notifications_enabled: bool) -> Self {
        Self {
            notifications_enabled,
        }
    }

    pub fn notifications_enabled(&self) -> bool {
        self.notifications_enabled
    }

    /// Decide whether `spent` against `entry` should raise an alert
    ///
    /// `spent` must already include the expense that triggered the check.
    pub fn evaluate(&self, entry: &BudgetEntry, spent: Money) -> Evaluation {
        let percent_spent = spent.percent_of(entry.amount).unwrap_or(0.0);

        let decision = if !self.notifications_enabled {
            Decision::NotificationsDisabled
        } else if !entry.is_budgeted() {
            Decision::Unbudgeted
        } else if percent_spent < entry.threshold {
            Decision::BelowThreshold
        } else if entry.state.is_alerted() {
            Decision::AlreadyAlerted
        } else {
            Decision::Fire
        };

        debug!(
            spent = %spent,
            limit = %entry.amount,
            threshold = entry.threshold,
            percent_spent,
            ?decision,
            "evaluated budget threshold"
        );

        Evaluation {
            decision,
            percent_spent,
            spent,
            limit: entry.amount,
        }
    }

    /// Carry out the `Unalerted -> Alerted` transition for a firing evaluation
    ///
    /// Returns true when the registry changed.
    pub fn apply(
        &self,
        registry: &mut BudgetRegistry,
        category: &str,
        evaluation: &Evaluation,
    ) -> bool {
        evaluation.fired() && registry.mark_alerted(category)
    }

    /// Build the dispatcher payload for a fired evaluation
    pub fn alert_for(&self, category: &str, evaluation: &Evaluation) -> ThresholdAlert {
        ThresholdAlert {
            category: category.to_string(),
            title: format!("Budget alert: {}", category),
            body: format!(
                "You've used {:.1}% of your {} budget ({} of {}).",
                evaluation.percent_spent, category, evaluation.spent, evaluation.limit
            ),
        }
    }
}
