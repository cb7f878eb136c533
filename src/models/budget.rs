//! Budget entry model
//!
//! One entry per category: the spending limit, the percentage at which an
//! alert fires, and whether that alert has already gone out.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Alert threshold used when none is given
pub const DEFAULT_THRESHOLD: f64 = 80.0;

/// Where a budget entry sits in its alert cycle
///
/// Persisted as the boolean `notified` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum AlertState {
    /// No alert sent since the budget was last edited
    #[default]
    Unalerted,
    /// The threshold alert has fired; stays here until the next edit
    Alerted,
}

impl AlertState {
    pub fn is_alerted(&self) -> bool {
        matches!(self, Self::Alerted)
    }
}

impl From<bool> for AlertState {
    fn from(notified: bool) -> Self {
        if notified {
            Self::Alerted
        } else {
            Self::Unalerted
        }
    }
}

impl From<AlertState> for bool {
    fn from(state: AlertState) -> Self {
        state.is_alerted()
    }
}

/// A category's budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetEntry {
    /// Spending limit; zero means no budget has been set
    pub amount: Money,

    /// Percentage of `amount` at which to alert, in (0, 100]
    pub threshold: f64,

    #[serde(rename = "notified", default)]
    pub state: AlertState,
}

impl BudgetEntry {
    /// Create an entry in the `Unalerted` state
    pub fn new(amount: Money, threshold: f64) -> Self {
        Self {
            amount,
            threshold,
            state: AlertState::Unalerted,
        }
    }

    /// Whether a limit has been set
    pub fn is_budgeted(&self) -> bool {
        self.amount.is_positive()
    }

    /// Validate the entry
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.amount.is_negative() {
            return Err(BudgetValidationError::NegativeAmount);
        }
        validate_threshold(self.threshold)
    }
}

impl Default for BudgetEntry {
    fn default() -> Self {
        Self::new(Money::zero(), DEFAULT_THRESHOLD)
    }
}

impl fmt::Display for BudgetEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "limit {} alert at {}%", self.amount, self.threshold)?;
        if self.state.is_alerted() {
            write!(f, " (alerted)")?;
        }
        Ok(())
    }
}

/// Check a threshold percentage lies in (0, 100]
pub fn validate_threshold(threshold: f64) -> Result<(), BudgetValidationError> {
    if threshold.is_finite() && threshold > 0.0 && threshold <= 100.0 {
        Ok(())
    } else {
        Err(BudgetValidationError::ThresholdOutOfRange(threshold))
    }
}

/// Validation errors for budget entries
#[derive(Debug, Clone, PartialEq)]
pub enum BudgetValidationError {
    NegativeAmount,
    ThresholdOutOfRange(f64),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "Budget amount cannot be negative"),
            Self::ThresholdOutOfRange(t) => {
                write!(f, "Threshold {} is outside of (0, 100]", t)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}
