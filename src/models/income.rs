//! Income records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::IncomeId;
use super::money::Money;

/// A recorded income payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeRecord {
    pub id: IncomeId,
    pub amount: Money,
    pub source: String,
    pub timestamp: DateTime<Utc>,
}

impl IncomeRecord {
    pub fn new(amount: Money, source: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: IncomeId::new(),
            amount,
            source: source.into().trim().to_string(),
            timestamp,
        }
    }
}
