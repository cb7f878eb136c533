//! Service layer for Zenny
//!
//! The five engine components and the session that sequences them. The
//! components are synchronous and own their state; only the persistence
//! bridge and the session are async.

pub mod budgets;
pub mod categories;
pub mod evaluator;
pub mod ledger;
pub mod persistence;
pub mod session;

pub use budgets::BudgetRegistry;
pub use categories::CategoryStore;
pub use evaluator::{Decision, Evaluation, ThresholdAlert, ThresholdEvaluator};
pub use ledger::{ExpenseLedger, SpendPeriod, SpendWindow};
pub use persistence::{Loaded, PersistenceBridge};
pub use session::{BudgetSession, CategoryStatus, ExpenseOutcome, SaveStatus};
