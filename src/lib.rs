//! Zenny - budget threshold tracking and alerting
//!
//! Tracks per-category spending against user-defined limits and raises a
//! single notification when a category first crosses its alert threshold.
//! State is kept per user and saved as one JSON document in a pluggable
//! store.
//!
//! # Architecture
//!
//! - `models`: categories, budget entries, receipts, incomes and goals
//! - `services`: category store, budget registry, expense ledger, threshold
//!   evaluator, persistence bridge and the per-user [`BudgetSession`]
//! - `storage`: the [`storage::DocumentStore`] trait and its implementations
//! - `notify`: alert dispatch
//! - `config`: paths and settings
//! - `cli`, `display`: the `zenny` command-line front end
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use zenny::config::Settings;
//! use zenny::models::{ExpenseDraft, Money, UserId};
//! use zenny::notify::LogNotifier;
//! use zenny::services::{BudgetSession, PersistenceBridge};
//! use zenny::storage::MemoryStore;
//!
//! let settings = Settings::default();
//! let bridge = PersistenceBridge::new(
//!     Arc::new(MemoryStore::new()),
//!     UserId::new("alice"),
//!     settings.store_timeout(),
//! );
//! let mut session = BudgetSession::open(bridge, Arc::new(LogNotifier), &settings).await?;
//! session.update_category_budget("Food", Money::from_units(100), Some(80.0)).await?;
//! let outcome = session.add_expense(ExpenseDraft::new(Money::from_units(85), "Food")).await?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod notify;
pub mod services;
pub mod storage;

pub use error::{ZennyError, ZennyResult};
pub use services::BudgetSession;
