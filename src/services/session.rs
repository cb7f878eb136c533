//! Budget session
//!
//! One [`BudgetSession`] per signed-in user owns the category store, budget
//! registry, expense ledger, incomes, goals and notification settings, and
//! sequences every workflow over them. Mutations take `&mut self`, so within
//! a session they are applied one at a time.
//!
//! Validation failures come back as `Err`. Persistence failures never do:
//! they are logged and reported through [`SaveStatus`], and the in-memory
//! state stays authoritative until the next successful save.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::config::settings::Settings;
use crate::error::{ZennyError, ZennyResult};
use crate::models::budget::validate_threshold;
use crate::models::{
    BudgetEntry, Category, ExpenseDraft, ExpenseId, ExpenseRecord, GoalId, IncomeId,
    IncomeRecord, Money, NotificationSettings, SavingsGoal, UserData, UserId,
};
use crate::notify::Notifier;

use super::budgets::BudgetRegistry;
use super::categories::CategoryStore;
use super::evaluator::{Evaluation, ThresholdAlert, ThresholdEvaluator};
use super::ledger::{ExpenseLedger, SpendPeriod, SpendWindow};
use super::persistence::PersistenceBridge;

/// What happened to the snapshot after a mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    /// Written to the store
    Saved,
    /// No signed-in user; kept in memory only
    Skipped,
    /// The store call failed or timed out; kept in memory only
    Failed(String),
}

impl SaveStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Result of the add-expense workflow
#[derive(Debug, Clone)]
pub struct ExpenseOutcome {
    pub record: ExpenseRecord,
    pub evaluation: Evaluation,
    /// Set when the threshold alert fired and was dispatched
    pub alert: Option<ThresholdAlert>,
    pub save: SaveStatus,
}

impl ExpenseOutcome {
    pub fn fired(&self) -> bool {
        self.evaluation.fired()
    }
}

/// Spend against a category's budget
#[derive(Debug, Clone)]
pub struct CategoryStatus {
    pub category: Category,
    pub spent: Money,
    pub entry: BudgetEntry,
    /// `None` when no limit is set
    pub percent_spent: Option<f64>,
}

/// Per-user service object for the budget engine
pub struct BudgetSession {
    categories: CategoryStore,
    budgets: BudgetRegistry,
    ledger: ExpenseLedger,
    incomes: Vec<IncomeRecord>,
    goals: Vec<SavingsGoal>,
    notifications: NotificationSettings,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    spend_period: SpendPeriod,
    default_threshold: f64,
    bridge: PersistenceBridge,
    notifier: Arc<dyn Notifier>,
    last_save: Option<SaveStatus>,
}

impl BudgetSession {
    /// Load the user's data and build a session
    ///
    /// A first-time user gets the default categories, default budget entries
    /// and an initial saved document. Without a signed-in user the session
    /// starts from defaults and keeps everything in memory. A store failure
    /// while loading is returned, since continuing would overwrite the
    /// stored document with empty state on the next save.
    pub async fn open(
        bridge: PersistenceBridge,
        notifier: Arc<dyn Notifier>,
        settings: &Settings,
    ) -> ZennyResult<Self> {
        let (data, first_time) = match bridge.load().await {
            Ok(loaded) => (loaded.data, loaded.first_time),
            Err(ZennyError::NotAuthenticated) => {
                warn!("no signed-in user, changes will not be saved");
                (UserData::default(), true)
            }
            Err(e) => return Err(e),
        };

        let mut session = Self::from_data(data, bridge, notifier, settings);
        if first_time {
            session.categories.seed_defaults();
            session.budgets.ensure_defaults(session.categories.list());
            session.persist().await;
        }

        info!(
            user = session.user().map(UserId::as_str).unwrap_or("<anonymous>"),
            categories = session.categories.len(),
            receipts = session.ledger.len(),
            first_time,
            "budget session opened"
        );
        Ok(session)
    }

    /// Build a session from already-loaded data without touching the store
    pub fn from_data(
        data: UserData,
        bridge: PersistenceBridge,
        notifier: Arc<dyn Notifier>,
        settings: &Settings,
    ) -> Self {
        let categories = CategoryStore::from_categories(data.categories);
        let mut budgets = BudgetRegistry::from_map(data.budgets);
        budgets.ensure_defaults(categories.list());

        Self {
            categories,
            budgets,
            ledger: ExpenseLedger::from_records(data.receipts),
            incomes: data.incomes,
            goals: data.goals,
            notifications: data.notification_settings,
            created_at: data.created_at,
            updated_at: data.updated_at,
            spend_period: settings.spend_window,
            default_threshold: settings.default_threshold,
            bridge,
            notifier,
            last_save: None,
        }
    }

    // === Accessors ===

    pub fn user(&self) -> Option<&UserId> {
        self.bridge.user()
    }

    pub fn categories(&self) -> &CategoryStore {
        &self.categories
    }

    pub fn budgets(&self) -> &BudgetRegistry {
        &self.budgets
    }

    pub fn ledger(&self) -> &ExpenseLedger {
        &self.ledger
    }

    pub fn incomes(&self) -> &[IncomeRecord] {
        &self.incomes
    }

    pub fn goals(&self) -> &[SavingsGoal] {
        &self.goals
    }

    pub fn notifications_enabled(&self) -> bool {
        self.notifications.enabled
    }

    /// Outcome of the most recent save attempt
    pub fn last_save(&self) -> Option<&SaveStatus> {
        self.last_save.as_ref()
    }

    fn evaluator(&self) -> ThresholdEvaluator {
        ThresholdEvaluator::new(self.notifications.enabled)
    }

    fn window(&self) -> SpendWindow {
        self.spend_period.window(Utc::now())
    }

    // === Persistence ===

    /// The full document as it would be saved
    pub fn snapshot(&self) -> UserData {
        UserData {
            receipts: self.ledger.records().to_vec(),
            incomes: self.incomes.clone(),
            goals: self.goals.clone(),
            categories: self.categories.list().to_vec(),
            budgets: self.budgets.to_map(),
            notification_settings: self.notifications,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Save the current snapshot, logging instead of failing
    pub async fn persist(&mut self) -> SaveStatus {
        self.updated_at = Some(Utc::now());
        if self.created_at.is_none() {
            self.created_at = self.updated_at;
        }

        let status = match self.bridge.save(&self.snapshot()).await {
            Ok(()) => SaveStatus::Saved,
            Err(ZennyError::NotAuthenticated) => {
                debug!("skipping save without a signed-in user");
                SaveStatus::Skipped
            }
            Err(e) => {
                warn!(error = %e, "failed to save user data, continuing with in-memory state");
                SaveStatus::Failed(e.to_string())
            }
        };
        self.last_save = Some(status.clone());
        status
    }

    // === Categories ===

    /// Add a category and give it a default budget entry
    pub async fn add_category(&mut self, name: &str) -> ZennyResult<Category> {
        let category = self.categories.add(name)?;
        self.budgets.ensure_defaults(std::slice::from_ref(&category));
        self.persist().await;
        Ok(category)
    }

    /// Remove an unused category along with its budget entry
    pub async fn remove_category(&mut self, name: &str) -> ZennyResult<Category> {
        let removed = self
            .categories
            .remove(name, &self.ledger, &mut self.budgets)?;
        self.persist().await;
        Ok(removed)
    }

    // === Budgets ===

    /// Set a category's limit and alert threshold
    ///
    /// Any edit puts the entry back in the unalerted state. The threshold
    /// falls back to the configured default when not given. A category that
    /// does not exist yet is created once the amount and threshold are valid.
    pub async fn update_category_budget(
        &mut self,
        category: &str,
        amount: Money,
        threshold: Option<f64>,
    ) -> ZennyResult<BudgetEntry> {
        let threshold = check_threshold(threshold.unwrap_or(self.default_threshold))?;
        BudgetRegistry::check_amount(category, amount)?;

        let name = match self.categories.get(category) {
            Some(existing) => existing.name().to_string(),
            None => {
                let created = self.categories.add(category)?;
                info!(category = %created, "created category for new budget");
                created.name().to_string()
            }
        };

        let entry = self.budgets.set_entry(&name, amount, threshold)?;
        self.persist().await;
        Ok(entry)
    }

    /// Drop the budget entry of a category that has been deleted elsewhere
    pub async fn cleanup_deleted_category_budgets(&mut self, category: &str) -> SaveStatus {
        self.budgets.delete_entry(category);
        self.persist().await
    }

    /// Remove every budget entry
    pub async fn clear_budgets(&mut self) -> SaveStatus {
        self.budgets.reset();
        self.persist().await
    }

    /// Evaluate a category against its budget without changing anything
    pub fn evaluate(&self, category: &str) -> Option<Evaluation> {
        let entry = self.budgets.get(category)?;
        let spent = self.ledger.total_for(category, self.window());
        Some(self.evaluator().evaluate(entry, spent))
    }

    /// Spend against every category's budget, in category order
    pub fn budget_status(&self) -> Vec<CategoryStatus> {
        let window = self.window();
        self.categories
            .list()
            .iter()
            .map(|category| {
                let spent = self.ledger.total_for(category.name(), window);
                let entry = self
                    .budgets
                    .get(category.name())
                    .cloned()
                    .unwrap_or_default();
                CategoryStatus {
                    category: category.clone(),
                    spent,
                    percent_spent: spent.percent_of(entry.amount),
                    entry,
                }
            })
            .collect()
    }

    // === Expenses ===

    /// Record an expense and check its category's threshold
    ///
    /// The record is in the ledger before the total is computed, so the
    /// percentage always includes it. A category that does not exist yet is
    /// created with a default budget entry.
    pub async fn add_expense(&mut self, draft: ExpenseDraft) -> ZennyResult<ExpenseOutcome> {
        require_positive(draft.amount, "expense amount")?;
        let lifetime = self.ledger.total_for(&draft.category, SpendWindow::All);
        if !lifetime
            .checked_add(draft.amount)
            .is_some_and(|total| total.is_within_limit())
        {
            return Err(ZennyError::InvalidAmount(format!(
                "total spend for '{}' would exceed {}",
                draft.category.trim(),
                Money::MAX
            )));
        }

        let category = match self.categories.get(&draft.category) {
            Some(existing) => existing.clone(),
            None => {
                let created = self.categories.add(&draft.category)?;
                info!(category = %created, "created category for new expense");
                created
            }
        };
        self.budgets.ensure_defaults(std::slice::from_ref(&category));

        let record = self
            .ledger
            .add(ExpenseRecord::from_draft(draft, category.clone()))
            .clone();

        let spent = self.ledger.total_for(category.name(), self.window());
        let evaluator = self.evaluator();
        let entry = self.budgets.get(category.name()).cloned().unwrap_or_default();
        let evaluation = evaluator.evaluate(&entry, spent);
        evaluator.apply(&mut self.budgets, category.name(), &evaluation);

        let save = self.persist().await;

        let alert = if evaluation.fired() {
            let alert = evaluator.alert_for(category.name(), &evaluation);
            info!(
                category = %category,
                percent_spent = evaluation.percent_spent,
                "budget threshold crossed"
            );
            self.notifier.notify(&alert.title, &alert.body);
            Some(alert)
        } else {
            None
        };

        Ok(ExpenseOutcome {
            record,
            evaluation,
            alert,
            save,
        })
    }

    /// Delete an expense; an unknown id is ignored
    ///
    /// Removing spend never re-arms an alert; only a budget edit does.
    pub async fn remove_expense(&mut self, id: ExpenseId) -> Option<ExpenseRecord> {
        let removed = self.ledger.remove(id)?;
        self.persist().await;
        Some(removed)
    }

    // === Notification settings ===

    pub async fn set_notifications_enabled(&mut self, enabled: bool) -> SaveStatus {
        self.notifications.enabled = enabled;
        self.persist().await
    }

    // === Income ===

    pub async fn add_income(
        &mut self,
        amount: Money,
        source: &str,
        timestamp: Option<DateTime<Utc>>,
    ) -> ZennyResult<IncomeRecord> {
        require_positive(amount, "income amount")?;
        if source.trim().is_empty() {
            return Err(ZennyError::Validation("Income source cannot be empty".into()));
        }

        let record = IncomeRecord::new(amount, source, timestamp.unwrap_or_else(Utc::now));
        self.incomes.push(record.clone());
        self.persist().await;
        Ok(record)
    }

    pub async fn remove_income(&mut self, id: IncomeId) -> Option<IncomeRecord> {
        let index = self.incomes.iter().position(|r| r.id == id)?;
        let removed = self.incomes.remove(index);
        self.persist().await;
        Some(removed)
    }

    pub fn total_income(&self, window: SpendWindow) -> Money {
        self.incomes
            .iter()
            .filter(|r| window.contains(r.timestamp))
            .map(|r| r.amount)
            .sum()
    }

    // === Savings goals ===

    pub async fn add_goal(
        &mut self,
        name: &str,
        target: Money,
        deadline: Option<NaiveDate>,
    ) -> ZennyResult<SavingsGoal> {
        if name.trim().is_empty() {
            return Err(ZennyError::Validation("Goal name cannot be empty".into()));
        }
        require_positive(target, "goal target")?;

        let mut goal = SavingsGoal::new(name, target);
        if let Some(deadline) = deadline {
            goal = goal.with_deadline(deadline);
        }
        self.goals.push(goal.clone());
        self.persist().await;
        Ok(goal)
    }

    pub async fn contribute_to_goal(
        &mut self,
        id: GoalId,
        amount: Money,
    ) -> ZennyResult<SavingsGoal> {
        require_positive(amount, "contribution")?;
        let goal = self
            .goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| ZennyError::goal_not_found(id.to_string()))?;
        goal.contribute(amount);
        let goal = goal.clone();

        self.persist().await;
        Ok(goal)
    }

    pub async fn remove_goal(&mut self, id: GoalId) -> Option<SavingsGoal> {
        let index = self.goals.iter().position(|g| g.id == id)?;
        let removed = self.goals.remove(index);
        self.persist().await;
        Some(removed)
    }

    // === Whole-account operations ===

    /// Wipe receipts, incomes, goals and budgets, restoring default categories
    ///
    /// Notification preferences survive.
    pub async fn clear_all_data(&mut self) -> SaveStatus {
        self.ledger.clear();
        self.incomes.clear();
        self.goals.clear();
        self.budgets.reset();
        self.categories.clear();
        self.categories.seed_defaults();
        self.budgets.ensure_defaults(self.categories.list());
        self.persist().await
    }

    /// Delete the stored document, then reset in-memory state
    pub async fn delete_account_data(&mut self) -> ZennyResult<()> {
        self.bridge.delete().await?;
        self.ledger.clear();
        self.incomes.clear();
        self.goals.clear();
        self.budgets.reset();
        self.categories.clear();
        self.notifications = NotificationSettings::default();
        self.created_at = None;
        self.updated_at = None;
        Ok(())
    }
}

fn require_positive(amount: Money, what: &str) -> ZennyResult<()> {
    if !amount.is_positive() {
        return Err(ZennyError::InvalidAmount(format!(
            "{} must be greater than zero (got {})",
            what, amount
        )));
    }
    if !amount.is_within_limit() {
        return Err(ZennyError::InvalidAmount(format!(
            "{} exceeds the maximum of {} (got {})",
            what,
            Money::MAX,
            amount
        )));
    }
    Ok(())
}

/// Validate a threshold given on its own, before any category lookup
pub fn check_threshold(threshold: f64) -> ZennyResult<f64> {
    validate_threshold(threshold)
        .map(|_| threshold)
        .map_err(|_| ZennyError::InvalidThreshold(threshold))
}
