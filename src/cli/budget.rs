//! Budget CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_budget_list;
use crate::error::ZennyResult;
use crate::services::session::check_threshold;
use crate::services::BudgetSession;

use super::{parse_amount, report_save};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// List budget limits and thresholds
    List,

    /// Set a category's limit; re-arms its alert
    Set {
        /// Category name (case-insensitive)
        category: String,
        /// Limit (e.g., "300" or "300.00"); 0 removes the limit
        amount: String,
        /// Alert threshold percentage, in (0, 100]
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// Remove every budget entry
    Clear,
}

/// Handle a budget command
pub async fn handle_budget_command(
    session: &mut BudgetSession,
    settings: &Settings,
    cmd: BudgetCommands,
) -> ZennyResult<()> {
    match cmd {
        BudgetCommands::List => {
            println!(
                "{}",
                format_budget_list(session.budgets().iter(), &settings.currency_symbol)
            );
        }

        BudgetCommands::Set {
            category,
            amount,
            threshold,
        } => {
            let amount = parse_amount(&amount)?;
            let threshold = threshold.map(check_threshold).transpose()?;
            let entry = session
                .update_category_budget(&category, amount, threshold)
                .await?;
            println!(
                "Budget for {}: {} (alert at {}%)",
                category.trim(),
                entry.amount.format_with_symbol(&settings.currency_symbol),
                entry.threshold
            );
        }

        BudgetCommands::Clear => {
            session.clear_budgets().await;
            println!("Cleared all budgets.");
        }
    }

    if let Some(status) = session.last_save() {
        report_save(status);
    }
    Ok(())
}
