//! Expense CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_expense_list;
use crate::error::{ZennyError, ZennyResult};
use crate::models::{ExpenseDraft, ExpenseId};
use crate::services::BudgetSession;

use super::{parse_amount, parse_id, parse_timestamp, report_save};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// Amount (e.g., "12.50")
        amount: String,
        /// Category name; created if it does not exist
        category: String,
        /// Date (YYYY-MM-DD), defaults to now
        #[arg(short, long)]
        date: Option<String>,
        /// Free-form tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Delete an expense
    #[command(alias = "delete")]
    Remove {
        /// Expense ID
        id: String,
    },

    /// List expenses
    List {
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
    },
}

/// Handle an expense command
pub async fn handle_expense_command(
    session: &mut BudgetSession,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ZennyResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            date,
            tag,
        } => {
            let mut draft = ExpenseDraft::new(parse_amount(&amount)?, category);
            if let Some(date) = date {
                draft = draft.at(parse_timestamp(&date)?);
            }
            if let Some(tag) = tag {
                draft = draft.with_tag(tag);
            }

            let outcome = session.add_expense(draft).await?;
            println!(
                "Recorded {} in {}",
                outcome.record.amount.format_with_symbol(symbol),
                outcome.record.category
            );
            println!("  ID: {}", outcome.record.id);
            if outcome.evaluation.limit.is_positive() {
                println!(
                    "  {:.1}% of {} budget used",
                    outcome.evaluation.percent_spent,
                    outcome.evaluation.limit.format_with_symbol(symbol)
                );
            }
            report_save(&outcome.save);
        }

        ExpenseCommands::Remove { id } => {
            let id: ExpenseId = parse_id(&id, "expense")?;
            let removed = session
                .remove_expense(id)
                .await
                .ok_or_else(|| ZennyError::expense_not_found(id.to_string()))?;
            println!("Deleted expense: {}", removed);
            if let Some(status) = session.last_save() {
                report_save(status);
            }
        }

        ExpenseCommands::List { category } => {
            let records: Vec<_> = session
                .ledger()
                .records()
                .iter()
                .filter(|r| category.as_deref().map_or(true, |c| r.category.matches(c)))
                .cloned()
                .collect();
            println!("{}", format_expense_list(&records, symbol));
        }
    }

    Ok(())
}
