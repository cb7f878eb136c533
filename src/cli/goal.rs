//! Savings goal CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_goal_list;
use crate::error::{ZennyError, ZennyResult};
use crate::models::GoalId;
use crate::services::BudgetSession;

use super::{parse_amount, parse_date, parse_id, report_save};

/// Savings goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a savings goal
    Add {
        /// Goal name
        name: String,
        /// Target amount
        target: String,
        /// Deadline (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: Option<String>,
    },

    /// Put money toward a goal
    Contribute {
        /// Goal ID
        id: String,
        /// Amount
        amount: String,
    },

    /// Delete a goal
    #[command(alias = "delete")]
    Remove {
        /// Goal ID
        id: String,
    },

    /// List goals and progress
    List,
}

/// Handle a goal command
pub async fn handle_goal_command(
    session: &mut BudgetSession,
    settings: &Settings,
    cmd: GoalCommands,
) -> ZennyResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        GoalCommands::Add {
            name,
            target,
            deadline,
        } => {
            let deadline = deadline.as_deref().map(parse_date).transpose()?;
            let goal = session
                .add_goal(&name, parse_amount(&target)?, deadline)
                .await?;
            println!(
                "Created goal: {} ({})",
                goal.name,
                goal.target.format_with_symbol(symbol)
            );
            println!("  ID: {}", goal.id);
        }

        GoalCommands::Contribute { id, amount } => {
            let id: GoalId = parse_id(&id, "goal")?;
            let goal = session
                .contribute_to_goal(id, parse_amount(&amount)?)
                .await?;
            println!(
                "{}: {} saved, {} to go",
                goal.name,
                goal.saved.format_with_symbol(symbol),
                goal.remaining().format_with_symbol(symbol)
            );
        }

        GoalCommands::Remove { id } => {
            let id: GoalId = parse_id(&id, "goal")?;
            let goal = session
                .remove_goal(id)
                .await
                .ok_or_else(|| ZennyError::goal_not_found(id.to_string()))?;
            println!("Deleted goal: {}", goal.name);
        }

        GoalCommands::List => {
            println!("{}", format_goal_list(session.goals(), symbol));
            return Ok(());
        }
    }

    if let Some(status) = session.last_save() {
        report_save(status);
    }
    Ok(())
}
