//! Income CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_income_list;
use crate::error::{ZennyError, ZennyResult};
use crate::models::IncomeId;
use crate::services::BudgetSession;

use super::{parse_amount, parse_id, parse_timestamp, report_save};

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Record income
    Add {
        /// Amount (e.g., "2500")
        amount: String,
        /// Where it came from
        source: String,
        /// Date (YYYY-MM-DD), defaults to now
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete an income record
    #[command(alias = "delete")]
    Remove {
        /// Income ID
        id: String,
    },

    /// List income records
    List,
}

/// Handle an income command
pub async fn handle_income_command(
    session: &mut BudgetSession,
    settings: &Settings,
    cmd: IncomeCommands,
) -> ZennyResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        IncomeCommands::Add {
            amount,
            source,
            date,
        } => {
            let timestamp = date.as_deref().map(parse_timestamp).transpose()?;
            let record = session
                .add_income(parse_amount(&amount)?, &source, timestamp)
                .await?;
            println!(
                "Recorded income {} from {}",
                record.amount.format_with_symbol(symbol),
                record.source
            );
            println!("  ID: {}", record.id);
        }

        IncomeCommands::Remove { id } => {
            let id: IncomeId = parse_id(&id, "income")?;
            session
                .remove_income(id)
                .await
                .ok_or_else(|| ZennyError::NotFound {
                    entity_type: "Income",
                    identifier: id.to_string(),
                })?;
            println!("Deleted income: {}", id);
        }

        IncomeCommands::List => {
            println!("{}", format_income_list(session.incomes(), symbol));
            return Ok(());
        }
    }

    if let Some(status) = session.last_save() {
        report_save(status);
    }
    Ok(())
}
