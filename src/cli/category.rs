//! Category CLI commands

use clap::Subcommand;

use crate::display::format_category_list;
use crate::error::ZennyResult;
use crate::services::BudgetSession;

use super::report_save;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// Add a new category
    Add {
        /// Category name
        name: String,
    },

    /// Remove a category that no expense uses
    #[command(alias = "delete")]
    Remove {
        /// Category name (case-insensitive)
        name: String,
    },
}

/// Handle a category command
pub async fn handle_category_command(
    session: &mut BudgetSession,
    cmd: CategoryCommands,
) -> ZennyResult<()> {
    match cmd {
        CategoryCommands::List => {
            println!("{}", format_category_list(session.categories().list()));
        }

        CategoryCommands::Add { name } => {
            let category = session.add_category(&name).await?;
            println!("Added category: {}", category);
        }

        CategoryCommands::Remove { name } => {
            let removed = session.remove_category(&name).await?;
            println!("Removed category: {}", removed);
        }
    }

    if let Some(status) = session.last_save() {
        report_save(status);
    }
    Ok(())
}
