use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use zenny::cli::{
    handle_budget_command, handle_category_command, handle_expense_command, handle_goal_command,
    handle_income_command,
};
use zenny::config::{paths::ZennyPaths, settings::Settings};
use zenny::display::format_status_table;
use zenny::models::UserId;
use zenny::notify::ConsoleNotifier;
use zenny::services::{BudgetSession, PersistenceBridge};
use zenny::storage::JsonFileStore;

#[derive(Parser)]
#[command(
    name = "zenny",
    version,
    about = "Budget tracking with one-shot threshold alerts",
    long_about = "Zenny tracks spending per category against the limits you set \
                  and alerts you once when a category crosses its threshold."
)]
struct Cli {
    /// User whose data to work with
    #[arg(long, global = true, env = "ZENNY_USER", default_value = "local")]
    user: String,

    /// Override the data directory
    #[arg(long, global = true, env = "ZENNY_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Category management commands
    #[command(subcommand)]
    Category(zenny::cli::CategoryCommands),

    /// Budget limits and thresholds
    #[command(subcommand)]
    Budget(zenny::cli::BudgetCommands),

    /// Expense (receipt) commands
    #[command(subcommand)]
    Expense(zenny::cli::ExpenseCommands),

    /// Income commands
    #[command(subcommand)]
    Income(zenny::cli::IncomeCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(zenny::cli::GoalCommands),

    /// Turn budget alerts on or off
    #[command(subcommand)]
    Notifications(NotificationCommands),

    /// Show spending against every budget
    Status,

    /// Clear all data for the user
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
        /// Delete the stored document entirely
        #[arg(long)]
        account: bool,
    },

    /// Show current configuration and paths
    Config,
}

#[derive(Subcommand)]
enum NotificationCommands {
    /// Enable budget alerts
    On,
    /// Disable budget alerts
    Off,
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => ZennyPaths::with_base_dir(dir),
        None => ZennyPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_filter);

    if let Commands::Config = cli.command {
        println!("Zenny Configuration");
        println!("===================");
        println!("Base directory:  {}", paths.base_dir().display());
        println!("Settings file:   {}", paths.settings_file().display());
        println!("Data directory:  {}", paths.data_dir().display());
        println!();
        println!("User:            {}", cli.user);
        println!("Spend window:    {:?}", settings.spend_window);
        println!("Default alert:   {}%", settings.default_threshold);
        println!("Store timeout:   {}s", settings.store_timeout().as_secs());
        println!("Currency:        {}", settings.currency_symbol);
        return Ok(());
    }

    paths.ensure_directories()?;
    let store = Arc::new(JsonFileStore::new(paths.data_dir()));
    let bridge = PersistenceBridge::new(store, UserId::new(cli.user), settings.store_timeout());
    let mut session = BudgetSession::open(bridge, Arc::new(ConsoleNotifier), &settings).await?;

    match cli.command {
        Commands::Category(cmd) => {
            handle_category_command(&mut session, cmd).await?;
        }
        Commands::Budget(cmd) => {
            handle_budget_command(&mut session, &settings, cmd).await?;
        }
        Commands::Expense(cmd) => {
            handle_expense_command(&mut session, &settings, cmd).await?;
        }
        Commands::Income(cmd) => {
            handle_income_command(&mut session, &settings, cmd).await?;
        }
        Commands::Goal(cmd) => {
            handle_goal_command(&mut session, &settings, cmd).await?;
        }
        Commands::Notifications(cmd) => {
            let enabled = matches!(cmd, NotificationCommands::On);
            session.set_notifications_enabled(enabled).await;
            println!(
                "Budget alerts {}.",
                if enabled { "enabled" } else { "disabled" }
            );
        }
        Commands::Status => {
            let symbol = settings.currency_symbol.as_str();
            print!("{}", format_status_table(&session.budget_status(), symbol));
            println!();
            println!(
                "Income: {}",
                session
                    .total_income(settings.spend_window.window(chrono::Utc::now()))
                    .format_with_symbol(symbol)
            );
            println!(
                "Alerts: {}",
                if session.notifications_enabled() {
                    "on"
                } else {
                    "off"
                }
            );
        }
        Commands::Reset { yes, account } => {
            if !yes {
                bail!("Refusing to reset without --yes");
            }
            if account {
                session.delete_account_data().await?;
                println!("Deleted all stored data.");
            } else {
                session.clear_all_data().await;
                println!("Cleared all expenses, income, goals and budgets.");
            }
        }
        // printed before the session is opened
        Commands::Config => {}
    }

    Ok(())
}
