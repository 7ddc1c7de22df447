//! Pizzeria CLI - database migrations, staff and menu management.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! pizzeria migrate
//!
//! # Create staff accounts
//! pizzeria staff create -r manager -u maria -p 'long-password' -n "Maria Rossi"
//! pizzeria staff create -r employee -u luigi -p 'long-password' -n "Luigi" --phone "555 0100"
//! pizzeria staff list
//!
//! # Manage the menu
//! pizzeria menu add -n Margherita -p 9.50 -d "Tomato, mozzarella, basil"
//! pizzeria menu list
//! pizzeria menu remove -n Margherita
//! pizzeria menu seed
//! ```
//!
//! Every command reads `PIZZERIA_DATABASE_URL` (or `DATABASE_URL`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

mod commands;

use commands::staff::StaffRole;

#[derive(Parser)]
#[command(name = "pizzeria")]
#[command(author, version, about = "Pizzeria CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage employee and manager accounts
    Staff {
        #[command(subcommand)]
        action: StaffAction,
    },
    /// Manage the menu
    Menu {
        #[command(subcommand)]
        action: MenuAction,
    },
}

#[derive(Subcommand)]
enum StaffAction {
    /// Create an employee or manager account
    Create {
        /// Staff role
        #[arg(short, long, value_enum)]
        role: StaffRole,

        /// Login username
        #[arg(short, long)]
        username: String,

        /// Login password (at least 8 characters)
        #[arg(short, long)]
        password: String,

        /// Display name; managers assign shifts by this name
        #[arg(short, long)]
        name: String,

        /// Phone number (required for employees)
        #[arg(long)]
        phone: Option<String>,
    },
    /// List employees and managers
    List,
}

#[derive(Subcommand)]
enum MenuAction {
    /// Add a pizza
    Add {
        /// Pizza name (unique)
        #[arg(short, long)]
        name: String,

        /// Price in dollars, e.g. 9.50
        #[arg(short, long)]
        price: Decimal,

        /// Short description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List the menu
    List,
    /// Remove a pizza by name
    Remove {
        /// Pizza name
        #[arg(short, long)]
        name: String,
    },
    /// Insert the default menu, skipping pizzas that already exist
    Seed,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pizzeria_cli=info,pizzeria_web=info".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Staff { action } => match action {
            StaffAction::Create {
                role,
                username,
                password,
                name,
                phone,
            } => {
                commands::staff::create(role, &username, &password, &name, phone.as_deref())
                    .await?;
            }
            StaffAction::List => commands::staff::list().await?,
        },
        Commands::Menu { action } => match action {
            MenuAction::Add {
                name,
                price,
                description,
            } => commands::menu::add(&name, price, description.as_deref()).await?,
            MenuAction::List => commands::menu::list().await?,
            MenuAction::Remove { name } => commands::menu::remove(&name).await?,
            MenuAction::Seed => commands::menu::seed().await?,
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_staff_create() {
        let cli = Cli::try_parse_from([
            "pizzeria", "staff", "create", "-r", "employee", "-u", "luigi", "-p", "password1",
            "-n", "Luigi", "--phone", "555 0100",
        ]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Staff {
                action: StaffAction::Create {
                    role: StaffRole::Employee,
                    ..
                }
            })
        ));
    }

    #[test]
    fn test_rejects_customer_role() {
        let cli = Cli::try_parse_from([
            "pizzeria", "staff", "create", "-r", "customer", "-u", "x", "-p", "password1", "-n",
            "X",
        ]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_parses_menu_price() {
        let cli = Cli::try_parse_from(["pizzeria", "menu", "add", "-n", "Diavola", "-p", "11.25"]);
        match cli.map(|c| c.command) {
            Ok(Commands::Menu {
                action: MenuAction::Add { price, .. },
            }) => assert_eq!(price, Decimal::new(1125, 2)),
            _ => panic!("expected menu add"),
        }
    }
}
