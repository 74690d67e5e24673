//! Back-office account management.
//!
//! ```text
//! accounts-admin create-admin --email ops@example.com --password 'Secret12345x'
//! ```

use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sea_orm::Database;

use roster_accounts::error::AccountsServiceError;
use roster_accounts::infra::db::DbAdminRepository;
use roster_accounts::infra::password::Argon2PasswordHasher;
use roster_accounts::usecase::admin::{CreateAdminInput, CreateAdminUseCase};
use roster_core::tracing::init_tracing;
use roster_domain::messages::{Locale, MessageCatalog};

#[derive(Parser)]
#[command(name = "accounts-admin", about = "Manage Roster back-office accounts")]
struct Cli {
    /// PostgreSQL connection URL.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
    /// Language of validation messages.
    #[arg(long, env = "ACCOUNTS_LOCALE", default_value = "ja")]
    locale: Locale,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an admin account.
    CreateAdmin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing("warn");
    let cli = Cli::parse();

    let db = Database::connect(&cli.database_url)
        .await
        .context("connect to database")?;

    match cli.command {
        Command::CreateAdmin { email, password } => {
            let usecase = CreateAdminUseCase {
                admins: DbAdminRepository { db },
                hasher: Argon2PasswordHasher,
            };
            let input = CreateAdminInput {
                email,
                password,
                password_confirmation: None,
            };
            match usecase.execute(input).await {
                Ok(admin) => {
                    println!("created admin {} <{}>", admin.id, admin.email);
                    Ok(ExitCode::SUCCESS)
                }
                Err(AccountsServiceError::Validation(violations)) => {
                    let catalog = MessageCatalog::new(cli.locale);
                    for (_, messages) in violations.render(&catalog) {
                        for message in messages {
                            eprintln!("{message}");
                        }
                    }
                    Ok(ExitCode::FAILURE)
                }
                Err(e) => Err(e.into()),
            }
        }
    }
}
