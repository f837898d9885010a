//! Operator tool for creating accounts and resetting passwords directly
//! against the database.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;

use auth::{
    password::hash_password,
    repositories::UserRepository,
    validation::{validate_password, validate_username},
};
use common::{
    database::{self, DatabaseConfig},
    telemetry,
};

#[derive(Parser)]
#[command(name = "create_user", version, about = "Manage tracker accounts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new account
    Create { username: String, password: String },
    /// Replace the password of an existing account
    ResetPassword { username: String, password: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();
    let cli = Cli::parse();

    let pool = database::init_pool(&DatabaseConfig::from_env()?).await?;
    database::run_migrations(&pool).await?;
    let users = UserRepository::new(pool);

    match cli.command {
        Command::Create { username, password } => {
            validate_username(&username).map_err(anyhow::Error::msg)?;
            validate_password(&password).map_err(anyhow::Error::msg)?;

            if users.find_by_username(&username).await?.is_some() {
                bail!("User {} already exists", username);
            }

            let user = users.create(&username, &hash_password(&password)?).await?;
            info!("Created user {} ({})", user.username, user.id);
            println!("{}", user.id);
        }
        Command::ResetPassword { username, password } => {
            validate_password(&password).map_err(anyhow::Error::msg)?;

            if !users
                .update_password(&username, &hash_password(&password)?)
                .await?
            {
                bail!("No such user: {}", username);
            }
            info!("Password reset for {}", username);
        }
    }

    Ok(())
}
