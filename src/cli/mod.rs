pub mod commands;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "schedule-api")]
#[command(about = "Schedule API - personal schedules behind email/password accounts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default when no command is given)")]
    Serve(commands::serve::ServeArgs),

    #[command(about = "Create the database schema if it does not exist")]
    Migrate,

    #[command(about = "Delete an account and every schedule item it owns")]
    DeleteUser {
        #[arg(help = "Email of the account to delete")]
        email: String,
    },
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    match cli.command {
        None => commands::serve::handle(commands::serve::ServeArgs::default(), config).await,
        Some(Commands::Serve(args)) => commands::serve::handle(args, config).await,
        Some(Commands::Migrate) => commands::migrate::handle(config).await,
        Some(Commands::DeleteUser { email }) => commands::user::delete(&email, config).await,
    }
}
