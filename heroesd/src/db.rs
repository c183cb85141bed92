use std::process::ExitCode;
use superheroes_common::config::Database;
use superheroes_common::db;

/// Manage the database schema
#[derive(clap::Args, Debug)]
pub struct Run {
    #[command(subcommand)]
    pub(crate) command: Command,
    #[command(flatten)]
    pub(crate) database: Database,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Apply pending migrations
    Migrate,
    /// Drop all tables and apply all migrations again
    Refresh,
}

impl Run {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        use Command::*;
        match self.command {
            Migrate => self.config(db::CreationMode::Default).await,
            Refresh => self.config(db::CreationMode::RefreshSchema).await,
        }
    }

    async fn config(self, mode: db::CreationMode) -> anyhow::Result<ExitCode> {
        let db = db::Database::with_external_config(&self.database, mode).await?;
        db.close().await?;
        Ok(ExitCode::SUCCESS)
    }
}
