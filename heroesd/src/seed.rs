use std::process::ExitCode;
use superheroes_common::config::Database;
use superheroes_common::db;

/// Fill the database with sample data
#[derive(clap::Args, Debug)]
pub struct Run {
    /// Replace existing heroes and powers with the sample data
    #[arg(long, env = "SEED_FORCE")]
    pub(crate) force: bool,
    #[command(flatten)]
    pub(crate) database: Database,
}

impl Run {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let db =
            db::Database::with_external_config(&self.database, db::CreationMode::Default).await?;

        superheroes_server::sample_data::sample_data(db.clone(), self.force).await?;

        db.close().await?;
        Ok(ExitCode::SUCCESS)
    }
}
