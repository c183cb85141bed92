use clap::Parser;
use std::process::{ExitCode, Termination};
use superheroes_infrastructure::tracing::init_tracing;

mod db;
mod seed;

#[allow(clippy::large_enum_variant)]
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Run the API server
    Api(superheroes_server::Run),
    /// Manage the database
    Db(db::Run),
    /// Fill the database with sample data
    Seed(seed::Run),
}

#[derive(clap::Parser, Debug)]
#[command(
    author,
    version = env!("CARGO_PKG_VERSION"),
    about = "heroesd",
    long_about = None
)]
pub struct Heroesd {
    #[command(subcommand)]
    pub(crate) command: Command,
}

impl Heroesd {
    async fn run(self) -> ExitCode {
        match self.run_command().await {
            Ok(code) => code,
            Err(err) => {
                log::error!("Error: {err}");
                for (n, err) in err.chain().skip(1).enumerate() {
                    if n == 0 {
                        log::error!("Caused by:");
                    }
                    log::error!("\t{err}");
                }

                ExitCode::FAILURE
            }
        }
    }

    async fn run_command(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Api(run) => run.run().await,
            Command::Db(run) => run.run().await,
            Command::Seed(run) => run.run().await,
        }
    }
}

#[actix_web::main]
async fn main() -> impl Termination {
    init_tracing();
    Heroesd::parse().run().await
}
