use clap::Parser;

const DEFAULT_URL: &str = "sqlite://superheroes.db?mode=rwc";

#[derive(clap::Args, Debug, Clone)]
#[command(next_help_heading = "Database")]
#[group(id = "database")]
pub struct Database {
    /// The database connection URL, either `sqlite://` or `postgres://`
    #[arg(id = "db-url", long, env = "DB_URI", default_value = DEFAULT_URL)]
    pub url: String,
    #[arg(id = "db-max-conn", long, env = "DB_MAX_CONN", default_value_t = 75)]
    pub max_conn: u32,
    #[arg(id = "db-min-conn", long, env = "DB_MIN_CONN", default_value_t = 1)]
    pub min_conn: u32,
    /// Timeout in seconds for establishing a connection
    #[arg(
        id = "db-connect-timeout",
        long,
        env = "DB_CONNECT_TIMEOUT",
        default_value_t = 8
    )]
    pub connect_timeout: u64,
    /// Timeout in seconds for acquiring a connection from the pool
    #[arg(
        id = "db-acquire-timeout",
        long,
        env = "DB_ACQUIRE_TIMEOUT",
        default_value_t = 30
    )]
    pub acquire_timeout: u64,
    #[arg(
        id = "db-max-lifetime",
        long,
        env = "DB_MAX_LIFETIME",
        default_value_t = 3600
    )]
    pub max_lifetime: u64,
    #[arg(
        id = "db-idle-timeout",
        long,
        env = "DB_IDLE_TIMEOUT",
        default_value_t = 600
    )]
    pub idle_timeout: u64,
}

impl Default for Database {
    fn default() -> Self {
        Self::from_url(DEFAULT_URL)
    }
}

impl Database {
    /// Create a configuration for the provided URL, using defaults for all other settings.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_conn: 75,
            min_conn: 1,
            connect_timeout: 8,
            acquire_timeout: 30,
            max_lifetime: 3600,
            idle_timeout: 600,
        }
    }

    /// Collect the configuration from the `DB_*` environment variables only.
    pub fn from_env() -> Result<Database, clap::Error> {
        #[derive(clap::Parser)]
        struct Cli {
            #[command(flatten)]
            database: Database,
        }

        Ok(Cli::try_parse_from(Vec::<String>::new())?.database)
    }
}
