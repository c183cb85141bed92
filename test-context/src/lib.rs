#![allow(clippy::expect_used)]

pub mod call;

use sea_orm::{ActiveModelTrait, Set};
use std::env;
use superheroes_common::{config, db::Database};
use superheroes_entity::{hero, hero_power, power, strength::Strength};
use tempfile::TempDir;
use test_context::AsyncTestContext;
use tracing::instrument;

pub const SUPER_STRENGTH: &str = "gives the wielder super-human strengths";
pub const FLIGHT: &str = "gives the wielder the ability to fly through the skies at supersonic speed";

/// A freshly migrated database, for a single test.
#[allow(dead_code)]
pub struct SuperheroesContext {
    pub db: Database,
    tempdir: Option<TempDir>,
}

impl SuperheroesContext {
    async fn new(db: Database, tempdir: impl Into<Option<TempDir>>) -> Self {
        Self {
            db,
            tempdir: tempdir.into(),
        }
    }

    /// Insert a hero, bypassing any validation
    pub async fn hero(&self, name: &str, super_name: &str) -> Result<hero::Model, anyhow::Error> {
        Ok(hero::ActiveModel {
            name: Set(name.to_string()),
            super_name: Set(super_name.to_string()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?)
    }

    /// Insert a power, bypassing any validation
    pub async fn power(&self, name: &str, description: &str) -> Result<power::Model, anyhow::Error> {
        Ok(power::ActiveModel {
            name: Set(name.to_string()),
            description: Set(description.to_string()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?)
    }

    /// Link a hero to a power, bypassing any validation
    pub async fn hero_power(
        &self,
        hero: &hero::Model,
        power: &power::Model,
        strength: Strength,
    ) -> Result<hero_power::Model, anyhow::Error> {
        Ok(hero_power::ActiveModel {
            strength: Set(strength),
            hero_id: Set(hero.id),
            power_id: Set(power.id),
            ..Default::default()
        }
        .insert(&self.db)
        .await?)
    }

    /// Two heroes and two powers. The first hero has both powers, the second one none.
    pub async fn fixtures(&self) -> Result<Fixtures, anyhow::Error> {
        let heroes = vec![
            self.hero("Kamala Khan", "Ms. Marvel").await?,
            self.hero("Doreen Green", "Squirrel Girl").await?,
        ];
        let powers = vec![
            self.power("super strength", SUPER_STRENGTH).await?,
            self.power("flight", FLIGHT).await?,
        ];
        let hero_powers = vec![
            self.hero_power(&heroes[0], &powers[0], Strength::Strong).await?,
            self.hero_power(&heroes[0], &powers[1], Strength::Average).await?,
        ];

        Ok(Fixtures {
            heroes,
            powers,
            hero_powers,
        })
    }
}

/// Records created by [`SuperheroesContext::fixtures`].
#[derive(Clone, Debug)]
pub struct Fixtures {
    pub heroes: Vec<hero::Model>,
    pub powers: Vec<power::Model>,
    pub hero_powers: Vec<hero_power::Model>,
}

impl AsyncTestContext for SuperheroesContext {
    #[instrument]
    #[allow(clippy::expect_used)]
    async fn setup() -> SuperheroesContext {
        if env::var("EXTERNAL_TEST_DB").is_ok() {
            log::warn!("Using external database from 'DB_*' env vars");
            let config = config::Database::from_env().expect("DB config from env");

            let db = Database::new(&config)
                .await
                .expect("Configuring the database");
            db.refresh().await.expect("Resetting the schema");

            return SuperheroesContext::new(db, None).await;
        }

        let tempdir = tempfile::tempdir().expect("Create a temporary directory");
        let url = format!(
            "sqlite://{}?mode=rwc",
            tempdir.path().join("superheroes.db").display()
        );

        let db = Database::new(&config::Database::from_url(url))
            .await
            .expect("Create a temporary database");
        db.migrate().await.expect("Migrate the database");

        SuperheroesContext::new(db, tempdir).await
    }

    async fn teardown(self) {
        if let Err(err) = self.db.close().await {
            log::warn!("Failed to close database: {err}");
        }
    }
}
