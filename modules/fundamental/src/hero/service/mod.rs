use crate::{
    hero::model::{HeroDetails, HeroHead, NewHero},
    hero_power::service::HeroPowerService,
    Error,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use superheroes_common::db::Database;
use superheroes_entity::{hero, hero_power};

pub struct HeroService {
    db: Database,
}

impl HeroService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Fetch all heroes, ordered by id
    pub async fn fetch_heroes<C: ConnectionTrait>(
        &self,
        connection: &C,
    ) -> Result<Vec<HeroHead>, Error> {
        let heroes = hero::Entity::find()
            .order_by_asc(hero::Column::Id)
            .all(connection)
            .await?;

        Ok(HeroHead::from_entities(&heroes))
    }

    /// Fetch a hero, including its powers
    pub async fn fetch_hero<C: ConnectionTrait>(
        &self,
        id: i32,
        connection: &C,
    ) -> Result<Option<HeroDetails>, Error> {
        let Some(hero) = hero::Entity::find_by_id(id).one(connection).await? else {
            return Ok(None);
        };

        let hero_powers = HeroPowerService::new()
            .for_hero(hero.id, connection)
            .await?;

        Ok(Some(HeroDetails {
            head: HeroHead::from_entity(&hero),
            hero_powers,
        }))
    }

    /// Create a new hero
    pub async fn create_hero<C: ConnectionTrait>(
        &self,
        new: NewHero,
        connection: &C,
    ) -> Result<HeroHead, Error> {
        let hero = hero::ActiveModel {
            name: Set(new.name),
            super_name: Set(new.super_name),
            ..Default::default()
        }
        .insert(connection)
        .await?;

        log::debug!("Created hero: {}", hero.id);

        Ok(HeroHead::from_entity(&hero))
    }

    /// Delete a hero, together with its hero powers
    ///
    /// Returns the deleted hero, or `None` if it didn't exist.
    ///
    /// The function will handle its own transaction.
    pub async fn delete_hero(&self, id: i32) -> Result<Option<HeroHead>, Error> {
        let tx = self.db.begin().await?;

        // start with a write, so that the transaction holds the write lock from the beginning

        let removed = hero_power::Entity::delete_many()
            .filter(hero_power::Column::HeroId.eq(id))
            .exec(&tx)
            .await?;

        let Some(hero) = hero::Entity::find_by_id(id).one(&tx).await? else {
            return Ok(None);
        };

        hero::Entity::delete_by_id(id).exec(&tx).await?;

        tx.commit().await?;

        log::debug!(
            "Deleted hero {id}, including {} hero power(s)",
            removed.rows_affected
        );

        Ok(Some(HeroHead::from_entity(&hero)))
    }
}
