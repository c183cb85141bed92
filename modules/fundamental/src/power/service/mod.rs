use crate::{
    power::model::{NewPower, PowerHead, PowerUpdate},
    validation::validate_description,
    Error,
};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use superheroes_common::db::Database;
use superheroes_entity::{hero_power, power};

pub struct PowerService {
    db: Database,
}

impl PowerService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Fetch all powers, ordered by id
    pub async fn fetch_powers<C: ConnectionTrait>(
        &self,
        connection: &C,
    ) -> Result<Vec<PowerHead>, Error> {
        let powers = power::Entity::find()
            .order_by_asc(power::Column::Id)
            .all(connection)
            .await?;

        Ok(PowerHead::from_entities(&powers))
    }

    pub async fn fetch_power<C: ConnectionTrait>(
        &self,
        id: i32,
        connection: &C,
    ) -> Result<Option<PowerHead>, Error> {
        Ok(power::Entity::find_by_id(id)
            .one(connection)
            .await?
            .as_ref()
            .map(PowerHead::from_entity))
    }

    /// Create a new power, validating its description first
    pub async fn create_power<C: ConnectionTrait>(
        &self,
        new: NewPower,
        connection: &C,
    ) -> Result<PowerHead, Error> {
        let description = validate_description(Some(&new.description))?;

        let power = power::ActiveModel {
            name: Set(new.name),
            description: Set(description),
            ..Default::default()
        }
        .insert(connection)
        .await?;

        log::debug!("Created power: {}", power.id);

        Ok(PowerHead::from_entity(&power))
    }

    /// Update a power
    ///
    /// Only the name and the description are applied. If the update doesn't pass validation,
    /// nothing gets changed. An unknown power is reported as `None`, even if the update is invalid.
    ///
    /// Concurrent updates of the same power don't fail, the last one wins.
    pub async fn update_power(
        &self,
        id: i32,
        update: PowerUpdate,
    ) -> Result<Option<PowerHead>, Error> {
        let description = match validate_description(update.description.as_deref()) {
            Ok(description) => description,
            Err(err) => {
                return match self.fetch_power(id, &self.db).await? {
                    Some(_) => Err(err.into()),
                    None => Ok(None),
                };
            }
        };

        // a single statement, no read lock which would need to be upgraded

        let mut statement = power::Entity::update_many()
            .col_expr(power::Column::Description, Expr::value(description))
            .filter(power::Column::Id.eq(id));
        if let Some(name) = update.name {
            statement = statement.col_expr(power::Column::Name, Expr::value(name));
        }

        if statement.exec(&self.db).await?.rows_affected == 0 {
            return Ok(None);
        }

        log::debug!("Updated power: {id}");

        self.fetch_power(id, &self.db).await
    }

    /// Delete a power, together with its hero powers
    ///
    /// Returns the deleted power, or `None` if it didn't exist.
    ///
    /// The function will handle its own transaction.
    pub async fn delete_power(&self, id: i32) -> Result<Option<PowerHead>, Error> {
        let tx = self.db.begin().await?;

        // start with a write, so that the transaction holds the write lock from the beginning

        let removed = hero_power::Entity::delete_many()
            .filter(hero_power::Column::PowerId.eq(id))
            .exec(&tx)
            .await?;

        let Some(power) = power::Entity::find_by_id(id).one(&tx).await? else {
            return Ok(None);
        };

        power::Entity::delete_by_id(id).exec(&tx).await?;

        tx.commit().await?;

        log::debug!(
            "Deleted power {id}, including {} hero power(s)",
            removed.rows_affected
        );

        Ok(Some(PowerHead::from_entity(&power)))
    }
}
