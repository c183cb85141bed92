use crate::{
    hero::model::HeroHead,
    hero_power::model::{HeroPowerDetails, HeroPowerHead, HeroPowerWithPower, NewHeroPower},
    power::model::PowerHead,
    validation::{validate_reference, validate_strength, ValidationError},
    Error,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use superheroes_entity::{hero, hero_power, power};

#[derive(Clone, Copy, Debug, Default)]
pub struct HeroPowerService;

impl HeroPowerService {
    pub fn new() -> Self {
        Self
    }

    /// Fetch a hero power, including its hero and power
    pub async fn fetch_hero_power<C: ConnectionTrait>(
        &self,
        id: i32,
        connection: &C,
    ) -> Result<Option<HeroPowerDetails>, Error> {
        let Some(hero_power) = hero_power::Entity::find_by_id(id).one(connection).await? else {
            return Ok(None);
        };

        let hero = hero::Entity::find_by_id(hero_power.hero_id)
            .one(connection)
            .await?
            .ok_or_else(|| Error::Internal(format!("hero power {id} without hero")))?;
        let power = power::Entity::find_by_id(hero_power.power_id)
            .one(connection)
            .await?
            .ok_or_else(|| Error::Internal(format!("hero power {id} without power")))?;

        Ok(Some(HeroPowerDetails {
            head: HeroPowerHead::from_entity(&hero_power),
            hero: HeroHead::from_entity(&hero),
            power: PowerHead::from_entity(&power),
        }))
    }

    /// The hero powers of a hero, each with its power
    pub async fn for_hero<C: ConnectionTrait>(
        &self,
        hero_id: i32,
        connection: &C,
    ) -> Result<Vec<HeroPowerWithPower>, Error> {
        let hero_powers = hero_power::Entity::find()
            .filter(hero_power::Column::HeroId.eq(hero_id))
            .order_by_asc(hero_power::Column::Id)
            .find_also_related(power::Entity)
            .all(connection)
            .await?;

        hero_powers
            .into_iter()
            .map(|(hero_power, power)| match power {
                Some(power) => Ok(HeroPowerWithPower {
                    head: HeroPowerHead::from_entity(&hero_power),
                    power: PowerHead::from_entity(&power),
                }),
                None => Err(Error::Internal(format!(
                    "hero power {} without power",
                    hero_power.id
                ))),
            })
            .collect()
    }

    /// The hero powers referencing a power
    pub async fn for_power<C: ConnectionTrait>(
        &self,
        power_id: i32,
        connection: &C,
    ) -> Result<Vec<HeroPowerHead>, Error> {
        let hero_powers = hero_power::Entity::find()
            .filter(hero_power::Column::PowerId.eq(power_id))
            .order_by_asc(hero_power::Column::Id)
            .all(connection)
            .await?;

        Ok(hero_powers.iter().map(HeroPowerHead::from_entity).collect())
    }

    /// Link a hero to a power
    ///
    /// The strength gets validated, and both the hero and the power must exist. A hero or power
    /// removed between the check and the insert is still reported as a validation error, through
    /// the foreign key violation.
    pub async fn create_hero_power<C: ConnectionTrait>(
        &self,
        new: NewHeroPower,
        connection: &C,
    ) -> Result<HeroPowerDetails, Error> {
        let strength = validate_strength(new.strength.as_deref())?;
        let hero_id = validate_reference("hero_id", new.hero_id)?;
        let power_id = validate_reference("power_id", new.power_id)?;

        let Some(hero) = hero::Entity::find_by_id(hero_id).one(connection).await? else {
            return Err(ValidationError::UnknownReference("hero", hero_id).into());
        };
        let Some(power) = power::Entity::find_by_id(power_id).one(connection).await? else {
            return Err(ValidationError::UnknownReference("power", power_id).into());
        };

        let hero_power = hero_power::ActiveModel {
            strength: Set(strength),
            hero_id: Set(hero_id),
            power_id: Set(power_id),
            ..Default::default()
        }
        .insert(connection)
        .await?;

        log::debug!(
            "Linked hero {hero_id} to power {power_id} ({strength}): {}",
            hero_power.id
        );

        Ok(HeroPowerDetails {
            head: HeroPowerHead::from_entity(&hero_power),
            hero: HeroHead::from_entity(&hero),
            power: PowerHead::from_entity(&power),
        })
    }
}

#[cfg(test)]
mod test;
