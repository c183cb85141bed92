use crate::hero_power::model::HeroPowerWithPower;
use serde::{Deserialize, Serialize};
use superheroes_entity::hero;
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, PartialEq, Eq)]
pub struct HeroHead {
    pub id: i32,
    /// The civil name of the hero
    pub name: String,
    pub super_name: String,
}

impl HeroHead {
    pub fn from_entity(hero: &hero::Model) -> Self {
        Self {
            id: hero.id,
            name: hero.name.clone(),
            super_name: hero.super_name.clone(),
        }
    }

    pub fn from_entities(heroes: &[hero::Model]) -> Vec<Self> {
        heroes.iter().map(Self::from_entity).collect()
    }
}

/// A hero, including its powers.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, PartialEq, Eq)]
pub struct HeroDetails {
    #[serde(flatten)]
    pub head: HeroHead,
    pub hero_powers: Vec<HeroPowerWithPower>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, PartialEq, Eq)]
pub struct NewHero {
    pub name: String,
    pub super_name: String,
}
