use crate::{hero::model::HeroHead, power::model::PowerHead};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use superheroes_entity::{hero_power, strength::Strength};
use utoipa::ToSchema;

/// The link between a hero and one of its powers.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, PartialEq, Eq)]
pub struct HeroPowerHead {
    pub id: i32,
    /// How strong the hero is at this power
    pub strength: Strength,
    pub hero_id: i32,
    pub power_id: i32,
}

impl HeroPowerHead {
    pub fn from_entity(hero_power: &hero_power::Model) -> Self {
        Self {
            id: hero_power.id,
            strength: hero_power.strength,
            hero_id: hero_power.hero_id,
            power_id: hero_power.power_id,
        }
    }
}

/// A hero power as seen from its hero, carrying the power but not the hero again.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, PartialEq, Eq)]
pub struct HeroPowerWithPower {
    #[serde(flatten)]
    pub head: HeroPowerHead,
    pub power: PowerHead,
}

/// A hero power with both ends of the link.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, PartialEq, Eq)]
pub struct HeroPowerDetails {
    #[serde(flatten)]
    pub head: HeroPowerHead,
    pub hero: HeroHead,
    pub power: PowerHead,
}

/// The request for linking a hero to a power.
///
/// All fields are optional for decoding, they get checked during validation. Ids may be provided
/// as numbers or strings.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema, PartialEq, Eq)]
pub struct NewHeroPower {
    /// One of `Strong`, `Weak`, or `Average`
    #[schema(required)]
    pub strength: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(required, value_type = i32)]
    pub hero_id: Option<i32>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(required, value_type = i32)]
    pub power_id: Option<i32>,
}
