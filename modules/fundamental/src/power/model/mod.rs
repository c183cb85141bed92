use serde::{Deserialize, Serialize};
use superheroes_entity::power;
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, PartialEq, Eq)]
pub struct PowerHead {
    pub id: i32,
    pub name: String,
    /// What the power does, at least 20 characters long
    pub description: String,
}

impl PowerHead {
    pub fn from_entity(power: &power::Model) -> Self {
        Self {
            id: power.id,
            name: power.name.clone(),
            description: power.description.clone(),
        }
    }

    pub fn from_entities(powers: &[power::Model]) -> Vec<Self> {
        powers.iter().map(Self::from_entity).collect()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, PartialEq, Eq)]
pub struct NewPower {
    pub name: String,
    pub description: String,
}

/// Changes to a power.
///
/// Other fields of a submitted body, including `id`, are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema, PartialEq, Eq)]
pub struct PowerUpdate {
    pub name: Option<String>,
    /// The new description, required
    #[schema(required)]
    pub description: Option<String>,
}
