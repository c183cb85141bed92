use sea_orm::entity::prelude::*;

/// Lower bound for the length of a power's description, in characters.
pub const MIN_DESCRIPTION_LENGTH: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "powers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// At least [`MIN_DESCRIPTION_LENGTH`] characters, enforced on write and by the schema
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::hero_power::Entity")]
    HeroPower,
}

impl Related<super::hero_power::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HeroPower.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
