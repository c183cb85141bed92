use crate::foreign_key_name;
use crate::m0000010_create_heroes::Heroes;
use crate::m0000020_create_powers::Powers;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HeroPowers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HeroPowers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(HeroPowers::Strength)
                            .string()
                            .not_null()
                            // keep in sync with `superheroes_entity::strength::Strength`
                            .check(
                                Expr::col(HeroPowers::Strength)
                                    .is_in(["Strong", "Weak", "Average"]),
                            ),
                    )
                    .col(ColumnDef::new(HeroPowers::HeroId).integer().not_null())
                    .col(ColumnDef::new(HeroPowers::PowerId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name(foreign_key_name(
                                HeroPowers::Table,
                                HeroPowers::HeroId,
                                Heroes::Table,
                            ))
                            .from(HeroPowers::Table, HeroPowers::HeroId)
                            .to(Heroes::Table, Heroes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(foreign_key_name(
                                HeroPowers::Table,
                                HeroPowers::PowerId,
                                Powers::Table,
                            ))
                            .from(HeroPowers::Table, HeroPowers::PowerId)
                            .to(Powers::Table, Powers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(HeroPowers::Table)
                    .name("idx_hero_powers_hero_id")
                    .col(HeroPowers::HeroId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(HeroPowers::Table)
                    .name("idx_hero_powers_power_id")
                    .col(HeroPowers::PowerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HeroPowers::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum HeroPowers {
    Table,
    Id,
    Strength,
    HeroId,
    PowerId,
}
