use sea_orm_migration::prelude::*;
use superheroes_entity::power::MIN_DESCRIPTION_LENGTH;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Powers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Powers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Powers::Name).string().not_null())
                    .col(
                        ColumnDef::new(Powers::Description)
                            .string()
                            .not_null()
                            .check(
                                // `length` counts characters, on PostgreSQL and SQLite
                                Expr::expr(
                                    Func::cust(Alias::new("length"))
                                        .arg(Expr::col(Powers::Description)),
                                )
                                .gte(MIN_DESCRIPTION_LENGTH as i32),
                            ),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Powers::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Powers {
    Table,
    Id,
    Name,
    Description,
}
