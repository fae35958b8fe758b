use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Films::Table)
                    .if_not_exists()
                    .col(string(Films::Id).primary_key())
                    .col(string(Films::Title))
                    .col(string_null(Films::ReleaseDate))
                    .col(double_null(Films::Rate))
                    .col(text_null(Films::Casts))
                    .col(string_null(Films::Genre))
                    .col(integer_null(Films::Duration))
                    .col(string_null(Films::Poster))
                    .col(text_null(Films::Description))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Films::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Films {
    Table,
    Id,
    Title,
    ReleaseDate,
    Rate,
    Casts,
    Genre,
    Duration,
    Poster,
    Description,
}
