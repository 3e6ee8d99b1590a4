use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_categories_table::Migration),
            Box::new(m20240301_000002_create_items_table::Migration),
        ]
    }
}

mod m20240301_000001_create_categories_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000001_create_categories_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Categories::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Categories::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Categories::Name).string().not_null())
                        .col(ColumnDef::new(Categories::NameKey).string().not_null())
                        .col(ColumnDef::new(Categories::Description).string().not_null())
                        .col(
                            ColumnDef::new(Categories::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Categories::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_categories_name")
                        .table(Categories::Table)
                        .col(Categories::Name)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_categories_name_key")
                        .table(Categories::Table)
                        .col(Categories::NameKey)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Categories::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum Categories {
        Table,
        Id,
        Name,
        NameKey,
        Description,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240301_000002_create_items_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000002_create_items_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // No foreign key on category_id: deleting a category must leave
            // its items in place.
            manager
                .create_table(
                    Table::create()
                        .table(Items::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Items::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Items::Name).string().not_null())
                        .col(ColumnDef::new(Items::NameKey).string().not_null())
                        .col(ColumnDef::new(Items::Description).string().not_null())
                        .col(ColumnDef::new(Items::Price).decimal_len(16, 2).not_null())
                        .col(
                            ColumnDef::new(Items::Stock)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Items::CategoryId).uuid().not_null())
                        .col(
                            ColumnDef::new(Items::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Items::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_items_category_id")
                        .table(Items::Table)
                        .col(Items::CategoryId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_items_name")
                        .table(Items::Table)
                        .col(Items::Name)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_items_name_key")
                        .table(Items::Table)
                        .col(Items::NameKey)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Items::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum Items {
        Table,
        Id,
        Name,
        NameKey,
        Description,
        Price,
        Stock,
        CategoryId,
        CreatedAt,
        UpdatedAt,
    }
}
