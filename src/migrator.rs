use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_customers_table::Migration),
            Box::new(m20240101_000002_create_vehicles_table::Migration),
            Box::new(m20240101_000003_create_users_table::Migration),
            Box::new(m20240101_000004_create_settings_table::Migration),
            Box::new(m20240101_000005_create_job_cards_table::Migration),
            Box::new(m20240101_000006_create_line_item_tables::Migration),
        ]
    }
}

#[derive(DeriveIden)]
pub enum Customers {
    Table,
    Id,
    Name,
    Phone,
    Email,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Vehicles {
    Table,
    Id,
    CustomerId,
    RegistrationNo,
    Make,
    Model,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Users {
    Table,
    Id,
    Name,
    Email,
    Role,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Settings {
    Table,
    Key,
    Value,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum JobCards {
    Table,
    Id,
    JobNo,
    CustomerId,
    VehicleId,
    Status,
    AssignedMechanicId,
    MechanicNotes,
    ServicesAmount,
    PartsAmount,
    TaxAmount,
    GrandTotal,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum JobCardServices {
    Table,
    Id,
    JobCardId,
    Description,
    UnitPrice,
    Quantity,
    LineTotal,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum JobCardParts {
    Table,
    Id,
    JobCardId,
    Description,
    PartNumber,
    UnitPrice,
    Quantity,
    LineTotal,
    CreatedAt,
}

fn id_column<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn money_column<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .decimal()
        .not_null()
        .default(0)
        .to_owned()
}

mod m20240101_000001_create_customers_table {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_customers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(id_column(Customers::Id))
                        .col(ColumnDef::new(Customers::Name).string().not_null())
                        .col(ColumnDef::new(Customers::Phone).string().null())
                        .col(ColumnDef::new(Customers::Email).string().null())
                        .col(
                            ColumnDef::new(Customers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Customers::Table).to_owned())
                .await
        }
    }
}

mod m20240101_000002_create_vehicles_table {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_vehicles_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Vehicles::Table)
                        .if_not_exists()
                        .col(id_column(Vehicles::Id))
                        .col(ColumnDef::new(Vehicles::CustomerId).big_integer().not_null())
                        .col(ColumnDef::new(Vehicles::RegistrationNo).string().not_null())
                        .col(ColumnDef::new(Vehicles::Make).string().null())
                        .col(ColumnDef::new(Vehicles::Model).string().null())
                        .col(
                            ColumnDef::new(Vehicles::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_vehicles_customer_id")
                                .from(Vehicles::Table, Vehicles::CustomerId)
                                .to(Customers::Table, Customers::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Vehicles::Table).to_owned())
                .await
        }
    }
}

mod m20240101_000003_create_users_table {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_users_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(id_column(Users::Id))
                        .col(ColumnDef::new(Users::Name).string().not_null())
                        .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                        .col(ColumnDef::new(Users::Role).string_len(20).not_null())
                        .col(
                            ColumnDef::new(Users::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }
}

mod m20240101_000004_create_settings_table {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_settings_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Settings::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Settings::Key)
                                .string_len(100)
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Settings::Value).text().not_null())
                        .col(
                            ColumnDef::new(Settings::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Settings::Table).to_owned())
                .await
        }
    }
}

mod m20240101_000005_create_job_cards_table {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_job_cards_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(JobCards::Table)
                        .if_not_exists()
                        .col(id_column(JobCards::Id))
                        .col(
                            ColumnDef::new(JobCards::JobNo)
                                .big_integer()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(JobCards::CustomerId).big_integer().not_null())
                        .col(ColumnDef::new(JobCards::VehicleId).big_integer().not_null())
                        .col(
                            ColumnDef::new(JobCards::Status)
                                .string_len(20)
                                .not_null()
                                .default("OPEN"),
                        )
                        .col(ColumnDef::new(JobCards::AssignedMechanicId).big_integer().null())
                        .col(ColumnDef::new(JobCards::MechanicNotes).text().null())
                        .col(money_column(JobCards::ServicesAmount))
                        .col(money_column(JobCards::PartsAmount))
                        .col(money_column(JobCards::TaxAmount))
                        .col(money_column(JobCards::GrandTotal))
                        .col(
                            ColumnDef::new(JobCards::DeletedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(JobCards::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(JobCards::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_job_cards_customer_id")
                                .from(JobCards::Table, JobCards::CustomerId)
                                .to(Customers::Table, Customers::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_job_cards_vehicle_id")
                                .from(JobCards::Table, JobCards::VehicleId)
                                .to(Vehicles::Table, Vehicles::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_job_cards_assigned_mechanic_id")
                                .from(JobCards::Table, JobCards::AssignedMechanicId)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_job_cards_status")
                        .table(JobCards::Table)
                        .col(JobCards::Status)
                        .if_not_exists()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(JobCards::Table).to_owned())
                .await
        }
    }
}

mod m20240101_000006_create_line_item_tables {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_create_line_item_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(JobCardServices::Table)
                        .if_not_exists()
                        .col(id_column(JobCardServices::Id))
                        .col(
                            ColumnDef::new(JobCardServices::JobCardId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(JobCardServices::Description).string().not_null())
                        .col(money_column(JobCardServices::UnitPrice))
                        .col(money_column(JobCardServices::Quantity))
                        .col(money_column(JobCardServices::LineTotal))
                        .col(
                            ColumnDef::new(JobCardServices::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_job_card_services_job_card_id")
                                .from(JobCardServices::Table, JobCardServices::JobCardId)
                                .to(JobCards::Table, JobCards::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(JobCardParts::Table)
                        .if_not_exists()
                        .col(id_column(JobCardParts::Id))
                        .col(ColumnDef::new(JobCardParts::JobCardId).big_integer().not_null())
                        .col(ColumnDef::new(JobCardParts::Description).string().not_null())
                        .col(ColumnDef::new(JobCardParts::PartNumber).string().null())
                        .col(money_column(JobCardParts::UnitPrice))
                        .col(money_column(JobCardParts::Quantity))
                        .col(money_column(JobCardParts::LineTotal))
                        .col(
                            ColumnDef::new(JobCardParts::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_job_card_parts_job_card_id")
                                .from(JobCardParts::Table, JobCardParts::JobCardId)
                                .to(JobCards::Table, JobCards::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(JobCardParts::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(JobCardServices::Table).to_owned())
                .await
        }
    }
}
