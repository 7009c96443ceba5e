use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ========== COMMANDS ==========
        manager
            .create_table(
                Table::create()
                    .table(Commands::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Commands::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Commands::Command).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Commands::Seconds)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Commands::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Commands::Processed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Commands::ProcessedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Device polling looks up the oldest unprocessed command
        manager
            .create_index(
                Index::create()
                    .name("commands_processed_timestamp_idx")
                    .table(Commands::Table)
                    .col(Commands::Processed)
                    .col(Commands::Timestamp)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // ========== STOVE DATA ==========
        manager
            .create_table(
                Table::create()
                    .table(StoveData::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StoveData::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StoveData::Temperature).double().not_null())
                    .col(ColumnDef::new(StoveData::Relay).boolean().not_null())
                    .col(ColumnDef::new(StoveData::ManualMode).boolean().not_null())
                    .col(ColumnDef::new(StoveData::Cooking).boolean().not_null())
                    .col(ColumnDef::new(StoveData::TimeLeft).big_integer().not_null())
                    .col(
                        ColumnDef::new(StoveData::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StoveData::CommandId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stove_data_command")
                            .from(StoveData::Table, StoveData::CommandId)
                            .to(Commands::Table, Commands::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("stove_data_timestamp_idx")
                    .table(StoveData::Table)
                    .col(StoveData::Timestamp)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StoveData::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Commands::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Commands {
    Table,
    Id,
    Command,
    Seconds,
    Timestamp,
    Processed,
    ProcessedAt,
}

#[derive(DeriveIden)]
enum StoveData {
    Table,
    Id,
    Temperature,
    Relay,
    ManualMode,
    Cooking,
    TimeLeft,
    Timestamp,
    CommandId,
}
