//! Accounts, journal entries with their lines, and income/expense transactions.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Accounts::AccountCode).string_len(20).not_null())
                    .col(ColumnDef::new(Accounts::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Accounts::AccountType).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Accounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Accounts::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Final arbiter for concurrent creates with the same code
        manager
            .create_index(
                Index::create()
                    .name("ux_accounts_account_code")
                    .table(Accounts::Table)
                    .col(Accounts::AccountCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(JournalEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JournalEntries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(JournalEntries::OccurredOn).date().not_null())
                    .col(
                        ColumnDef::new(JournalEntries::Description)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(JournalEntries::ReferenceNo).string_len(50))
                    .col(
                        ColumnDef::new(JournalEntries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(JournalEntries::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_journal_entries_occurred_on")
                    .table(JournalEntries::Table)
                    .col(JournalEntries::OccurredOn)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(JournalEntryLines::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JournalEntryLines::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(JournalEntryLines::JournalEntryId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(JournalEntryLines::AccountId).integer().not_null())
                    .col(money(manager, JournalEntryLines::Debit))
                    .col(money(manager, JournalEntryLines::Credit))
                    .col(ColumnDef::new(JournalEntryLines::Memo).string_len(200))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_journal_entry_lines_entry")
                            .from(JournalEntryLines::Table, JournalEntryLines::JournalEntryId)
                            .to(JournalEntries::Table, JournalEntries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_journal_entry_lines_account")
                            .from(JournalEntryLines::Table, JournalEntryLines::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_journal_entry_lines_entry")
                    .table(JournalEntryLines::Table)
                    .col(JournalEntryLines::JournalEntryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_journal_entry_lines_account")
                    .table(JournalEntryLines::Table)
                    .col(JournalEntryLines::AccountId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::AccountId).integer().not_null())
                    .col(
                        ColumnDef::new(Transactions::TransactionType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::OccurredOn).date().not_null())
                    .col(
                        ColumnDef::new(Transactions::Description)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(money(manager, Transactions::Amount))
                    .col(ColumnDef::new(Transactions::Category).string_len(100))
                    .col(ColumnDef::new(Transactions::ReferenceNo).string_len(50))
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_account")
                            .from(Transactions::Table, Transactions::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_account")
                    .table(Transactions::Table)
                    .col(Transactions::AccountId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(JournalEntryLines::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(JournalEntries::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).if_exists().to_owned())
            .await
    }
}

/// `DECIMAL(18,2)` money column.
///
/// sea-query refuses SQLite decimals wider than 16 digits. SQLite does not
/// enforce the width anyway, so it is declared as `(16,2)` there.
fn money<T>(manager: &SchemaManager, column: T) -> ColumnDef
where
    T: IntoIden + 'static,
{
    let precision = match manager.get_database_backend() {
        sea_orm::DbBackend::Sqlite => 16,
        _ => 18,
    };
    ColumnDef::new(column)
        .decimal_len(precision, 2)
        .not_null()
        .to_owned()
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
    AccountCode,
    Name,
    AccountType,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum JournalEntries {
    Table,
    Id,
    OccurredOn,
    Description,
    ReferenceNo,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum JournalEntryLines {
    Table,
    Id,
    JournalEntryId,
    AccountId,
    Debit,
    Credit,
    Memo,
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    AccountId,
    TransactionType,
    OccurredOn,
    Description,
    Amount,
    Category,
    ReferenceNo,
    CreatedAt,
    UpdatedAt,
}
