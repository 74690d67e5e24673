use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::CompanyId).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Age).integer())
                    .col(ColumnDef::new(Users::Gender).small_integer())
                    .col(
                        ColumnDef::new(Users::Role)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Users::EncryptedPassword).string().not_null())
                    .col(ColumnDef::new(Users::ConfirmationToken).string())
                    .col(ColumnDef::new(Users::ConfirmationSentAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Users::ConfirmedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Users::ResetPasswordToken).string())
                    .col(ColumnDef::new(Users::ResetPasswordSentAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Users::Table, Users::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The service translates violations of this index into an email "taken" error.
        manager
            .create_index(
                Index::create()
                    .table(Users::Table)
                    .col(Users::Email)
                    .name("idx_users_email")
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Users::Table)
                    .col(Users::ConfirmationToken)
                    .name("idx_users_confirmation_token")
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Users::Table)
                    .col(Users::ResetPasswordToken)
                    .name("idx_users_reset_password_token")
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Users::Table)
                    .col(Users::CompanyId)
                    .name("idx_users_company_id")
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

#[derive(Iden)]
enum Users {
    Table,
    Id,
    CompanyId,
    Email,
    Name,
    Age,
    Gender,
    Role,
    EncryptedPassword,
    ConfirmationToken,
    ConfirmationSentAt,
    ConfirmedAt,
    ResetPasswordToken,
    ResetPasswordSentAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Companies {
    Table,
    Id,
}
