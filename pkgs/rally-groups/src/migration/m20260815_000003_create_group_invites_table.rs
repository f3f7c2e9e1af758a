use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum GroupInvites {
    Table,
    Id,
    GroupId,
    Token,
    CreatedBy,
    CreatedAt,
    ExpiresAt,
    UsedAt,
}

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260815_000003_create_group_invites_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GroupInvites::Table)
                    .col(
                        ColumnDef::new(GroupInvites::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GroupInvites::GroupId).string().not_null())
                    .col(
                        ColumnDef::new(GroupInvites::Token)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(GroupInvites::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(GroupInvites::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GroupInvites::ExpiresAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GroupInvites::UsedAt).big_integer())
                    .to_owned(),
            )
            .await?;

        // Redemption looks invites up by token; the unique key doubles as
        // the collision guard for freshly generated tokens
        manager
            .create_index(
                Index::create()
                    .name("idx_group_invites_group")
                    .table(GroupInvites::Table)
                    .col(GroupInvites::GroupId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_group_invites_expires")
                    .table(GroupInvites::Table)
                    .col(GroupInvites::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_group_invites_expires").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_group_invites_group").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(GroupInvites::Table).to_owned())
            .await
    }
}
