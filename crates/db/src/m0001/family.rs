use sea_query::{ColumnDef, Index, SqliteQueryBuilder, Table};

use crate::table::{Family, FamilyMealSetting, FamilyMember};

super::operation!();

fn up_statements() -> Vec<String> {
    vec![
        Table::create()
            .table(Family::Table)
            .col(
                ColumnDef::new(Family::Id)
                    .string()
                    .not_null()
                    .string_len(64)
                    .primary_key(),
            )
            .col(ColumnDef::new(Family::Name).string().not_null())
            .col(ColumnDef::new(Family::CreatedBy).string().not_null())
            .col(ColumnDef::new(Family::ActiveMealDate).string())
            .col(ColumnDef::new(Family::ActiveMealType).string())
            .col(ColumnDef::new(Family::ActiveUpdatedBy).string())
            .col(ColumnDef::new(Family::ActiveUpdatedAt).big_integer())
            .col(ColumnDef::new(Family::CreatedAt).big_integer().not_null())
            .to_string(SqliteQueryBuilder),
        Table::create()
            .table(FamilyMember::Table)
            .col(ColumnDef::new(FamilyMember::FamilyId).string().not_null())
            .col(ColumnDef::new(FamilyMember::UserId).string().not_null())
            .col(ColumnDef::new(FamilyMember::Role).string().not_null())
            .col(ColumnDef::new(FamilyMember::DisplayName).string().not_null())
            .col(
                ColumnDef::new(FamilyMember::IsPrimaryToday)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .col(ColumnDef::new(FamilyMember::CreatedAt).big_integer().not_null())
            .primary_key(
                Index::create()
                    .col(FamilyMember::FamilyId)
                    .col(FamilyMember::UserId),
            )
            .to_string(SqliteQueryBuilder),
        Index::create()
            .name("idx_family_member_user_id")
            .table(FamilyMember::Table)
            .col(FamilyMember::UserId)
            .to_string(SqliteQueryBuilder),
        Table::create()
            .table(FamilyMealSetting::Table)
            .col(
                ColumnDef::new(FamilyMealSetting::FamilyId)
                    .string()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(FamilyMealSetting::Breakfast).string().not_null())
            .col(ColumnDef::new(FamilyMealSetting::Lunch).string().not_null())
            .col(ColumnDef::new(FamilyMealSetting::Dinner).string().not_null())
            .col(
                ColumnDef::new(FamilyMealSetting::UpdatedAt)
                    .big_integer()
                    .not_null(),
            )
            .to_string(SqliteQueryBuilder),
    ]
}

fn down_statements() -> Vec<String> {
    vec![
        Table::drop()
            .table(FamilyMealSetting::Table)
            .to_string(SqliteQueryBuilder),
        Index::drop()
            .name("idx_family_member_user_id")
            .table(FamilyMember::Table)
            .to_string(SqliteQueryBuilder),
        Table::drop()
            .table(FamilyMember::Table)
            .to_string(SqliteQueryBuilder),
        Table::drop().table(Family::Table).to_string(SqliteQueryBuilder),
    ]
}
