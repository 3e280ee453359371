use sea_query::{ColumnDef, Index, SqliteQueryBuilder, Table};

use crate::table::{CookingPreference, Submission};

super::operation!();

fn up_statements() -> Vec<String> {
    vec![
        Table::create()
            .table(Submission::Table)
            .col(
                ColumnDef::new(Submission::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(Submission::FamilyId).string().not_null())
            .col(ColumnDef::new(Submission::UserId).string().not_null())
            .col(ColumnDef::new(Submission::Role).string().not_null())
            .col(ColumnDef::new(Submission::DisplayName).string().not_null())
            .col(ColumnDef::new(Submission::Age).integer())
            .col(ColumnDef::new(Submission::MealDate).string().not_null())
            .col(ColumnDef::new(Submission::MealType).string().not_null())
            .col(ColumnDef::new(Submission::Preferences).text().not_null())
            .col(ColumnDef::new(Submission::Drinks).string())
            .col(ColumnDef::new(Submission::Remark).text())
            .col(
                ColumnDef::new(Submission::ParticipantCount)
                    .integer()
                    .not_null()
                    .default(1),
            )
            .col(ColumnDef::new(Submission::CreatedAt).big_integer().not_null())
            .col(ColumnDef::new(Submission::UpdatedAt).big_integer().not_null())
            .to_string(SqliteQueryBuilder),
        Index::create()
            .name("idx_submission_session_user")
            .table(Submission::Table)
            .unique()
            .col(Submission::FamilyId)
            .col(Submission::UserId)
            .col(Submission::MealDate)
            .col(Submission::MealType)
            .to_string(SqliteQueryBuilder),
        Table::create()
            .table(CookingPreference::Table)
            .col(
                ColumnDef::new(CookingPreference::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(CookingPreference::FamilyId).string().not_null())
            .col(ColumnDef::new(CookingPreference::UserId).string().not_null())
            .col(ColumnDef::new(CookingPreference::DisplayName).string())
            .col(
                ColumnDef::new(CookingPreference::EffectiveDate)
                    .string()
                    .not_null(),
            )
            .col(ColumnDef::new(CookingPreference::MealDate).string())
            .col(ColumnDef::new(CookingPreference::MealType).string())
            .col(ColumnDef::new(CookingPreference::Preference).text().not_null())
            .col(
                ColumnDef::new(CookingPreference::UpdatedAt)
                    .big_integer()
                    .not_null(),
            )
            .to_string(SqliteQueryBuilder),
        Index::create()
            .name("idx_cooking_preference_effective")
            .table(CookingPreference::Table)
            .unique()
            .col(CookingPreference::FamilyId)
            .col(CookingPreference::UserId)
            .col(CookingPreference::EffectiveDate)
            .to_string(SqliteQueryBuilder),
    ]
}

fn down_statements() -> Vec<String> {
    vec![
        Index::drop()
            .name("idx_cooking_preference_effective")
            .table(CookingPreference::Table)
            .to_string(SqliteQueryBuilder),
        Table::drop()
            .table(CookingPreference::Table)
            .to_string(SqliteQueryBuilder),
        Index::drop()
            .name("idx_submission_session_user")
            .table(Submission::Table)
            .to_string(SqliteQueryBuilder),
        Table::drop().table(Submission::Table).to_string(SqliteQueryBuilder),
    ]
}
