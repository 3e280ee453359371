use sea_query::{ColumnDef, Index, SqliteQueryBuilder, Table};

use crate::table::MealCode;

super::operation!();

fn up_statements() -> Vec<String> {
    vec![
        Table::create()
            .table(MealCode::Table)
            .col(
                ColumnDef::new(MealCode::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(MealCode::Code).string().not_null().string_len(16))
            .col(ColumnDef::new(MealCode::FamilyId).string().not_null())
            .col(ColumnDef::new(MealCode::MealDate).string().not_null())
            .col(ColumnDef::new(MealCode::MealType).string().not_null())
            .col(ColumnDef::new(MealCode::MealTime).string().not_null())
            .col(
                ColumnDef::new(MealCode::ParticipantCount)
                    .integer()
                    .not_null()
                    .default(0),
            )
            .col(ColumnDef::new(MealCode::CreatedBy).string().not_null())
            .col(ColumnDef::new(MealCode::CreatedAt).big_integer().not_null())
            .to_string(SqliteQueryBuilder),
        Index::create()
            .name("idx_meal_code_session")
            .table(MealCode::Table)
            .unique()
            .col(MealCode::FamilyId)
            .col(MealCode::MealDate)
            .col(MealCode::MealType)
            .to_string(SqliteQueryBuilder),
        Index::create()
            .name("idx_meal_code_code")
            .table(MealCode::Table)
            .col(MealCode::Code)
            .to_string(SqliteQueryBuilder),
    ]
}

fn down_statements() -> Vec<String> {
    vec![
        Index::drop()
            .name("idx_meal_code_code")
            .table(MealCode::Table)
            .to_string(SqliteQueryBuilder),
        Index::drop()
            .name("idx_meal_code_session")
            .table(MealCode::Table)
            .to_string(SqliteQueryBuilder),
        Table::drop().table(MealCode::Table).to_string(SqliteQueryBuilder),
    ]
}
