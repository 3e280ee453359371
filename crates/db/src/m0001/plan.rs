use sea_query::{ColumnDef, Index, SqliteQueryBuilder, Table};

use crate::table::{Plan, PlanFeedback};

super::operation!();

fn up_statements() -> Vec<String> {
    vec![
        Table::create()
            .table(Plan::Table)
            .col(
                ColumnDef::new(Plan::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(Plan::PlanCode).string().not_null())
            .col(ColumnDef::new(Plan::FamilyId).string().not_null())
            .col(ColumnDef::new(Plan::MealType).string().not_null())
            .col(ColumnDef::new(Plan::MealDate).string().not_null())
            .col(
                ColumnDef::new(Plan::SubmissionCnt)
                    .integer()
                    .not_null()
                    .default(0),
            )
            .col(ColumnDef::new(Plan::PlanJson).text().not_null())
            .col(ColumnDef::new(Plan::PlanHtml).text().not_null())
            .col(ColumnDef::new(Plan::ModelRaw).text().not_null())
            .col(ColumnDef::new(Plan::MealCode).string().not_null().default(""))
            .col(ColumnDef::new(Plan::Comment).text().not_null().default(""))
            .col(ColumnDef::new(Plan::CreatedAt).big_integer().not_null())
            .to_string(SqliteQueryBuilder),
        Index::create()
            .name("idx_plan_family_date")
            .table(Plan::Table)
            .col(Plan::FamilyId)
            .col(Plan::MealDate)
            .to_string(SqliteQueryBuilder),
        Table::create()
            .table(PlanFeedback::Table)
            .col(
                ColumnDef::new(PlanFeedback::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(PlanFeedback::PlanId).integer().not_null())
            .col(ColumnDef::new(PlanFeedback::Feedback).text().not_null())
            .col(
                ColumnDef::new(PlanFeedback::CreatedAt)
                    .big_integer()
                    .not_null(),
            )
            .to_string(SqliteQueryBuilder),
    ]
}

fn down_statements() -> Vec<String> {
    vec![
        Table::drop()
            .table(PlanFeedback::Table)
            .to_string(SqliteQueryBuilder),
        Index::drop()
            .name("idx_plan_family_date")
            .table(Plan::Table)
            .to_string(SqliteQueryBuilder),
        Table::drop().table(Plan::Table).to_string(SqliteQueryBuilder),
    ]
}
