use meal_planner_db::table::MealCode;
use meal_planner_shared::MealType;
use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;

use crate::repository;

pub struct CreateMealCodeInput {
    pub family_id: String,
    pub user_id: String,
    pub participant_count: u32,
    /// `YYYY-MM-DD` optionally followed by a clock time.
    pub meal_time: String,
    pub meal_type: MealType,
}

#[derive(Debug, Clone, Serialize)]
pub struct MealCodeCreated {
    pub meal_code: String,
    pub family_id: String,
    pub participant_count: u32,
    pub meal_time: String,
    pub meal_type: MealType,
}

impl crate::Command {
    /// Returns the code already issued for the meal session or issues a new one.
    #[tracing::instrument(skip_all, fields(family_id = %input.family_id))]
    pub async fn create_meal_code(
        &self,
        input: CreateMealCodeInput,
    ) -> meal_planner_shared::Result<MealCodeCreated> {
        let date_part = input.meal_time.split_whitespace().next().unwrap_or_default();
        let meal_date = meal_planner_shared::parse_date(date_part)?;
        let meal_date_str = meal_planner_shared::format_date(meal_date);

        if repository::find(&self.read_db, &input.family_id).await?.is_none() {
            meal_planner_shared::not_found!("Family not found");
        }

        let existing = Query::select()
            .column(MealCode::Code)
            .from(MealCode::Table)
            .and_where(Expr::col(MealCode::FamilyId).eq(input.family_id.as_str()))
            .and_where(Expr::col(MealCode::MealDate).eq(meal_date_str.as_str()))
            .and_where(Expr::col(MealCode::MealType).eq(input.meal_type.to_string()))
            .limit(1)
            .to_owned();
        let (sql, values) = existing.build_sqlx(SqliteQueryBuilder);
        let existing = sqlx::query_scalar_with::<_, String, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        let meal_code = match existing {
            Some(code) => code,
            None => {
                let code = super::encode(&input.family_id, input.participant_count, meal_date);
                let statement = Query::insert()
                    .into_table(MealCode::Table)
                    .columns([
                        MealCode::Code,
                        MealCode::FamilyId,
                        MealCode::MealDate,
                        MealCode::MealType,
                        MealCode::MealTime,
                        MealCode::ParticipantCount,
                        MealCode::CreatedBy,
                        MealCode::CreatedAt,
                    ])
                    .values_panic([
                        code.as_str().into(),
                        input.family_id.as_str().into(),
                        meal_date_str.as_str().into(),
                        input.meal_type.to_string().into(),
                        input.meal_time.as_str().into(),
                        input.participant_count.into(),
                        input.user_id.into(),
                        meal_planner_shared::now().into(),
                    ])
                    .on_conflict(
                        OnConflict::columns([
                            MealCode::FamilyId,
                            MealCode::MealDate,
                            MealCode::MealType,
                        ])
                        .do_nothing()
                        .to_owned(),
                    )
                    .to_owned();

                let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
                sqlx::query_with(&sql, values).execute(&self.write_db).await?;

                code
            }
        };

        Ok(MealCodeCreated {
            meal_code,
            family_id: input.family_id,
            participant_count: input.participant_count,
            meal_time: input.meal_time,
            meal_type: input.meal_type,
        })
    }
}
