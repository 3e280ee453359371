use meal_planner_db::table::FamilyMealSetting;
use meal_planner_shared::MealType;
use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, prelude::FromRow};

use crate::repository;

/// Start time of each meal, as `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MealTimes {
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
}

impl Default for MealTimes {
    fn default() -> Self {
        Self {
            breakfast: MealType::Breakfast.default_start().to_owned(),
            lunch: MealType::Lunch.default_start().to_owned(),
            dinner: MealType::Dinner.default_start().to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MealTimesInput {
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub dinner: Option<String>,
}

/// Keeps `HH:MM`, truncates `HH:MM:SS` and falls back on anything else.
pub fn normalize_hhmm(value: Option<&str>, fallback: &str) -> String {
    let value = value.unwrap_or_default().trim();

    match (value.len(), meal_planner_shared::parse_hhmm(value)) {
        (5 | 8, Some(time)) => meal_planner_shared::format_hhmm(time),
        _ => fallback.to_owned(),
    }
}

impl MealTimesInput {
    pub fn normalize(&self) -> MealTimes {
        MealTimes {
            breakfast: normalize_hhmm(
                self.breakfast.as_deref(),
                MealType::Breakfast.default_start(),
            ),
            lunch: normalize_hhmm(self.lunch.as_deref(), MealType::Lunch.default_start()),
            dinner: normalize_hhmm(self.dinner.as_deref(), MealType::Dinner.default_start()),
        }
    }
}

pub(crate) async fn upsert(
    conn: &mut SqliteConnection,
    family_id: &str,
    times: &MealTimes,
) -> meal_planner_shared::Result<()> {
    let statement = Query::insert()
        .into_table(FamilyMealSetting::Table)
        .columns([
            FamilyMealSetting::FamilyId,
            FamilyMealSetting::Breakfast,
            FamilyMealSetting::Lunch,
            FamilyMealSetting::Dinner,
            FamilyMealSetting::UpdatedAt,
        ])
        .values_panic([
            family_id.into(),
            times.breakfast.as_str().into(),
            times.lunch.as_str().into(),
            times.dinner.as_str().into(),
            meal_planner_shared::now().into(),
        ])
        .on_conflict(
            OnConflict::column(FamilyMealSetting::FamilyId)
                .update_columns([
                    FamilyMealSetting::Breakfast,
                    FamilyMealSetting::Lunch,
                    FamilyMealSetting::Dinner,
                    FamilyMealSetting::UpdatedAt,
                ])
                .to_owned(),
        )
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(conn).await?;

    Ok(())
}

impl super::Command {
    pub async fn update_meal_times(
        &self,
        family_id: &str,
        input: MealTimesInput,
    ) -> meal_planner_shared::Result<MealTimes> {
        if repository::find(&self.read_db, family_id).await?.is_none() {
            meal_planner_shared::not_found!("Family not found");
        }

        let times = input.normalize();
        let mut conn = self.write_db.acquire().await?;
        upsert(&mut *conn, family_id, &times).await?;

        Ok(times)
    }
}

impl super::Query {
    /// Configured times, or the defaults when the family never saved any.
    pub async fn meal_times(&self, family_id: &str) -> anyhow::Result<Option<MealTimes>> {
        if self.find(family_id).await?.is_none() {
            return Ok(None);
        }

        Ok(Some(self.stored_meal_times(family_id).await?.unwrap_or_default()))
    }

    pub(crate) async fn stored_meal_times(
        &self,
        family_id: &str,
    ) -> anyhow::Result<Option<MealTimes>> {
        let statement = sea_query::Query::select()
            .columns([
                FamilyMealSetting::Breakfast,
                FamilyMealSetting::Lunch,
                FamilyMealSetting::Dinner,
            ])
            .from(FamilyMealSetting::Table)
            .and_where(Expr::col(FamilyMealSetting::FamilyId).eq(family_id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, MealTimes, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }
}
