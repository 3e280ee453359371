use meal_planner_db::table::WheelPick;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;

use crate::Session;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PickInput {
    #[serde(default)]
    pub family_id: String,
    #[serde(default)]
    pub meal_date: String,
    #[serde(default)]
    pub meal_type: String,
    #[serde(default)]
    pub winner_name: String,
    #[serde(default)]
    pub picked_by: String,
}

impl super::Command {
    /// Records the dish the wheel landed on so plan generation can use it.
    #[tracing::instrument(skip_all, fields(family_id = %input.family_id, picked_by = %input.picked_by))]
    pub async fn pick(&self, input: PickInput) -> meal_planner_shared::Result<()> {
        let (winner_name, picked_by) = (input.winner_name.trim(), input.picked_by.trim());
        if winner_name.is_empty() || picked_by.is_empty() {
            meal_planner_shared::user!("Missing fields");
        }

        let session = Session::new(&input.family_id, &input.meal_date, &input.meal_type)?;

        let statement = Query::insert()
            .into_table(WheelPick::Table)
            .columns([
                WheelPick::FamilyId,
                WheelPick::MealDate,
                WheelPick::MealType,
                WheelPick::WinnerName,
                WheelPick::PickedBy,
                WheelPick::CreatedAt,
            ])
            .values_panic([
                session.family_id.into(),
                session.meal_date.into(),
                session.meal_type.to_string().into(),
                winner_name.into(),
                picked_by.into(),
                meal_planner_shared::now().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }
}
