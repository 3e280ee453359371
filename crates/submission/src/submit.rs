use meal_planner_db::table::Submission;
use meal_planner_shared::MealType;
use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitInput {
    #[serde(default)]
    pub family_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub display_name: String,
    pub age: Option<i64>,
    #[serde(default)]
    pub meal_date: String,
    #[serde(default)]
    pub meal_type: String,
    #[serde(default)]
    pub preferences: serde_json::Value,
    pub drinks: Option<String>,
    pub remark: Option<String>,
    pub participant_count: Option<i64>,
}

impl super::Command {
    /// One submission per member and meal session; resubmitting replaces it.
    #[tracing::instrument(skip_all, fields(family_id = %input.family_id, user_id = %input.user_id))]
    pub async fn submit(&self, input: SubmitInput) -> meal_planner_shared::Result<()> {
        if [
            &input.family_id,
            &input.user_id,
            &input.meal_date,
            &input.meal_type,
        ]
        .iter()
        .any(|value| value.trim().is_empty())
        {
            meal_planner_shared::user!("Missing required fields");
        }

        let meal_type = MealType::parse(&input.meal_type)?;
        let meal_date = meal_planner_shared::parse_date(&input.meal_date)?;

        let participant_count = input.participant_count.unwrap_or(1);
        if participant_count < 1 {
            meal_planner_shared::user!("participant_count must be at least 1");
        }
        if participant_count > meal_planner_shared::MAX_PARTICIPANTS {
            meal_planner_shared::user!(
                "participant_count must be at most {}",
                meal_planner_shared::MAX_PARTICIPANTS
            );
        }

        let preferences = match input.preferences {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            value => value,
        };

        let now = meal_planner_shared::now();
        let statement = Query::insert()
            .into_table(Submission::Table)
            .columns([
                Submission::FamilyId,
                Submission::UserId,
                Submission::Role,
                Submission::DisplayName,
                Submission::Age,
                Submission::MealDate,
                Submission::MealType,
                Submission::Preferences,
                Submission::Drinks,
                Submission::Remark,
                Submission::ParticipantCount,
                Submission::CreatedAt,
                Submission::UpdatedAt,
            ])
            .values_panic([
                input.family_id.into(),
                input.user_id.into(),
                input.role.into(),
                input.display_name.into(),
                input.age.into(),
                meal_planner_shared::format_date(meal_date).into(),
                meal_type.to_string().into(),
                serde_json::to_string(&preferences)?.into(),
                input.drinks.into(),
                input.remark.into(),
                participant_count.into(),
                now.into(),
                now.into(),
            ])
            .on_conflict(
                OnConflict::columns([
                    Submission::FamilyId,
                    Submission::UserId,
                    Submission::MealDate,
                    Submission::MealType,
                ])
                .update_columns([
                    Submission::Role,
                    Submission::DisplayName,
                    Submission::Age,
                    Submission::Preferences,
                    Submission::Drinks,
                    Submission::Remark,
                    Submission::ParticipantCount,
                    Submission::UpdatedAt,
                ])
                .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        tracing::info!("submission saved");

        Ok(())
    }

    pub fn submit_by_meal_code(&self, _meal_code: &str) -> meal_planner_shared::Result<()> {
        meal_planner_shared::gone!(
            "Meal code feature has been retired. Please select a family and submit normally."
        );
    }

    /// Members can only delete their own submissions.
    pub async fn delete(&self, id: i64, user_id: &str) -> meal_planner_shared::Result<()> {
        let statement = Query::delete()
            .from_table(Submission::Table)
            .and_where(Expr::col(Submission::Id).eq(id))
            .and_where(Expr::col(Submission::UserId).eq(user_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let deleted = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?
            .rows_affected();

        if deleted == 0 {
            meal_planner_shared::not_found!("Submission not found or not owned by user");
        }

        Ok(())
    }
}
