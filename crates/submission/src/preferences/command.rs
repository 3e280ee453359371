use meal_planner_db::table::{CookingPreference, FamilyMember};
use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SavePreferenceInput {
    #[serde(default)]
    pub family_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub preference: serde_json::Value,
    pub effective_date: Option<String>,
    pub meal_date: Option<String>,
    pub meal_type: Option<String>,
    pub display_name: Option<String>,
}

impl crate::Command {
    /// Upserts the member's preference for `effective_date` (today when omitted).
    #[tracing::instrument(skip_all, fields(family_id = %input.family_id, user_id = %input.user_id))]
    pub async fn save_preference(
        &self,
        input: SavePreferenceInput,
    ) -> meal_planner_shared::Result<()> {
        if input.family_id.trim().is_empty() || input.user_id.trim().is_empty() {
            meal_planner_shared::user!("Missing family_id or user_id");
        }

        let effective_date = match input.effective_date.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => {
                meal_planner_shared::format_date(meal_planner_shared::parse_date(value)?)
            }
            _ => meal_planner_shared::today_string(),
        };

        let display_name = match input.display_name.filter(|name| !name.trim().is_empty()) {
            Some(name) => Some(name),
            None => self.member_display_name(&input.family_id, &input.user_id).await?,
        };

        let preference = serde_json::to_string(&super::normalize(&input.preference))?;

        let statement = Query::insert()
            .into_table(CookingPreference::Table)
            .columns([
                CookingPreference::FamilyId,
                CookingPreference::UserId,
                CookingPreference::DisplayName,
                CookingPreference::EffectiveDate,
                CookingPreference::MealDate,
                CookingPreference::MealType,
                CookingPreference::Preference,
                CookingPreference::UpdatedAt,
            ])
            .values_panic([
                input.family_id.into(),
                input.user_id.into(),
                display_name.into(),
                effective_date.into(),
                input.meal_date.into(),
                input.meal_type.into(),
                preference.into(),
                meal_planner_shared::now().into(),
            ])
            .on_conflict(
                OnConflict::columns([
                    CookingPreference::FamilyId,
                    CookingPreference::UserId,
                    CookingPreference::EffectiveDate,
                ])
                .update_columns([
                    CookingPreference::DisplayName,
                    CookingPreference::MealDate,
                    CookingPreference::MealType,
                    CookingPreference::Preference,
                    CookingPreference::UpdatedAt,
                ])
                .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }

    async fn member_display_name(
        &self,
        family_id: &str,
        user_id: &str,
    ) -> meal_planner_shared::Result<Option<String>> {
        let statement = Query::select()
            .column(FamilyMember::DisplayName)
            .from(FamilyMember::Table)
            .and_where(Expr::col(FamilyMember::FamilyId).eq(family_id))
            .and_where(Expr::col(FamilyMember::UserId).eq(user_id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_scalar_with::<_, String, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?)
    }
}
