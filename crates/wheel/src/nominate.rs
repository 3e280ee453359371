use meal_planner_db::table::WheelCandidate;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;

use crate::{Session, repository};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NominateInput {
    #[serde(default)]
    pub family_id: String,
    #[serde(default)]
    pub meal_date: String,
    #[serde(default)]
    pub meal_type: String,
    #[serde(default)]
    pub user_id: String,
    pub dish: Option<String>,
    pub dishes: Option<Vec<String>>,
}

impl NominateInput {
    /// `dish`, or the first entry of `dishes` when `dish` is blank.
    pub fn dish_name(&self) -> String {
        self.dish
            .as_deref()
            .map(str::trim)
            .filter(|dish| !dish.is_empty())
            .or_else(|| {
                self.dishes
                    .as_ref()
                    .and_then(|dishes| dishes.first())
                    .map(|dish| dish.trim())
            })
            .unwrap_or_default()
            .to_owned()
    }
}

impl super::Command {
    #[tracing::instrument(skip_all, fields(family_id = %input.family_id, user_id = %input.user_id))]
    pub async fn nominate(&self, input: NominateInput) -> meal_planner_shared::Result<i64> {
        let dish = input.dish_name();
        let user_id = input.user_id.trim();
        if dish.is_empty() || user_id.is_empty() {
            meal_planner_shared::user!("Missing fields");
        }

        let session = Session::new(&input.family_id, &input.meal_date, &input.meal_type)?;

        let mut tx = self.write_db.begin().await?;

        if repository::ballots(&mut *tx, &session, user_id).await? >= crate::MAX_NOMINATIONS {
            meal_planner_shared::user!("You can add at most 2 dishes for this time");
        }

        if repository::name_taken(&mut *tx, session.candidates(), &dish, None).await? {
            meal_planner_shared::conflict!("This dish already exists in the current list");
        }

        let proposer_name = repository::find_user_name(&mut *tx, user_id)
            .await?
            .unwrap_or_else(|| user_id.to_owned());

        let statement = Query::insert()
            .into_table(WheelCandidate::Table)
            .columns([
                WheelCandidate::FamilyId,
                WheelCandidate::MealDate,
                WheelCandidate::MealType,
                WheelCandidate::Name,
                WheelCandidate::Proposer,
                WheelCandidate::ProposerName,
                WheelCandidate::CreatedAt,
            ])
            .values_panic([
                session.family_id.into(),
                session.meal_date.into(),
                session.meal_type.to_string().into(),
                dish.into(),
                user_id.into(),
                proposer_name.into(),
                meal_planner_shared::now().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let id = sqlx::query_with(&sql, values)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        tx.commit().await?;

        tracing::info!(candidate_id = id, "dish nominated");

        Ok(id)
    }
}
