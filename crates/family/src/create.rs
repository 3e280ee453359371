use meal_planner_db::table::Family;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use ulid::Ulid;
use validator::Validate;

use crate::{
    MealTimes,
    repository::{self, MemberRow},
};

#[derive(Validate)]
pub struct CreateInput {
    pub family_id: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub family_name: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Created {
    pub family_id: String,
    pub family_name: String,
}

/// Eight characters drawn from `A-Z0-9`.
pub fn generate_family_id() -> String {
    let id = Ulid::new().to_string();

    id[id.len() - 8..].to_owned()
}

impl super::Command {
    #[tracing::instrument(skip_all, fields(user_id = %input.user_id))]
    pub async fn create(&self, input: CreateInput) -> meal_planner_shared::Result<Created> {
        input.validate()?;

        let family_id = match input.family_id {
            Some(id) if !id.trim().is_empty() => id.trim().to_owned(),
            _ => generate_family_id(),
        };

        meal_planner_shared::validate_family_id(&family_id)?;

        if repository::find(&self.read_db, &family_id).await?.is_some() {
            meal_planner_shared::user!("Family ID already exists");
        }

        if repository::has_family_named(&self.read_db, &input.user_id, &input.family_name).await? {
            meal_planner_shared::user!("You already have a family with this name");
        }

        if repository::find_user_name(&self.read_db, &input.user_id)
            .await?
            .is_none()
        {
            meal_planner_shared::user!("User {} does not exist", input.user_id);
        }

        let statement = Query::insert()
            .into_table(Family::Table)
            .columns([Family::Id, Family::Name, Family::CreatedBy, Family::CreatedAt])
            .values_panic([
                family_id.to_owned().into(),
                input.family_name.to_owned().into(),
                input.user_id.to_owned().into(),
                meal_planner_shared::now().into(),
            ])
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        let mut tx = self.write_db.begin().await?;
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        repository::insert_member(
            &mut *tx,
            MemberRow {
                family_id: family_id.to_owned(),
                user_id: input.user_id,
                role: meal_planner_shared::HOLDER.to_owned(),
                display_name: input.family_name.to_owned(),
            },
        )
        .await?;
        crate::meal_times::upsert(&mut *tx, &family_id, &MealTimes::default()).await?;
        tx.commit().await?;

        tracing::info!(family_id = %family_id, "family created");

        Ok(Created {
            family_id,
            family_name: input.family_name,
        })
    }
}
