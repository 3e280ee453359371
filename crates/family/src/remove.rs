use meal_planner_db::table::{Family, FamilyMealSetting, FamilyMember};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::repository;

impl super::Command {
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, family_id: &str) -> meal_planner_shared::Result<()> {
        if repository::find(&self.read_db, family_id).await?.is_none() {
            meal_planner_shared::not_found!("Family not found");
        }

        let statements = [
            Query::delete()
                .from_table(FamilyMember::Table)
                .and_where(Expr::col(FamilyMember::FamilyId).eq(family_id))
                .to_owned(),
            Query::delete()
                .from_table(FamilyMealSetting::Table)
                .and_where(Expr::col(FamilyMealSetting::FamilyId).eq(family_id))
                .to_owned(),
            Query::delete()
                .from_table(Family::Table)
                .and_where(Expr::col(Family::Id).eq(family_id))
                .to_owned(),
        ];

        let mut tx = self.write_db.begin().await?;
        for statement in statements {
            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        }
        tx.commit().await?;

        tracing::info!("family deleted");

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove_member(
        &self,
        family_id: &str,
        user_id: &str,
    ) -> meal_planner_shared::Result<()> {
        if repository::find_member(&self.read_db, family_id, user_id)
            .await?
            .is_none()
        {
            meal_planner_shared::not_found!("User is not a member of this family");
        }

        let statement = Query::delete()
            .from_table(FamilyMember::Table)
            .and_where(Expr::col(FamilyMember::FamilyId).eq(family_id))
            .and_where(Expr::col(FamilyMember::UserId).eq(user_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }
}
