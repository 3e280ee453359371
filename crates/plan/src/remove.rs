use meal_planner_db::table::{Plan, PlanFeedback};
use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::repository;

impl super::Command {
    /// Only the family holder may delete a plan.
    pub async fn delete(&self, plan_id: i64, user_id: &str) -> meal_planner_shared::Result<()> {
        let mut conn = self.read_db.acquire().await?;
        let Some(plan) = repository::find(&mut conn, plan_id).await? else {
            meal_planner_shared::not_found!("Plan not found");
        };
        drop(conn);

        let is_holder = meal_planner_family::Query(self.read_db.clone())
            .is_holder(&plan.family_id, user_id)
            .await?;
        if !is_holder {
            meal_planner_shared::forbidden!("Only family holder can delete plans");
        }

        let mut tx = self.write_db.begin().await?;

        let statement = sea_query::Query::delete()
            .from_table(PlanFeedback::Table)
            .and_where(Expr::col(PlanFeedback::PlanId).eq(plan_id))
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let statement = sea_query::Query::delete()
            .from_table(Plan::Table)
            .and_where(Expr::col(Plan::Id).eq(plan_id))
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        tracing::info!(plan_id, user_id, "plan deleted by holder");

        Ok(())
    }
}
