use meal_planner_db::table::{Plan, PlanFeedback};
use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::repository;

impl super::Command {
    pub async fn feedback(&self, plan_id: i64, feedback: &str) -> meal_planner_shared::Result<()> {
        let feedback = feedback.trim();
        if feedback.is_empty() {
            meal_planner_shared::user!("feedback is required");
        }

        let mut conn = self.write_db.acquire().await?;
        if repository::find(&mut conn, plan_id).await?.is_none() {
            meal_planner_shared::not_found!("Plan not found");
        }

        let statement = sea_query::Query::insert()
            .into_table(PlanFeedback::Table)
            .columns([
                PlanFeedback::PlanId,
                PlanFeedback::Feedback,
                PlanFeedback::CreatedAt,
            ])
            .values_panic([
                plan_id.into(),
                feedback.into(),
                meal_planner_shared::now().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *conn).await?;

        Ok(())
    }

    /// Appends a `user_name: text` line and returns the whole comment.
    pub async fn comment(
        &self,
        plan_id: i64,
        user_name: &str,
        text: &str,
    ) -> meal_planner_shared::Result<String> {
        let mut tx = self.write_db.begin().await?;

        let Some(plan) = repository::find(&mut *tx, plan_id).await? else {
            meal_planner_shared::not_found!("Plan not found");
        };

        let line = format!("{user_name}: {text}");
        let comment = if plan.comment.trim().is_empty() {
            line
        } else {
            format!("{}\n{line}", plan.comment)
        };

        let statement = sea_query::Query::update()
            .table(Plan::Table)
            .value(Plan::Comment, comment.as_str())
            .and_where(Expr::col(Plan::Id).eq(plan_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        tx.commit().await?;

        tracing::info!(plan_id, user_name, "comment added");

        Ok(comment)
    }
}
