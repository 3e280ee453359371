use meal_planner_db::table::{WheelCandidate, WheelVote};
use sea_query::{Condition, Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::repository;

impl super::Command {
    /// Renames a candidate; only its proposer may do so.
    pub async fn rename_candidate(
        &self,
        id: i64,
        user_id: &str,
        name: &str,
    ) -> meal_planner_shared::Result<()> {
        let name = name.trim();
        if user_id.trim().is_empty() || name.is_empty() {
            meal_planner_shared::user!("Missing fields");
        }

        let mut tx = self.write_db.begin().await?;

        let Some(candidate) = repository::find_candidate(&mut *tx, id).await? else {
            meal_planner_shared::not_found!("Candidate not found");
        };

        if candidate.proposer != user_id {
            meal_planner_shared::forbidden!("Only proposer can edit this dish");
        }

        let session = Condition::all()
            .add(Expr::col((WheelCandidate::Table, WheelCandidate::FamilyId)).eq(candidate.family_id.as_str()))
            .add(Expr::col((WheelCandidate::Table, WheelCandidate::MealDate)).eq(candidate.meal_date.as_str()))
            .add(Expr::col((WheelCandidate::Table, WheelCandidate::MealType)).eq(candidate.meal_type.as_str()));

        if repository::name_taken(&mut *tx, session, name, Some(id)).await? {
            meal_planner_shared::conflict!("This dish name already exists in this list");
        }

        let statement = Query::update()
            .table(WheelCandidate::Table)
            .values([(WheelCandidate::Name, name.into())])
            .and_where(Expr::col(WheelCandidate::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        Ok(())
    }

    /// Removes a candidate and every vote it received.
    pub async fn delete_candidate(&self, id: i64, user_id: &str) -> meal_planner_shared::Result<()> {
        let mut tx = self.write_db.begin().await?;

        let Some(candidate) = repository::find_candidate(&mut *tx, id).await? else {
            meal_planner_shared::not_found!("Candidate not found");
        };

        if candidate.proposer != user_id {
            meal_planner_shared::forbidden!("Only proposer can delete this dish");
        }

        let statement = Query::delete()
            .from_table(WheelVote::Table)
            .and_where(Expr::col(WheelVote::CandidateId).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let statement = Query::delete()
            .from_table(WheelCandidate::Table)
            .and_where(Expr::col(WheelCandidate::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        tracing::info!(candidate_id = id, "wheel candidate deleted");

        Ok(())
    }
}
