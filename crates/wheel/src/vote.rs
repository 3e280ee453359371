use meal_planner_db::table::WheelVote;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};

use crate::{CandidateRef, Session, repository};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoteInput {
    #[serde(default)]
    pub family_id: String,
    #[serde(default)]
    pub meal_date: String,
    #[serde(default)]
    pub meal_type: String,
    #[serde(default)]
    pub user_id: String,
    pub candidate_id: Option<CandidateRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteAction {
    Vote,
    Unvote,
}

impl super::Command {
    /// Toggles the user's vote on a candidate of the session.
    #[tracing::instrument(skip_all, fields(family_id = %input.family_id, user_id = %input.user_id))]
    pub async fn vote(&self, input: VoteInput) -> meal_planner_shared::Result<VoteAction> {
        let user_id = input.user_id.trim();
        let Some(candidate_ref) = input.candidate_id.as_ref() else {
            meal_planner_shared::user!("Missing fields");
        };
        if user_id.is_empty() {
            meal_planner_shared::user!("Missing fields");
        }

        let session = Session::new(&input.family_id, &input.meal_date, &input.meal_type)?;

        let mut tx = self.write_db.begin().await?;

        let candidate = match candidate_ref.id() {
            Some(id) => repository::find_candidate(&mut *tx, id).await?,
            None => None,
        };
        let Some(candidate) = candidate.filter(|candidate| {
            candidate.family_id == session.family_id
                && candidate.meal_date == session.meal_date
                && candidate.meal_type == session.meal_type.to_string()
        }) else {
            meal_planner_shared::not_found!("Candidate not found");
        };

        if candidate.proposer == user_id {
            meal_planner_shared::user!("You cannot vote your own dish");
        }

        let voted = repository::voted_candidate_ids(&mut *tx, &session, user_id).await?;

        let action = if voted.contains(&candidate.id) {
            let statement = Query::delete()
                .from_table(WheelVote::Table)
                .and_where(Expr::col(WheelVote::CandidateId).eq(candidate.id))
                .and_where(Expr::col(WheelVote::UserId).eq(user_id))
                .to_owned();

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;

            VoteAction::Unvote
        } else {
            let ballots = repository::ballots(&mut *tx, &session, user_id).await?;
            if voted.len() as i64 >= ballots {
                meal_planner_shared::user!("No ballots left");
            }

            let statement = Query::insert()
                .into_table(WheelVote::Table)
                .columns([
                    WheelVote::CandidateId,
                    WheelVote::UserId,
                    WheelVote::FamilyId,
                    WheelVote::MealDate,
                    WheelVote::MealType,
                    WheelVote::CreatedAt,
                ])
                .values_panic([
                    candidate.id.into(),
                    user_id.into(),
                    session.family_id.into(),
                    session.meal_date.into(),
                    session.meal_type.to_string().into(),
                    meal_planner_shared::now().into(),
                ])
                .to_owned();

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;

            VoteAction::Vote
        };

        tx.commit().await?;

        Ok(action)
    }
}
