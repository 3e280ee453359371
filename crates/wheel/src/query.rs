use std::collections::HashMap;

use meal_planner_db::table::{WheelPick, WheelVote};
use sea_query::{Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;

use crate::{Session, WheelContext, repository};

#[derive(Debug, Clone, Serialize)]
pub struct CandidateView {
    pub id: String,
    pub name: String,
    pub votes: i64,
    pub proposer: String,
    pub proposer_name: String,
    pub voters: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub ballots: i64,
    pub votes_used: i64,
    pub voted_candidate_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WheelState {
    pub candidates: Vec<CandidateView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_summary: Option<UserSummary>,
}

#[derive(Debug, Clone, Default, Serialize, FromRow)]
pub struct LatestPick {
    pub winner_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picked_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

#[derive(Debug, FromRow)]
struct VoteRow {
    candidate_id: i64,
    user_id: String,
}

impl super::Query {
    /// Candidates by votes then id, with the caller's ballot summary when a user is given.
    pub async fn state(
        &self,
        session: &Session,
        user_id: Option<&str>,
    ) -> meal_planner_shared::Result<WheelState> {
        let mut conn = self.0.acquire().await?;
        let mut candidates = repository::load_candidates(&mut *conn, session).await?;
        candidates.sort_by(|a, b| b.votes.cmp(&a.votes).then(a.id.cmp(&b.id)));

        let statement = sea_query::Query::select()
            .columns([WheelVote::CandidateId, WheelVote::UserId])
            .from(WheelVote::Table)
            .cond_where(session.votes())
            .order_by(WheelVote::Id, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let mut voters = HashMap::<i64, Vec<String>>::new();
        for vote in sqlx::query_as_with::<_, VoteRow, _>(&sql, values)
            .fetch_all(&mut *conn)
            .await?
        {
            voters.entry(vote.candidate_id).or_default().push(vote.user_id);
        }

        let user_summary = match user_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(user_id) => {
                let ballots = repository::ballots(&mut *conn, session, user_id).await?;
                let voted = repository::voted_candidate_ids(&mut *conn, session, user_id).await?;

                Some(UserSummary {
                    ballots,
                    votes_used: voted.len() as i64,
                    voted_candidate_ids: voted.iter().map(i64::to_string).collect(),
                })
            }
            None => None,
        };

        let candidates = candidates
            .into_iter()
            .map(|candidate| CandidateView {
                id: candidate.id.to_string(),
                voters: voters.remove(&candidate.id).unwrap_or_default(),
                name: candidate.name,
                votes: candidate.votes,
                proposer: candidate.proposer,
                proposer_name: candidate.proposer_name,
            })
            .collect();

        Ok(WheelState {
            candidates,
            user_summary,
        })
    }

    pub async fn latest_pick(&self, session: &Session) -> meal_planner_shared::Result<LatestPick> {
        let statement = sea_query::Query::select()
            .columns([WheelPick::WinnerName, WheelPick::PickedBy, WheelPick::CreatedAt])
            .from(WheelPick::Table)
            .cond_where(session.picks())
            .order_by(WheelPick::Id, Order::Desc)
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, LatestPick, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?
            .unwrap_or_default())
    }

    /// Loads the session's candidates and latest pick into a generation context.
    pub async fn context(&self, session: &Session) -> meal_planner_shared::Result<WheelContext> {
        let mut conn = self.0.acquire().await?;
        let candidates = repository::load_candidates(&mut *conn, session).await?;
        drop(conn);

        let picked = self.latest_pick(session).await?.winner_name;

        Ok(crate::build_context(candidates, picked.as_deref()))
    }
}
