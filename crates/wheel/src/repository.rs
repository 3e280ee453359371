use meal_planner_db::table::{User, WheelCandidate, WheelVote};
use sea_query::{Alias, Condition, Expr, ExprTrait, Func, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqliteConnection, prelude::FromRow};

use crate::{Candidate, Session};

#[derive(Debug, FromRow)]
pub struct CandidateRow {
    pub id: i64,
    pub family_id: String,
    pub meal_date: String,
    pub meal_type: String,
    pub name: String,
    pub proposer: String,
}

/// Candidates of the session with their vote totals, by id.
pub(crate) async fn load_candidates(
    conn: &mut SqliteConnection,
    session: &Session,
) -> meal_planner_shared::Result<Vec<Candidate>> {
    let statement = Query::select()
        .column((WheelCandidate::Table, WheelCandidate::Id))
        .column((WheelCandidate::Table, WheelCandidate::Name))
        .column((WheelCandidate::Table, WheelCandidate::Proposer))
        .column((WheelCandidate::Table, WheelCandidate::ProposerName))
        .expr_as(
            Func::count(Expr::col((WheelVote::Table, WheelVote::Id))),
            Alias::new("votes"),
        )
        .from(WheelCandidate::Table)
        .left_join(
            WheelVote::Table,
            Expr::col((WheelVote::Table, WheelVote::CandidateId))
                .equals((WheelCandidate::Table, WheelCandidate::Id)),
        )
        .cond_where(session.candidates())
        .group_by_col((WheelCandidate::Table, WheelCandidate::Id))
        .order_by((WheelCandidate::Table, WheelCandidate::Id), Order::Asc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, Candidate, _>(&sql, values)
        .fetch_all(conn)
        .await?)
}

pub(crate) async fn find_candidate(
    conn: &mut SqliteConnection,
    id: i64,
) -> meal_planner_shared::Result<Option<CandidateRow>> {
    let statement = Query::select()
        .columns([
            WheelCandidate::Id,
            WheelCandidate::FamilyId,
            WheelCandidate::MealDate,
            WheelCandidate::MealType,
            WheelCandidate::Name,
            WheelCandidate::Proposer,
        ])
        .from(WheelCandidate::Table)
        .and_where(Expr::col(WheelCandidate::Id).eq(id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, CandidateRow, _>(&sql, values)
        .fetch_optional(conn)
        .await?)
}

/// Ballots equal the number of dishes the user nominated in the session.
pub(crate) async fn ballots(
    conn: &mut SqliteConnection,
    session: &Session,
    user_id: &str,
) -> meal_planner_shared::Result<i64> {
    let statement = Query::select()
        .expr(Func::count(Expr::col((WheelCandidate::Table, WheelCandidate::Id))))
        .from(WheelCandidate::Table)
        .cond_where(
            session
                .candidates()
                .add(Expr::col((WheelCandidate::Table, WheelCandidate::Proposer)).eq(user_id)),
        )
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_scalar_with::<_, i64, _>(&sql, values)
        .fetch_one(conn)
        .await?)
}

pub(crate) async fn voted_candidate_ids(
    conn: &mut SqliteConnection,
    session: &Session,
    user_id: &str,
) -> meal_planner_shared::Result<Vec<i64>> {
    let statement = Query::select()
        .column((WheelVote::Table, WheelVote::CandidateId))
        .from(WheelVote::Table)
        .cond_where(
            session
                .votes()
                .add(Expr::col((WheelVote::Table, WheelVote::UserId)).eq(user_id)),
        )
        .order_by((WheelVote::Table, WheelVote::Id), Order::Asc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_scalar_with::<_, i64, _>(&sql, values)
        .fetch_all(conn)
        .await?)
}

/// True when another candidate of the session already carries `name`.
pub(crate) async fn name_taken(
    conn: &mut SqliteConnection,
    session: Condition,
    name: &str,
    except: Option<i64>,
) -> meal_planner_shared::Result<bool> {
    let mut cond = session.add(Expr::col((WheelCandidate::Table, WheelCandidate::Name)).eq(name));
    if let Some(id) = except {
        cond = cond.add(Expr::col((WheelCandidate::Table, WheelCandidate::Id)).ne(id));
    }

    let statement = Query::select()
        .column((WheelCandidate::Table, WheelCandidate::Id))
        .from(WheelCandidate::Table)
        .cond_where(cond)
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_scalar_with::<_, i64, _>(&sql, values)
        .fetch_optional(conn)
        .await?
        .is_some())
}

pub(crate) async fn find_user_name(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> meal_planner_shared::Result<Option<String>> {
    let statement = Query::select()
        .column(User::UserName)
        .from(User::Table)
        .and_where(Expr::col(User::Id).eq(user_id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_scalar_with::<_, String, _>(&sql, values)
        .fetch_optional(conn)
        .await?)
}
