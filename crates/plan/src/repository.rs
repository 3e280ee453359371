use meal_planner_db::table::Plan;
use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqliteConnection, prelude::FromRow};

#[derive(Debug, Clone, FromRow)]
pub struct PlanRow {
    pub id: i64,
    pub plan_code: String,
    pub family_id: String,
    pub meal_type: String,
    pub meal_date: String,
    pub submission_cnt: i64,
    pub plan_json: String,
    pub plan_html: String,
    pub model_raw: String,
    pub meal_code: String,
    pub comment: String,
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct NewPlan<'a> {
    pub family_id: &'a str,
    pub meal_type: &'a str,
    pub meal_date: &'a str,
    pub submission_cnt: i64,
    pub plan_json: String,
    pub plan_html: String,
    pub model_raw: String,
    pub meal_code: &'a str,
    pub comment: &'a str,
}

pub fn select_plans() -> sea_query::SelectStatement {
    sea_query::Query::select()
        .columns([
            Plan::Id,
            Plan::PlanCode,
            Plan::FamilyId,
            Plan::MealType,
            Plan::MealDate,
            Plan::SubmissionCnt,
            Plan::PlanJson,
            Plan::PlanHtml,
            Plan::ModelRaw,
            Plan::MealCode,
            Plan::Comment,
            Plan::CreatedAt,
        ])
        .from(Plan::Table)
        .to_owned()
}

pub async fn find(conn: &mut SqliteConnection, id: i64) -> anyhow::Result<Option<PlanRow>> {
    let statement = select_plans()
        .and_where(Expr::col(Plan::Id).eq(id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, PlanRow, _>(&sql, values)
        .fetch_optional(conn)
        .await?)
}

/// Stores a plan under `{family_id}_{unix_ts}` and returns its row id.
pub async fn insert(conn: &mut SqliteConnection, plan: NewPlan<'_>) -> anyhow::Result<i64> {
    let created_at = meal_planner_shared::now();
    let plan_code = format!("{}_{created_at}", plan.family_id);

    let statement = sea_query::Query::insert()
        .into_table(Plan::Table)
        .columns([
            Plan::PlanCode,
            Plan::FamilyId,
            Plan::MealType,
            Plan::MealDate,
            Plan::SubmissionCnt,
            Plan::PlanJson,
            Plan::PlanHtml,
            Plan::ModelRaw,
            Plan::MealCode,
            Plan::Comment,
            Plan::CreatedAt,
        ])
        .values_panic([
            plan_code.into(),
            plan.family_id.into(),
            plan.meal_type.into(),
            plan.meal_date.into(),
            plan.submission_cnt.into(),
            plan.plan_json.into(),
            plan.plan_html.into(),
            plan.model_raw.into(),
            plan.meal_code.into(),
            plan.comment.into(),
            created_at.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_with(&sql, values)
        .execute(conn)
        .await?
        .last_insert_rowid())
}
