use meal_planner_db::table::Plan;
use sea_query::{Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use serde_json::Value;

use crate::repository::{self, PlanRow};

/// A stored plan with its JSON parsed.
#[derive(Debug, Clone, Serialize)]
pub struct PlanRecord {
    pub id: i64,
    pub plan_code: String,
    pub family_id: String,
    pub meal_type: String,
    pub meal_date: String,
    pub submission_cnt: i64,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub plan_json: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_raw: Option<String>,
    pub meal_code: String,
    pub comment: String,
    pub created_at: i64,
}

fn parse_plan_json(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::Object(Default::default()))
}

impl PlanRecord {
    fn full(row: PlanRow) -> Self {
        Self {
            plan_json: parse_plan_json(&row.plan_json),
            plan_html: Some(row.plan_html),
            model_raw: Some(row.model_raw),
            id: row.id,
            plan_code: row.plan_code,
            family_id: row.family_id,
            meal_type: row.meal_type,
            meal_date: row.meal_date,
            submission_cnt: row.submission_cnt,
            meal_code: row.meal_code,
            comment: row.comment,
            created_at: row.created_at,
        }
    }

    fn without_model_raw(row: PlanRow) -> Self {
        Self {
            model_raw: None,
            ..Self::full(row)
        }
    }

    fn summary(row: PlanRow, with_json: bool) -> Self {
        Self {
            plan_json: if with_json {
                parse_plan_json(&row.plan_json)
            } else {
                Value::Null
            },
            plan_html: None,
            model_raw: None,
            ..Self::full(row)
        }
    }
}

impl super::Query {
    pub async fn get(&self, id: i64) -> anyhow::Result<Option<PlanRecord>> {
        let mut conn = self.0.acquire().await?;
        let row = repository::find(&mut conn, id).await?;

        Ok(row.map(PlanRecord::without_model_raw))
    }

    /// Newest first. Without `with_json` the plan body is left out.
    pub async fn by_family(&self, family_id: &str, with_json: bool) -> anyhow::Result<Vec<PlanRecord>> {
        let statement = repository::select_plans()
            .and_where(Expr::col(Plan::FamilyId).eq(family_id))
            .order_by(Plan::Id, Order::Desc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        let rows = sqlx::query_as_with::<_, PlanRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| PlanRecord::summary(row, with_json))
            .collect())
    }

    /// Most recent plan for a meal date.
    pub async fn latest(&self, meal_date: &str) -> anyhow::Result<Option<PlanRecord>> {
        let statement = repository::select_plans()
            .and_where(Expr::col(Plan::MealDate).eq(meal_date))
            .order_by(Plan::Id, Order::Desc)
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, PlanRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?
            .map(PlanRecord::full))
    }

    pub async fn by_meal_code(&self, meal_code: &str) -> anyhow::Result<Vec<PlanRecord>> {
        let statement = repository::select_plans()
            .and_where(Expr::col(Plan::MealCode).eq(meal_code))
            .order_by(Plan::CreatedAt, Order::Desc)
            .order_by(Plan::Id, Order::Desc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        let rows = sqlx::query_as_with::<_, PlanRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        Ok(rows.into_iter().map(PlanRecord::full).collect())
    }
}
