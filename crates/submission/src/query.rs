use meal_planner_db::table::{Family, Submission, User};
use meal_planner_shared::MealType;
use sea_query::{Alias, Expr, ExprTrait, Func, Order, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;

#[derive(Debug, FromRow)]
struct SubmissionRow {
    id: i64,
    family_id: String,
    family_name: Option<String>,
    user_id: String,
    user_name: Option<String>,
    role: String,
    display_name: String,
    age: Option<i64>,
    meal_date: String,
    meal_type: String,
    preferences: String,
    drinks: Option<String>,
    remark: Option<String>,
    participant_count: i64,
    created_at: i64,
    updated_at: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionView {
    pub id: i64,
    pub family_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    pub role: String,
    pub display_name: String,
    pub age: Option<i64>,
    pub meal_date: String,
    pub meal_type: String,
    pub preferences: serde_json::Value,
    pub drinks: Option<String>,
    pub remark: Option<String>,
    pub participant_count: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<SubmissionRow> for SubmissionView {
    fn from(row: SubmissionRow) -> Self {
        Self {
            preferences: crate::parse_json_object(Some(&row.preferences)),
            id: row.id,
            family_id: row.family_id,
            family_name: row.family_name,
            user_id: row.user_id,
            user_name: row.user_name,
            role: row.role,
            display_name: row.display_name,
            age: row.age,
            meal_date: row.meal_date,
            meal_type: row.meal_type,
            drinks: row.drinks,
            remark: row.remark,
            participant_count: row.participant_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SubmissionCount {
    pub submission_count: i64,
}

fn select_submissions() -> SelectStatement {
    sea_query::Query::select()
        .columns([
            (Submission::Table, Submission::Id),
            (Submission::Table, Submission::FamilyId),
            (Submission::Table, Submission::UserId),
            (Submission::Table, Submission::Role),
            (Submission::Table, Submission::DisplayName),
            (Submission::Table, Submission::Age),
            (Submission::Table, Submission::MealDate),
            (Submission::Table, Submission::MealType),
            (Submission::Table, Submission::Preferences),
            (Submission::Table, Submission::Drinks),
            (Submission::Table, Submission::Remark),
            (Submission::Table, Submission::ParticipantCount),
            (Submission::Table, Submission::CreatedAt),
            (Submission::Table, Submission::UpdatedAt),
        ])
        .expr_as(Expr::col((Family::Table, Family::Name)), Alias::new("family_name"))
        .expr_as(Expr::col((User::Table, User::UserName)), Alias::new("user_name"))
        .from(Submission::Table)
        .left_join(
            Family::Table,
            Expr::col((Submission::Table, Submission::FamilyId)).equals((Family::Table, Family::Id)),
        )
        .left_join(
            User::Table,
            Expr::col((Submission::Table, Submission::UserId)).equals((User::Table, User::Id)),
        )
        .to_owned()
}

impl super::Query {
    async fn fetch_all(&self, statement: SelectStatement) -> anyhow::Result<Vec<SubmissionView>> {
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, SubmissionRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?
            .into_iter()
            .map(SubmissionView::from)
            .collect())
    }

    /// A user's own submissions, newest first. `family_id = "all"` spans every family.
    pub async fn list_my(
        &self,
        family_id: &str,
        user_id: &str,
        limit: u64,
    ) -> anyhow::Result<Vec<SubmissionView>> {
        let mut statement = select_submissions();
        statement
            .and_where(Expr::col((Submission::Table, Submission::UserId)).eq(user_id))
            .order_by((Submission::Table, Submission::CreatedAt), Order::Desc)
            .order_by((Submission::Table, Submission::Id), Order::Desc)
            .limit(limit);

        if !family_id.eq_ignore_ascii_case("all") {
            statement.and_where(Expr::col((Submission::Table, Submission::FamilyId)).eq(family_id));
        }

        self.fetch_all(statement).await
    }

    pub async fn by_family(&self, family_id: &str) -> anyhow::Result<Vec<SubmissionView>> {
        let mut statement = select_submissions();
        statement
            .and_where(Expr::col((Submission::Table, Submission::FamilyId)).eq(family_id))
            .order_by((Submission::Table, Submission::CreatedAt), Order::Desc)
            .order_by((Submission::Table, Submission::Id), Order::Desc);

        self.fetch_all(statement).await
    }

    /// Every submission of the family on one day, grouped by meal.
    pub async fn at(&self, family_id: &str, meal_date: &str) -> anyhow::Result<Vec<SubmissionView>> {
        let mut statement = select_submissions();
        statement
            .and_where(Expr::col((Submission::Table, Submission::FamilyId)).eq(family_id))
            .and_where(Expr::col((Submission::Table, Submission::MealDate)).eq(meal_date))
            .order_by((Submission::Table, Submission::MealType), Order::Asc)
            .order_by((Submission::Table, Submission::Id), Order::Asc);

        self.fetch_all(statement).await
    }

    /// Submissions of one meal session in arrival order.
    pub async fn for_session(
        &self,
        family_id: &str,
        meal_date: &str,
        meal_type: MealType,
    ) -> anyhow::Result<Vec<SubmissionView>> {
        let mut statement = select_submissions();
        statement
            .and_where(Expr::col((Submission::Table, Submission::FamilyId)).eq(family_id))
            .and_where(Expr::col((Submission::Table, Submission::MealDate)).eq(meal_date))
            .and_where(
                Expr::col((Submission::Table, Submission::MealType)).eq(meal_type.to_string()),
            )
            .order_by((Submission::Table, Submission::Id), Order::Asc);

        self.fetch_all(statement).await
    }

    pub async fn count(&self, family_id: &str) -> anyhow::Result<i64> {
        let statement = sea_query::Query::select()
            .expr_as(Func::count(Expr::col(Submission::Id)), Alias::new("submission_count"))
            .from(Submission::Table)
            .and_where(Expr::col(Submission::FamilyId).eq(family_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_scalar_with::<_, i64, _>(&sql, values)
            .fetch_one(&self.0)
            .await?)
    }

    pub async fn get(&self, id: i64) -> anyhow::Result<Option<SubmissionView>> {
        let mut statement = select_submissions();
        statement
            .and_where(Expr::col((Submission::Table, Submission::Id)).eq(id))
            .limit(1);

        Ok(self.fetch_all(statement).await?.into_iter().next())
    }
}
