use meal_planner_db::table::Message;
use sea_query::{Alias, Expr, ExprTrait, Func, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqlitePool, prelude::FromRow};

#[derive(Clone)]
pub struct Query(pub SqlitePool);

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InboxMessage {
    pub id: i64,
    #[serde(rename = "type")]
    pub message_type: String,
    pub title: String,
    pub content: String,
    pub action_url: Option<String>,
    #[serde(rename = "read")]
    pub is_read: bool,
    #[serde(rename = "timestamp")]
    pub created_at: i64,
}

impl Query {
    pub async fn inbox(&self, user_id: impl Into<String>) -> anyhow::Result<Vec<InboxMessage>> {
        let statement = sea_query::Query::select()
            .columns([
                Message::Id,
                Message::MessageType,
                Message::Title,
                Message::Content,
                Message::ActionUrl,
                Message::IsRead,
                Message::CreatedAt,
            ])
            .from(Message::Table)
            .and_where(Expr::col(Message::UserId).eq(user_id.into()))
            .order_by(Message::CreatedAt, Order::Desc)
            .order_by(Message::Id, Order::Desc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, InboxMessage, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    pub async fn unread_count(&self, user_id: impl Into<String>) -> anyhow::Result<i64> {
        let statement = sea_query::Query::select()
            .expr_as(Func::count(Expr::col(Message::Id)), Alias::new("total"))
            .from(Message::Table)
            .and_where(Expr::col(Message::UserId).eq(user_id.into()))
            .and_where(Expr::col(Message::IsRead).eq(false))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_scalar_with::<_, i64, _>(&sql, values)
            .fetch_one(&self.0)
            .await?)
    }
}
