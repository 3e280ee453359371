use meal_planner_db::table::Message;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqliteConnection;

#[derive(Debug, Clone)]
pub struct SendInput {
    pub user_id: String,
    pub message_type: String,
    pub title: String,
    pub content: String,
    pub action_url: Option<String>,
}

pub(crate) async fn insert(
    conn: &mut SqliteConnection,
    input: SendInput,
) -> meal_planner_shared::Result<i64> {
    let statement = Query::insert()
        .into_table(Message::Table)
        .columns([
            Message::UserId,
            Message::MessageType,
            Message::Title,
            Message::Content,
            Message::ActionUrl,
            Message::IsRead,
            Message::CreatedAt,
        ])
        .values_panic([
            input.user_id.into(),
            input.message_type.into(),
            input.title.into(),
            input.content.into(),
            input.action_url.into(),
            false.into(),
            meal_planner_shared::now().into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_with(&sql, values)
        .execute(conn)
        .await?
        .last_insert_rowid())
}

impl super::Command {
    pub async fn send(&self, input: SendInput) -> meal_planner_shared::Result<i64> {
        if input.user_id.trim().is_empty() || input.title.trim().is_empty() {
            meal_planner_shared::user!("user_id and title are required");
        }

        let mut conn = self.write_db.acquire().await?;

        insert(&mut *conn, input).await
    }

    pub async fn mark_read(&self, id: i64) -> meal_planner_shared::Result<()> {
        let statement = Query::update()
            .table(Message::Table)
            .values([(Message::IsRead, true.into())])
            .and_where(Expr::col(Message::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }

    pub async fn mark_all_read(&self, user_id: impl Into<String>) -> meal_planner_shared::Result<u64> {
        let statement = Query::update()
            .table(Message::Table)
            .values([(Message::IsRead, true.into())])
            .and_where(Expr::col(Message::UserId).eq(user_id.into()))
            .and_where(Expr::col(Message::IsRead).eq(false))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?
            .rows_affected())
    }
}
