use meal_planner_db::table::User;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};

#[derive(FromRow)]
pub struct UserRow {
    pub id: String,
    pub user_name: String,
    pub password: String,
}

pub(crate) async fn find(
    pool: &SqlitePool,
    id: impl Into<String>,
) -> meal_planner_shared::Result<Option<UserRow>> {
    let statement = Query::select()
        .columns([User::Id, User::UserName, User::Password])
        .from(User::Table)
        .and_where(Expr::col(User::Id).eq(id.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, UserRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub(crate) async fn create(
    pool: &SqlitePool,
    id: String,
    user_name: String,
    password: String,
) -> meal_planner_shared::Result<()> {
    let statement = Query::insert()
        .into_table(User::Table)
        .columns([User::Id, User::UserName, User::Password, User::CreatedAt])
        .values_panic([
            id.into(),
            user_name.into(),
            password.into(),
            meal_planner_shared::now().into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

pub(crate) async fn update_name(
    pool: &SqlitePool,
    id: String,
    user_name: String,
) -> meal_planner_shared::Result<()> {
    let statement = Query::update()
        .table(User::Table)
        .values([(User::UserName, user_name.into())])
        .and_where(Expr::col(User::Id).eq(id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}
