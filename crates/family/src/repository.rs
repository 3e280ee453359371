use meal_planner_db::table::{Family, FamilyMember, User};
use sea_query::{Alias, Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqliteConnection, SqlitePool, prelude::FromRow};

#[derive(Debug, FromRow)]
pub struct FamilyRow {
    pub id: String,
    pub name: String,
    pub created_by: String,
    pub active_meal_date: Option<String>,
    pub active_meal_type: Option<String>,
    pub active_updated_by: Option<String>,
    pub active_updated_at: Option<i64>,
}

#[derive(Debug, FromRow)]
pub struct MemberRow {
    pub family_id: String,
    pub user_id: String,
    pub role: String,
    pub display_name: String,
}

pub(crate) async fn find(
    pool: &SqlitePool,
    id: impl Into<String>,
) -> meal_planner_shared::Result<Option<FamilyRow>> {
    let statement = Query::select()
        .columns([
            Family::Id,
            Family::Name,
            Family::CreatedBy,
            Family::ActiveMealDate,
            Family::ActiveMealType,
            Family::ActiveUpdatedBy,
            Family::ActiveUpdatedAt,
        ])
        .from(Family::Table)
        .and_where(Expr::col(Family::Id).eq(id.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, FamilyRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub(crate) async fn find_user_name(
    pool: &SqlitePool,
    user_id: impl Into<String>,
) -> meal_planner_shared::Result<Option<String>> {
    let statement = Query::select()
        .column(User::UserName)
        .from(User::Table)
        .and_where(Expr::col(User::Id).eq(user_id.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_scalar_with::<_, String, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub(crate) async fn find_member(
    pool: &SqlitePool,
    family_id: impl Into<String>,
    user_id: impl Into<String>,
) -> meal_planner_shared::Result<Option<MemberRow>> {
    let statement = Query::select()
        .columns([
            FamilyMember::FamilyId,
            FamilyMember::UserId,
            FamilyMember::Role,
            FamilyMember::DisplayName,
        ])
        .from(FamilyMember::Table)
        .and_where(Expr::col(FamilyMember::FamilyId).eq(family_id.into()))
        .and_where(Expr::col(FamilyMember::UserId).eq(user_id.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, MemberRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub(crate) async fn is_holder(
    pool: &SqlitePool,
    family_id: impl Into<String>,
    user_id: impl Into<String>,
) -> meal_planner_shared::Result<bool> {
    Ok(find_member(pool, family_id, user_id)
        .await?
        .is_some_and(|member| member.role == meal_planner_shared::HOLDER))
}

/// True when the user already belongs to a family carrying this name.
pub(crate) async fn has_family_named(
    pool: &SqlitePool,
    user_id: impl Into<String>,
    family_name: impl Into<String>,
) -> meal_planner_shared::Result<bool> {
    let statement = Query::select()
        .expr_as(Expr::col((Family::Table, Family::Id)), Alias::new("id"))
        .from(Family::Table)
        .inner_join(
            FamilyMember::Table,
            Expr::col((Family::Table, Family::Id))
                .equals((FamilyMember::Table, FamilyMember::FamilyId)),
        )
        .and_where(Expr::col((FamilyMember::Table, FamilyMember::UserId)).eq(user_id.into()))
        .and_where(Expr::col((Family::Table, Family::Name)).eq(family_name.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_scalar_with::<_, String, _>(&sql, values)
        .fetch_optional(pool)
        .await?
        .is_some())
}

pub(crate) async fn insert_member(
    conn: &mut SqliteConnection,
    member: MemberRow,
) -> meal_planner_shared::Result<()> {
    let statement = Query::insert()
        .into_table(FamilyMember::Table)
        .columns([
            FamilyMember::FamilyId,
            FamilyMember::UserId,
            FamilyMember::Role,
            FamilyMember::DisplayName,
            FamilyMember::IsPrimaryToday,
            FamilyMember::CreatedAt,
        ])
        .values_panic([
            member.family_id.into(),
            member.user_id.into(),
            member.role.into(),
            member.display_name.into(),
            false.into(),
            meal_planner_shared::now().into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(conn).await?;

    Ok(())
}
