use meal_planner_db::table::{Family, FamilyMember, User};
use sea_query::{Alias, Expr, ExprTrait, Func, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqlitePool, prelude::FromRow};

#[derive(Clone)]
pub struct Query(pub SqlitePool);

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FamilyView {
    pub family_id: String,
    pub family_name: String,
    pub created_by: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Member {
    pub user_id: String,
    pub role: String,
    pub display_name: String,
    pub user_name: String,
}

impl Query {
    pub async fn find(&self, family_id: &str) -> anyhow::Result<Option<FamilyView>> {
        let statement = sea_query::Query::select()
            .expr_as(Expr::col(Family::Id), Alias::new("family_id"))
            .expr_as(Expr::col(Family::Name), Alias::new("family_name"))
            .column(Family::CreatedBy)
            .from(Family::Table)
            .and_where(Expr::col(Family::Id).eq(family_id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, FamilyView, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }

    /// Members ordered by role then display name.
    pub async fn members(&self, family_id: &str) -> anyhow::Result<Vec<Member>> {
        let statement = sea_query::Query::select()
            .column((FamilyMember::Table, FamilyMember::UserId))
            .column((FamilyMember::Table, FamilyMember::Role))
            .column((FamilyMember::Table, FamilyMember::DisplayName))
            .column((User::Table, User::UserName))
            .from(FamilyMember::Table)
            .inner_join(
                User::Table,
                Expr::col((FamilyMember::Table, FamilyMember::UserId))
                    .equals((User::Table, User::Id)),
            )
            .and_where(Expr::col((FamilyMember::Table, FamilyMember::FamilyId)).eq(family_id))
            .order_by((FamilyMember::Table, FamilyMember::Role), Order::Asc)
            .order_by((FamilyMember::Table, FamilyMember::DisplayName), Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, Member, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    pub async fn is_holder(&self, family_id: &str, user_id: &str) -> anyhow::Result<bool> {
        Ok(crate::repository::is_holder(&self.0, family_id, user_id).await?)
    }

    /// Display name of a member, if they belong to the family.
    pub async fn display_name(
        &self,
        family_id: &str,
        user_id: &str,
    ) -> anyhow::Result<Option<String>> {
        Ok(crate::repository::find_member(&self.0, family_id, user_id)
            .await?
            .map(|member| member.display_name))
    }

    /// Other people who joined any of the user's families since `since`.
    pub async fn new_members_count(&self, user_id: &str, since: i64) -> anyhow::Result<i64> {
        let families = sea_query::Query::select()
            .column(FamilyMember::FamilyId)
            .from(FamilyMember::Table)
            .and_where(Expr::col(FamilyMember::UserId).eq(user_id))
            .to_owned();

        let statement = sea_query::Query::select()
            .expr_as(Func::count(Expr::col(FamilyMember::UserId)), Alias::new("total"))
            .from(FamilyMember::Table)
            .and_where(Expr::col(FamilyMember::FamilyId).in_subquery(families))
            .and_where(Expr::col(FamilyMember::UserId).ne(user_id))
            .and_where(Expr::col(FamilyMember::CreatedAt).gt(since))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_scalar_with::<_, i64, _>(&sql, values)
            .fetch_one(&self.0)
            .await?)
    }
}
