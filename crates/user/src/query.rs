use meal_planner_db::table::{Family, FamilyMember, User};
use sea_query::{Alias, Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqlitePool, prelude::FromRow};

#[derive(Clone)]
pub struct Query(pub SqlitePool);

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserView {
    pub user_id: String,
    pub user_name: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct JoinedFamily {
    pub family_id: String,
    pub family_name: String,
    pub role: String,
    pub display_name: String,
    pub is_primary_today: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserDetail {
    pub user_id: String,
    pub user_name: String,
    pub joined_families: Vec<JoinedFamily>,
}

fn joined_families_statement(user_id: String) -> sea_query::SelectStatement {
    sea_query::Query::select()
        .expr_as(Expr::col((Family::Table, Family::Id)), Alias::new("family_id"))
        .expr_as(Expr::col((Family::Table, Family::Name)), Alias::new("family_name"))
        .column((FamilyMember::Table, FamilyMember::Role))
        .column((FamilyMember::Table, FamilyMember::DisplayName))
        .column((FamilyMember::Table, FamilyMember::IsPrimaryToday))
        .from(Family::Table)
        .inner_join(
            FamilyMember::Table,
            Expr::col((Family::Table, Family::Id))
                .equals((FamilyMember::Table, FamilyMember::FamilyId)),
        )
        .and_where(Expr::col((FamilyMember::Table, FamilyMember::UserId)).eq(user_id))
        .order_by((Family::Table, Family::Id), Order::Asc)
        .to_owned()
}

impl Query {
    pub async fn find(&self, user_id: impl Into<String>) -> anyhow::Result<Option<UserView>> {
        let statement = sea_query::Query::select()
            .expr_as(Expr::col(User::Id), Alias::new("user_id"))
            .column(User::UserName)
            .from(User::Table)
            .and_where(Expr::col(User::Id).eq(user_id.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, UserView, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }

    pub async fn exists(&self, user_id: impl Into<String>) -> anyhow::Result<bool> {
        Ok(self.find(user_id).await?.is_some())
    }

    pub async fn families(&self, user_id: impl Into<String>) -> anyhow::Result<Vec<JoinedFamily>> {
        let statement = joined_families_statement(user_id.into());
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, JoinedFamily, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    /// Families created by the user where they still hold the holder role.
    pub async fn owned_families(
        &self,
        user_id: impl Into<String>,
    ) -> anyhow::Result<Vec<JoinedFamily>> {
        let user_id = user_id.into();
        let mut statement = joined_families_statement(user_id.to_owned());
        statement
            .and_where(Expr::col((Family::Table, Family::CreatedBy)).eq(user_id))
            .and_where(
                Expr::col((FamilyMember::Table, FamilyMember::Role))
                    .eq(meal_planner_shared::HOLDER),
            );

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, JoinedFamily, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    pub async fn detail(&self, user_id: impl Into<String>) -> anyhow::Result<Option<UserDetail>> {
        let user_id = user_id.into();
        let Some(user) = self.find(&user_id).await? else {
            return Ok(None);
        };

        let joined_families = self.families(user_id).await?;

        Ok(Some(UserDetail {
            user_id: user.user_id,
            user_name: user.user_name,
            joined_families,
        }))
    }
}
