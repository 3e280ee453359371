use std::collections::HashMap;

use meal_planner_db::table::{CookingPreference, FamilyMember, User};
use sea_query::{Alias, Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;

#[derive(Debug, FromRow)]
struct MemberRow {
    user_id: String,
    user_name: String,
    display_name: String,
    role: String,
}

#[derive(Debug, FromRow)]
struct PreferenceRow {
    user_id: String,
    preference: String,
    updated_at: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberPreference {
    pub user_id: String,
    pub user_name: String,
    pub display_name: String,
    pub role: String,
    pub preference: Option<serde_json::Value>,
    pub updated_at: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergedPreference {
    pub user_id: String,
    pub family_id: String,
    pub preference: serde_json::Value,
    pub updated_at: Option<i64>,
}

impl crate::Query {
    /// Every member in join order, paired with their most recent preference.
    pub async fn family_preferences(
        &self,
        family_id: &str,
    ) -> anyhow::Result<Vec<MemberPreference>> {
        let statement = sea_query::Query::select()
            .column((FamilyMember::Table, FamilyMember::UserId))
            .column((User::Table, User::UserName))
            .column((FamilyMember::Table, FamilyMember::DisplayName))
            .column((FamilyMember::Table, FamilyMember::Role))
            .from(FamilyMember::Table)
            .inner_join(
                User::Table,
                Expr::col((FamilyMember::Table, FamilyMember::UserId))
                    .equals((User::Table, User::Id)),
            )
            .and_where(Expr::col((FamilyMember::Table, FamilyMember::FamilyId)).eq(family_id))
            .order_by((FamilyMember::Table, FamilyMember::CreatedAt), Order::Asc)
            .order_by((FamilyMember::Table, Alias::new("rowid")), Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let members = sqlx::query_as_with::<_, MemberRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        if members.is_empty() {
            return Ok(vec![]);
        }

        let statement = sea_query::Query::select()
            .columns([
                CookingPreference::UserId,
                CookingPreference::Preference,
                CookingPreference::UpdatedAt,
            ])
            .from(CookingPreference::Table)
            .and_where(Expr::col(CookingPreference::FamilyId).eq(family_id))
            .order_by(CookingPreference::UpdatedAt, Order::Asc)
            .order_by(CookingPreference::Id, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let latest = sqlx::query_as_with::<_, PreferenceRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?
            .into_iter()
            .map(|row| (row.user_id.to_owned(), row))
            .collect::<HashMap<_, _>>();

        Ok(members
            .into_iter()
            .map(|member| {
                let saved = latest.get(&member.user_id);

                MemberPreference {
                    preference: saved.map(|row| crate::parse_json_object(Some(&row.preference))),
                    updated_at: saved.map(|row| row.updated_at),
                    user_id: member.user_id,
                    user_name: member.user_name,
                    display_name: member.display_name,
                    role: member.role,
                }
            })
            .collect())
    }

    /// Latest saved preference of one member, normalized; `{}` when none was saved.
    pub async fn merged_preference(
        &self,
        family_id: &str,
        user_id: &str,
    ) -> anyhow::Result<MergedPreference> {
        let statement = sea_query::Query::select()
            .columns([
                CookingPreference::UserId,
                CookingPreference::Preference,
                CookingPreference::UpdatedAt,
            ])
            .from(CookingPreference::Table)
            .and_where(Expr::col(CookingPreference::FamilyId).eq(family_id))
            .and_where(Expr::col(CookingPreference::UserId).eq(user_id))
            .order_by(CookingPreference::UpdatedAt, Order::Desc)
            .order_by(CookingPreference::Id, Order::Desc)
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, PreferenceRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?;

        let preference = crate::parse_json_object(row.as_ref().map(|row| row.preference.as_str()));

        Ok(MergedPreference {
            user_id: user_id.to_owned(),
            family_id: family_id.to_owned(),
            preference: super::normalize(&preference),
            updated_at: row.map(|row| row.updated_at),
        })
    }
}
