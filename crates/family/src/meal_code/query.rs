use meal_planner_db::table::{Family, FamilyMember, MealCode};
use sea_query::{Alias, Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;

use crate::repository;

#[derive(Debug, Clone, Serialize)]
pub struct MealCodeLookup {
    pub family_id: String,
    pub family_name: String,
    pub participant_count: u32,
    pub meal_date: String,
    pub meal_type: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct IssuedMealCode {
    pub meal_code: String,
    pub family_id: String,
    pub family_name: String,
    pub meal_date: String,
    pub meal_type: String,
}

#[derive(FromRow)]
struct StoredCode {
    family_id: String,
    meal_type: String,
}

fn issued_statement() -> sea_query::SelectStatement {
    sea_query::Query::select()
        .expr_as(Expr::col((MealCode::Table, MealCode::Code)), Alias::new("meal_code"))
        .column((MealCode::Table, MealCode::FamilyId))
        .expr_as(Expr::col((Family::Table, Family::Name)), Alias::new("family_name"))
        .column((MealCode::Table, MealCode::MealDate))
        .column((MealCode::Table, MealCode::MealType))
        .from(MealCode::Table)
        .inner_join(
            Family::Table,
            Expr::col((MealCode::Table, MealCode::FamilyId)).equals((Family::Table, Family::Id)),
        )
        .to_owned()
}

impl crate::Query {
    /// Decodes a code and resolves its family. The meal type comes from the
    /// issued code, `dinner` when the code was never issued here.
    pub async fn lookup_meal_code(&self, code: &str) -> meal_planner_shared::Result<MealCodeLookup> {
        if code.len() != super::CODE_LEN {
            meal_planner_shared::user!("Invalid meal code format");
        }

        let decoded = super::decode(code)?;

        let statement = sea_query::Query::select()
            .columns([MealCode::FamilyId, MealCode::MealType])
            .from(MealCode::Table)
            .and_where(Expr::col(MealCode::Code).eq(code))
            .order_by(MealCode::Id, Order::Desc)
            .limit(1)
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let stored = sqlx::query_as_with::<_, StoredCode, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?;

        let (family_id, meal_type) = match stored {
            Some(stored) => (stored.family_id, stored.meal_type),
            None => (
                decoded.family_id,
                meal_planner_shared::MealType::Dinner.to_string(),
            ),
        };

        let Some(family) = repository::find(&self.0, &family_id).await? else {
            meal_planner_shared::not_found!("Family not found");
        };

        Ok(MealCodeLookup {
            family_id: family.id,
            family_name: family.name,
            participant_count: decoded.participant_count,
            meal_date: meal_planner_shared::format_date(decoded.meal_date),
            meal_type,
        })
    }

    pub async fn issued_meal_code(&self, code: &str) -> anyhow::Result<Option<IssuedMealCode>> {
        let statement = issued_statement()
            .and_where(Expr::col((MealCode::Table, MealCode::Code)).eq(code))
            .order_by((MealCode::Table, MealCode::Id), Order::Desc)
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, IssuedMealCode, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }

    /// Upcoming codes of every family the user holds.
    pub async fn holder_meal_codes(
        &self,
        user_id: &str,
        from_date: &str,
    ) -> anyhow::Result<Vec<IssuedMealCode>> {
        let statement = issued_statement()
            .inner_join(
                FamilyMember::Table,
                Expr::col((Family::Table, Family::Id))
                    .equals((FamilyMember::Table, FamilyMember::FamilyId)),
            )
            .and_where(Expr::col((FamilyMember::Table, FamilyMember::UserId)).eq(user_id))
            .and_where(
                Expr::col((FamilyMember::Table, FamilyMember::Role))
                    .eq(meal_planner_shared::HOLDER),
            )
            .and_where(Expr::col((MealCode::Table, MealCode::MealDate)).gte(from_date))
            .order_by((MealCode::Table, MealCode::MealDate), Order::Asc)
            .order_by((MealCode::Table, MealCode::MealType), Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, IssuedMealCode, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }
}
