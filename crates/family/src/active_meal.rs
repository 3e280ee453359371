use meal_planner_db::table::Family;
use meal_planner_shared::MealType;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use time::{OffsetDateTime, Time, macros::time};

use crate::{MealTimes, repository};

#[derive(Debug, Clone, Serialize)]
pub struct ActiveMeal {
    pub family_id: String,
    pub meal_date: Option<String>,
    pub meal_type: Option<String>,
    pub updated_by: Option<String>,
    pub updated_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveContext {
    pub family_id: String,
    pub meal_date: String,
    pub meal_type: MealType,
}

pub struct SetActiveMealInput {
    pub family_id: String,
    pub user_id: String,
    pub meal_date: String,
    pub meal_type: String,
}

/// Picks the meal in progress from the family's start times.
pub fn infer_meal_type(times: Option<&MealTimes>, now: Time) -> MealType {
    let Some(times) = times else {
        return MealType::Dinner;
    };

    let lunch = meal_planner_shared::parse_hhmm(&times.lunch).unwrap_or(time!(11:00));
    let dinner = meal_planner_shared::parse_hhmm(&times.dinner).unwrap_or(time!(17:00));

    if now < lunch {
        MealType::Breakfast
    } else if now < dinner {
        MealType::Lunch
    } else {
        MealType::Dinner
    }
}

impl super::Command {
    #[tracing::instrument(skip_all, fields(family_id = %input.family_id, user_id = %input.user_id))]
    pub async fn set_active_meal(
        &self,
        input: SetActiveMealInput,
    ) -> meal_planner_shared::Result<ActiveContext> {
        if repository::find(&self.read_db, &input.family_id).await?.is_none() {
            meal_planner_shared::not_found!("Family not found");
        }

        if !repository::is_holder(&self.read_db, &input.family_id, &input.user_id).await? {
            meal_planner_shared::forbidden!("Only family holder can set active meal");
        }

        let meal_type = MealType::parse(&input.meal_type)?;
        let meal_date = meal_planner_shared::parse_date(&input.meal_date)?;
        let meal_date = meal_planner_shared::format_date(meal_date);

        let statement = Query::update()
            .table(Family::Table)
            .values([
                (Family::ActiveMealDate, meal_date.as_str().into()),
                (Family::ActiveMealType, meal_type.to_string().into()),
                (Family::ActiveUpdatedBy, input.user_id.into()),
                (Family::ActiveUpdatedAt, meal_planner_shared::now().into()),
            ])
            .and_where(Expr::col(Family::Id).eq(input.family_id.as_str()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(ActiveContext {
            family_id: input.family_id,
            meal_date,
            meal_type,
        })
    }
}

impl super::Query {
    pub async fn active_meal(&self, family_id: &str) -> anyhow::Result<Option<ActiveMeal>> {
        let Some(family) = repository::find(&self.0, family_id).await? else {
            return Ok(None);
        };

        Ok(Some(ActiveMeal {
            family_id: family.id,
            meal_date: family.active_meal_date,
            meal_type: family.active_meal_type,
            updated_by: family.active_updated_by,
            updated_at: family.active_updated_at,
        }))
    }

    /// The holder's active meal, else a guess from the meal times at `now`.
    pub async fn active_context(
        &self,
        family_id: &str,
        now: OffsetDateTime,
    ) -> anyhow::Result<Option<ActiveContext>> {
        let Some(family) = repository::find(&self.0, family_id).await? else {
            return Ok(None);
        };

        let active_type = family
            .active_meal_type
            .as_deref()
            .and_then(|value| MealType::parse(value).ok());

        if let (Some(meal_date), Some(meal_type)) = (family.active_meal_date, active_type) {
            return Ok(Some(ActiveContext {
                family_id: family.id,
                meal_date,
                meal_type,
            }));
        }

        let times = self.stored_meal_times(family_id).await?;

        Ok(Some(ActiveContext {
            family_id: family.id,
            meal_date: meal_planner_shared::format_date(now.date()),
            meal_type: infer_meal_type(times.as_ref(), now.time()),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_from_meal_times() {
        let times = MealTimes::default();

        assert_eq!(infer_meal_type(Some(&times), time!(07:00)), MealType::Breakfast);
        assert_eq!(infer_meal_type(Some(&times), time!(10:59)), MealType::Breakfast);
        assert_eq!(infer_meal_type(Some(&times), time!(11:00)), MealType::Lunch);
        assert_eq!(infer_meal_type(Some(&times), time!(17:29)), MealType::Lunch);
        assert_eq!(infer_meal_type(Some(&times), time!(17:30)), MealType::Dinner);
        assert_eq!(infer_meal_type(None, time!(09:00)), MealType::Dinner);

        let broken = MealTimes {
            breakfast: "x".to_owned(),
            lunch: "x".to_owned(),
            dinner: "x".to_owned(),
        };
        assert_eq!(infer_meal_type(Some(&broken), time!(16:59)), MealType::Lunch);
        assert_eq!(infer_meal_type(Some(&broken), time!(17:00)), MealType::Dinner);
    }
}
