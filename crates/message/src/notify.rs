use std::collections::BTreeSet;

use meal_planner_db::table::{Family, FamilyMember, Submission};
use meal_planner_shared::MealType;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::send::{SendInput, insert};

#[derive(Debug, Clone)]
pub struct PlanGeneratedInput {
    pub family_id: String,
    pub plan_id: i64,
    pub meal_type: MealType,
    pub meal_date: String,
}

impl super::Command {
    /// Notifies every family member and every submitter of the meal session.
    /// Returns the number of users notified.
    #[tracing::instrument(skip_all, fields(family_id = %input.family_id, plan_id = input.plan_id))]
    pub async fn notify_plan_generated(
        &self,
        input: PlanGeneratedInput,
    ) -> meal_planner_shared::Result<usize> {
        let members = Query::select()
            .column(FamilyMember::UserId)
            .from(FamilyMember::Table)
            .and_where(Expr::col(FamilyMember::FamilyId).eq(input.family_id.as_str()))
            .to_owned();
        let (sql, values) = members.build_sqlx(SqliteQueryBuilder);
        let mut recipients: BTreeSet<String> = sqlx::query_scalar_with::<_, String, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?
            .into_iter()
            .collect();

        let submitters = Query::select()
            .column(Submission::UserId)
            .from(Submission::Table)
            .and_where(Expr::col(Submission::FamilyId).eq(input.family_id.as_str()))
            .and_where(Expr::col(Submission::MealDate).eq(input.meal_date.as_str()))
            .and_where(Expr::col(Submission::MealType).eq(input.meal_type.to_string()))
            .to_owned();
        let (sql, values) = submitters.build_sqlx(SqliteQueryBuilder);
        recipients.extend(
            sqlx::query_scalar_with::<_, String, _>(&sql, values)
                .fetch_all(&self.read_db)
                .await?,
        );

        if recipients.is_empty() {
            return Ok(0);
        }

        let family_name = Query::select()
            .column(Family::Name)
            .from(Family::Table)
            .and_where(Expr::col(Family::Id).eq(input.family_id.as_str()))
            .limit(1)
            .to_owned();
        let (sql, values) = family_name.build_sqlx(SqliteQueryBuilder);
        let family_name = sqlx::query_scalar_with::<_, String, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?
            .unwrap_or_else(|| input.family_id.to_owned());

        let title = format!("Meal Plan Generated - {}", input.meal_type.title());
        let content = format!(
            "Your {} plan for {} on {} has been generated successfully! Click to view the detailed meal plan.",
            input.meal_type, family_name, input.meal_date
        );
        let action_url = format!("history.html?tab=plans&planId={}", input.plan_id);

        let mut tx = self.write_db.begin().await?;
        for user_id in recipients.iter() {
            insert(
                &mut *tx,
                SendInput {
                    user_id: user_id.to_owned(),
                    message_type: crate::PLAN_GENERATED.to_owned(),
                    title: title.to_owned(),
                    content: content.to_owned(),
                    action_url: Some(action_url.to_owned()),
                },
            )
            .await?;
        }
        tx.commit().await?;

        tracing::info!(count = recipients.len(), "plan notifications sent");

        Ok(recipients.len())
    }
}
