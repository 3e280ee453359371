use crate::{
    GeneratedPlan, Person, PlanRequest, coerce, create::Target, repository,
};

impl super::Command {
    /// Re-plans a meal from its session submissions with the plan's comment
    /// fed back as extra remarks. Holder only.
    #[tracing::instrument(skip(self))]
    pub async fn regenerate(
        &self,
        plan_id: i64,
        user_id: &str,
    ) -> meal_planner_shared::Result<GeneratedPlan> {
        let mut conn = self.read_db.acquire().await?;
        let Some(plan) = repository::find(&mut conn, plan_id).await? else {
            meal_planner_shared::not_found!("Plan not found");
        };
        drop(conn);

        let families = meal_planner_family::Query(self.read_db.clone());
        if !families.is_holder(&plan.family_id, user_id).await? {
            meal_planner_shared::forbidden!("Only family holder can regenerate plans");
        }

        let Some(family) = families.find(&plan.family_id).await? else {
            meal_planner_shared::not_found!("Family not found");
        };

        let target = Target::parse(&plan.family_id, &plan.meal_date, &plan.meal_type)?;

        let submissions = meal_planner_submission::Query(self.read_db.clone())
            .for_session(&target.family_id, &target.meal_date, target.meal_type)
            .await?;
        if submissions.is_empty() {
            meal_planner_shared::user!("No submissions found for regeneration");
        }

        let original: serde_json::Value = serde_json::from_str(&plan.plan_json).unwrap_or_default();
        let headcount = original
            .pointer("/meta/headcount")
            .and_then(serde_json::Value::as_i64)
            .unwrap_or_else(|| i64::try_from(submissions.len()).unwrap_or(i64::MAX));

        let feedback = plan.comment.trim();
        let people = submissions
            .into_iter()
            .map(|submission| {
                let mut person = Person::from_submission(&serde_json::to_value(&submission)?);
                person.person_role = meal_planner_shared::MEMBER.to_owned();
                person.display_name = submission.user_id;
                if !feedback.is_empty() {
                    person.remark = format!("{}\n\nPrevious feedback:\n{feedback}", person.remark)
                        .trim()
                        .to_owned();
                }

                Ok(person)
            })
            .collect::<Result<Vec<_>, serde_json::Error>>()?;

        let generated = self
            .generator
            .llm_plan(&PlanRequest {
                meal_date: &target.meal_date,
                meal_type: target.meal_type,
                headcount,
                people: &people,
            })
            .await;

        let mut doc = coerce(
            &generated.plan,
            &format!("{} {}", target.meal_date, target.meal_type.plan_time()),
            headcount,
            &target.family_id,
            &family.family_name,
        );
        doc.set_participants(i64::try_from(doc.dishes.len()).unwrap_or(i64::MAX));

        let regenerated = self
            .store(
                &target,
                doc,
                plan.submission_cnt,
                generated.model_raw,
                &plan.meal_code,
                &format!("Regenerated from plan #{plan_id}"),
            )
            .await?;

        tracing::info!(
            old_plan_id = plan_id,
            new_plan_id = regenerated.plan_id,
            "plan regenerated"
        );

        Ok(regenerated)
    }
}
