use meal_planner_shared::MealType;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
    Generated, Person, PlanDocument, PlanRequest, WheelRequest, apply_anchors, coerce,
    count_participants, headcount_for, inject_generation_reasons, render_plan_html,
    repository::{self, NewPlan},
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateInput {
    #[serde(default)]
    pub family_id: String,
    #[serde(default)]
    pub meal_date: String,
    #[serde(default)]
    pub meal_type: String,
    pub feedback: Option<String>,
    pub headcount: Option<i64>,
    pub submissions: Option<Vec<Value>>,
    pub anchors: Option<Vec<String>>,
    #[serde(default)]
    pub hard_lock: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngestInput {
    #[serde(default)]
    pub family_id: String,
    #[serde(default)]
    pub meal_date: String,
    #[serde(default)]
    pub meal_type: String,
    pub headcount: Option<i64>,
    #[serde(default)]
    pub payload: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedPlan {
    pub plan_id: i64,
    pub plan_json: PlanDocument,
    pub plan_html: String,
    pub family_id: String,
    pub meal_date: String,
    pub meal_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_cnt: Option<i64>,
}

/// Validated family, date and meal type shared by generate and ingest.
pub(crate) struct Target {
    pub family_id: String,
    pub meal_date: String,
    pub meal_type: MealType,
}

impl Target {
    pub(crate) fn parse(
        family_id: &str,
        meal_date: &str,
        meal_type: &str,
    ) -> meal_planner_shared::Result<Self> {
        if [family_id, meal_date, meal_type]
            .iter()
            .any(|value| value.trim().is_empty())
        {
            meal_planner_shared::user!("Missing family_id / meal_date / meal_type");
        }

        Ok(Self {
            family_id: family_id.trim().to_owned(),
            meal_date: meal_planner_shared::format_date(meal_planner_shared::parse_date(
                meal_date,
            )?),
            meal_type: MealType::parse(meal_type)?,
        })
    }

    pub(crate) fn dinner_time(&self) -> String {
        format!("{} {}:00", self.meal_date, self.meal_type.plan_time())
    }
}

impl super::Command {
    pub(crate) async fn family_name(&self, family_id: &str) -> anyhow::Result<String> {
        Ok(meal_planner_family::Query(self.read_db.clone())
            .find(family_id)
            .await?
            .map(|family| family.family_name)
            .unwrap_or_default())
    }

    pub(crate) async fn store(
        &self,
        target: &Target,
        doc: PlanDocument,
        submission_cnt: i64,
        model_raw: String,
        meal_code: &str,
        comment: &str,
    ) -> meal_planner_shared::Result<GeneratedPlan> {
        let plan_html = render_plan_html(&doc)?;
        let meal_type = target.meal_type.to_string();

        let mut conn = self.write_db.acquire().await?;
        let plan_id = repository::insert(
            &mut conn,
            NewPlan {
                family_id: &target.family_id,
                meal_type: &meal_type,
                meal_date: &target.meal_date,
                submission_cnt,
                plan_json: serde_json::to_string(&doc)?,
                plan_html: plan_html.to_owned(),
                model_raw,
                meal_code,
                comment,
            },
        )
        .await?;

        Ok(GeneratedPlan {
            plan_id,
            plan_json: doc,
            plan_html,
            family_id: target.family_id.to_owned(),
            meal_date: target.meal_date.to_owned(),
            meal_type,
            submission_cnt: None,
        })
    }

    /// Generates and stores a plan for one meal session. Wheel results take
    /// priority; otherwise the model (or the rule-based fallback) plans it.
    #[tracing::instrument(skip_all, fields(family_id = %input.family_id, meal_date = %input.meal_date))]
    pub async fn generate(&self, input: GenerateInput) -> meal_planner_shared::Result<GeneratedPlan> {
        let target = Target::parse(&input.family_id, &input.meal_date, &input.meal_type)?;

        let submissions = match input.submissions {
            Some(submissions) if !submissions.is_empty() => submissions,
            _ => meal_planner_submission::Query(self.read_db.clone())
                .for_session(&target.family_id, &target.meal_date, target.meal_type)
                .await?
                .into_iter()
                .map(serde_json::to_value)
                .collect::<Result<Vec<_>, _>>()?,
        };

        let people: Vec<Person> = submissions.iter().map(Person::from_submission).collect();
        let headcount = headcount_for(&people, input.headcount);

        let session = meal_planner_wheel::Session::new(
            &target.family_id,
            &target.meal_date,
            target.meal_type.as_ref(),
        )?;
        let wheel = meal_planner_wheel::Query(self.read_db.clone())
            .context(&session)
            .await?;

        let anchors = input.anchors.unwrap_or_default();

        let wheel_plan = if wheel.is_empty() {
            None
        } else {
            self.generator
                .wheel_plan(&WheelRequest {
                    context: &wheel,
                    forced_winner: anchors.first().map(String::as_str),
                    meal_date: &target.meal_date,
                    meal_type: target.meal_type,
                    headcount,
                    people: &people,
                })
                .await
        };

        let generated = match wheel_plan {
            Some(plan) => Generated {
                plan,
                model_raw: json!({"mode": "wheel-first"}).to_string(),
            },
            None => {
                self.generator
                    .llm_plan(&PlanRequest {
                        meal_date: &target.meal_date,
                        meal_type: target.meal_type,
                        headcount,
                        people: &people,
                    })
                    .await
            }
        };

        let family_name = self.family_name(&target.family_id).await?;
        let mut doc = coerce(
            &generated.plan,
            &target.dinner_time(),
            headcount,
            &target.family_id,
            &family_name,
        );
        inject_generation_reasons(&generated.plan, &mut doc);

        let participants = count_participants(&people)
            .max(i64::try_from(wheel.participants.len()).unwrap_or(i64::MAX));
        doc.set_participants(if participants > 0 { participants } else { headcount });
        apply_anchors(&mut doc, &anchors, input.hard_lock);

        let comment = input.feedback.as_deref().unwrap_or_default().trim().to_owned();
        let submission_cnt = i64::try_from(people.len()).unwrap_or(i64::MAX);

        let plan = self
            .store(&target, doc, submission_cnt, generated.model_raw, "", &comment)
            .await?;

        tracing::info!(plan_id = plan.plan_id, dishes = plan.plan_json.dishes.len(), "plan generated");

        Ok(plan)
    }

    /// Stores a plan produced elsewhere after normalizing it.
    #[tracing::instrument(skip_all, fields(family_id = %input.family_id, meal_date = %input.meal_date))]
    pub async fn ingest(&self, input: IngestInput) -> meal_planner_shared::Result<GeneratedPlan> {
        let target = Target::parse(&input.family_id, &input.meal_date, &input.meal_type)?;

        let family_name = self.family_name(&target.family_id).await?;
        let submission_cnt = meal_planner_submission::Query(self.read_db.clone())
            .count(&target.family_id)
            .await?;

        let mut doc = coerce(
            &input.payload,
            &format!("{} {}", target.meal_date, target.meal_type.plan_time()),
            input.headcount.unwrap_or(submission_cnt),
            &target.family_id,
            &family_name,
        );
        doc.set_participants(i64::try_from(doc.dishes.len()).unwrap_or(i64::MAX));

        let mut plan = self
            .store(
                &target,
                doc,
                submission_cnt,
                input.payload.to_string(),
                "",
                "",
            )
            .await?;
        plan.submission_cnt = Some(submission_cnt);

        Ok(plan)
    }
}
